//! # Fetch Unit Tests

use mcsim_core::core::pipeline::stages::Fetcher;
use mcsim_core::isa::{Instr, Opcode, build_image};
use mcsim_core::soc::Clocked;

fn program() -> (Vec<Instr>, Fetcher) {
    let instrs: Vec<Instr> = (0..4)
        .map(|i| Instr::new(Opcode::Addi, i, 0, 0, u16::from(i) + 1))
        .collect();
    let mut fetcher = Fetcher::new(64);
    fetcher.load(&build_image(&instrs)).expect("fits");
    (instrs, fetcher)
}

#[test]
fn test_first_instruction_valid_after_load() {
    let (instrs, fetcher) = program();
    assert_eq!(fetcher.pc(), 0);
    assert_eq!(fetcher.pc_plus_4(), 4);
    assert_eq!(fetcher.instruction(), instrs[0].as_u32());
}

#[test]
fn test_pc_holds_without_override() {
    let (instrs, mut fetcher) = program();
    for _ in 0..3 {
        fetcher.do_function(true, None, true);
        fetcher.on_clock_edge();
    }
    assert_eq!(fetcher.pc(), 0);
    assert_eq!(fetcher.instruction(), instrs[0].as_u32());
}

#[test]
fn test_override_moves_pc_and_instruction_together() {
    let (instrs, mut fetcher) = program();
    for (idx, addr) in [4u64, 8, 12].into_iter().enumerate() {
        assert_eq!(fetcher.fetch_addr(Some(addr)), addr);
        fetcher.do_function(false, Some(addr), true);
        fetcher.on_clock_edge();
        assert_eq!(fetcher.pc(), addr);
        assert_eq!(fetcher.instruction(), instrs[idx + 1].as_u32());
    }
}

#[test]
fn test_no_prefetch_holds_memory_output() {
    let (instrs, mut fetcher) = program();
    fetcher.do_function(false, Some(4), false);
    fetcher.on_clock_edge();
    assert_eq!(fetcher.pc(), 4);
    assert_eq!(fetcher.imem().out(), build_image(&instrs)[0]);
}

#[test]
fn test_no_prefetch_past_memory_end_is_not_fatal() {
    let (_, mut fetcher) = program();
    fetcher.do_function(false, Some(64), false);
    fetcher.on_clock_edge();
    assert_eq!(fetcher.pc(), 64);
}

#[test]
fn test_fetch_addr_defaults_to_pc() {
    let (_, fetcher) = program();
    assert_eq!(fetcher.fetch_addr(None), 0);
}

#[test]
fn test_reset_returns_to_zero_and_reprimes() {
    let (instrs, mut fetcher) = program();
    fetcher.do_function(false, Some(12), true);
    fetcher.on_clock_edge();
    fetcher.reset();
    assert_eq!(fetcher.pc(), 0);
    assert_eq!(fetcher.instruction(), instrs[0].as_u32());
    assert_eq!(fetcher.imem().peek(8), build_image(&instrs)[1]);
}

#[test]
#[should_panic(expected = "imem")]
fn test_fetch_past_memory_is_fatal() {
    let (_, mut fetcher) = program();
    fetcher.do_function(true, Some(64), true);
}
