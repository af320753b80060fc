//! # Processor End-to-End Tests
//!
//! Small programs run on the composite processor. One instruction takes five
//! ticks (Fetch, Decode, Execute, Memory, Writeback) and its register and PC
//! writes commit on the edge of its Writeback tick.

use mcsim_core::common::{GUARD_REG, UNDEFINED_SENTINEL};
use mcsim_core::config::Config;
use mcsim_core::core::pipeline::signals::Stage;
use mcsim_core::isa::asm::assemble;
use mcsim_core::isa::{Instr, Opcode};
use pretty_assertions::assert_eq;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::{TICKS_PER_INSTR, TestContext};

fn run_source(src: &str) -> TestContext {
    let instrs = assemble(src).expect("valid source");
    let mut ctx = TestContext::new().load_program(&instrs);
    let _ = ctx.sim.run_until_halt().expect("program halts");
    ctx
}

#[test]
fn test_scenario_add_immediate_chain() {
    let image = ProgramBuilder::new().addi(0, 0, 5).addi(1, 0, 5).build();
    let mut ctx = TestContext::new().load_image(&image);

    ctx.run_instrs(1);
    assert_eq!(ctx.get_reg(0), 5);
    assert_eq!(ctx.get_reg(1), 0);

    ctx.run_instrs(1);
    assert_eq!(ctx.get_reg(1), 10);
}

#[test]
fn test_scenario_shift_immediate() {
    let image = ProgramBuilder::new()
        .addi(0, 0, 8)
        .op(Opcode::Shli, 0, 0, 0, 3)
        .build();
    let mut ctx = TestContext::new().load_image(&image);
    ctx.run_instrs(2);
    assert_eq!(ctx.get_reg(0), 64);
}

#[test]
fn test_scenario_load_from_data_memory() {
    let image = ProgramBuilder::new().ld(1, 0, 8).build();
    let mut ctx = TestContext::new().load_image(&image).with_data(&[1, 2, 3, 4]);
    ctx.run_instrs(1);
    assert_eq!(ctx.get_reg(1), 2);
}

#[test]
fn test_result_commits_on_writeback_edge() {
    let image = ProgramBuilder::new().addi(3, 0, 9).build();
    let mut ctx = TestContext::new().load_image(&image);
    ctx.run(TICKS_PER_INSTR - 1);
    assert_eq!(ctx.cpu().stage(), Stage::Writeback);
    assert_eq!(ctx.get_reg(3), 0);
    ctx.run(1);
    assert_eq!(ctx.get_reg(3), 9);
    assert_eq!(ctx.cpu().stage(), Stage::Fetch);
}

#[test]
fn test_pc_advances_four_per_instruction() {
    let image = ProgramBuilder::new()
        .addi(1, 1, 1)
        .addi(1, 1, 1)
        .addi(1, 1, 1)
        .addi(1, 1, 1)
        .build();
    let mut ctx = TestContext::new().load_image(&image);
    for k in 1..=4u64 {
        for _ in 0..TICKS_PER_INSTR - 1 {
            ctx.run(1);
            assert_eq!(ctx.cpu().pc(), 4 * (k - 1));
        }
        ctx.run(1);
        assert_eq!(ctx.cpu().pc(), 4 * k);
    }
    assert_eq!(ctx.get_reg(1), 4);
}

#[test]
fn test_register_ops() {
    let ctx = run_source(
        "addi r1, r0, 12
         addi r2, r0, 5
         add r3, r1, r2
         sub r4, r1, r2
         mul r5, r1, r2
         div r6, r1, r2
         and r7, r1, r2
         or r8, r1, r2
         xor r9, r1, r2
         not r10, r0
         shr r11, r1, r2
         shl r12, r2, r2
         subi r13, r1, 2
         mov r14, r1
         halt",
    );
    let expected = [
        (3, 17),
        (4, 7),
        (5, 60),
        (6, 2),
        (7, 4),
        (8, 13),
        (9, 9),
        (10, u64::MAX),
        (11, 0),
        (12, 160),
        (13, 10),
        (14, 12),
    ];
    for (reg, val) in expected {
        assert_eq!(ctx.get_reg(reg), val, "r{reg}");
    }
}

#[test]
fn test_move_immediate_sets_high_bits() {
    let ctx = run_source("addi r1, r0, 5\nmovi r1, 0xabc\nhalt");
    assert_eq!(ctx.get_reg(1), 0xABC0_0000_0000_0005);
}

#[test]
fn test_divide_by_zero_yields_sentinel() {
    let ctx = run_source("addi r1, r0, 7\ndiv r2, r1, r3\nhalt");
    assert_eq!(ctx.get_reg(2), UNDEFINED_SENTINEL);
}

#[test]
fn test_float_ops_on_bit_patterns() {
    let instrs = assemble("addf r3, r1, r2\nmulf r4, r1, r2\nhalt").expect("valid source");
    let mut ctx = TestContext::new().load_program(&instrs);
    ctx.set_reg(1, 1.5_f64.to_bits());
    ctx.set_reg(2, 4.0_f64.to_bits());
    let _ = ctx.sim.run_until_halt().expect("halts");
    assert_eq!(f64::from_bits(ctx.get_reg(3)), 5.5);
    assert_eq!(f64::from_bits(ctx.get_reg(4)), 6.0);
}

#[test]
fn test_store_then_load() {
    let ctx = run_source(
        "addi r2, r0, 8
         st r0, r2, 16
         ld r3, r0, 24
         halt",
    );
    assert_eq!(ctx.cpu().lsu().dmem().peek(24), 8);
    assert_eq!(ctx.get_reg(3), 8);
    assert_eq!(ctx.sim.stats().dmem_writes, 1);
    assert_eq!(ctx.sim.stats().dmem_reads, 1);
}

#[test]
fn test_branch_not_zero_taken() {
    let ctx = run_source(
        "addi r1, r0, 1
         addi r2, r0, 16
         brnz r2, r1
         addi r3, r0, 99
         addi r4, r0, 7
         halt",
    );
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 7);
    assert_eq!(ctx.sim.stats().branches_taken, 1);
}

#[test]
fn test_branch_not_zero_falls_through() {
    let ctx = run_source(
        "addi r2, r0, 16
         addi r0, r0, 0
         brnz r2, r1
         addi r3, r0, 99
         addi r4, r0, 7
         halt",
    );
    assert_eq!(ctx.get_reg(3), 99);
    assert_eq!(ctx.get_reg(4), 7);
    assert_eq!(ctx.sim.stats().branches_taken, 0);
    assert_eq!(ctx.sim.stats().inst_branch, 1);
}

#[test]
fn test_branch_greater_than_is_signed() {
    let ctx = run_source(
        "addi r1, r0, 1
         not r2, r0
         addi r5, r0, 24
         brgt r5, r2, r1
         brgt r5, r1, r2
         addi r3, r0, 1
         halt",
    );
    // r2 = -1, so the first compare (-1 > 1) falls through and the second jumps.
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.sim.stats().branches_taken, 1);
}

#[test]
fn test_branch_immediate_is_absolute() {
    let ctx = run_source(
        "bri 8
         addi r1, r0, 1
         addi r2, r0, 2
         halt",
    );
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 2);
}

#[test]
fn test_branch_register_and_relative() {
    let ctx = run_source(
        "addi r1, r0, 8
         brr r1
         addi r2, r0, 1
         addi r3, r0, 3
         addi r6, r0, 32
         br r6
         addi r4, r0, 4
         addi r4, r0, 4
         addi r5, r0, 5
         halt",
    );
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 3);
    assert_eq!(ctx.get_reg(4), 0);
    assert_eq!(ctx.get_reg(5), 5);
}

#[test]
fn test_call_and_return_through_link_slot() {
    let ctx = run_source(
        "addi r31, r0, 64
         addi r5, r0, 24
         call r5
         addi r6, r0, 1
         halt
         halt
         addi r7, r0, 2
         ret",
    );
    assert_eq!(ctx.get_reg(6), 1);
    assert_eq!(ctx.get_reg(7), 2);
    assert_eq!(ctx.cpu().lsu().dmem().peek(56), 12);
    assert_eq!(ctx.sim.stats().inst_branch, 2);
    assert_eq!(ctx.sim.stats().branches_taken, 2);
}

#[test]
fn test_halt_stops_the_run() {
    let image = ProgramBuilder::new().halt().halt().build();
    let mut ctx = TestContext::new().load_image(&image);
    ctx.run(100);
    assert!(ctx.sim.is_halted());
    assert_eq!(ctx.sim.clock(), TICKS_PER_INSTR);

    let regs = ctx.cpu().regs();
    ctx.run(10);
    assert_eq!(ctx.sim.clock(), TICKS_PER_INSTR);
    assert_eq!(ctx.cpu().regs(), regs);
}

#[test]
fn test_halt_in_last_slot_of_full_memory() {
    let mut config = Config::default();
    config.memory.imem_bytes = 16;
    let image = ProgramBuilder::new()
        .addi(1, 0, 1)
        .addi(2, 0, 2)
        .addi(3, 0, 3)
        .halt()
        .build();
    assert_eq!(image.len(), 2);
    let mut ctx = TestContext::with_config(config).load_image(&image);

    assert_eq!(ctx.sim.run_until_halt(), Ok(4 * TICKS_PER_INSTR));
    assert_eq!(ctx.get_reg(3), 3);
    assert_eq!(ctx.cpu().pc(), 16);
}

#[test]
fn test_io_stubs_have_no_effect() {
    let ctx = run_source("in\nout\naddi r1, r0, 1\nhalt");
    assert_eq!(ctx.get_reg(1), 1);
    assert_eq!(ctx.sim.stats().inst_system, 3);
}

#[test]
fn test_guard_register_never_changes() {
    let ctx = run_source(
        "addi r1, r0, 3
         bri 8
         not r2, r0
         st r1, r1, 0
         halt",
    );
    assert_eq!(ctx.cpu().regs()[GUARD_REG], 0);
}

#[test]
fn test_settle_is_pure() {
    let image = ProgramBuilder::new().addi(1, 0, 5).build();
    let mut ctx = TestContext::new().load_image(&image);
    ctx.run(2);
    let first = ctx.cpu().settle();
    let second = ctx.cpu().settle();
    assert_eq!(first, second);
    assert_eq!(first.alu_operands, (0, 5));
    assert_eq!(first.decoded.instr, Instr::new(Opcode::Addi, 1, 0, 0, 5));
    assert_eq!(ctx.sim.clock(), 2);
}

#[test]
fn test_statistics_on_retire() {
    let ctx = run_source("addi r1, r0, 5\nld r2, r0, 0\naddf r3, r1, r1\nhalt");
    let stats = ctx.sim.stats();
    assert_eq!(stats.cycles, 4 * TICKS_PER_INSTR);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_float, 1);
    assert_eq!(stats.inst_system, 1);
    assert!((stats.cpi() - 5.0).abs() < f64::EPSILON);
}
