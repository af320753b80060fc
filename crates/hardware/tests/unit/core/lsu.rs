//! # Load/Store Unit Tests

use mcsim_core::common::UNDEFINED_SENTINEL;
use mcsim_core::core::arch::regbank::RegValues;
use mcsim_core::core::pipeline::control::lookup;
use mcsim_core::core::pipeline::signals::LsuSrc;
use mcsim_core::core::units::lsu::Lsu;
use mcsim_core::isa::Opcode;
use mcsim_core::soc::{Clocked, SramPort};

const REGS: RegValues = RegValues {
    rd: 1,
    rs: 40,
    rt: 3,
};

#[test]
fn test_operand_sources() {
    assert_eq!(Lsu::operand(LsuSrc::Link, REGS, 16, 100), 32);
    assert_eq!(Lsu::operand(LsuSrc::RegS, REGS, 16, 100), 40);
    assert_eq!(Lsu::operand(LsuSrc::Alu, REGS, 16, 100), 16);
    assert_eq!(Lsu::operand(LsuSrc::PcPlus4, REGS, 16, 100), 100);
    assert_eq!(Lsu::operand(LsuSrc::None, REGS, 16, 100), UNDEFINED_SENTINEL);
}

#[test]
fn test_port_idles_when_disabled() {
    let port = Lsu::port(false, lookup(Opcode::St).lsu, REGS, 16, 100);
    assert_eq!(port, SramPort::default());
}

#[test]
fn test_port_idles_for_non_memory_opcode() {
    let port = Lsu::port(true, lookup(Opcode::Add).lsu, REGS, 16, 100);
    assert_eq!(port, SramPort::default());
}

#[test]
fn test_load_drives_read_address() {
    let port = Lsu::port(true, lookup(Opcode::Ld).lsu, REGS, 16, 100);
    assert_eq!(port, SramPort::read(16));
}

#[test]
fn test_store_drives_address_and_data() {
    let port = Lsu::port(true, lookup(Opcode::St).lsu, REGS, 16, 100);
    assert_eq!(port, SramPort::write(16, 40));

    let call = Lsu::port(true, lookup(Opcode::Call).lsu, REGS, 16, 100);
    assert_eq!(call, SramPort::write(32, 100));
}

#[test]
fn test_store_then_load_round_trip() {
    let mut lsu = Lsu::new(64);
    lsu.do_function(SramPort::write(24, 77));
    lsu.on_clock_edge();
    lsu.do_function(SramPort::read(24));
    lsu.on_clock_edge();
    assert_eq!(lsu.out(), 77);
    assert_eq!(lsu.dmem().peek(24), 77);
}

#[test]
fn test_reset_keeps_data() {
    let mut lsu = Lsu::new(64);
    lsu.load(&[5, 6]).expect("fits");
    lsu.do_function(SramPort::read(8));
    lsu.on_clock_edge();
    assert_eq!(lsu.out(), 6);
    lsu.reset();
    assert_eq!(lsu.out(), 0);
    assert_eq!(lsu.dmem().cells()[..2], [5, 6]);
}
