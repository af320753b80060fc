//! # Register Bank Tests
//!
//! Tests for the 33-entry register file and its guard register.

use mcsim_core::common::{GUARD_REG, NUM_REGS};
use mcsim_core::core::arch::regbank::{RegBank, RegIds};
use mcsim_core::soc::Clocked;

#[test]
fn test_new_initializes_to_zero_with_guard_sentinel() {
    let bank = RegBank::new();
    let snapshot = bank.snapshot();
    assert_eq!(snapshot.len(), NUM_REGS);
    assert!(snapshot.iter().all(|&v| v == 0));
    assert_eq!(bank.get(GUARD_REG), 0);
}

#[test]
fn test_write_commits_on_edge() {
    let mut bank = RegBank::new();
    bank.do_function(5, Some(123));
    assert_eq!(bank.get(5), 0);
    bank.on_clock_edge();
    assert_eq!(bank.get(5), 123);
}

#[test]
fn test_absent_write_is_ignored() {
    let mut bank = RegBank::new();
    bank.set(3, 9);
    bank.do_function(3, None);
    bank.on_clock_edge();
    assert_eq!(bank.get(3), 9);
}

#[test]
fn test_read_ports() {
    let mut bank = RegBank::new();
    bank.set(1, 11);
    bank.set(2, 22);
    bank.set(31, 99);
    let vals = bank.read(RegIds {
        rd: 31,
        rs: 2,
        rt: GUARD_REG,
    });
    assert_eq!((vals.rd, vals.rs, vals.rt), (99, 22, 0));
}

#[test]
fn test_register_zero_is_general_purpose() {
    let mut bank = RegBank::new();
    bank.do_function(0, Some(5));
    bank.on_clock_edge();
    assert_eq!(bank.get(0), 5);
}

#[test]
fn test_guard_survives_many_writes() {
    let mut bank = RegBank::new();
    for idx in 0..32 {
        bank.do_function(idx, Some(idx as u64 + 1));
        bank.on_clock_edge();
    }
    assert_eq!(bank.get(GUARD_REG), 0);
    assert_eq!(bank.get(31), 32);
}

#[test]
fn test_reset_restores_power_on_values() {
    let mut bank = RegBank::new();
    bank.set(7, 70);
    bank.do_function(8, Some(80));
    bank.reset();
    bank.on_clock_edge();
    assert!(bank.snapshot().iter().all(|&v| v == 0));
}

#[test]
#[should_panic(expected = "regbank")]
fn test_write_to_guard_is_fatal() {
    let mut bank = RegBank::new();
    bank.do_function(GUARD_REG, Some(1));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_read_past_guard_is_fatal() {
    let bank = RegBank::new();
    let _ = bank.get(NUM_REGS);
}

#[test]
#[should_panic(expected = "cannot preset")]
fn test_preset_guard_is_fatal() {
    let mut bank = RegBank::new();
    bank.set(GUARD_REG, 1);
}
