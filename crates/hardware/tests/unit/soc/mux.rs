//! # Multiplexer Tests

use mcsim_core::soc::{Mux, Reg, Signal, Wire};
use rstest::rstest;

#[rstest]
#[case(0, 10)]
#[case(1, 20)]
#[case(2, 30)]
fn test_select_forwards_port(#[case] sel: usize, #[case] expected: u64) {
    let mux = Mux::new("test.mux", 3);
    assert_eq!(mux.select(&[10u64, 20, 30], sel), expected);
}

#[test]
fn test_select_signal_reads_selected_source() {
    let mux = Mux::new("test.sig", 2);
    let reg = Reg::new(5u64);
    let wire = Wire::new(|| 9u64);
    let ports: [&dyn Signal<u64>; 2] = [&reg, &wire];
    assert_eq!(mux.select_signal(&ports, 0), 5);
    assert_eq!(mux.select_signal(&ports, 1), 9);
}

#[test]
fn test_accessors() {
    let mux = Mux::new("alu.p0", 6);
    assert_eq!(mux.name(), "alu.p0");
    assert_eq!(mux.width(), 6);
}

#[test]
#[should_panic(expected = "test.mux")]
fn test_selector_out_of_range_is_fatal() {
    let mux = Mux::new("test.mux", 2);
    let _ = mux.select(&[1u64, 2], 2);
}

#[test]
#[should_panic(expected = "expected 3")]
fn test_port_count_mismatch_is_fatal() {
    let mux = Mux::new("test.mux", 3);
    let _ = mux.select(&[1u64, 2], 0);
}
