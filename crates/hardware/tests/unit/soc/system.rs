//! # Scheduler Tests
//!
//! Exercises the two-phase tick loop with a small counting device.

use mcsim_core::soc::{Clocked, Device, Reg, SimControl, Signal, System};

/// Counts ticks and requests a halt when the count reaches `stop_at`.
#[derive(Debug)]
struct Counter {
    count: Reg<u64>,
    stop_at: u64,
    settled: Vec<u64>,
}

impl Counter {
    fn new(stop_at: u64) -> Self {
        Self {
            count: Reg::new(0),
            stop_at,
            settled: Vec::new(),
        }
    }
}

impl Clocked for Counter {
    fn on_clock_edge(&mut self) {
        self.count.on_clock_edge();
    }
}

impl Device for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn do_function(&mut self, ctl: &mut SimControl) {
        let cur = self.count.read();
        self.settled.push(cur);
        self.count.write(cur + 1);
        if cur + 1 == self.stop_at {
            ctl.stop();
        }
    }
}

#[test]
fn test_run_advances_clock_and_devices() {
    let mut system = System::new();
    system.register([Counter::new(u64::MAX)]);
    system.run(4);
    assert_eq!(system.clock(), 4);
    assert_eq!(system.devices()[0].count.read(), 4);
}

#[test]
fn test_do_function_sees_previous_commit() {
    let mut system = System::new();
    system.register([Counter::new(u64::MAX)]);
    system.run(3);
    assert_eq!(system.devices()[0].settled, vec![0, 1, 2]);
}

#[test]
fn test_stop_completes_current_edge_and_blocks_further_ticks() {
    let mut system = System::new();
    system.register([Counter::new(3)]);
    system.run(10);
    assert!(system.is_stopped());
    assert_eq!(system.clock(), 3);
    assert_eq!(system.devices()[0].count.read(), 3);

    system.run(5);
    assert_eq!(system.clock(), 3);
    assert_eq!(system.devices()[0].count.read(), 3);
}

#[test]
fn test_external_stop() {
    let mut system: System<Counter> = System::new();
    system.register([Counter::new(u64::MAX)]);
    system.stop();
    system.run(2);
    assert_eq!(system.clock(), 0);
}

#[test]
fn test_reset_clears_everything() {
    let mut system = System::new();
    system.register([Counter::new(1)]);
    system.run(2);
    assert!(system.is_stopped());
    system.reset();
    assert!(!system.is_stopped());
    assert_eq!(system.clock(), 0);
    assert!(system.devices().is_empty());
}

#[test]
fn test_independent_systems_do_not_interfere() {
    let mut a = System::new();
    let mut b = System::new();
    a.register([Counter::new(u64::MAX)]);
    b.register([Counter::new(u64::MAX)]);
    a.run(5);
    b.run(2);
    assert_eq!(a.clock(), 5);
    assert_eq!(b.clock(), 2);
}

#[test]
fn test_boxed_devices_share_a_system() {
    let mut system: System<Box<dyn Device>> = System::new();
    system.register([
        Box::new(Counter::new(u64::MAX)) as Box<dyn Device>,
        Box::new(Counter::new(2)),
    ]);
    system.run(10);
    assert_eq!(system.clock(), 2);
    assert_eq!(system.devices()[0].name(), "counter");
}
