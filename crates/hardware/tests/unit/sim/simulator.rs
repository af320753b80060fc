//! # Simulator Driver Tests

use mcsim_core::Simulator;
use mcsim_core::common::{ConfigError, ImageError, SimError};
use mcsim_core::config::Config;
use mcsim_core::core::pipeline::signals::Stage;
use mcsim_core::isa::asm::assemble_image;
use pretty_assertions::assert_eq;

fn traced(fetch_only: bool) -> Config {
    let mut config = Config::default();
    config.general.trace = true;
    config.general.trace_fetch_only = fetch_only;
    config
}

fn sim_with(config: Config, src: &str) -> Simulator {
    let mut sim = Simulator::new(config).expect("valid config");
    sim.load_program(&assemble_image(src).expect("valid source"))
        .expect("fits");
    sim
}

#[test]
fn test_run_until_halt_returns_cycles() {
    let mut sim = sim_with(Config::default(), "addi r1, r0, 5\nhalt");
    assert_eq!(sim.run_until_halt(), Ok(10));
    assert!(sim.is_halted());
    assert_eq!(sim.cpu().reg(1), 5);
}

#[test]
fn test_cycle_limit() {
    let mut config = Config::default();
    config.general.max_cycles = 50;
    let mut sim = sim_with(config, "bri 0\nhalt");
    assert_eq!(
        sim.run_until_halt(),
        Err(SimError::CycleLimit { cycles: 50, pc: 0 })
    );
    assert!(!sim.is_halted());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.memory.dmem_bytes = 100;
    assert!(matches!(
        Simulator::new(config),
        Err(ConfigError::BadCapacity { value: 100, .. })
    ));
}

#[test]
fn test_oversized_program_is_rejected() {
    let mut config = Config::default();
    config.memory.imem_bytes = 8;
    let mut sim = Simulator::new(config).expect("valid config");
    assert!(matches!(
        sim.load_program(&[0, 0]),
        Err(ImageError::TooLarge { cells: 2, capacity: 1, .. })
    ));
}

#[test]
fn test_fetch_only_traces_one_per_instruction() {
    let mut sim = sim_with(traced(true), "addi r1, r0, 5\nhalt");
    let _ = sim.run_until_halt().expect("halts");
    let traces = sim.traces();
    assert_eq!(traces.len(), 2);

    assert_eq!(traces[0].clock, 0);
    assert_eq!(traces[0].stage, Stage::Fetch);
    assert_eq!(traces[0].pc, 0);
    assert_eq!(traces[0].disasm, "addi r1, r0, 5");

    assert_eq!(traces[1].clock, 5);
    assert_eq!(traces[1].pc, 4);
    assert_eq!(traces[1].disasm, "halt");
    assert_eq!(traces[1].regs[1], 5);
}

#[test]
fn test_full_trace_records_every_tick() {
    let mut sim = sim_with(traced(false), "addi r1, r0, 5\nhalt");
    let _ = sim.run_until_halt().expect("halts");
    let traces = sim.take_traces();
    assert_eq!(traces.len(), 10);
    assert!(sim.traces().is_empty());

    let wb = &traces[4];
    assert_eq!(wb.stage, Stage::Writeback);
    assert!(wb.enables.writeback);
    assert_eq!(wb.alu_out, 5);
    assert_eq!(wb.reg_write, Some(5));
    assert_eq!(wb.pc_write, Some(4));
    assert_eq!(traces[9].pc_write, Some(8));
}

#[test]
fn test_tracing_disabled_records_nothing() {
    let mut sim = sim_with(Config::default(), "halt");
    let _ = sim.run_until_halt().expect("halts");
    assert!(sim.traces().is_empty());
}

#[test]
fn test_observe_does_not_advance() {
    let mut sim = sim_with(Config::default(), "addi r1, r0, 5\nhalt");
    sim.run(3);
    let a = sim.observe();
    let b = sim.observe();
    assert_eq!(a, b);
    assert_eq!(a.clock, 3);
    assert_eq!(a.stage, Stage::Memory);
    assert_eq!(sim.clock(), 3);
}

#[test]
fn test_trace_serializes_to_json() {
    let sim = sim_with(Config::default(), "addi r1, r0, 5\nhalt");
    let json = serde_json::to_value(sim.observe()).expect("serializes");
    assert_eq!(json["stage"], "Fetch");
    assert_eq!(json["disasm"], "addi r1, r0, 5");
    assert_eq!(json["regs"].as_array().map(Vec::len), Some(33));
}

#[test]
fn test_trace_display_is_one_line() {
    let mut sim = sim_with(Config::default(), "addi r1, r0, 5\nhalt");
    sim.run(5);
    let line = sim.observe().to_string();
    assert!(!line.contains('\n'));
    assert!(line.contains("halt"));
    assert!(line.contains("r1=0x5"));
}

#[test]
fn test_reset_restarts_program() {
    let mut sim = sim_with(traced(true), "addi r1, r1, 5\nhalt");
    let _ = sim.run_until_halt().expect("halts");
    assert_eq!(sim.cpu().reg(1), 5);

    sim.reset();
    assert_eq!(sim.clock(), 0);
    assert!(!sim.is_halted());
    assert!(sim.traces().is_empty());
    assert_eq!(sim.cpu().pc(), 0);
    assert_eq!(sim.cpu().reg(1), 0);
    assert_eq!(sim.stats().instructions_retired, 0);

    assert_eq!(sim.run_until_halt(), Ok(10));
    assert_eq!(sim.cpu().reg(1), 5);
}

#[test]
fn test_step_after_halt_is_noop() {
    let mut sim = sim_with(traced(false), "halt");
    let _ = sim.run_until_halt().expect("halts");
    let recorded = sim.traces().len();
    sim.step();
    assert_eq!(sim.clock(), 5);
    assert_eq!(sim.traces().len(), recorded);
}
