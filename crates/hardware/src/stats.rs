//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Counts by category (ALU, float, load, store, branch, system).
//! 3. **Control flow:** Branches retired and branches that left the sequential path.
//! 4. **Memory:** Data memory reads and writes issued by the load/store unit.

use std::fmt::Write as _;
use std::time::Instant;

use crate::isa::opcodes::OpClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks elapsed.
    pub cycles: u64,
    /// Number of instructions that completed their writeback tick.
    pub instructions_retired: u64,

    /// Count of integer arithmetic, logic, shift, and move instructions retired.
    pub inst_alu: u64,
    /// Count of double-precision instructions retired.
    pub inst_float: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch, call, and return instructions retired.
    pub inst_branch: u64,
    /// Count of I/O stub and halt instructions retired.
    pub inst_system: u64,

    /// Branches whose PC write differed from the next sequential address.
    pub branches_taken: u64,

    /// Data memory reads issued.
    pub dmem_reads: u64,
    /// Data memory writes issued.
    pub dmem_writes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_float: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            branches_taken: 0,
            dmem_reads: 0,
            dmem_writes: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "memory"];

impl SimStats {
    /// Records one retired instruction.
    ///
    /// # Arguments
    ///
    /// * `class` - Category of the retired opcode.
    /// * `taken` - Whether the instruction redirected the PC off the sequential path.
    pub fn record_retire(&mut self, class: OpClass, taken: bool) {
        self.instructions_retired += 1;
        match class {
            OpClass::Alu => self.inst_alu += 1,
            OpClass::Float => self.inst_float += 1,
            OpClass::Load => self.inst_load += 1,
            OpClass::Store => self.inst_store += 1,
            OpClass::Branch => self.inst_branch += 1,
            OpClass::System => self.inst_system += 1,
        }
        if taken {
            self.branches_taken += 1;
        }
    }

    /// Cycles per retired instruction, or 0 before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty slice
    /// to render all sections.
    pub fn report(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / instr) * 100.0;
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "MICROCODED PROCESSOR SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.float", self.inst_float),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count));
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("branch") {
            let _ = writeln!(out, "CONTROL FLOW");
            let _ = writeln!(out, "  branch.retired         {}", self.inst_branch);
            let _ = writeln!(out, "  branch.taken           {}", self.branches_taken);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("memory") {
            let _ = writeln!(out, "DATA MEMORY");
            let _ = writeln!(out, "  dmem.reads             {}", self.dmem_reads);
            let _ = writeln!(out, "  dmem.writes            {}", self.dmem_writes);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
