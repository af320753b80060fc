//! Microcoded processor simulator CLI.
//!
//! This binary is a thin driver over `mcsim-core`. It performs:
//! 1. **Run:** Load a program (raw image or assembly) and optional data image, run to halt,
//!    and print per-cycle traces and statistics.
//! 2. **Assemble:** Translate an assembly source file into a raw image file.
//! 3. **Disassemble:** List the instructions of a raw image file.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mcsim_core::config::Config;
use mcsim_core::isa::disasm::disassemble_word;
use mcsim_core::isa::instruction::select_half;
use mcsim_core::sim::{Simulator, loader};

#[derive(Parser, Debug)]
#[command(
    name = "mcsim",
    author,
    version,
    about = "Cycle-accurate microcoded processor simulator",
    long_about = "Run a program on the five-stage microcoded processor, or convert between assembly and raw images.\n\nExamples:\n  mcsim run prog.s --trace\n  mcsim run prog.bin --data data.bin --json\n  mcsim asm prog.s -o prog.bin\n  mcsim disasm prog.bin"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts.
    Run {
        /// Program: raw image of 64-bit cells, or `.s`/`.asm` source.
        program: PathBuf,

        /// Raw data image loaded into data memory.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override `general.max_cycles`.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print one trace line per instruction (Fetch ticks).
        #[arg(long)]
        trace: bool,

        /// Print a trace line for every tick (implies --trace).
        #[arg(long)]
        trace_all: bool,

        /// Emit traces as JSON lines instead of text.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (summary, instruction_mix, branch, memory).
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// Assemble a source file into a raw image.
    Asm {
        /// Assembly source.
        source: PathBuf,

        /// Output image path.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Disassemble a raw image.
    Disasm {
        /// Raw image of 64-bit cells.
        image: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            program,
            data,
            config,
            max_cycles,
            trace,
            trace_all,
            json,
            stats,
        } => cmd_run(&RunArgs {
            program,
            data,
            config,
            max_cycles,
            trace: trace || trace_all,
            trace_all,
            json,
            stats,
        }),
        Commands::Asm { source, output } => cmd_asm(&source, &output),
        Commands::Disasm { image } => cmd_disasm(&image),
    }
}

/// Options of the `run` subcommand.
struct RunArgs {
    program: PathBuf,
    data: Option<PathBuf>,
    config: Option<PathBuf>,
    max_cycles: Option<u64>,
    trace: bool,
    trace_all: bool,
    json: bool,
    stats: Vec<String>,
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows the `-v` count, starting at `warn`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints `msg` and exits with status 1.
fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {msg}");
    process::exit(1);
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn build_config(args: &RunArgs) -> Config {
    let mut config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let json = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format_args!("could not read {}: {e}", path.display())));
            Config::from_json(&json).unwrap_or_else(|e| fail(e))
        }
        None => Config::default(),
    };
    if let Some(limit) = args.max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.trace = args.trace;
    config.general.trace_fetch_only = !args.trace_all;
    config
}

/// Runs a program to halt, printing traces and statistics.
fn cmd_run(args: &RunArgs) {
    let config = build_config(args);
    println!("Configuration:");
    println!(
        "  IMEM: {} B  DMEM: {} B  Max cycles: {}  Trace: {}",
        config.memory.imem_bytes,
        config.memory.dmem_bytes,
        config.general.max_cycles,
        config.general.trace
    );
    println!();

    let mut sim = Simulator::new(config).unwrap_or_else(|e| fail(e));

    println!("[*] Program: {}", args.program.display());
    let program = loader::load_program_file(&args.program).unwrap_or_else(|e| fail(e));
    sim.load_program(&program).unwrap_or_else(|e| fail(e));
    info!(path = %args.program.display(), cells = program.len(), "program loaded");
    if let Some(path) = &args.data {
        println!("[*] Data: {}", path.display());
        let data = loader::load_image_file(path).unwrap_or_else(|e| fail(e));
        sim.load_data(&data).unwrap_or_else(|e| fail(e));
        info!(path = %path.display(), cells = data.len(), "data loaded");
    }

    let outcome = sim.run_until_halt();

    for trace in sim.take_traces() {
        if args.json {
            match serde_json::to_string(&trace) {
                Ok(line) => println!("{line}"),
                Err(e) => fail(e),
            }
        } else {
            println!("{trace}");
        }
    }

    let regs = sim.cpu().regs();
    println!();
    for (idx, chunk) in regs.chunks(4).enumerate() {
        let line: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(off, val)| format!("r{:<2}={val:#018x}", idx * 4 + off))
            .collect();
        println!("{}", line.join(" "));
    }

    match outcome {
        Ok(cycles) => {
            info!(cycles, retired = sim.stats().instructions_retired, "halted");
            println!("\n[*] Halted after {cycles} cycles");
            sim.stats().print_sections(&args.stats);
        }
        Err(e) => {
            error!(pc = sim.cpu().pc(), "run did not halt");
            eprintln!("\n[!] {e}");
            sim.stats().print_sections(&args.stats);
            process::exit(1);
        }
    }
}

/// Assembles `source` into a raw image at `output`.
fn cmd_asm(source: &Path, output: &Path) {
    let cells = loader::load_program_file(source).unwrap_or_else(|e| fail(e));
    loader::write_image_file(output, &cells).unwrap_or_else(|e| fail(e));
    println!(
        "[*] {} -> {} ({} cells)",
        source.display(),
        output.display(),
        cells.len()
    );
}

/// Lists every instruction in a raw image.
fn cmd_disasm(image: &Path) {
    let cells = loader::load_image_file(image).unwrap_or_else(|e| fail(e));
    for (idx, cell) in cells.iter().enumerate() {
        for addr in [idx as u64 * 8, idx as u64 * 8 + 4] {
            let word = select_half(*cell, addr);
            println!("{addr:#06x}: {word:08x}  {}", disassemble_word(word));
        }
    }
}
