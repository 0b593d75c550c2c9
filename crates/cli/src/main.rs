//! Processor and cache simulator CLI.
//!
//! This binary runs one machine-code program and reports what the cache did. It performs:
//! 1. **Setup:** Reads the program and cache geometry from arguments, a JSON
//!    config file, or interactive prompts.
//! 2. **Run:** Executes until `halt`, printing one line per cache transfer.
//! 3. **Report:** Prints the halt notice and instruction count, and optionally
//!    the final machine state and statistics.

mod prompt;

use std::error::Error;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{CacheConfig, Config, GeneralConfig};
use cachesim_core::isa::disasm::disassemble_image;
use cachesim_core::sim::{ProgramImage, RunSummary, Simulator, load_program};
use cachesim_core::trace::{NullSink, TraceSink, WriterSink};

use crate::prompt::Prompter;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Word-addressed processor and write-back cache simulator",
    long_about = "Run a machine-code program on an eight-opcode processor behind a set-associative, write-back, LRU cache.\n\nEvery transfer between processor, cache and memory is printed as it happens. Values left out on the command line are prompted for.\n\nExamples:\n  cachesim program.mc 4 2 1\n  cachesim program.mc --config cache.json --stats\n  cachesim program.mc --disasm"
)]
struct Cli {
    /// Machine-code program, one decimal word per line.
    program: Option<PathBuf>,

    /// Block size in words (1-256, power of two).
    block_size: Option<usize>,

    /// Number of sets (1 or greater, power of two).
    num_sets: Option<usize>,

    /// Blocks per set (1 or greater).
    associativity: Option<usize>,

    /// JSON configuration file. Positional geometry overrides its cache section.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print transfer lines.
    #[arg(short, long)]
    quiet: bool,

    /// Print the final machine state after halting.
    #[arg(long)]
    print_state: bool,

    /// Stop after this many instructions.
    #[arg(long)]
    max_instructions: Option<u64>,

    /// Write dirty blocks back to memory after halting.
    #[arg(long)]
    flush_on_halt: bool,

    /// Print simulation statistics.
    #[arg(long)]
    stats: bool,

    /// Print the disassembly of the program and exit.
    #[arg(long)]
    disasm: bool,
}

/// Run options after merging flags with the config file.
#[derive(Debug)]
struct RunOptions {
    trace_transfers: bool,
    print_state: bool,
    max_instructions: Option<u64>,
    flush_on_halt: bool,
    stats: bool,
}

impl RunOptions {
    fn new(cli: &Cli, general: &GeneralConfig) -> Self {
        Self {
            trace_transfers: general.trace_transfers && !cli.quiet,
            print_state: general.print_state || cli.print_state,
            max_instructions: cli.max_instructions.or(general.max_instructions),
            flush_on_halt: cli.flush_on_halt,
            stats: cli.stats,
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only the trace and reports.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let image = match &cli.program {
        Some(path) => load_program(path)?,
        None => prompter.program()?,
    };

    if cli.disasm {
        for line in disassemble_image(image.words()) {
            println!("{line}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot open file '{}': {e}", path.display()))?;
            Config::from_json_str(&json)?
        }
        None => Config::default(),
    };
    let cache = resolve_geometry(cli, &config, &mut prompter)?;
    let opts = RunOptions::new(cli, &config.general);
    debug!(?cache, ?opts, "configuration resolved");

    if opts.trace_transfers {
        let sink = WriterSink::new(BufWriter::new(io::stdout()));
        simulate(cache, &image, sink, &opts, WriterSink::flush)
    } else {
        simulate(cache, &image, NullSink, &opts, |_| Ok(()))
    }
}

/// Picks each geometry value from the arguments, then the config file, then a prompt.
fn resolve_geometry<R: io::BufRead, W: io::Write>(
    cli: &Cli,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<CacheConfig, Box<dyn Error>> {
    let from_file = cli.config.is_some();
    let block_size_words = match cli.block_size {
        Some(v) => v,
        None if from_file => config.cache.block_size_words,
        None => prompter.block_size()?,
    };
    let num_sets = match cli.num_sets {
        Some(v) => v,
        None if from_file => config.cache.num_sets,
        None => prompter.num_sets()?,
    };
    let associativity = match cli.associativity {
        Some(v) => v,
        None if from_file => config.cache.associativity,
        None => prompter.associativity()?,
    };
    Ok(CacheConfig::new(block_size_words, num_sets, associativity)?)
}

fn simulate<S: TraceSink>(
    config: CacheConfig,
    image: &ProgramImage,
    sink: S,
    opts: &RunOptions,
    flush_trace: impl FnOnce(&mut S) -> io::Result<()>,
) -> Result<(), Box<dyn Error>> {
    let mut sim = Simulator::new(config, image, sink)?;

    let outcome = match opts.max_instructions {
        Some(limit) => sim.run_for(limit),
        None => sim.run(),
    };
    let outcome = outcome.and_then(|summary| {
        if summary.halted && opts.flush_on_halt {
            let _ = sim.flush()?;
        }
        Ok(summary)
    });
    flush_trace(sim.cache_mut().sink_mut())?;

    report(&sim, outcome?, opts);
    Ok(())
}

fn report<S: TraceSink>(sim: &Simulator<S>, summary: RunSummary, opts: &RunOptions) {
    if summary.halted {
        println!("machine halted");
    } else {
        warn!(
            instructions = summary.instructions,
            "instruction limit reached before halt"
        );
    }
    println!("INSTRUCTIONS: {}", summary.instructions);

    if opts.print_state {
        print!("{}", sim.state_dump());
    }
    if opts.stats {
        sim.stats().print();
    }
}
