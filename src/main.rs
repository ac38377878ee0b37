//! Command-line driver: configure a machine from a file and convert a
//! transcript of setup lines and messages.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use enigma::config::MachineConfig;
use enigma::session;

/// Rotor cipher machine simulator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Machine configuration file (alphabet, rotor counts, rotor catalog).
    config: PathBuf,

    /// Input transcript; reads standard input when omitted.
    input: Option<PathBuf>,

    /// Output file; writes standard output when omitted.
    output: Option<PathBuf>,

    /// Log progress to standard error.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "enigma=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config_text = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let config = MachineConfig::parse(&config_text)
        .with_context(|| format!("bad configuration in {}", args.config.display()))?;
    let mut machine = config.build_machine()?;
    info!(
        rotors = config.rotors().len(),
        slots = machine.num_rotors(),
        pawls = machine.num_pawls(),
        "machine configured"
    );

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not open {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("could not read standard input")?;
            buf
        }
    };

    let output = session::process(&mut machine, &input)?;
    debug!(bytes = output.len(), "transcript converted");

    match &args.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(output.as_bytes())
            .context("could not write standard output")?,
    }
    Ok(())
}
