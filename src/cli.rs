use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::engine::domain::DomainStore;
use crate::engine::driver::TimeStepDriver;
use crate::engine::propagator::{dnac4::DnAc4, dnac6::DnAc6, ArcConsistencyPropagator};
use crate::engine::stats::EngineStats;
use crate::engine::Engine;
use crate::error::Result;
use crate::generator::patient_scheduling::{self, GeneratorParams};
use crate::io::{parser, report};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Algorithm {
    #[value(name = "dnac4")]
    Dnac4,
    #[value(name = "dnac6")]
    Dnac6,
}

impl Algorithm {
    fn build(self) -> Box<dyn ArcConsistencyPropagator> {
        match self {
            Algorithm::Dnac4 => Box::new(DnAc4::new()),
            Algorithm::Dnac6 => Box::new(DnAc6::new()),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dycsp", about = "A dynamic constraint satisfaction problem solver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Runs the time-stepped driver over an input file and writes a report.
    Solve {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value = "dnac4")]
        algorithm: Algorithm,
        /// Append a propagation/search statistics table to the report.
        #[arg(long)]
        stats: bool,
    },
    /// Emits a ready-to-solve input file.
    Generate {
        #[command(subcommand)]
        kind: GenerateKind,
    },
}

#[derive(Subcommand, Debug)]
pub enum GenerateKind {
    /// The MRI patient-scheduling example of §6.1.
    PatientSchedule {
        output: PathBuf,
        #[arg(long, default_value_t = 2)]
        machines: u32,
    },
}

/// Runs the CLI, returning the process exit code (§6: 0 success, 2 on a
/// fatal `Error`).
pub fn run(cli: Cli) -> i32 {
    match execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("dycsp: {err}");
            2
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Solve {
            input,
            output,
            algorithm,
            stats,
        } => solve(&input, &output, algorithm, stats),
        Command::Generate {
            kind: GenerateKind::PatientSchedule { output, machines },
        } => generate_patient_schedule(&output, machines),
    }
}

fn solve(input: &std::path::Path, output: &std::path::Path, algorithm: Algorithm, stats: bool) -> Result<()> {
    let path = input.display().to_string();
    let reader = BufReader::new(File::open(input)?);
    let instance = parser::parse(&path, reader)?;

    let domains = DomainStore::new(instance.origin_domains.clone());
    let engine = Engine::new(domains, algorithm.build());
    let algorithm_name = engine.algorithm_name();
    let mut driver = TimeStepDriver::new(engine);

    info!(algorithm = algorithm_name, variables = instance.n, "solving");
    let steps = driver.run(&instance);

    let mut engine_stats = EngineStats::new();
    for step in &steps {
        engine_stats.record(step.t, step.stats);
    }

    let writer = BufWriter::new(File::create(output)?);
    report::write_report(writer, algorithm_name, &instance, &steps)?;

    if stats {
        let writer = BufWriter::new(
            std::fs::OpenOptions::new().append(true).open(output)?,
        );
        report::write_stats(writer, &engine_stats)?;
    }

    Ok(())
}

fn generate_patient_schedule(output: &std::path::Path, machines: u32) -> Result<()> {
    let mut params = GeneratorParams::sample();
    params.machines = machines;
    let text = patient_scheduling::generate(&params);
    std::fs::write(output, text)?;
    Ok(())
}
