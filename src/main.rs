use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use schedsim::{
    PolicyConfig, RunSummary, Scenario, Snapshot,
    scheduler::{MfqConfig, SliceMode},
    sim::{WorkloadParams, random_workload, reference_workload},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    Priority,
    Sjf,
    Mfq,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WorkloadKind {
    Reference,
    Random,
}

/// Replay a CPU scheduling policy over a process list, one tick at a time.
#[derive(Debug, Parser)]
#[command(name = "schedsim", version)]
struct Args {
    /// JSON scenario file; overrides the policy and workload flags
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PolicyKind::Priority)]
    policy: PolicyKind,

    #[arg(long, value_enum, default_value_t = WorkloadKind::Reference)]
    workload: WorkloadKind,

    /// Seed for the random workload
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Arrival horizon for the random workload
    #[arg(long, default_value_t = 20)]
    ticks: u64,

    /// Fixed slice for priority/sjf; 0 runs each choice to completion
    #[arg(long, default_value_t = 1)]
    time_slice: u64,

    #[arg(long)]
    preemptive: bool,

    /// Per-level slices for mfq, highest level first
    #[arg(long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
    levels: Vec<u64>,

    #[arg(long)]
    max_steps: Option<usize>,

    /// Print the snapshot history as JSON instead of a trace
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn scenario_from_args(args: &Args) -> Result<Scenario> {
    if let Some(path) = &args.scenario {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        return Scenario::from_json(&json)
            .with_context(|| format!("parsing scenario {}", path.display()));
    }

    let slice = match args.time_slice {
        0 => SliceMode::RemainingBurst,
        n => SliceMode::Fixed(n),
    };
    let policy = match args.policy {
        PolicyKind::Priority => PolicyConfig::Priority {
            slice,
            preemptive: args.preemptive,
        },
        PolicyKind::Sjf => PolicyConfig::ShortestJob {
            slice,
            preemptive: args.preemptive,
        },
        PolicyKind::Mfq => PolicyConfig::Mfq(MfqConfig::new(args.levels.clone())),
    };

    let processes = match args.workload {
        WorkloadKind::Reference => reference_workload(),
        WorkloadKind::Random => random_workload(
            &WorkloadParams {
                ticks: args.ticks,
                ..WorkloadParams::default()
            },
            args.seed,
        ),
    };

    Ok(Scenario {
        policy,
        processes,
        max_steps: args.max_steps,
    })
}

fn print_trace(history: &[Snapshot]) {
    for snapshot in history {
        match (&snapshot.next_allocation, snapshot.next_quantum) {
            (Some(id), Some(quantum)) => println!("t={} run {id} for {quantum}", snapshot.timestamp),
            _ => println!("t={} idle, all processes finished", snapshot.timestamp),
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
        "id", "priority", "arrival", "required", "finish", "turn", "weighted"
    );
    for p in &summary.processes {
        println!(
            "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10.2}",
            p.id,
            p.priority,
            p.arrival_time,
            p.required_time,
            p.finish_time,
            p.turnaround,
            p.weighted_turnaround
        );
    }
    println!();
    println!("Makespan: {} ticks", summary.makespan);
    println!("Context switches: {}", summary.context_switches);
    println!("Average turnaround: {:.2} ticks", summary.average_turnaround);
    println!(
        "Average weighted turnaround: {:.2}",
        summary.average_weighted_turnaround
    );
    println!("Average response time: {:.2} ticks", summary.average_response);
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let scenario = scenario_from_args(&args)?;
    info!(
        processes = scenario.processes.len(),
        policy = ?scenario.policy,
        "starting simulation"
    );
    let history = scenario.run().context("simulation aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    print_trace(&history);
    if let Some(summary) = RunSummary::from_history(&history) {
        print_summary(&summary);
    }
    Ok(())
}
