use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use schedsim::core::{FnSink, TraceEvent};
use schedsim::sim::{bernoulli_jobs, simulate_into};
use schedsim::{Job, Policy, SchedConfig, input, simulate};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let matches = Command::new("schedsim")
        .about("Discrete-time CPU scheduling simulator (FCFS, RR, SRTF)")
        .subcommand_negates_reqs(true)
        .arg(
            Arg::new("inputfile")
                .required(true)
                .help("Process descriptors, one '<pid> <arrival> <burst>' per line"),
        )
        .args(policy_args())
        .subcommand(
            Command::new("generate")
                .about("Simulate a random Bernoulli workload instead of reading a file")
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Length of the arrival window"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .default_value("0"),
                )
                .args(policy_args()),
        )
        .get_matches();

    let (args, jobs, source) = match matches.subcommand() {
        Some(("generate", sub)) => {
            let ticks = sub.get_one::<u64>("ticks").copied().unwrap_or_default();
            let seed = sub.get_one::<u64>("seed").copied().unwrap_or_default();
            let jobs = bernoulli_jobs(ticks, 0.3, 0.3, 2, 6, seed);
            (sub, jobs, format!("generated workload (seed {seed})"))
        }
        _ => {
            let path = matches
                .get_one::<String>("inputfile")
                .context("an input file is required")?;
            let jobs = input::read_jobs(path)
                .with_context(|| format!("failed to load process descriptors from {path}"))?;
            (&matches, jobs, path.clone())
        }
    };

    run(args, jobs, &source)
}

fn policy_args() -> [Arg; 3] {
    [
        Arg::new("policy")
            .required(true)
            .value_parser(|s: &str| s.parse::<Policy>().map_err(|e| e.to_string()))
            .help("Scheduling policy: FCFS, RR or SRTF"),
        Arg::new("quantum")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .help("Time quantum in ticks (required for RR)"),
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the full report as JSON"),
    ]
}

fn run(args: &ArgMatches, jobs: Vec<Job>, source: &str) -> Result<()> {
    let policy = *args
        .get_one::<Policy>("policy")
        .context("missing scheduling policy")?;
    let quantum = args.get_one::<i64>("quantum").copied();
    let config = SchedConfig::new(policy, quantum)?;
    info!(%policy, processes = jobs.len(), source, "starting");

    if args.get_flag("json") {
        let report = simulate(jobs, config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Scheduling algorithm: {policy}");
    println!("Total {} tasks are read from {source}\n", jobs.len());

    let mut sink = FnSink(|event: TraceEvent| println!("{event}"));
    let report = simulate_into(jobs, config, &mut sink)?;
    println!();
    println!("{}", report.summary);

    Ok(())
}

// Logs go to stderr so the trace on stdout stays clean
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
