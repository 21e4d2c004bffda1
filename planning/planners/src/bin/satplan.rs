use anyhow::{Context, Result};
use satplan_planners::blocks::blocks_world;
use satplan_planners::fmt::{format_assignment, format_plan};
use satplan_planners::solver::{default_oracle, encode_to_cnf};
use satplan_planners::{solve, SatPlanConfig, SolveOutcome};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

/// Encodes a ground blocks-world problem into SAT, solves it and prints the selected actions.
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "satplan", rename_all = "kebab-case")]
pub struct Opt {
    /// Number of blocks in the generated problem.
    #[structopt(long, short, default_value = "3")]
    blocks: usize,

    /// Maximal number of variables accepted by the solver. Overrides SATPLAN_MAX_VARIABLES.
    #[structopt(long)]
    max_variables: Option<u32>,

    /// Number of clauses to preallocate. Overrides SATPLAN_EXPECTED_CLAUSES.
    #[structopt(long)]
    expected_clauses: Option<usize>,

    /// Time (in seconds) after which to give up waiting for the solver. Overrides SATPLAN_TIMEOUT_SECS.
    #[structopt(long, short)]
    timeout: Option<u64>,

    /// If set, the encoded instance is written to this file in DIMACS format.
    #[structopt(long)]
    dimacs: Option<PathBuf>,

    /// Print the value of every fluent and action in the model.
    #[structopt(long)]
    print_model: bool,

    /// Logging level to use: one of "error", "warn", "info", "debug", "trace"
    #[structopt(short, long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let opt: Opt = Opt::from_args();

    // set up logger
    let subscriber = tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::Uptime::from(std::time::Instant::now()))
        .with_max_level(opt.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = SatPlanConfig::from_env();
    if let Some(max_variables) = opt.max_variables {
        config.max_variables = max_variables;
    }
    if let Some(expected_clauses) = opt.expected_clauses {
        config.expected_clauses = expected_clauses;
    }
    if let Some(secs) = opt.timeout {
        config.timeout = Some(Duration::from_secs(secs));
    }
    tracing::debug!(?config);

    let problem = blocks_world(opt.blocks);
    tracing::info!(
        "Blocks world with {} blocks: {} fluents, {} actions",
        opt.blocks,
        problem.num_fluents(),
        problem.num_actions()
    );

    if let Some(path) = &opt.dimacs {
        let cnf = encode_to_cnf(&problem, &config)?;
        let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
        cnf.write_dimacs(&mut BufWriter::new(file))?;
        tracing::info!("CNF written to {}", path.display());
    }

    let oracle = default_oracle(&config);
    match solve(&problem, &config, &oracle)? {
        SolveOutcome::Plan(solution) => {
            println!("SAT");
            if opt.print_model {
                println!("{}", format_assignment(&problem, &solution.assignment));
            }
            println!("Plan ({} actions):", solution.plan.len());
            print!("{}", format_plan(&problem, &solution.plan));
        }
        SolveOutcome::Unsatisfiable => {
            println!("UNSAT");
        }
    }
    Ok(())
}
