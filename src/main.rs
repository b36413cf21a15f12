//! u-tsp CLI: solve a point file with the evolutionary search.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use u_tsp::ga::{GaConfig, Observer, Snapshot};
use u_tsp::{ga_solve_with_config, Display, SolveOutcome};

#[derive(Parser, Debug)]
#[command(author, version, about = "Traveling salesman search with a genetic algorithm", long_about = None)]
struct Args {
    /// Stop the search after this many seconds (0: run until stagnation)
    #[arg(long, default_value_t = 0)]
    maxtime: u64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the best distance whenever it improves
    #[arg(long)]
    progress: bool,

    /// File with one `name x y` point per line
    filename: Option<PathBuf>,
}

/// Reports improvements of the best tour on stderr.
#[derive(Default)]
struct TerminalDisplay {
    best: Option<f64>,
}

impl Observer for TerminalDisplay {
    fn on_generation(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        if self.best.map_or(true, |best| snapshot.best_distance < best) {
            self.best = Some(snapshot.best_distance);
            eprintln!(
                "[{:.2?}] generation {:>6}: {:.3}",
                snapshot.elapsed, snapshot.generation, snapshot.best_distance
            );
        }
        ControlFlow::Continue(())
    }
}

impl Display for TerminalDisplay {
    fn finish(&mut self, outcome: &SolveOutcome) {
        eprintln!(
            "stopped after {} generations ({:?})",
            outcome.generations, outcome.stop
        );
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    println!("Progress: {}", args.progress);
    println!("Maxtime: {}", args.maxtime);
    match &args.filename {
        Some(path) => println!("File: {}", path.display()),
        None => println!("File: none"),
    }
    println!();

    let mut config = GaConfig::default().with_max_time_secs(args.maxtime);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut terminal = TerminalDisplay::default();
    let display: Option<&mut dyn Display> = if args.progress {
        Some(&mut terminal)
    } else {
        None
    };

    match ga_solve_with_config(args.filename.as_deref(), display, config) {
        Ok(outcome) => {
            println!("Total distance:\n\t{:.3}", outcome.total_distance);
            println!("Points in visiting order:\n\t{:?}", outcome.ordered_names);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
