use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use maze_solver::generate::generate;
use maze_solver::service::MazeService;
use maze_solver::store::InMemoryRepository;
use maze_solver::{parse, Limits, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maze-solver")]
#[command(about = "Find a way through text mazes")]
struct Cli {
    /// Maximum number of rows a maze may have.
    #[arg(long, global = true, default_value_t = Limits::default().max_rows)]
    max_rows: u8,
    /// Maximum number of columns a maze may have.
    #[arg(long, global = true, default_value_t = Limits::default().max_cols)]
    max_cols: u8,
    /// Log more; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single maze file
    Solve {
        file: PathBuf,
        #[arg(short, long, default_value_t = Strategy::Bfs)]
        strategy: Strategy,
        /// Run every strategy and compare the results
        #[arg(long, conflicts_with = "strategy")]
        all: bool,
    },
    /// Solve many maze files in parallel and list the stored solutions
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, default_value_t = Strategy::Bfs)]
        strategy: Strategy,
    },
    /// Print a random maze
    Generate {
        #[arg(long, default_value_t = 10)]
        width: u8,
        #[arg(long, default_value_t = 10)]
        height: u8,
        /// Seed for a reproducible maze
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let limits = Limits {
        max_rows: cli.max_rows,
        max_cols: cli.max_cols,
    };
    match cli.command {
        Command::Solve {
            file,
            strategy,
            all,
        } => {
            let strategies = if all {
                Strategy::ALL.to_vec()
            } else {
                vec![strategy]
            };
            solve_file(&file, &strategies, &limits)
        }
        Command::Batch { files, strategy } => batch(&files, strategy, limits),
        Command::Generate {
            width,
            height,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            println!("{}", generate(width, height, &mut rng)?);
            Ok(())
        }
    }
}

fn solve_file(file: &Path, strategies: &[Strategy], limits: &Limits) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let maze = parse(&text, limits).context("Failed to parse the maze")?;

    for &strategy in strategies {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message(format!("{strategy}"));
        let path = strategy.solve(&maze.grid, maze.start, maze.goal, || spinner.inc(1));
        let explored = spinner.position();
        spinner.finish_and_clear();

        println!(
            "{} explored {explored} cells",
            style(format!("[{strategy}]")).bold(),
        );
        match path {
            Some(path) => {
                println!("{}", style(&path).green());
                println!("{} steps", path.len() - 1);
                println!("{}", maze.grid.overlay(&path, '*'));
            }
            None => println!("{}", style("No path found").red()),
        }
    }
    Ok(())
}

fn batch(files: &[PathBuf], strategy: Strategy, limits: Limits) -> Result<()> {
    let texts = files
        .iter()
        .map(|file| {
            std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let service = MazeService::new(InMemoryRepository::new(), strategy, limits);
    let bar = ProgressBar::new(texts.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .context("Invalid progress template")?,
    );
    let outcomes = files
        .par_iter()
        .zip(&texts)
        .map(|(file, text)| {
            let outcome = service.submit(text);
            bar.inc(1);
            (file, outcome)
        })
        .collect::<Vec<_>>();
    bar.finish_and_clear();

    for (file, outcome) in outcomes {
        let name = file.display();
        match outcome {
            Ok(Some(record)) => println!("{name}: {}", style(record.id).green()),
            Ok(None) => println!("{name}: {}", style("no path").yellow()),
            Err(err) => println!("{name}: {}", style(err).red()),
        }
    }

    println!();
    for record in service.all() {
        println!("{} {}", style(record.id).bold(), record.solution);
    }
    Ok(())
}
