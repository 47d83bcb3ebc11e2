use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use roster::config::{IngestOptions, MalformedPolicy, Strategy, WorkloadConfig};
use roster::delimited::{load_path, save_path};
use roster::workload::{run_workload, synthetic_records};

/// Student roster: group aggregates and birthday ordering.
#[derive(Parser, Debug)]
#[command(name = "roster", version)]
struct Cli {
    /// Field delimiter of input and output files
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,
    /// Abort on the first malformed row instead of skipping it
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a file, move one record between groups and print both extrema
    Demo {
        input: PathBuf,
        /// Identifier of the record to move
        #[arg(long)]
        id: Option<String>,
        /// Group to move the record into
        #[arg(long, default_value = "NEW-GROUP-01")]
        group: String,
        /// Number of sorted rows to print
        #[arg(long, default_value_t = 5)]
        show: usize,
    },
    /// Sort a file by birth month and day and write the result
    Sort { input: PathBuf, output: PathBuf },
    /// Run the randomized query/move mix and report throughput
    Bench {
        input: PathBuf,
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        #[arg(long)]
        max_ops: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = StrategyArg::Cached)]
        strategy: StrategyArg,
    },
    /// Write a file of synthetic students
    Generate {
        output: PathBuf,
        #[arg(long, default_value_t = 10_000)]
        count: usize,
        #[arg(long, default_value_t = 50)]
        groups: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Cached,
    Rescan,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Cached => Strategy::Cached,
            StrategyArg::Rescan => Strategy::Rescan,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let options = IngestOptions {
        delimiter: cli.delimiter,
        malformed: if cli.strict {
            MalformedPolicy::Fail
        } else {
            MalformedPolicy::Skip
        },
        ..IngestOptions::default()
    };

    match cli.command {
        Command::Demo {
            input,
            id,
            group,
            show,
        } => {
            let mut store = load_path(&input, &options)?;
            println!("Students loaded: {}", store.len());

            let id = id.or_else(|| store.identifiers().next().map(str::to_owned));
            if let Some(id) = id {
                let before = store.get(&id).map(|r| r.group.clone());
                if store.move_group(&id, &group)? {
                    println!(
                        "Moved {id}: {} -> {group}",
                        before.unwrap_or_default()
                    );
                } else {
                    println!("Student {id} not found");
                }
            }

            match store.most_members() {
                Some(leader) => println!(
                    "Group {} has the most students: {}",
                    leader.group, leader.value
                ),
                None => println!("No groups"),
            }
            match store.highest_average() {
                Some(leader) => println!(
                    "Group {} has the highest average rating: {:.2}",
                    leader.group, leader.value
                ),
                None => println!("No groups"),
            }

            for r in store.sorted_snapshot()?.iter().take(show) {
                println!(
                    "{} {} | {} | {}.{} | Rating: {}",
                    r.name, r.surname, r.group, r.birth.day, r.birth.month, r.score
                );
            }
        }
        Command::Sort { input, output } => {
            let store = load_path(&input, &options)?;
            let sorted = store.sorted_snapshot()?;
            save_path(&output, &sorted, options.delimiter)?;
            println!("Sorted {} students into {}", sorted.len(), output.display());
        }
        Command::Bench {
            input,
            seconds,
            max_ops,
            seed,
            strategy,
        } => {
            let mut store = load_path(&input, &options)?;
            let config = WorkloadConfig {
                duration: Duration::from_secs(seconds),
                max_ops,
                seed,
                strategy: strategy.into(),
                ..WorkloadConfig::default()
            };
            let mix = config.mix;
            println!(
                "Running {:?} mix {}:{}:{} over {} students",
                config.strategy,
                mix.most_members,
                mix.move_group,
                mix.highest_average,
                store.len()
            );

            let report = run_workload(&mut store, &config)?;
            println!("Duration: {} ms", report.elapsed.as_millis());
            println!("Total operations: {}", report.total());
            println!("Operations per second: {:.0}", report.ops_per_sec());
            println!("Most members queries: {}", report.most_members);
            println!("Group moves: {}", report.move_group);
            println!("Highest average queries: {}", report.highest_average);
            let most = store.group_with_most_members().map(str::to_owned);
            let best = store.group_with_highest_average().map(str::to_owned);
            println!("Most members: {most:?}, highest average: {best:?}");
        }
        Command::Generate {
            output,
            count,
            groups,
            seed,
        } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let records = synthetic_records(count, groups, &mut rng);
            save_path(&output, &records, options.delimiter)?;
            println!("Wrote {} students to {}", records.len(), output.display());
        }
    }

    Ok(())
}
