use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use futurebank::{init_logging, load_scenario, render_json, render_report, save_scenario};
use futurebank_core::Scenario;

#[derive(Parser, Debug)]
#[command(name = "futurebank")]
#[command(about = "Monte Carlo projection of household net worth")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario and print the projection
    Run {
        /// Scenario YAML file (default: built-in demo scenario)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the number of Monte Carlo paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Override the base seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// First simulated month for calendar labels (default: today)
        #[arg(long)]
        start_date: Option<jiff::civil::Date>,
    },
    /// Write the demo scenario to a YAML file as a starting point
    Init {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    match args.command {
        Command::Run {
            scenario,
            paths,
            seed,
            format,
            start_date,
        } => {
            let mut scenario = match scenario {
                Some(path) => load_scenario(&path)?,
                None => Scenario::demo(),
            };
            if let Some(paths) = paths {
                scenario = scenario.with_paths(paths);
            }
            if let Some(seed) = seed {
                scenario = scenario.with_seed(seed);
            }

            let result = scenario.simulate()?;

            match format {
                OutputFormat::Table => {
                    let start = start_date.unwrap_or_else(|| jiff::Zoned::now().date());
                    print!("{}", render_report(&scenario, &result, start));
                }
                OutputFormat::Json => println!("{}", render_json(&result)?),
            }
        }
        Command::Init { path } => {
            save_scenario(&path, &Scenario::demo())?;
            println!("Wrote demo scenario to {}", path.display());
        }
    }

    tracing::debug!("futurebank exiting");
    Ok(())
}
