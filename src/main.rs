use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use bikeshare_stats::config::Config;
use bikeshare_stats::ingestion::load_filtered;
use bikeshare_stats::render;
use bikeshare_stats::session::{run_interactive, write_all_stats, Prompter};
use bikeshare_stats::stats::StatsReport;
use bikeshare_stats::types::FilterSpec;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Explore US bikeshare trip data by city, month and day of week")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the city CSV files (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Raw rows per page (overrides the config file)
    #[arg(long)]
    page_size: Option<usize>,

    /// City to analyze; runs once without prompting
    #[arg(long)]
    city: Option<String>,

    /// Month name (january-june) or "all"
    #[arg(long, default_value = "all")]
    month: String,

    /// Weekday name or "all"
    #[arg(long, default_value = "all")]
    day: String,

    /// Print the report as JSON (with --city)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(n) = cli.page_size {
        config.page_size = n;
    }
    config.validate()?;
    log::debug!("config: {config:?}");

    let options = config.load_options()?;

    match cli.city {
        Some(city) => {
            let spec = FilterSpec::parse(&city, &cli.month, &cli.day)?;
            let table = load_filtered(&spec, &options)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if cli.json {
                let report = StatsReport::compute(spec, &table)?;
                render::write_report_json(&mut out, &report)?;
            } else {
                render::write_selection(&mut out, &spec)?;
                write_all_stats(&mut out, &table)?;
            }
            out.flush()?;
        }
        None => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            run_interactive(&mut prompter, &options, config.page_size)?;
        }
    }
    Ok(())
}
