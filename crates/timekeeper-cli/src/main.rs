use std::path::PathBuf;

use clap::Parser;
use timekeeper_core::{BuildInfo, MetadataTool, ProcessOptions};

#[derive(Parser)]
#[command(name = "timekeeper", version, about = "Organize photos and videos into <year>/<month> folders by capture date")]
struct Cli {
    /// Source file or directory
    #[arg(short, long, required_unless_present = "build_info")]
    source: Option<PathBuf>,

    /// Destination directory
    #[arg(short, long, required_unless_present = "build_info")]
    destination: Option<PathBuf>,

    /// Show what would be done without moving anything
    #[arg(long)]
    dry_run: bool,

    /// Path to the exiftool executable (default: search PATH)
    #[arg(long, env = "TIMEKEEPER_EXIFTOOL")]
    exiftool: Option<PathBuf>,

    /// Ignore embedded metadata and use file modification times only (overrides --exiftool)
    #[arg(long)]
    no_exiftool: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print build information and exit
    #[arg(long)]
    build_info: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let build = BuildInfo::current();

    if cli.build_info {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&build)?);
        } else {
            println!("timekeeper {}", build);
        }
        return Ok(());
    }

    let (Some(source), Some(destination)) = (cli.source, cli.destination) else {
        anyhow::bail!("source (-s) and destination (-d) are required");
    };
    log::debug!("timekeeper {}", build);

    let tool = if cli.no_exiftool {
        MetadataTool::Unavailable
    } else {
        MetadataTool::locate(cli.exiftool.as_deref())
    };
    match &tool {
        MetadataTool::Invocable(exiftool) => log::info!("Using exiftool at {}", exiftool.program().display()),
        MetadataTool::Unavailable => log::info!("No metadata tool, using file modification times"),
    }

    let options = ProcessOptions {
        source,
        destination,
        dry_run: cli.dry_run,
    };

    let stats = timekeeper_core::process(&options, &tool, &|stage, current, total, message| {
        eprintln!("[{}] {}/{} {}", stage, current + 1, total, message);
    })?;

    let summary = stats.summary();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        eprintln!();
        println!("{}", summary);
    }

    Ok(())
}
