use std::path::PathBuf;

use bereal_core::ProcessResult;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "bereal-gather",
    version,
    about = "Collect merged/primary/secondary JPGs and videos into one folder and fix timestamps based on folder name"
)]
struct Cli {
    /// Source directory containing timestamp-named subfolders (YYYY-MM-DD-HH-MM-SS)
    source: PathBuf,

    /// Destination directory to receive renamed files
    dest: PathBuf,

    /// Interpret folder datetime as UTC (default: local time)
    #[arg(long)]
    utc: bool,

    /// Also write EXIF datetime tags into copied JPEGs
    #[arg(long)]
    exif: bool,

    /// Stop at the first file that cannot be copied or restamped
    #[arg(long)]
    fail_fast: bool,

    /// Log every copied file and skipped folder (RUST_LOG, if set, overrides the log level)
    #[arg(short, long)]
    verbose: bool,
}

/// Final report printed to stdout.
fn summary(result: &ProcessResult, exif: bool) -> String {
    let mut out = format!(
        "Done. Copied: {}, Skipped folders: {}",
        result.copied, result.skipped_folders
    );
    if result.failed_files > 0 {
        out.push_str(&format!(", Failed files: {}", result.failed_files));
    }
    out.push('\n');
    if exif {
        out.push_str(&format!(
            "EXIF updated: {} of {}\n",
            result.exif_updated, result.copied
        ));
    }
    out.push_str(&format!("Output folder: {}", result.dest.display()));
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = bereal_core::ProcessOptions {
        source: cli.source,
        dest: cli.dest,
        use_utc: cli.utc,
        write_exif: cli.exif,
        fail_fast: cli.fail_fast,
    };

    let pb = ProgressBar::new(0);
    pb.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let result = bereal_core::process(&options, &|_stage, current, total, message| {
        pb.set_length(total);
        pb.set_position(current);
        pb.set_message(message.to_string());
    });
    pb.finish_and_clear();
    let result = result?;

    println!("{}", summary(&result, cli.exif));

    Ok(())
}
