use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};

mod capture;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "op-capture")]
#[command(about = "Summarize operators captured in a device training log", long_about = None)]
struct Cli {
    /// Training log written with operator argument dumping enabled
    /// (DIPU_DUMP_OP_ARGS=2).
    #[arg(long, alias = "train_log", default_value = "dipu_train.log")]
    train_log: PathBuf,

    /// CSV file receiving the captured operator table.
    #[arg(short = 'o', long, default_value = "dipu_ops.csv")]
    out: PathBuf,

    /// Optional JSON file listing operators whose calls resolved to
    /// different native functions.
    #[arg(long)]
    collisions: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run(&cli.train_log, &cli.out, cli.collisions.as_deref())
}

fn run(train_log: &Path, out: &Path, collisions: Option<&Path>) -> Result<()> {
    use anyhow::Context;

    // 1) Read + scan log.
    let text = std::fs::read_to_string(train_log)
        .with_context(|| format!("read train log {}", train_log.display()))?;
    let records = capture::capture_records(&text)?;
    info!("captured {} operator records", records.len());

    // 2) Aggregate.
    let agg = model::aggregate(&records)?;
    for c in &agg.collisions {
        warn!(
            "operator '{}' resolved to '{}' {} time(s); reporting it as '{}'",
            c.operator_name, c.conflicting, c.occurrences, c.kept
        );
    }
    if let Some(path) = collisions {
        render::write_collisions(path, &agg.collisions)?;
    }

    // 3) Write CSV.
    if !render::write_csv_report(out, &agg.rows)? {
        info!("no operators captured; {} not written", out.display());
        return Ok(());
    }
    info!("{} distinct operator shapes", agg.rows.len());
    println!("Wrote {}", out.display());

    Ok(())
}
