mod error;
mod input;
mod logging;
mod model;
mod plot;
mod report;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};

use crate::error::Result;
use crate::input::load_table;
use crate::model::{rescale, select_best};
use crate::report::{render_best_text, render_summary_json, write_text};

/// Picks the best-F1 QC cutoff and draws a precision/recall plot.
#[derive(Debug, Parser)]
#[command(name = "kira-precrec", version, about)]
struct Cli {
    /// TSV with QC_Score, Precision, Recall, F1 per line (no header)
    #[arg(long)]
    table: PathBuf,
    /// Title of the plot; also the output file name
    #[arg(long)]
    title: String,
    /// Do not write the plot file
    #[arg(long)]
    no_save: bool,
    /// Directory the plot is written into
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Also write a JSON summary of the best record
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct RunConfig {
    table: PathBuf,
    title: String,
    save: bool,
    out_dir: PathBuf,
    json_path: Option<PathBuf>,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            table: cli.table,
            title: cli.title,
            save: !cli.no_save,
            out_dir: resolve_output_dir(cli.out_dir.as_deref()),
            json_path: cli.json,
        }
    }
}

fn main() {
    logging::init_tracing();
    let config = RunConfig::from(Cli::parse());
    if let Err(err) = run(&config) {
        error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<()> {
    let raw = load_table(&config.table)?;
    let table = rescale(&raw);
    let best = select_best(&table)?;
    info!(
        "best F1 {} at QC_Score {} (row {})",
        best.record.f1,
        best.record.score,
        best.index + 1
    );

    print!("{}", render_best_text(&best, &config.title));

    let plot_path = plot::render(&table, &best, &config.title, config.save, &config.out_dir)?;

    if let Some(json_path) = &config.json_path {
        let json = render_summary_json(&table, &best, &config.title, plot_path.as_deref())?;
        write_text(json_path, &json)?;
        info!("wrote summary to {}", json_path.display());
    }

    Ok(())
}

fn resolve_output_dir(out_dir: Option<&Path>) -> PathBuf {
    out_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
