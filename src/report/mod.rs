use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::{BestRecord, Record, Table};

pub const TOOL_NAME: &str = "kira-precrec";

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub title: &'a str,
    pub n_records: usize,
    pub best_index: usize,
    pub best: &'a Record,
    pub plot: Option<String>,
}

pub fn render_best_text(best: &BestRecord, title: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Best qc value: {}\n", best.record.score));
    out.push_str(&format!("Best solution for {}:\n", title));
    out.push_str(&format!("{}\n", best.record));
    out
}

pub fn render_summary_json(
    table: &Table,
    best: &BestRecord,
    title: &str,
    plot: Option<&Path>,
) -> Result<String> {
    let summary = Summary {
        tool: TOOL_NAME,
        version: env!("CARGO_PKG_VERSION"),
        title,
        n_records: table.len(),
        best_index: best.index,
        best: &best.record,
        plot: plot.map(|p| p.display().to_string()),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
