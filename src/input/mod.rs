use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::{debug, info};

use crate::error::{PrecRecError, Result};
use crate::model::{Record, Table};

pub const FIELD_DELIMITER: char = '\t';
pub const N_FIELDS: usize = 4;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        debug!("decompressing {}", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads a headerless `QC_Score  Precision  Recall  F1` table.
///
/// Blank lines are skipped. A zero-record table is returned as-is; callers
/// decide whether that is an error.
pub fn load_table(path: &Path) -> Result<Table> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut records = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, line_no)?);
    }

    info!("loaded {} records from {}", records.len(), path.display());
    Ok(Table::new(records))
}

pub fn parse_line(line: &str, line_no: usize) -> Result<Record> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != N_FIELDS {
        return Err(PrecRecError::parse(
            line_no,
            format!("expected {} fields, found {}", N_FIELDS, fields.len()),
        ));
    }

    let score = fields[0].trim();
    if score.is_empty() {
        return Err(PrecRecError::parse(line_no, "empty QC_Score"));
    }

    Ok(Record {
        score: score.to_string(),
        precision: parse_value(fields[1], "Precision", line_no)?,
        recall: parse_value(fields[2], "Recall", line_no)?,
        f1: parse_value(fields[3], "F1", line_no)?,
    })
}

fn parse_value(raw: &str, column: &str, line_no: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        PrecRecError::parse(line_no, format!("{column} is not a number: {raw:?}"))
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
