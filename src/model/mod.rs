use std::fmt;

use serde::Serialize;

use crate::error::{PrecRecError, Result};

pub const PERCENT_SCALE: f64 = 100.0;
const DISPLAY_ROUNDING: f64 = 1e9;

/// One row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "QC_Score")]
    pub score: String,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
    #[serde(rename = "F1")]
    pub f1: f64,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "QC_Score   {}", self.score)?;
        writeln!(f, "Precision  {}", display_value(self.precision))?;
        writeln!(f, "Recall     {}", display_value(self.recall))?;
        write!(f, "F1         {}", display_value(self.f1))
    }
}

/// Rounds away float noise left by the percent rescale (0.57 * 100).
pub fn display_value(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    (v * DISPLAY_ROUNDING).round() / DISPLAY_ROUNDING
}

/// Records in file order; order drives the connecting line in the plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestRecord {
    pub index: usize,
    pub record: Record,
}

/// Converts fractions to percentages. Applies the factor exactly once.
pub fn rescale(table: &Table) -> Table {
    let records = table
        .records()
        .iter()
        .map(|r| Record {
            score: r.score.clone(),
            precision: r.precision * PERCENT_SCALE,
            recall: r.recall * PERCENT_SCALE,
            f1: r.f1 * PERCENT_SCALE,
        })
        .collect();
    Table::new(records)
}

/// First record holding the maximum F1. NaN F1 values never win.
pub fn select_best(table: &Table) -> Result<BestRecord> {
    if table.is_empty() {
        return Err(PrecRecError::EmptyInput);
    }
    let mut best: Option<(usize, &Record)> = None;
    for (idx, record) in table.iter().enumerate() {
        if record.f1.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if record.f1 <= current.f1 => {}
            _ => best = Some((idx, record)),
        }
    }

    best.map(|(index, record)| BestRecord {
        index,
        record: record.clone(),
    })
    .ok_or(PrecRecError::EmptyInput)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
