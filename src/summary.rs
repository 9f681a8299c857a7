//! Per-column summaries of a typed read.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::columns::{Column, Columns};
use crate::schema::ColumnType;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ColumnSummary {
    pub index: usize,
    pub kind: ColumnType,
    pub count: usize,
    pub stats: ColumnStats,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric {
        min: Option<f64>,
        max: Option<f64>,
        mean: Option<f64>,
    },
    Text {
        distinct: usize,
        max_len: usize,
    },
}

impl ColumnStats {
    fn numeric(values: impl Iterator<Item = f64> + Clone) -> Self {
        let count = values.clone().count();
        let min = values.clone().reduce(f64::min);
        let max = values.clone().reduce(f64::max);
        let mean = (count > 0).then(|| values.sum::<f64>() / count as f64);
        Self::Numeric { min, max, mean }
    }

    fn text(values: &[String]) -> Self {
        let distinct = values.iter().collect::<HashSet<_>>().len();
        let max_len = values.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        Self::Text { distinct, max_len }
    }
}

/// Summarise every column of a read, in schema order.
pub fn summarize(columns: &Columns) -> Vec<ColumnSummary> {
    columns
        .schema()
        .iter()
        .zip(columns)
        .enumerate()
        .map(|(index, (kind, column))| {
            let stats = match column {
                Column::Int(v) => ColumnStats::numeric(v.iter().map(|&x| x as f64)),
                Column::Float(v) => ColumnStats::numeric(v.iter().copied()),
                Column::Text(v) => ColumnStats::text(v),
            };
            ColumnSummary {
                index,
                kind,
                count: column.len(),
                stats,
            }
        })
        .collect()
}

/// Formats an optional f64 to 4 decimal places, or "-" if missing or non-finite.
fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "-".to_owned(),
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:<9} count={}", self.index, self.kind, self.count)?;
        match &self.stats {
            ColumnStats::Numeric { min, max, mean } => write!(
                f,
                " min={} max={} mean={}",
                fmt_opt(*min),
                fmt_opt(*max),
                fmt_opt(*mean)
            ),
            ColumnStats::Text { distinct, max_len } => {
                write!(f, " distinct={distinct} max_len={max_len}")
            }
        }
    }
}
