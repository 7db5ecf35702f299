//! Period-over-period frame comparison
//!
//! Outer-joins two frames on shared dimension columns and emits, per metric,
//! the current value, previous value, absolute change, and percent change.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;
use crate::frame::{Column, DataType, ReportFrame};

/// Compare two frames of the same report over different periods
///
/// `on` names the dimension columns to join on; they must exist in both
/// frames, as must every metric column of `current`. Rows missing from one
/// side are kept (outer join) with the absent side's metrics treated as 0.
/// Percent change is 0 when the previous value is 0.
pub fn compare_frames(
    current: &ReportFrame,
    previous: &ReportFrame,
    on: &[&str],
) -> Result<ReportFrame> {
    let current_keys: Vec<usize> = on
        .iter()
        .map(|name| current.require_column(name))
        .collect::<Result<_>>()?;
    let previous_keys: Vec<usize> = on
        .iter()
        .map(|name| previous.require_column(name))
        .collect::<Result<_>>()?;

    // Metric columns are everything in `current` that is not a join key.
    let (current_metrics, metrics): (Vec<usize>, Vec<&Column>) = current
        .columns
        .iter()
        .enumerate()
        .filter(|(i, _)| !current_keys.contains(i))
        .unzip();
    let previous_metrics: Vec<usize> = metrics
        .iter()
        .map(|c| previous.require_column(&c.name))
        .collect::<Result<_>>()?;

    let mut columns: Vec<Column> = on
        .iter()
        .map(|name| Column::new(*name, DataType::String))
        .collect();
    for metric in &metrics {
        columns.push(Column::new(format!("{}_current", metric.name), DataType::Float64));
        columns.push(Column::new(format!("{}_previous", metric.name), DataType::Float64));
        columns.push(Column::new(format!("{}_change", metric.name), DataType::Float64));
        columns.push(Column::new(
            format!("{}_change_pct", metric.name),
            DataType::Float64,
        ));
    }

    let mut previous_by_key: HashMap<Vec<String>, usize> = HashMap::new();
    for (index, row) in previous.rows.iter().enumerate() {
        previous_by_key.insert(key_of(row, &previous_keys), index);
    }

    let mut rows = Vec::with_capacity(current.rows.len());
    let mut matched: Vec<bool> = vec![false; previous.rows.len()];

    // Current rows first, in their original order.
    for row in &current.rows {
        let key = key_of(row, &current_keys);
        let previous_row = previous_by_key.get(&key).map(|&i| {
            matched[i] = true;
            &previous.rows[i]
        });

        let mut cells: Vec<Value> = key.iter().map(|k| Value::String(k.clone())).collect();
        for (metric_index, _) in metrics.iter().enumerate() {
            let current_value = cell_number(row, current_metrics[metric_index]);
            let previous_value = previous_row
                .map(|r| cell_number(r, previous_metrics[metric_index]))
                .unwrap_or(0.0);
            push_comparison(&mut cells, current_value, previous_value);
        }
        rows.push(cells);
    }

    // Previous-only rows after, in their original order.
    for (index, row) in previous.rows.iter().enumerate() {
        if matched[index] {
            continue;
        }
        let key = key_of(row, &previous_keys);
        let mut cells: Vec<Value> = key.iter().map(|k| Value::String(k.clone())).collect();
        for (metric_index, _) in metrics.iter().enumerate() {
            let previous_value = cell_number(row, previous_metrics[metric_index]);
            push_comparison(&mut cells, 0.0, previous_value);
        }
        rows.push(cells);
    }

    Ok(ReportFrame::new(columns, rows))
}

fn push_comparison(cells: &mut Vec<Value>, current: f64, previous: f64) {
    let change = current - previous;
    let change_pct = if previous == 0.0 {
        0.0
    } else {
        change / previous * 100.0
    };
    cells.push(Value::from(current));
    cells.push(Value::from(previous));
    cells.push(Value::from(change));
    cells.push(Value::from(change_pct));
}

fn key_of(row: &[Value], key_indices: &[usize]) -> Vec<String> {
    key_indices
        .iter()
        .map(|&i| match row.get(i) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        })
        .collect()
}

fn cell_number(row: &[Value], index: usize) -> f64 {
    match row.get(index) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}
