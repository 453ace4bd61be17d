//! Decoding tabular JSON into an [`EdgeTable`].
//!
//! Two orientations are accepted:
//!
//! - records: `[{"source": "a", "target": "b"}, ...]`
//! - columns: `{"source": ["a", ...], "target": ["b", ...]}`

use crate::error::{GraphError, Result};
use papilon_model::{Cell, EdgeTable};
use serde::Deserialize;
use serde_json::{Map, Value};

pub fn parse_edge_table(json: &str) -> Result<EdgeTable> {
    let value: Value = serde_json::from_str(json)
        .map_err(|err| GraphError::MalformedInput(format!("invalid table json: {err}")))?;

    match value {
        Value::Array(records) => records_table(records),
        Value::Object(columns) => columns_table(columns),
        other => Err(GraphError::MalformedInput(format!(
            "expected an array of records or an object of columns, found {}",
            kind(&other)
        ))),
    }
}

/// Builds a table from equally long named columns. Column order follows the
/// iteration order of `columns`.
pub fn edge_table_from_columns<I, S>(columns: I) -> Result<EdgeTable>
where
    I: IntoIterator<Item = (S, Vec<Cell>)>,
    S: Into<String>,
{
    let columns: Vec<(String, Vec<Cell>)> = columns
        .into_iter()
        .map(|(name, cells)| (name.into(), cells))
        .collect();

    let height = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
    if let Some((name, cells)) = columns.iter().find(|(_, cells)| cells.len() != height) {
        return Err(GraphError::MalformedInput(format!(
            "column `{name}` has {} values, expected {height}",
            cells.len()
        )));
    }

    let mut table = EdgeTable::new(columns.iter().map(|(name, _)| name.clone()));
    let mut iters: Vec<_> = columns.into_iter().map(|(_, cells)| cells.into_iter()).collect();
    for _ in 0..height {
        let row = iters.iter_mut().filter_map(|cells| cells.next()).collect();
        table.push_row(row);
    }

    Ok(table)
}

fn records_table(records: Vec<Value>) -> Result<EdgeTable> {
    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match record {
            Value::Object(fields) => {
                let mut row = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    row.push((key, cell(value, idx)?));
                }
                rows.push(row);
            }
            other => {
                return Err(GraphError::malformed_row(
                    idx,
                    format!("expected an object, found {}", kind(&other)),
                ))
            }
        }
    }
    Ok(EdgeTable::from_records(rows))
}

fn columns_table(columns: Map<String, Value>) -> Result<EdgeTable> {
    let mut decoded = Vec::with_capacity(columns.len());
    for (name, values) in columns {
        let cells = match values {
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(row, value)| cell(value, row))
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(GraphError::MalformedInput(format!(
                    "column `{name}` must be an array, found {}",
                    kind(&other)
                )))
            }
        };
        decoded.push((name, cells));
    }
    edge_table_from_columns(decoded)
}

fn cell(value: Value, row: usize) -> Result<Cell> {
    match value {
        Value::Array(_) | Value::Object(_) => Err(GraphError::malformed_row(
            row,
            format!("nested {} is not a table cell", kind(&value)),
        )),
        scalar => Cell::deserialize(scalar)
            .map_err(|err| GraphError::malformed_row(row, format!("unreadable cell: {err}"))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
