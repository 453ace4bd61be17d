use crate::error::{GraphError, Result};
use crate::topology::{EdgeAttrs, TopologyGraph};
use papilon_model::{Cell, EdgeTable, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do with rows that connect an already connected node pair.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdges {
    /// Every row becomes its own edge, parallel edges included.
    #[default]
    Keep,
    /// One edge per unordered node pair; later rows overwrite attributes.
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildOptions {
    pub source_col: String,
    pub target_col: String,
    pub weight_col: Option<String>,
    pub duplicates: DuplicateEdges,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source_col: "source".to_string(),
            target_col: "target".to_string(),
            weight_col: None,
            duplicates: DuplicateEdges::Keep,
        }
    }
}

impl BuildOptions {
    pub fn with_columns(source_col: impl Into<String>, target_col: impl Into<String>) -> Self {
        Self {
            source_col: source_col.into(),
            target_col: target_col.into(),
            ..Self::default()
        }
    }

    pub fn weighted(mut self, weight_col: impl Into<String>) -> Self {
        self.weight_col = Some(weight_col.into());
        self
    }

    pub fn duplicates(mut self, policy: DuplicateEdges) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Builds an undirected graph with one node per distinct identifier in the
/// source and target columns and one edge per row.
pub fn create_topology_graph(table: &EdgeTable, options: &BuildOptions) -> Result<TopologyGraph> {
    let source = column(table, &options.source_col)?;
    let target = column(table, &options.target_col)?;
    let weight = options
        .weight_col
        .as_deref()
        .map(|name| column(table, name).map(|idx| (name, idx)))
        .transpose()?;

    let width = table.columns.len();
    let mut graph = TopologyGraph::new();
    let mut merged = 0usize;

    for (row_idx, row) in table.rows.iter().enumerate() {
        if row.len() != width {
            return Err(GraphError::malformed_row(
                row_idx,
                format!("expected {width} cells, found {}", row.len()),
            ));
        }

        let from = node_id(&row[source], row_idx, &options.source_col)?;
        let to = node_id(&row[target], row_idx, &options.target_col)?;

        let mut attrs = EdgeAttrs::new();
        if let Some((name, idx)) = weight {
            let value = row[idx].as_weight().ok_or_else(|| {
                GraphError::malformed_row(
                    row_idx,
                    format!(
                        "column `{name}` is not a finite number ({})",
                        describe(&row[idx])
                    ),
                )
            })?;
            attrs.insert(name.to_string(), value);
        }

        let a = graph.ensure_node(from);
        let b = graph.ensure_node(to);

        let existing = match options.duplicates {
            DuplicateEdges::Keep => None,
            DuplicateEdges::Merge => graph.find_edge(a, b),
        };

        match existing.and_then(|edge| graph.edge_attrs_mut(edge)) {
            Some(current) => {
                current.extend(attrs);
                merged += 1;
            }
            None => {
                graph.add_edge(a, b, attrs);
            }
        }
    }

    debug!(
        rows = table.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        merged,
        "built topology graph"
    );

    Ok(graph)
}

fn column(table: &EdgeTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| GraphError::MissingColumn {
            column: name.to_string(),
            available: table.columns.clone(),
        })
}

fn node_id(cell: &Cell, row: usize, column: &str) -> Result<NodeId> {
    cell.as_node_id().ok_or_else(|| {
        GraphError::malformed_row(
            row,
            format!("column `{column}` has no usable identifier ({})", describe(cell)),
        )
    })
}

fn describe(cell: &Cell) -> String {
    match cell {
        Cell::Null => "null".to_string(),
        Cell::Bool(value) => format!("bool {value}"),
        Cell::Int(value) => format!("integer {value}"),
        Cell::Float(value) => format!("float {value}"),
        Cell::Text(value) => format!("text {value:?}"),
    }
}
