//! Shared data structures for papilon.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single value in an edge table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Node identifier for this cell, if it can name a node.
    pub fn as_node_id(&self) -> Option<NodeId> {
        match self {
            Cell::Null => None,
            Cell::Bool(value) => Some(NodeId::Bool(*value)),
            Cell::Int(value) => Some(NodeId::Int(*value)),
            Cell::Float(value) => NodeId::from_f64(*value),
            Cell::Text(value) => Some(NodeId::Text(value.clone())),
        }
    }

    /// Finite numeric value of the cell. Text is never parsed.
    pub fn as_weight(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

impl From<&NodeId> for Cell {
    fn from(value: &NodeId) -> Self {
        match value {
            NodeId::Bool(value) => Cell::Bool(*value),
            NodeId::Int(value) => Cell::Int(*value),
            NodeId::Float(value) => Cell::Float(value.get()),
            NodeId::Text(value) => Cell::Text(value.clone()),
        }
    }
}

impl From<NodeId> for Cell {
    fn from(value: NodeId) -> Self {
        match value {
            NodeId::Text(value) => Cell::Text(value),
            other => Cell::from(&other),
        }
    }
}

/// Typed node identity.
///
/// Values of different kinds never share a node: `1` and `"1"` are two
/// nodes. Integral floats are stored as integers, so `1.0` and `1` are one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Cell", into = "Cell")]
pub enum NodeId {
    Bool(bool),
    Int(i64),
    Float(FloatId),
    Text(String),
}

impl NodeId {
    /// `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // i64::MAX as f64 rounds up to 2^63
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            return Some(NodeId::Int(value as i64));
        }
        Some(NodeId::Float(FloatId(value)))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeId::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Bool(value) => write!(f, "{value}"),
            NodeId::Int(value) => write!(f, "{value}"),
            NodeId::Float(value) => write!(f, "{}", value.get()),
            NodeId::Text(value) => f.write_str(value),
        }
    }
}

impl TryFrom<Cell> for NodeId {
    type Error = String;

    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        cell.as_node_id()
            .ok_or_else(|| format!("{cell:?} cannot identify a node"))
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Int(value)
    }
}

impl From<bool> for NodeId {
    fn from(value: bool) -> Self {
        NodeId::Bool(value)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// A finite, non-integral float that hashes and orders by value.
#[derive(Debug, Clone, Copy)]
pub struct FloatId(f64);

impl FloatId {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatId {}

impl Hash for FloatId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Column-named rows describing connections between entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdgeTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl EdgeTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from name/value records. Columns are the union of all
    /// keys in first-seen order; absent values become `Cell::Null`.
    pub fn from_records<I, R, K>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, Cell)>,
        K: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut keyed: Vec<BTreeMap<String, Cell>> = Vec::new();

        for record in records {
            let mut row = BTreeMap::new();
            for (key, cell) in record {
                let key = key.into();
                if !columns.contains(&key) {
                    columns.push(key.clone());
                }
                row.insert(key, cell);
            }
            keyed.push(row);
        }

        let rows = keyed
            .into_iter()
            .map(|mut row| {
                columns
                    .iter()
                    .map(|column| row.remove(column).unwrap_or(Cell::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// A `source,target[,weight]` table from plain records.
    pub fn from_edge_records(records: &[EdgeRecord]) -> Self {
        let weighted = records.iter().any(|record| record.weight.is_some());
        let mut table = if weighted {
            Self::new(["source", "target", "weight"])
        } else {
            Self::new(["source", "target"])
        };

        for record in records {
            let mut row = vec![Cell::from(&record.source), Cell::from(&record.target)];
            if weighted {
                row.push(Cell::from(record.weight));
            }
            table.push_row(row);
        }

        table
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl EdgeRecord {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }

    pub fn weighted(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(source, target)
        }
    }
}

/// Node positions computed for drawing. Never part of the graph itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub position: [f64; 2],
}

impl Layout {
    pub fn position<Q>(&self, id: &Q) -> Option<[f64; 2]>
    where
        Q: ?Sized,
        NodeId: PartialEq<Q>,
    {
        self.nodes
            .iter()
            .find(|node| node.id == *id)
            .map(|node| node.position)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(min, max)` corners of the bounding box, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.nodes.first()?.position;
        Some(self.nodes.iter().fold((first, first), |(min, max), node| {
            let [x, y] = node.position;
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        }))
    }
}
