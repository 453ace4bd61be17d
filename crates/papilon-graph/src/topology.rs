use papilon_model::{Cell, EdgeRecord, EdgeTable, NodeId};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Named numeric attributes carried by an edge.
pub type EdgeAttrs = BTreeMap<String, f64>;

/// Undirected topology graph keyed by typed node identifier.
///
/// Nodes keep the order in which they were first seen. Parallel edges and
/// self loops are allowed.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    graph: UnGraph<NodeId, EdgeAttrs>,
    index: HashMap<NodeId, NodeIndex>,
}

/// One edge with its endpoints. `source_index` and `target_index` are
/// positions in [`TopologyGraph::nodes`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: &'a NodeId,
    pub target: &'a NodeId,
    pub source_index: usize,
    pub target_index: usize,
    pub attrs: &'a EdgeAttrs,
}

impl EdgeView<'_> {
    pub fn attr(&self, name: &str) -> Option<f64> {
        self.attrs.get(name).copied()
    }
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, id: impl Into<NodeId>) -> bool {
        self.index.contains_key(&id.into())
    }

    /// Node identifiers in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_references().map(move |edge| EdgeView {
            source: &self.graph[edge.source()],
            target: &self.graph[edge.target()],
            source_index: edge.source().index(),
            target_index: edge.target().index(),
            attrs: edge.weight(),
        })
    }

    /// Number of edges incident to `id`; a self loop counts once.
    pub fn degree(&self, id: impl Into<NodeId>) -> Option<usize> {
        let idx = self.index.get(&id.into())?;
        Some(self.graph.edges(*idx).count())
    }

    /// Plain records for every edge, reading `attr` as the weight.
    pub fn edge_records(&self, attr: Option<&str>) -> Vec<EdgeRecord> {
        self.edges()
            .map(|edge| EdgeRecord {
                source: edge.source.clone(),
                target: edge.target.clone(),
                weight: attr.and_then(|name| edge.attr(name)),
            })
            .collect()
    }

    /// Re-extracts the edge list as a table with `source`, `target` and one
    /// column per attribute name.
    pub fn to_edge_table(&self) -> EdgeTable {
        let attr_names: BTreeSet<&str> = self
            .edges()
            .flat_map(|edge| edge.attrs.keys().map(String::as_str))
            .collect();

        let mut columns = vec!["source".to_string(), "target".to_string()];
        columns.extend(attr_names.iter().map(|name| name.to_string()));
        let mut table = EdgeTable::new(columns);

        for edge in self.edges() {
            let mut row = vec![Cell::from(edge.source), Cell::from(edge.target)];
            row.extend(attr_names.iter().map(|name| Cell::from(edge.attr(name))));
            table.push_row(row);
        }

        table
    }

    pub(crate) fn graph(&self) -> &UnGraph<NodeId, EdgeAttrs> {
        &self.graph
    }

    pub(crate) fn ensure_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(idx) = self.index.get(&id) {
            return *idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    pub(crate) fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, attrs: EdgeAttrs) -> EdgeIndex {
        self.graph.add_edge(a, b, attrs)
    }

    pub(crate) fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub(crate) fn edge_attrs_mut(&mut self, edge: EdgeIndex) -> Option<&mut EdgeAttrs> {
        self.graph.edge_weight_mut(edge)
    }
}
