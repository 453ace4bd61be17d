//! Graph building and layout.

pub mod build;
pub mod error;
pub mod layout;
pub mod table;
pub mod topology;

pub use build::{create_topology_graph, BuildOptions, DuplicateEdges};
pub use error::{GraphError, Result};
pub use layout::{spring_layout, SpringSettings};
pub use table::{edge_table_from_columns, parse_edge_table};
pub use topology::{EdgeAttrs, EdgeView, TopologyGraph};
