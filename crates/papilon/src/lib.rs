//! Build topology graphs from edge tables and draw them.
//!
//! ```no_run
//! use papilon::{create_topology_graph, visualize_topology_graph, BuildOptions, PngSink, RenderOptions};
//! use papilon::model::{EdgeRecord, EdgeTable};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = EdgeTable::from_edge_records(&[
//!     EdgeRecord::weighted("A", "B", 1.0),
//!     EdgeRecord::weighted("B", "C", 2.5),
//! ]);
//! let graph = create_topology_graph(&table, &BuildOptions::default().weighted("weight"))?;
//! visualize_topology_graph(&graph, &RenderOptions::default(), &mut PngSink::new("topology.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pipeline;

pub use config::{load_config, TopologyConfig};
pub use papilon_graph::{
    create_topology_graph, parse_edge_table, spring_layout, BuildOptions, DuplicateEdges,
    GraphError, SpringSettings, TopologyGraph,
};
pub use papilon_model as model;
pub use papilon_render::{
    render_figure, visualize_topology_graph, Figure, FigureBuffer, FigureSink, PngSink,
    RenderError, RenderOptions,
};
pub use pipeline::{plot_edge_table, plot_edge_table_json};
