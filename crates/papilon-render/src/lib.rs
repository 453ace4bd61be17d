//! Topology figure rendering and output sinks.

pub mod canvas;
pub mod error;
pub mod figure;
pub mod glyphs;
pub mod image_out;
pub mod math;
pub mod options;
pub mod sink;

pub use error::{RenderError, Result};
pub use figure::{render_figure, Figure};
pub use image_out::write_png;
pub use options::RenderOptions;
pub use sink::{FigureBuffer, FigureSink, PngSink};

use papilon_graph::TopologyGraph;

/// Draws `graph` with a seeded spring layout and hands the figure to `sink`.
///
/// An empty graph is an error rather than a blank canvas.
pub fn visualize_topology_graph(
    graph: &TopologyGraph,
    options: &RenderOptions,
    sink: &mut dyn FigureSink,
) -> Result<()> {
    let figure = render_figure(graph, options)?;
    sink.present(&figure)
}
