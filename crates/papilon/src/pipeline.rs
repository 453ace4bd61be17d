use crate::config::TopologyConfig;
use anyhow::{Context, Result};
use papilon_graph::{create_topology_graph, parse_edge_table, TopologyGraph};
use papilon_model::EdgeTable;
use papilon_render::{visualize_topology_graph, FigureSink};
use tracing::info;

/// Builds the graph described by `config.columns` and draws it into `sink`.
pub fn plot_edge_table(
    table: &EdgeTable,
    config: &TopologyConfig,
    sink: &mut dyn FigureSink,
) -> Result<TopologyGraph> {
    let graph = create_topology_graph(table, &config.columns)
        .context("failed to build topology graph")?;
    visualize_topology_graph(&graph, &config.render, sink)
        .with_context(|| format!("failed to render {:?}", config.render.title))?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        title = %config.render.title,
        "plotted edge table"
    );
    Ok(graph)
}

/// Same as [`plot_edge_table`] for JSON tabular input (records or columns).
pub fn plot_edge_table_json(
    json: &str,
    config: &TopologyConfig,
    sink: &mut dyn FigureSink,
) -> Result<TopologyGraph> {
    let table = parse_edge_table(json).context("failed to read edge table")?;
    plot_edge_table(&table, config, sink)
}
