use crate::canvas::Canvas;
use crate::error::{RenderError, Result};
use crate::glyphs::GLYPH_HEIGHT;
use crate::math::Vec2;
use crate::options::RenderOptions;
use image::{Rgb, RgbImage};
use papilon_graph::{spring_layout, TopologyGraph};
use papilon_model::Layout;
use tracing::debug;

const MARGIN: f64 = 24.0;

/// A drawn topology graph together with the layout used to draw it.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub layout: Layout,
    pub image: RgbImage,
}

/// Lays out `graph` and draws edges, nodes, labels and the title caption.
pub fn render_figure(graph: &TopologyGraph, options: &RenderOptions) -> Result<Figure> {
    options.validate()?;
    if graph.is_empty() {
        return Err(RenderError::EmptyGraph);
    }

    let layout = spring_layout(graph, &options.layout);
    let mut canvas = Canvas::new(options.width, options.height, Rgb(options.background));

    let radius = options.marker_radius();
    let title_scale = options.title_scale();
    let title_band = if options.title.is_empty() {
        0.0
    } else {
        f64::from(GLYPH_HEIGHT * title_scale) + MARGIN
    };

    let frame = Frame::fit(
        &layout,
        Vec2::new(MARGIN, MARGIN + title_band),
        Vec2::new(
            f64::from(options.width) - 2.0 * MARGIN,
            f64::from(options.height) - 2.0 * MARGIN - title_band,
        ),
        radius + 1.0,
    );

    let edge_color = Rgb(options.edge_color);
    let edge_width = options.edge_width();
    for edge in graph.edges() {
        let (Some(a), Some(b)) = (
            layout.nodes.get(edge.source_index),
            layout.nodes.get(edge.target_index),
        ) else {
            continue;
        };
        let (a, b) = (frame.map(a.position), frame.map(b.position));
        if edge.source_index == edge.target_index {
            let loop_radius = radius * 0.6;
            canvas.stroke_circle(
                a - Vec2::new(0.0, radius + loop_radius * 0.5),
                loop_radius,
                edge_width,
                edge_color,
            );
        } else {
            canvas.stroke_line(a, b, edge_width, edge_color);
        }
    }

    let node_color = Rgb(options.node_color);
    for node in &layout.nodes {
        canvas.fill_disc(frame.map(node.position), radius, node_color);
    }

    if options.with_labels {
        let label_color = Rgb(options.label_color);
        let scale = options.label_scale();
        for node in &layout.nodes {
            let label = node.id.to_string();
            canvas.draw_text_centered(frame.map(node.position), &label, scale, label_color);
        }
    }

    if !options.title.is_empty() {
        let center = Vec2::new(
            f64::from(options.width) * 0.5,
            MARGIN + f64::from(GLYPH_HEIGHT * title_scale) * 0.5,
        );
        canvas.draw_text_centered(center, &options.title, title_scale, Rgb(options.label_color));
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        width = options.width,
        height = options.height,
        "rendered figure"
    );

    Ok(Figure {
        title: options.title.clone(),
        layout,
        image: canvas.into_image(),
    })
}

/// Maps layout coordinates into a pixel rectangle, y pointing down.
struct Frame {
    min: [f64; 2],
    span: [f64; 2],
    origin: Vec2,
    size: Vec2,
}

impl Frame {
    fn fit(layout: &Layout, origin: Vec2, size: Vec2, padding: f64) -> Self {
        let (min, max) = layout.bounds().unwrap_or(([0.0, 0.0], [0.0, 0.0]));
        let pad_x = padding.min(size.x.max(0.0) * 0.5);
        let pad_y = padding.min(size.y.max(0.0) * 0.5);
        Self {
            min,
            span: [max[0] - min[0], max[1] - min[1]],
            origin: origin + Vec2::new(pad_x, pad_y),
            size: Vec2::new(
                (size.x - 2.0 * pad_x).max(0.0),
                (size.y - 2.0 * pad_y).max(0.0),
            ),
        }
    }

    fn map(&self, position: [f64; 2]) -> Vec2 {
        let unit = |value: f64, min: f64, span: f64| {
            if span > 0.0 {
                (value - min) / span
            } else {
                0.5
            }
        };
        let fx = unit(position[0], self.min[0], self.span[0]);
        let fy = unit(position[1], self.min[1], self.span[1]);
        Vec2::new(
            self.origin.x + fx * self.size.x,
            self.origin.y + (1.0 - fy) * self.size.y,
        )
    }
}
