use crate::topology::TopologyGraph;
use papilon_model::{Layout, LayoutNode, NodeId};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MIN_DISTANCE: f64 = 0.01;
// displacements shorter than MIN_DISTANCE are divided by this instead
const SHORT_DISPLACEMENT: f64 = 0.1;

/// Parameters of the Fruchterman-Reingold spring layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpringSettings {
    pub seed: u64,
    pub iterations: u32,
    /// Optimal node distance; `1 / sqrt(n)` when unset.
    pub k: Option<f64>,
    pub scale: f64,
    pub threshold: f64,
    /// Edge attribute used as spring strength. Edges without it pull with 1.0.
    pub weight_attr: Option<String>,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 50,
            k: None,
            scale: 1.0,
            threshold: 1e-4,
            weight_attr: Some("weight".to_string()),
        }
    }
}

/// Positions every node with a seeded force-directed layout. The result is
/// centered on the origin and scaled so the largest coordinate magnitude
/// equals `settings.scale`.
pub fn spring_layout(graph: &TopologyGraph, settings: &SpringSettings) -> Layout {
    let inner = graph.graph();
    let n = inner.node_count();
    let ids: Vec<&NodeId> = graph.nodes().collect();

    if n == 0 {
        return Layout::default();
    }
    if n == 1 {
        return Layout {
            nodes: vec![LayoutNode {
                id: ids[0].clone(),
                position: [0.0, 0.0],
            }],
        };
    }

    let mut adjacency = vec![0.0_f64; n * n];
    for edge in inner.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        let strength = settings
            .weight_attr
            .as_deref()
            .and_then(|name| edge.weight().get(name).copied())
            .unwrap_or(1.0);
        adjacency[a * n + b] += strength;
        if a != b {
            adjacency[b * n + a] += strength;
        }
    }

    let mut pos: Vec<[f64; 2]> = ids
        .iter()
        .map(|id| [unit_hash(settings.seed, id, 0), unit_hash(settings.seed, id, 1)])
        .collect();

    let k = settings.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
    let (min, max) = extent(&pos);
    let mut temperature = (max[0] - min[0]).max(max[1] - min[1]) * 0.1;
    let cooling = temperature / (f64::from(settings.iterations) + 1.0);
    let mut ran = 0;

    for _ in 0..settings.iterations {
        ran += 1;
        let mut displacement = vec![[0.0_f64; 2]; n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force =
                    k * k / (distance * distance) - adjacency[i * n + j] * distance / k;
                displacement[i][0] += dx * force;
                displacement[i][1] += dy * force;
            }
        }

        let moved = apply_displacement(&mut pos, &displacement, temperature);
        temperature -= cooling;
        if moved / (n as f64) < settings.threshold {
            break;
        }
    }

    rescale(&mut pos, settings.scale);
    debug!(nodes = n, iterations = ran, "computed spring layout");

    Layout {
        nodes: ids
            .into_iter()
            .zip(pos)
            .map(|(id, position)| LayoutNode {
                id: id.clone(),
                position,
            })
            .collect(),
    }
}

/// Moves every node by its displacement limited to `temperature` and returns
/// the Frobenius norm of all steps taken.
fn apply_displacement(pos: &mut [[f64; 2]], displacement: &[[f64; 2]], temperature: f64) -> f64 {
    let mut moved_sq = 0.0;
    for (p, d) in pos.iter_mut().zip(displacement) {
        let length = (d[0] * d[0] + d[1] * d[1]).sqrt();
        let length = if length < MIN_DISTANCE {
            SHORT_DISPLACEMENT
        } else {
            length
        };
        let step = [d[0] * temperature / length, d[1] * temperature / length];
        p[0] += step[0];
        p[1] += step[1];
        moved_sq += step[0] * step[0] + step[1] * step[1];
    }
    moved_sq.sqrt()
}

fn extent(pos: &[[f64; 2]]) -> ([f64; 2], [f64; 2]) {
    pos.iter().fold(
        ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
        |(min, max), p| {
            (
                [min[0].min(p[0]), min[1].min(p[1])],
                [max[0].max(p[0]), max[1].max(p[1])],
            )
        },
    )
}

fn rescale(pos: &mut [[f64; 2]], scale: f64) {
    let n = pos.len() as f64;
    let mean = pos
        .iter()
        .fold([0.0, 0.0], |acc, p| [acc[0] + p[0] / n, acc[1] + p[1] / n]);

    let mut limit = 0.0_f64;
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
        limit = limit.max(p[0].abs()).max(p[1].abs());
    }

    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] *= scale / limit;
            p[1] *= scale / limit;
        }
    }
}

/// Deterministic value in `[0, 1)` for a node id and axis.
fn unit_hash(seed: u64, id: &NodeId, axis: u8) -> f64 {
    let mut hash = 0xcbf29ce484222325u64 ^ seed;
    for byte in id_bytes(id).iter().chain(std::iter::once(&axis)) {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    // splitmix finalizer spreads ids that differ only in the last byte
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d049bb133111eb);
    hash ^= hash >> 31;
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

// Kind tag first, so `1` and `"1"` start from different positions.
fn id_bytes(id: &NodeId) -> Vec<u8> {
    let mut bytes = Vec::new();
    match id {
        NodeId::Bool(value) => bytes.extend([0, u8::from(*value)]),
        NodeId::Int(value) => {
            bytes.push(1);
            bytes.extend(value.to_le_bytes());
        }
        NodeId::Float(value) => {
            bytes.push(2);
            bytes.extend(value.get().to_bits().to_le_bytes());
        }
        NodeId::Text(value) => {
            bytes.push(3);
            bytes.extend(value.as_bytes());
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_hash_is_stable_and_in_range() {
        for id in ["a", "b", "router-1", ""] {
            let id = NodeId::from(id);
            for axis in 0..2 {
                let value = unit_hash(42, &id, axis);
                assert!((0.0..1.0).contains(&value));
                assert_eq!(value, unit_hash(42, &id, axis));
            }
        }
        let a = NodeId::from("a");
        assert_ne!(unit_hash(42, &a, 0), unit_hash(42, &a, 1));
        assert_ne!(unit_hash(42, &a, 0), unit_hash(7, &a, 0));
        assert_ne!(
            unit_hash(42, &NodeId::Int(1), 0),
            unit_hash(42, &NodeId::from("1"), 0)
        );
    }

    #[test]
    fn short_displacements_divide_by_a_tenth() {
        let mut pos = vec![[0.0, 0.0]];
        apply_displacement(&mut pos, &[[0.005, 0.0]], 0.1);
        assert!((pos[0][0] - 0.005).abs() < 1e-12);
        assert_eq!(pos[0][1], 0.0);
    }

    #[test]
    fn movement_is_the_frobenius_norm_of_steps() {
        let mut pos = vec![[0.0, 0.0], [1.0, 1.0]];
        let moved = apply_displacement(&mut pos, &[[3.0, 0.0], [0.0, 4.0]], 1.0);
        assert_eq!(pos, vec![[1.0, 0.0], [1.0, 2.0]]);
        assert!((moved - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rescale_centers_and_bounds() {
        let mut pos = vec![[0.0, 0.0], [4.0, 2.0]];
        rescale(&mut pos, 1.0);
        assert_eq!(pos, vec![[-1.0, -0.5], [1.0, 0.5]]);
    }
}
