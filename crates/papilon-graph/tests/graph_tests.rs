use papilon_graph::{create_topology_graph, BuildOptions, DuplicateEdges, GraphError};
use papilon_model::{Cell, EdgeRecord, EdgeTable, NodeId};

fn row(source: &str, target: &str, weight: f64) -> Vec<Cell> {
    vec![Cell::from(source), Cell::from(target), Cell::from(weight)]
}

fn weighted_table(rows: &[(&str, &str, f64)]) -> EdgeTable {
    let mut table = EdgeTable::new(["source", "target", "weight"]);
    for (source, target, weight) in rows {
        table.push_row(row(source, target, *weight));
    }
    table
}

#[test]
fn weighted_rows_carry_named_attribute() {
    let table = weighted_table(&[("A", "B", 1.0), ("B", "C", 2.5)]);
    let options = BuildOptions::default().weighted("weight");

    let graph = create_topology_graph(&table, &options).unwrap();

    assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(graph.edge_count(), 2);

    let edge = |from: &str, to: &str| {
        graph
            .edges()
            .find(|edge| edge.source == from && edge.target == to)
            .unwrap()
    };
    assert_eq!(edge("A", "B").attr("weight"), Some(1.0));
    assert_eq!(edge("B", "C").attr("weight"), Some(2.5));
}

#[test]
fn unweighted_build_leaves_edges_bare() {
    let table = weighted_table(&[("A", "B", 1.0), ("B", "C", 2.5)]);
    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert!(graph.edges().all(|edge| edge.attrs.is_empty()));
}

#[test]
fn custom_column_names_are_honored() {
    let mut table = EdgeTable::new(["from", "to", "latency"]);
    table.push_row(row("r1", "r2", 4.0));
    table.push_row(row("r2", "r3", 6.5));

    let options = BuildOptions::with_columns("from", "to").weighted("latency");
    let graph = create_topology_graph(&table, &options).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(
        graph.edge_records(Some("latency")),
        vec![
            EdgeRecord::weighted("r1", "r2", 4.0),
            EdgeRecord::weighted("r2", "r3", 6.5),
        ]
    );
}

#[test]
fn missing_source_column_is_reported() {
    let table = weighted_table(&[("A", "B", 1.0)]);
    let options = BuildOptions::with_columns("from", "target");

    let err = create_topology_graph(&table, &options).unwrap_err();
    match err {
        GraphError::MissingColumn { column, available } => {
            assert_eq!(column, "from");
            assert_eq!(available, vec!["source", "target", "weight"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_weight_column_is_reported() {
    let table = EdgeTable::from_edge_records(&[EdgeRecord::new("A", "B")]);
    let options = BuildOptions::default().weighted("cost");

    let err = create_topology_graph(&table, &options).unwrap_err();
    assert!(matches!(err, GraphError::MissingColumn { ref column, .. } if column == "cost"));
}

#[test]
fn non_numeric_weight_is_malformed() {
    let mut table = EdgeTable::new(["source", "target", "weight"]);
    table.push_row(vec![Cell::from("A"), Cell::from("B"), Cell::from("heavy")]);

    let err = create_topology_graph(&table, &BuildOptions::default().weighted("weight"))
        .unwrap_err();
    match err {
        GraphError::MalformedInput(reason) => {
            assert!(reason.contains("row 0"), "{reason}");
            assert!(reason.contains("weight"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_finite_weight_is_malformed() {
    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let table = weighted_table(&[("A", "B", bad), ("B", "C", 1.0)]);

        let err = create_topology_graph(&table, &BuildOptions::default().weighted("weight"))
            .unwrap_err();
        match err {
            GraphError::MalformedInput(reason) => {
                assert!(reason.contains("row 0"), "{reason}");
                assert!(reason.contains("finite"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn non_finite_weight_is_fine_when_weights_are_ignored() {
    let table = weighted_table(&[("A", "B", f64::INFINITY)]);
    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn null_identifier_is_malformed() {
    let mut table = EdgeTable::new(["source", "target"]);
    table.push_row(vec![Cell::from("A"), Cell::from("B")]);
    table.push_row(vec![Cell::Null, Cell::from("B")]);

    let err = create_topology_graph(&table, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, GraphError::MalformedInput(ref reason) if reason.contains("row 1")));
}

#[test]
fn short_row_is_malformed() {
    let mut table = EdgeTable::new(["source", "target"]);
    table.push_row(vec![Cell::from("A")]);

    let err = create_topology_graph(&table, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, GraphError::MalformedInput(_)));
}

#[test]
fn single_row_gives_two_nodes_one_edge() {
    let table = EdgeTable::from_edge_records(&[EdgeRecord::new("A", "B")]);
    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn self_loop_gives_one_node_one_edge() {
    let table = EdgeTable::from_edge_records(&[EdgeRecord::new("A", "A")]);
    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.degree("A"), Some(1));
    assert!(graph.contains_node("A"));
    assert!(!graph.contains_node("B"));
}

#[test]
fn empty_table_builds_empty_graph() {
    let table = EdgeTable::new(["source", "target"]);
    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn numeric_identifiers_become_node_ids() {
    let mut table = EdgeTable::new(["source", "target"]);
    table.push_row(vec![Cell::Int(1), Cell::Int(2)]);
    table.push_row(vec![Cell::Int(2), Cell::from("3")]);

    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();
    assert_eq!(
        graph.nodes().cloned().collect::<Vec<_>>(),
        vec![NodeId::Int(1), NodeId::Int(2), NodeId::from("3")]
    );
}

#[test]
fn identifiers_of_different_kinds_stay_apart() {
    let mut table = EdgeTable::new(["source", "target"]);
    table.push_row(vec![Cell::Int(1), Cell::from("x")]);
    table.push_row(vec![Cell::from("1"), Cell::from("x")]);
    table.push_row(vec![Cell::Bool(true), Cell::from("true")]);

    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.degree(NodeId::Int(1)), Some(1));
    assert_eq!(graph.degree("1"), Some(1));
    assert_eq!(graph.degree("x"), Some(2));
    assert!(graph.contains_node(true));
    assert!(graph.contains_node("true"));

    let labels: Vec<String> = graph.nodes().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["1", "x", "1", "true", "true"]);
}

#[test]
fn integral_floats_share_a_node_with_integers() {
    let mut table = EdgeTable::new(["source", "target"]);
    table.push_row(vec![Cell::Int(1), Cell::Float(2.0)]);
    table.push_row(vec![Cell::Float(1.0), Cell::Float(2.5)]);

    let graph = create_topology_graph(&table, &BuildOptions::default()).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.degree(1i64), Some(2));
    assert_eq!(graph.degree(2i64), Some(1));

    let extracted = graph.to_edge_table();
    assert_eq!(extracted.rows[0], vec![Cell::Int(1), Cell::Int(2)]);
    assert_eq!(extracted.rows[1], vec![Cell::Int(1), Cell::Float(2.5)]);
}

#[test]
fn duplicates_are_kept_as_parallel_edges_by_default() {
    let table = weighted_table(&[("A", "B", 1.0), ("B", "A", 3.0), ("A", "B", 5.0)]);
    let graph =
        create_topology_graph(&table, &BuildOptions::default().weighted("weight")).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degree("A"), Some(3));
}

#[test]
fn merge_policy_collapses_pairs_and_keeps_last_weight() {
    let table = weighted_table(&[("A", "B", 1.0), ("B", "A", 3.0), ("B", "C", 2.0)]);
    let options = BuildOptions::default()
        .weighted("weight")
        .duplicates(DuplicateEdges::Merge);

    let graph = create_topology_graph(&table, &options).unwrap();

    assert_eq!(graph.edge_count(), 2);
    let ab = graph
        .edges()
        .find(|edge| edge.source == "A" && edge.target == "B")
        .unwrap();
    assert_eq!(ab.attr("weight"), Some(3.0));
}

#[test]
fn to_edge_table_round_trips_through_builder() {
    let table = weighted_table(&[("A", "B", 1.0), ("B", "C", 2.5), ("C", "A", 0.5)]);
    let options = BuildOptions::default().weighted("weight");
    let graph = create_topology_graph(&table, &options).unwrap();

    let extracted = graph.to_edge_table();
    assert_eq!(extracted.columns, vec!["source", "target", "weight"]);
    assert_eq!(extracted, table);

    let rebuilt = create_topology_graph(&extracted, &options).unwrap();
    assert_eq!(
        rebuilt.edge_records(Some("weight")),
        graph.edge_records(Some("weight"))
    );
}
