//! Serialization round-trip tests for the persisted graph format.

#[macro_use]
extern crate proptest;

use proptest::prelude::{Strategy, any, prop};

use flowgraph::graph::{GraphData, GroupData, NodeData, PortRef, Position};
use flowgraph::nodes;

/// Generate plausible kind names: a module segment plus a type segment.
fn kind_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}::[A-Z][A-Za-z0-9]{0,12}").unwrap()
}

/// Generate plausible port names.
fn port_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,12}").unwrap()
}

#[test]
fn round_trip_preserves_ids_edges_and_groups() {
    let mut graph = GraphData::new("save slot");
    let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
    let mut step = NodeData::new("demo::StepNode");
    step.position = Position { x: 120.5, y: -48.25 };
    step.expanded = false;
    let step_id = graph.add_node(step);
    graph.add_edge(
        PortRef::new(enter.clone(), "on_enter"),
        PortRef::new(step_id.clone(), "run"),
    );
    let mut group = GroupData::new("act one");
    group.contained_nodes.push(step_id.clone());
    graph.groups.push(group);
    graph.flow_type = Some("SaveSlot".to_string());

    let restored = GraphData::from_json(&graph.to_json().unwrap()).unwrap();

    assert_eq!(restored, graph);
    let ids: Vec<_> = restored.nodes.iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec![enter.clone(), step_id.clone()]);
    assert_eq!(restored.edges[0].from, PortRef::new(enter, "on_enter"));
    assert_eq!(restored.edges[0].to, PortRef::new(step_id.clone(), "run"));
    assert_eq!(restored.groups[0].contained_nodes, vec![step_id]);
    assert_eq!(restored.flow_type.as_deref(), Some("SaveSlot"));
}

#[test]
fn missing_optional_fields_get_defaults() {
    let json = r#"{
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "name": "minimal",
        "nodes": [{"id": "n1", "kind": "demo::StepNode"}]
    }"#;
    let graph = GraphData::from_json(json).unwrap();
    assert!(graph.edges.is_empty());
    assert!(graph.groups.is_empty());
    assert!(graph.flow_type.is_none());
    assert!(graph.nodes[0].expanded);
    assert_eq!(graph.nodes[0].position, Position::default());
}

#[test]
fn malformed_payloads_are_rejected() {
    assert!(GraphData::from_json("{\"name\": 3}").is_err());
    assert!(GraphData::from_json("not json").is_err());
}

proptest! {
    /// Round-trip holds for arbitrary well-formed graphs: node ids, edge
    /// endpoint pairs, and group memberships all survive serialization.
    #[test]
    fn prop_round_trip_preserves_structure(
        kinds in prop::collection::vec(kind_name_strategy(), 1..8),
        ports in prop::collection::vec(port_name_strategy(), 2..6),
        edge_seeds in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>()), 0..12),
        positions in prop::collection::vec((any::<i16>(), any::<i16>()), 1..8),
        expanded in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut graph = GraphData::new("property graph");
        let mut ids = Vec::new();
        for (index, kind) in kinds.iter().enumerate() {
            let mut node = NodeData::new(kind.clone());
            let (x, y) = positions[index % positions.len()];
            node.position = Position { x: f32::from(x), y: f32::from(y) };
            node.expanded = expanded[index % expanded.len()];
            ids.push(graph.add_node(node));
        }
        for (from, to, from_port, to_port) in &edge_seeds {
            let from_id = ids[*from as usize % ids.len()].clone();
            let to_id = ids[*to as usize % ids.len()].clone();
            graph.add_edge(
                PortRef::new(from_id, ports[*from_port as usize % ports.len()].clone()),
                PortRef::new(to_id, ports[*to_port as usize % ports.len()].clone()),
            );
        }
        let mut group = GroupData::new("everything");
        group.contained_nodes = ids.clone();
        graph.groups.push(group);

        let restored = GraphData::from_json(&graph.to_json().unwrap()).unwrap();
        prop_assert_eq!(&restored, &graph);

        let restored_ids: Vec<_> = restored.nodes.iter().map(|n| n.id.clone()).collect();
        prop_assert_eq!(restored_ids, ids);
    }
}
