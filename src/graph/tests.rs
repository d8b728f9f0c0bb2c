//! Tests for the graph data model, resolution, and structural validation.

use super::*;
use crate::nodes;
use crate::registry::{DescriptorRegistry, KindRegistration, PortDescriptor, PortDirection};
use crate::types::{NodeId, ValueType};

fn registry_with_builtins() -> DescriptorRegistry {
    let registry = DescriptorRegistry::new();
    nodes::register_builtins(&registry);
    registry
}

fn relay_kind() -> KindRegistration {
    KindRegistration::new("demo::RelayNode", "Relay")
        .with_port(PortDescriptor::input(
            "trigger",
            ValueType::unit(),
            ValueType::unit(),
        ))
        .with_port(PortDescriptor::output(
            "on_done",
            ValueType::unit(),
            ValueType::unit(),
        ))
}

#[test]
fn json_round_trip_preserves_structure() {
    let mut graph = GraphData::new("quest intro");
    let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
    let relay = graph.add_node(NodeData::new("demo::RelayNode"));
    graph.add_edge(
        PortRef::new(enter.clone(), "on_enter"),
        PortRef::new(relay.clone(), "trigger"),
    );
    let mut group = GroupData::new("intro steps");
    group.contained_nodes.push(relay.clone());
    graph.groups.push(group);
    graph.flow_type = Some("QuestIntro".to_string());

    let json = graph.to_json().unwrap();
    let restored = GraphData::from_json(&json).unwrap();

    assert_eq!(restored, graph);
    assert_eq!(restored.nodes[0].id, enter);
    assert_eq!(restored.edges[0].to.port, "trigger");
    assert_eq!(restored.groups[0].contained_nodes, vec![relay]);
}

#[test]
fn edges_from_preserves_declaration_order() {
    let mut graph = GraphData::new("fanout");
    let a = graph.add_node(NodeData::new("demo::RelayNode"));
    let b = graph.add_node(NodeData::new("demo::RelayNode"));
    let c = graph.add_node(NodeData::new("demo::RelayNode"));
    graph.add_edge(
        PortRef::new(a.clone(), "on_done"),
        PortRef::new(c.clone(), "trigger"),
    );
    graph.add_edge(
        PortRef::new(a.clone(), "on_done"),
        PortRef::new(b.clone(), "trigger"),
    );

    let targets: Vec<_> = graph
        .edges_from(&a)
        .map(|edge| edge.to.node.clone())
        .collect();
    assert_eq!(targets, vec![c, b]);
}

#[test]
fn unknown_kind_degrades_to_placeholder_with_reconstructed_ports() {
    let registry = registry_with_builtins();

    let mut graph = GraphData::new("broken");
    let ghost = graph.add_node(NodeData::new("legacy::RemovedNode"));
    let other = graph.add_node(NodeData::new("demo::RelayNode"));
    graph.add_edge(
        PortRef::new(ghost.clone(), "on_fire").with_wiring_hook("add_case"),
        PortRef::new(other.clone(), "trigger"),
    );
    graph.add_edge(
        PortRef::new(other.clone(), "on_done"),
        PortRef::new(ghost.clone(), "resume"),
    );

    let node = graph.node(&ghost).unwrap();
    let resolved = resolve_kind(node, &graph.edges, &registry);
    assert!(resolved.is_placeholder());
    assert_eq!(resolved.kind_name(), "legacy::RemovedNode");

    let ports = resolved.ports();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].name, "on_fire");
    assert_eq!(ports[0].direction, PortDirection::Output);
    assert_eq!(ports[0].wiring_hook.as_deref(), Some("add_case"));
    assert_eq!(ports[1].name, "resume");
    assert_eq!(ports[1].direction, PortDirection::Input);
    assert!(ports.iter().all(|port| port.parameter.is_unit()));
}

#[test]
fn validation_accepts_a_well_formed_graph() {
    let registry = registry_with_builtins();
    registry.register(relay_kind()).unwrap();

    let mut graph = GraphData::new("ok");
    let enter = graph.add_node(NodeData::new(nodes::ENTER_KIND));
    let relay = graph.add_node(NodeData::new("demo::RelayNode"));
    graph.add_edge(
        PortRef::new(enter.clone(), "on_enter"),
        PortRef::new(relay.clone(), "trigger"),
    );

    let validated = validate(&graph, &registry).unwrap();
    assert_eq!(validated.enter_id(), &enter);
    assert!(validated.registration(&relay).is_some());
}

#[test]
fn validation_lists_every_problem_in_one_pass() {
    let registry = registry_with_builtins();

    let mut graph = GraphData::new("broken");
    graph.add_node(NodeData::new("legacy::GoneA"));
    graph.add_node(NodeData::new("legacy::GoneB"));

    let error = validate(&graph, &registry).unwrap_err();
    assert_eq!(error.problems.len(), 3);
    assert!(
        error
            .problems
            .iter()
            .any(|p| matches!(p, StructuralProblem::MissingEnter))
    );
    assert_eq!(
        error
            .problems
            .iter()
            .filter(|p| matches!(p, StructuralProblem::UnresolvedKind { .. }))
            .count(),
        2
    );
}

#[test]
fn validation_rejects_multiple_enter_nodes() {
    let registry = registry_with_builtins();

    let mut graph = GraphData::new("double-start");
    let first = graph.add_node(NodeData::new(nodes::ENTER_KIND));
    let second = graph.add_node(NodeData::new(nodes::ENTER_KIND));

    let error = validate(&graph, &registry).unwrap_err();
    assert_eq!(error.problems.len(), 1);
    match &error.problems[0] {
        StructuralProblem::MultipleEnter { nodes } => {
            assert_eq!(nodes, &vec![first, second]);
        }
        other => panic!("unexpected problem: {other}"),
    }
}

#[test]
fn node_ids_survive_port_refs() {
    let id = NodeId::generate();
    let port = PortRef::new(id.clone(), "go");
    assert_eq!(port.node, id);
}
