//! Tests for address resolution and structural navigation.
mod common;
use common::*;
use runtree::prelude::*;

/// Start -> Decision -> (ListA | ListB) -> End, with both branches converging.
fn branching_root() -> RunStep {
    let steps = vec![
        start_step("id1"),
        list_step("id2", vec![single_step("rv-a", 1, false)]),
        list_step("id3", vec![single_step("rv-b", 2, false)]),
        end_step("id4", true),
    ];
    let links = vec![
        link("l1", "id1", "id2"),
        link("l2", "id1", "id3"),
        link("l3", "id2", "id4"),
        link("l4", "id3", "id4"),
    ];
    RunStep::MultiRoutine(MultiRoutineStep {
        name: "Main".to_string(),
        description: None,
        location: vec![1],
        routine_version_id: "rv-main".to_string(),
        node_links: links.clone(),
        nodes: sort_steps_and_add_decisions(steps, &links, &[1]),
    })
}

fn collect_locations(step: &RunStep, out: &mut Vec<Location>) {
    out.push(step.location().clone());
    for child in step.children() {
        collect_locations(child, out);
    }
}

#[test]
fn resolves_root_and_nested_steps() {
    let root = branching_root();
    assert_eq!(step_from_location(&[1], &root), Some(&root));

    let start = step_from_location(&[1, 1], &root).expect("start not found");
    assert_eq!(start.node_id(), Some("id1"));

    // Multi-routine children resolve by trailing address element, so decision
    // insertion does not shift them.
    let list_a = step_from_location(&[1, 3], &root).expect("list not found");
    assert_eq!(list_a.node_id(), Some("id2"));

    let leaf = step_from_location(&[1, 3, 1], &root).expect("leaf not found");
    assert!(matches!(leaf, RunStep::SingleRoutine(_)));
}

#[test]
fn rejects_malformed_locations() {
    let root = branching_root();
    assert_eq!(step_from_location(&[], &root), None);
    assert_eq!(step_from_location(&[2], &root), None);
    assert_eq!(step_from_location(&[1, 99], &root), None);
    assert_eq!(step_from_location(&[1, 0], &root), None);
    assert_eq!(step_from_location(&[1, 1, 1], &root), None);
}

#[test]
fn addresses_round_trip_through_resolution() {
    let root = branching_root();
    let mut locations = Vec::new();
    collect_locations(&root, &mut locations);
    assert!(locations.len() > 5);
    for location in locations {
        let step = step_from_location(&location, &root)
            .unwrap_or_else(|| panic!("{location:?} did not resolve"));
        assert_eq!(step.location(), &location);
    }
}

#[test]
fn next_location_walks_a_linear_routine() {
    let version = linear_version("rv-main", vec![simple_version("rv-a", 3)]);
    let root = build_routine_step(&version, &languages());

    // Empty location starts at the root.
    assert_eq!(get_next_location(&[], &root), Some(vec![1]));
    // Root descends into its first node.
    assert_eq!(get_next_location(&[1], &root), Some(vec![1, 1]));
    // Start follows its determined successor.
    assert_eq!(get_next_location(&[1, 1], &root), Some(vec![1, 2]));
    // The list descends into its first child before following next_location.
    assert_eq!(get_next_location(&[1, 2], &root), Some(vec![1, 2, 1]));
    // The leaf has no child and no sibling, so the list's successor applies.
    assert_eq!(get_next_location(&[1, 2, 1], &root), Some(vec![1, 3]));
    // The end has nowhere to go.
    assert_eq!(get_next_location(&[1, 3], &root), None);
}

#[test]
fn next_location_stops_at_decisions() {
    let root = branching_root();
    // [1, 2] is the synthesized decision; choosing is external.
    assert!(matches!(
        step_from_location(&[1, 2], &root),
        Some(RunStep::Decision(_))
    ));
    assert_eq!(get_next_location(&[1, 2], &root), None);
}

#[test]
fn next_location_prefers_sibling_over_climbing() {
    let steps = vec![
        start_step("id1"),
        list_step(
            "id2",
            vec![single_step("rv-a", 1, false), single_step("rv-b", 2, false)],
        ),
        end_step("id3", true),
    ];
    let links = vec![link("l1", "id1", "id2"), link("l2", "id2", "id3")];
    let root = RunStep::MultiRoutine(MultiRoutineStep {
        name: "Main".to_string(),
        description: None,
        location: vec![1],
        routine_version_id: "rv-main".to_string(),
        node_links: links.clone(),
        nodes: sort_steps_and_add_decisions(steps, &links, &[1]),
    });

    assert_eq!(get_next_location(&[1, 2, 1], &root), Some(vec![1, 2, 2]));
    assert_eq!(get_next_location(&[1, 2, 2], &root), Some(vec![1, 3]));
}

#[test]
fn previous_location_follows_incoming_successors() {
    let root = branching_root();
    let RunStep::MultiRoutine(multi) = &root else {
        unreachable!()
    };
    let end = multi
        .nodes
        .iter()
        .find(|n| matches!(n, RunStep::End(_)))
        .expect("end missing");
    let list_a = multi
        .nodes
        .iter()
        .find(|n| n.node_id() == Some("id2"))
        .expect("list missing");

    // The first node whose successor targets the end wins, converging edges
    // are resolved by first match.
    assert_eq!(
        get_previous_location(end.location(), &root),
        Some(list_a.location().clone())
    );

    // The branch lists are only reachable through the decision.
    let decision = multi
        .nodes
        .iter()
        .find(|n| matches!(n, RunStep::Decision(_)))
        .expect("decision missing");
    assert_eq!(
        get_previous_location(list_a.location(), &root),
        Some(decision.location().clone())
    );
}

#[test]
fn previous_location_falls_back_to_sibling_then_parent() {
    let version = linear_version(
        "rv-main",
        vec![simple_version("rv-a", 1), simple_version("rv-b", 2)],
    );
    let root = build_routine_step(&version, &languages());

    // Inside the list: previous sibling.
    assert_eq!(get_previous_location(&[1, 2, 2], &root), Some(vec![1, 2, 1]));
    // First child: the parent itself.
    assert_eq!(get_previous_location(&[1, 2, 1], &root), Some(vec![1, 2]));
    // At the root there is no previous.
    assert_eq!(get_previous_location(&[1], &root), None);
    assert_eq!(get_previous_location(&[], &root), None);
}

#[test]
fn sibling_counts() {
    let root = branching_root();
    assert_eq!(siblings_at_location(&[], &root), 0);
    assert_eq!(siblings_at_location(&[1], &root), 1);
    // Five nodes: start, decision, two lists, end.
    assert_eq!(siblings_at_location(&[1, 1], &root), 5);
    // One leaf inside list A.
    assert_eq!(siblings_at_location(&[1, 3, 1], &root), 1);
    // Unresolvable parent degrades to zero.
    assert_eq!(siblings_at_location(&[1, 99, 1], &root), 0);
}
