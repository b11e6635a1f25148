//! Common test utilities for building graph records and step fixtures.
use runtree::prelude::*;

/// English-only translation list with the given display name.
#[allow(dead_code)]
pub fn en(name: &str) -> Vec<Translation> {
    vec![Translation {
        language: "en".to_string(),
        name: Some(name.to_string()),
        description: None,
    }]
}

#[allow(dead_code)]
pub fn languages() -> Vec<String> {
    vec!["en".to_string()]
}

#[allow(dead_code)]
pub fn link(id: &str, from: &str, to: &str) -> NodeLink {
    NodeLink {
        id: id.to_string(),
        from_node_id: from.to_string(),
        to_node_id: to.to_string(),
    }
}

/// An un-located start step, as the sorter receives it.
#[allow(dead_code)]
pub fn start_step(node_id: &str) -> RunStep {
    RunStep::Start(StartStep {
        name: "Start".to_string(),
        description: None,
        location: Vec::new(),
        node_id: node_id.to_string(),
        next_location: None,
    })
}

/// An un-located end step.
#[allow(dead_code)]
pub fn end_step(node_id: &str, was_successful: bool) -> RunStep {
    RunStep::End(EndStep {
        name: "End".to_string(),
        description: None,
        location: Vec::new(),
        node_id: node_id.to_string(),
        next_location: None,
        was_successful,
    })
}

/// An un-located routine-list step owned by routine version `rv-main`.
#[allow(dead_code)]
pub fn list_step(node_id: &str, steps: Vec<RunStep>) -> RunStep {
    RunStep::RoutineList(RoutineListStep {
        name: format!("List {node_id}"),
        description: None,
        location: Vec::new(),
        node_id: node_id.to_string(),
        next_location: None,
        is_ordered: true,
        parent_routine_version_id: "rv-main".to_string(),
        steps,
    })
}

/// A single-routine leaf located at the subtree root.
#[allow(dead_code)]
pub fn single_step(routine_version_id: &str, complexity: i64, is_multi_step: bool) -> RunStep {
    RunStep::SingleRoutine(SingleRoutineStep {
        name: format!("Routine {routine_version_id}"),
        description: None,
        location: vec![1],
        routine_version_id: routine_version_id.to_string(),
        complexity,
        is_multi_step,
    })
}

/// A routine version with no graph of its own.
#[allow(dead_code)]
pub fn simple_version(id: &str, complexity: i64) -> RoutineVersion {
    RoutineVersion {
        id: id.to_string(),
        routine_type: RoutineType::Informational,
        nodes: Vec::new(),
        node_links: Vec::new(),
        complexity,
        translations: en(&format!("Routine {id}")),
    }
}

/// A multi-step routine version whose graph has not been fetched yet.
#[allow(dead_code)]
pub fn unfetched_multi_version(id: &str, complexity: i64) -> RoutineVersion {
    RoutineVersion {
        routine_type: RoutineType::MultiStep,
        ..simple_version(id, complexity)
    }
}

#[allow(dead_code)]
fn node(id: &str, name: &str, node_type: NodeData) -> Node {
    Node {
        id: id.to_string(),
        node_type,
        translations: en(name),
    }
}

#[allow(dead_code)]
fn list_item(id: &str, version: RoutineVersion) -> RoutineListItem {
    RoutineListItem {
        id: id.to_string(),
        routine_version: version,
        translations: Vec::new(),
    }
}

/// A linear multi-step routine version: Start -> list of `subroutines` -> End.
#[allow(dead_code)]
pub fn linear_version(id: &str, subroutines: Vec<RoutineVersion>) -> RoutineVersion {
    let items = subroutines
        .into_iter()
        .enumerate()
        .map(|(i, v)| list_item(&format!("{id}-item-{i}"), v))
        .collect();
    RoutineVersion {
        id: id.to_string(),
        routine_type: RoutineType::MultiStep,
        nodes: vec![
            node("n-start", "Start", NodeData::Start),
            node(
                "n-list",
                "Work",
                NodeData::RoutineList {
                    is_ordered: true,
                    items,
                },
            ),
            node(
                "n-end",
                "End",
                NodeData::End {
                    was_successful: true,
                },
            ),
        ],
        node_links: vec![
            link("l1", "n-start", "n-list"),
            link("l2", "n-list", "n-end"),
        ],
        complexity: 0,
        translations: en(&format!("Routine {id}")),
    }
}

/// A project version with one unexpanded top-level directory.
#[allow(dead_code)]
pub fn project_with_directory(project_id: &str, directory_id: &str) -> ProjectVersion {
    ProjectVersion {
        id: project_id.to_string(),
        directories: vec![Directory {
            id: directory_id.to_string(),
            is_root: true,
            child_directories: Vec::new(),
            child_routine_versions: Vec::new(),
            translations: en(&format!("Directory {directory_id}")),
        }],
        translations: en(&format!("Project {project_id}")),
    }
}

/// A fully fetched directory record carrying the given child routines.
#[allow(dead_code)]
pub fn fetched_directory(directory_id: &str, routines: Vec<RoutineVersion>) -> Directory {
    Directory {
        id: directory_id.to_string(),
        is_root: true,
        child_directories: Vec::new(),
        child_routine_versions: routines,
        translations: en(&format!("Directory {directory_id}")),
    }
}
