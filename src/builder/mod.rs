//! Step Builders: convert externally fetched routine/project/directory
//! records into step subtrees, delegating branch resolution to the sorter.
//!
//! Every builder produces a subtree addressed at `[1]`. Callers that splice a
//! built subtree deeper into an existing tree rebase it to its final address
//! (see [`crate::materialize`]).

pub mod sorter;

pub use sorter::sort_steps_and_add_decisions;

use crate::record::{
    Directory, Node, NodeData, ProjectVersion, RoutineListItem, RoutineVersion, Translation,
    display_fields,
};
use crate::step::{
    DirectoryStep, EndStep, MultiRoutineStep, RoutineListStep, RunStep, SingleRoutineStep,
    StartStep,
};

/// Builds the step subtree for one routine version.
///
/// A version carrying its own node graph expands into a sorted
/// [`MultiRoutineStep`]; anything else becomes a [`SingleRoutineStep`] leaf,
/// provisional if the version is known to be multi-step but its graph has not
/// been fetched yet.
pub fn build_routine_step(version: &RoutineVersion, languages: &[String]) -> RunStep {
    let (name, description) = display_fields(&version.translations, languages);
    if version.nodes.is_empty() {
        return RunStep::SingleRoutine(SingleRoutineStep {
            name,
            description,
            location: vec![1],
            routine_version_id: version.id.clone(),
            complexity: version.complexity,
            is_multi_step: version.is_multi_step(),
        });
    }

    let steps: Vec<RunStep> = version
        .nodes
        .iter()
        .map(|node| node_to_step(node, version, languages))
        .collect();
    let nodes = sort_steps_and_add_decisions(steps, &version.node_links, &[1]);
    RunStep::MultiRoutine(MultiRoutineStep {
        name,
        description,
        location: vec![1],
        routine_version_id: version.id.clone(),
        node_links: version.node_links.clone(),
        nodes,
    })
}

/// Builds the root step for a project version: a queried root directory whose
/// children are the project's top-level directories, still unexpanded.
pub fn build_project_step(project: &ProjectVersion, languages: &[String]) -> RunStep {
    let (name, description) = display_fields(&project.translations, languages);
    let mut steps: Vec<RunStep> = project
        .directories
        .iter()
        .map(|dir| shallow_directory_step(dir, &project.id, languages))
        .collect();
    for (index, child) in steps.iter_mut().enumerate() {
        child.rebase(&[1, index + 1]);
    }
    RunStep::Directory(DirectoryStep {
        name,
        description,
        location: vec![1],
        directory_id: None,
        project_version_id: project.id.clone(),
        is_root: true,
        has_been_queried: true,
        steps,
    })
}

/// Builds the subtree for a freshly fetched directory record.
///
/// The directory itself is marked queried; nested child directories arrive as
/// shallow listings and stay unqueried until their own fetch.
pub fn build_directory_step(
    directory: &Directory,
    project_version_id: &str,
    languages: &[String],
) -> RunStep {
    let (name, description) = display_fields(&directory.translations, languages);
    let mut steps: Vec<RunStep> = directory
        .child_directories
        .iter()
        .map(|child| shallow_directory_step(child, project_version_id, languages))
        .chain(
            directory
                .child_routine_versions
                .iter()
                .map(|version| build_routine_step(version, languages)),
        )
        .collect();
    for (index, child) in steps.iter_mut().enumerate() {
        child.rebase(&[1, index + 1]);
    }
    RunStep::Directory(DirectoryStep {
        name,
        description,
        location: vec![1],
        directory_id: Some(directory.id.clone()),
        project_version_id: project_version_id.to_string(),
        is_root: directory.is_root,
        has_been_queried: true,
        steps,
    })
}

fn shallow_directory_step(
    directory: &Directory,
    project_version_id: &str,
    languages: &[String],
) -> RunStep {
    let (name, description) = display_fields(&directory.translations, languages);
    RunStep::Directory(DirectoryStep {
        name,
        description,
        location: vec![1],
        directory_id: Some(directory.id.clone()),
        project_version_id: project_version_id.to_string(),
        is_root: directory.is_root,
        has_been_queried: false,
        steps: Vec::new(),
    })
}

/// Converts one graph node into its un-located step. Addresses are assigned
/// later by the sorter.
fn node_to_step(node: &Node, owner: &RoutineVersion, languages: &[String]) -> RunStep {
    let (name, description) = display_fields(&node.translations, languages);
    match &node.node_type {
        NodeData::Start => RunStep::Start(StartStep {
            name,
            description,
            location: Vec::new(),
            node_id: node.id.clone(),
            next_location: None,
        }),
        NodeData::End { was_successful } => RunStep::End(EndStep {
            name,
            description,
            location: Vec::new(),
            node_id: node.id.clone(),
            next_location: None,
            was_successful: *was_successful,
        }),
        NodeData::RoutineList { is_ordered, items } => RunStep::RoutineList(RoutineListStep {
            name,
            description,
            location: Vec::new(),
            node_id: node.id.clone(),
            next_location: None,
            is_ordered: *is_ordered,
            parent_routine_version_id: owner.id.clone(),
            steps: items
                .iter()
                .map(|item| list_item_to_step(item, languages))
                .collect(),
        }),
    }
}

fn list_item_to_step(item: &RoutineListItem, languages: &[String]) -> RunStep {
    let mut step = build_routine_step(&item.routine_version, languages);
    // Item-level translations shadow the subroutine's own display text.
    if !item.translations.is_empty() {
        override_display(&mut step, &item.translations, languages);
    }
    step
}

fn override_display(step: &mut RunStep, translations: &[Translation], languages: &[String]) {
    let (name, description) = display_fields(translations, languages);
    match step {
        RunStep::SingleRoutine(s) => {
            s.name = name;
            s.description = description;
        }
        RunStep::MultiRoutine(s) => {
            s.name = name;
            s.description = description;
        }
        _ => {}
    }
}
