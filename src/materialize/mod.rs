//! The Lazy Materializer: merges freshly built subtrees into a partially
//! known tree and decides what additional data a navigation target requires.
//!
//! Large graphs arrive in pieces. A [`SingleRoutineStep`] referencing a
//! multi-step routine and an unqueried [`DirectoryStep`] are both provisional
//! placeholders; navigation approaching one triggers a fetch, and the fetched
//! record is built into a subtree and spliced back in here. Splicing matches
//! on stable identity (routine-version, project-version plus directory id),
//! never on address: addresses are reassigned on every sort and cannot
//! identify anything across rebuilds.

use crate::error::StructuralError;
use crate::step::{DirectoryStep, MultiRoutineStep, RunStep, step_from_location};
use itertools::Itertools;

/// Hard ceiling on merge recursion depth, a second line of defense behind the
/// sorter's visited-set against any traversal bug.
pub const MAX_RUN_NESTING: usize = 20;

/// Whether a step is a provisional placeholder with richer data left to
/// fetch. All other shapes are always complete.
pub fn step_needs_querying(step: &RunStep) -> bool {
    match step {
        RunStep::SingleRoutine(s) => s.is_multi_step,
        RunStep::Directory(d) => !d.has_been_queried,
        _ => false,
    }
}

/// Splices a freshly built multi-routine or directory subtree into `root`.
///
/// Merge modes, by what the identity search finds:
/// - same-type merge: present fields of the incoming subtree overwrite, absent
///   ones keep the existing value, so a partial patch cannot erase richer
///   existing data;
/// - type upgrade: a single-routine placeholder is wholesale-replaced by the
///   incoming multi-routine, forced to the placeholder's existing address.
///
/// On any structural defect (unmatched identity, nesting over
/// [`MAX_RUN_NESTING`]) the error is logged and the tree returned unchanged.
pub fn insert_step(step_data: RunStep, mut root: RunStep) -> RunStep {
    let identity = match &step_data {
        RunStep::MultiRoutine(s) => s.routine_version_id.clone(),
        RunStep::Directory(s) => s
            .directory_id
            .clone()
            .unwrap_or_else(|| s.project_version_id.clone()),
        other => {
            tracing::warn!(
                kind = other.kind_name(),
                "only multi-routine and directory subtrees can be inserted"
            );
            return root;
        }
    };

    match merge_into(&mut root, &step_data, 0) {
        Ok(true) => root,
        Ok(false) => {
            tracing::error!("{}", StructuralError::IdentityNotFound { identity });
            root
        }
        Err(err) => {
            tracing::error!("{}", err);
            root
        }
    }
}

fn merge_into(
    existing: &mut RunStep,
    incoming: &RunStep,
    depth: usize,
) -> Result<bool, StructuralError> {
    if depth > MAX_RUN_NESTING {
        return Err(StructuralError::NestingTooDeep {
            max: MAX_RUN_NESTING,
        });
    }

    // Type upgrade: a placeholder matching the incoming multi-routine is
    // wholesale-replaced, forced to the placeholder's existing address.
    let upgrade_address = match (&*existing, incoming) {
        (RunStep::SingleRoutine(e), RunStep::MultiRoutine(i))
            if e.routine_version_id == i.routine_version_id =>
        {
            Some(e.location.clone())
        }
        _ => None,
    };
    if let Some(address) = upgrade_address {
        let mut replacement = incoming.clone();
        replacement.rebase(&address);
        *existing = replacement;
        return Ok(true);
    }

    match (&mut *existing, incoming) {
        (RunStep::Directory(e), RunStep::Directory(i))
            if e.project_version_id == i.project_version_id && e.directory_id == i.directory_id =>
        {
            merge_directory(e, i);
            return Ok(true);
        }
        (RunStep::MultiRoutine(e), RunStep::MultiRoutine(i))
            if e.routine_version_id == i.routine_version_id =>
        {
            merge_multi_routine(e, i);
            return Ok(true);
        }
        _ => {}
    }

    if let Some(children) = existing.children_mut() {
        for child in children {
            if merge_into(child, incoming, depth + 1)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn merge_directory(existing: &mut DirectoryStep, incoming: &DirectoryStep) {
    if !incoming.name.is_empty() {
        existing.name = incoming.name.clone();
    }
    if incoming.description.is_some() {
        existing.description = incoming.description.clone();
    }
    existing.has_been_queried |= incoming.has_been_queried;
    if incoming.has_been_queried || !incoming.steps.is_empty() {
        existing.steps = rebase_children(&incoming.steps, &existing.location);
    }
}

fn merge_multi_routine(existing: &mut MultiRoutineStep, incoming: &MultiRoutineStep) {
    if !incoming.name.is_empty() {
        existing.name = incoming.name.clone();
    }
    if incoming.description.is_some() {
        existing.description = incoming.description.clone();
    }
    if !incoming.node_links.is_empty() {
        existing.node_links = incoming.node_links.clone();
    }
    if !incoming.nodes.is_empty() {
        existing.nodes = rebase_children(&incoming.nodes, &existing.location);
    }
}

/// Re-addresses an incoming child list beneath `parent`, keeping each child's
/// trailing element (sorter-assigned gaps included).
fn rebase_children(children: &[RunStep], parent: &[usize]) -> Vec<RunStep> {
    children
        .iter()
        .map(|child| {
            let mut rebased = child.clone();
            let mut address = parent.to_vec();
            address.push(child.location().last().copied().unwrap_or(1));
            rebased.rebase(&address);
            rebased
        })
        .collect()
}

/// Determines what must be fetched before navigation can reach
/// `target_location`.
///
/// Walks up from the target to the deepest address that resolves in `root`,
/// scans that step and its immediate children for placeholders, and batches
/// everything found into at most one `fetch_directories` and one
/// `fetch_subroutines` call. Returns whether the target is still beyond the
/// resolved frontier, i.e. whether the caller must retry navigation once the
/// fetch resolves.
pub fn detect_substep_load(
    target_location: &[usize],
    root: &RunStep,
    fetch_directories: impl FnOnce(Vec<String>),
    fetch_subroutines: impl FnOnce(Vec<String>),
) -> bool {
    let mut frontier = target_location.to_vec();
    while !frontier.is_empty() && step_from_location(&frontier, root).is_none() {
        frontier.pop();
    }
    if frontier.is_empty() {
        frontier.push(1);
    }
    let resolved = step_from_location(&frontier, root).unwrap_or(root);

    let mut directory_ids: Vec<String> = Vec::new();
    let mut subroutine_ids: Vec<String> = Vec::new();
    // The frontier step itself may be the unexpanded placeholder, e.g. an
    // unqueried directory whose (empty) children the target reaches into.
    for step in std::iter::once(resolved).chain(resolved.children().iter()) {
        match step {
            RunStep::Directory(d) if !d.has_been_queried => {
                if let Some(id) = &d.directory_id {
                    directory_ids.push(id.clone());
                }
            }
            RunStep::SingleRoutine(s) if s.is_multi_step => {
                subroutine_ids.push(s.routine_version_id.clone());
            }
            _ => {}
        }
    }

    let directory_ids: Vec<String> = directory_ids.into_iter().unique().collect();
    let subroutine_ids: Vec<String> = subroutine_ids.into_iter().unique().collect();
    if !directory_ids.is_empty() {
        fetch_directories(directory_ids);
    }
    if !subroutine_ids.is_empty() {
        fetch_subroutines(subroutine_ids);
    }

    target_location.len() > frontier.len()
}
