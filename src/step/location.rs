//! Pure address resolution and structural navigation over a run tree.
//!
//! All functions here are total: a malformed or stale address yields `None`
//! (or a zero count), never a panic, so the navigation loop survives partially
//! materialized or broken trees.

use super::kind::{Location, RunStep};
use crate::error::StructuralError;

/// Resolves an address to the step it names, or `None` if the address does
/// not exist in the current tree shape.
///
/// The first element must be `1` (the root marker). Directory and routine
/// lists index positionally into `.steps`; a multi-routine searches its nodes
/// by trailing address element, since decision insertion makes naive
/// positional indexing wrong; a decision indexes into its options.
pub fn step_from_location<'a>(location: &[usize], root: &'a RunStep) -> Option<&'a RunStep> {
    let (&first, rest) = location.split_first()?;
    if first != 1 {
        return None;
    }
    let mut current = root;
    for &idx in rest {
        if idx == 0 {
            return None;
        }
        current = match current {
            RunStep::Directory(s) => s.steps.get(idx - 1)?,
            RunStep::RoutineList(s) => s.steps.get(idx - 1)?,
            RunStep::MultiRoutine(s) => s
                .nodes
                .iter()
                .find(|n| n.location().last() == Some(&idx))?,
            RunStep::Decision(s) => s.options.get(idx - 1)?.step.as_ref(),
            RunStep::Start(_) | RunStep::End(_) | RunStep::SingleRoutine(_) => return None,
        };
    }
    Some(current)
}

/// Computes the structurally next address from `location`, or `None` when the
/// run has nowhere determined to go.
///
/// Priority, first match wins: an empty location starts at the root; a
/// decision has no determined successor; a first child wins over the step's
/// own `next_location`, which wins over the next sibling; exhausting a level
/// pops to the parent and retries its successor and sibling.
pub fn get_next_location(location: &[usize], root: &RunStep) -> Option<Location> {
    if location.is_empty() {
        return Some(vec![1]);
    }
    let current = step_from_location(location, root)?;
    if matches!(current, RunStep::Decision(_)) {
        return None;
    }

    let mut first_child = location.to_vec();
    first_child.push(1);
    if step_from_location(&first_child, root).is_some() {
        return Some(first_child);
    }

    if let Some(next) = current.next_location() {
        return Some(next.clone());
    }
    if let Some(sibling) = next_sibling(location, root) {
        return Some(sibling);
    }

    // Climb: retry the successor and sibling rules one level up at a time.
    let mut loc = location.to_vec();
    loop {
        loc.pop();
        if loc.len() <= 1 {
            return None;
        }
        let parent = step_from_location(&loc, root)?;
        if let Some(next) = parent.next_location() {
            return Some(next.clone());
        }
        if let Some(sibling) = next_sibling(&loc, root) {
            return Some(sibling);
        }
    }
}

fn next_sibling(location: &[usize], root: &RunStep) -> Option<Location> {
    let mut sibling = location.to_vec();
    *sibling.last_mut()? += 1;
    step_from_location(&sibling, root).map(|_| sibling)
}

/// Computes a plausible previous address for `location`.
///
/// This is a heuristic, not a strict inverse of [`get_next_location`]: inside
/// a multi-routine it returns the *first* node whose successor (or decision
/// option) targets the current address, which is ambiguous when several graph
/// edges converge on the same node. The first-match tie-break is a known,
/// documented limitation of the navigation model and is kept as-is.
pub fn get_previous_location(location: &[usize], root: &RunStep) -> Option<Location> {
    if location.len() <= 1 {
        return None;
    }
    let parent_loc = &location[..location.len() - 1];
    let parent = step_from_location(parent_loc, root)?;

    if let RunStep::MultiRoutine(parent) = parent {
        for node in &parent.nodes {
            let leads_here = node
                .next_location()
                .is_some_and(|next| next.as_slice() == location);
            let branches_here = match node {
                RunStep::Decision(d) => d
                    .options
                    .iter()
                    .any(|option| option.step.location().as_slice() == location),
                _ => false,
            };
            if leads_here || branches_here {
                return Some(node.location().clone());
            }
        }
    }

    let last = *location.last()?;
    if last > 1 {
        let mut sibling = location.to_vec();
        *sibling.last_mut()? = last - 1;
        if step_from_location(&sibling, root).is_some() {
            return Some(sibling);
        }
    }
    Some(parent_loc.to_vec())
}

/// Counts the siblings at an address, the addressed step included.
///
/// An empty address has no siblings; the root is always alone. An
/// unresolvable parent is a structural defect: it is logged and counted as 0.
pub fn siblings_at_location(location: &[usize], root: &RunStep) -> usize {
    if location.is_empty() {
        return 0;
    }
    if location.len() == 1 {
        return 1;
    }
    let parent_loc = &location[..location.len() - 1];
    match step_from_location(parent_loc, root) {
        Some(RunStep::Directory(s)) => s.steps.len(),
        Some(RunStep::RoutineList(s)) => s.steps.len(),
        Some(RunStep::MultiRoutine(s)) => s.nodes.len(),
        Some(RunStep::Decision(s)) => s.options.len(),
        Some(other) => {
            tracing::error!(
                kind = other.kind_name(),
                "step at {:?} cannot hold children",
                parent_loc
            );
            0
        }
        None => {
            tracing::error!("{}", StructuralError::LocationNotFound(parent_loc.to_vec()));
            0
        }
    }
}
