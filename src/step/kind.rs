use crate::error::InvalidRootStep;
use crate::record::NodeLink;
use serde::{Deserialize, Serialize};

/// A step's address in the run tree: a sequence of 1-based indices, one per
/// tree level, whose first element is always `1` (the root marker).
///
/// Addresses are assigned by the sorter and reassigned whenever a container is
/// resorted or merged; they are positions, not identifiers. Anything that must
/// survive a rebuild keys on routine/project/directory identity instead.
pub type Location = Vec<usize>;

/// Every step shape a run tree can contain.
///
/// The set is closed on purpose: each consumer matches all variants, so a new
/// step kind is a compile-time-enforced exercise rather than a runtime
/// surprise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunStep {
    Start(StartStep),
    End(EndStep),
    Decision(DecisionStep),
    SingleRoutine(SingleRoutineStep),
    RoutineList(RoutineListStep),
    MultiRoutine(MultiRoutineStep),
    Directory(DirectoryStep),
}

/// Terminal marker opening a routine sub-graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub node_id: String,
    pub next_location: Option<Location>,
}

/// Terminal marker closing a routine sub-graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub node_id: String,
    pub next_location: Option<Location>,
    pub was_successful: bool,
}

/// A synthesized branch point. Never present in the authored graph; the sorter
/// regenerates one wherever a node has two or more outgoing links.
///
/// A decision has no determined successor. Choosing among `options` is an
/// externally-driven action, which is why it carries no `next_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub options: Vec<DecisionOption>,
}

/// One selectable branch of a [`DecisionStep`]: the authored link plus a copy
/// of the step it leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub link: NodeLink,
    pub step: Box<RunStep>,
}

/// A leaf referencing a routine version by identity.
///
/// Valid as-is for simple routines. If the referenced version turns out to be
/// multi-step, this is a provisional placeholder that the materializer
/// upgrades to a [`MultiRoutineStep`] at the same address once the sub-graph
/// is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRoutineStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub routine_version_id: String,
    pub complexity: i64,
    pub is_multi_step: bool,
}

/// The subroutines attached to one routine-list graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineListStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub node_id: String,
    pub next_location: Option<Location>,
    pub is_ordered: bool,
    /// Identity of the routine version that owns this node.
    pub parent_routine_version_id: String,
    pub steps: Vec<RunStep>,
}

/// A fully expanded multi-step routine version: the raw links plus the sorted
/// node sequence (Start/End/RoutineList mixed with synthesized Decisions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRoutineStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    pub routine_version_id: String,
    pub node_links: Vec<NodeLink>,
    pub nodes: Vec<RunStep>,
}

/// A project directory holding routines and nested directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStep {
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
    /// `None` only at the synthetic project root.
    pub directory_id: Option<String>,
    pub project_version_id: String,
    pub is_root: bool,
    pub has_been_queried: bool,
    pub steps: Vec<RunStep>,
}

impl RunStep {
    pub fn name(&self) -> &str {
        match self {
            RunStep::Start(s) => &s.name,
            RunStep::End(s) => &s.name,
            RunStep::Decision(s) => &s.name,
            RunStep::SingleRoutine(s) => &s.name,
            RunStep::RoutineList(s) => &s.name,
            RunStep::MultiRoutine(s) => &s.name,
            RunStep::Directory(s) => &s.name,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            RunStep::Start(s) => &s.location,
            RunStep::End(s) => &s.location,
            RunStep::Decision(s) => &s.location,
            RunStep::SingleRoutine(s) => &s.location,
            RunStep::RoutineList(s) => &s.location,
            RunStep::MultiRoutine(s) => &s.location,
            RunStep::Directory(s) => &s.location,
        }
    }

    pub fn location_mut(&mut self) -> &mut Location {
        match self {
            RunStep::Start(s) => &mut s.location,
            RunStep::End(s) => &mut s.location,
            RunStep::Decision(s) => &mut s.location,
            RunStep::SingleRoutine(s) => &mut s.location,
            RunStep::RoutineList(s) => &mut s.location,
            RunStep::MultiRoutine(s) => &mut s.location,
            RunStep::Directory(s) => &mut s.location,
        }
    }

    /// The address of the structural successor, where one is determined.
    ///
    /// Decisions never have one; containers without an authored successor
    /// defer to the navigation rules in [`crate::step::location`].
    pub fn next_location(&self) -> Option<&Location> {
        match self {
            RunStep::Start(s) => s.next_location.as_ref(),
            RunStep::End(s) => s.next_location.as_ref(),
            RunStep::RoutineList(s) => s.next_location.as_ref(),
            RunStep::Decision(_)
            | RunStep::SingleRoutine(_)
            | RunStep::MultiRoutine(_)
            | RunStep::Directory(_) => None,
        }
    }

    /// The identity of the graph node this step came from, for step shapes
    /// that originate from one.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            RunStep::Start(s) => Some(&s.node_id),
            RunStep::End(s) => Some(&s.node_id),
            RunStep::RoutineList(s) => Some(&s.node_id),
            RunStep::Decision(_)
            | RunStep::SingleRoutine(_)
            | RunStep::MultiRoutine(_)
            | RunStep::Directory(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RunStep::Start(_) => "Start",
            RunStep::End(_) => "End",
            RunStep::Decision(_) => "Decision",
            RunStep::SingleRoutine(_) => "SingleRoutine",
            RunStep::RoutineList(_) => "RoutineList",
            RunStep::MultiRoutine(_) => "MultiRoutine",
            RunStep::Directory(_) => "Directory",
        }
    }

    /// The child collection for container shapes (empty for leaves and
    /// decisions, whose options are snapshots rather than plain children).
    pub fn children(&self) -> &[RunStep] {
        match self {
            RunStep::RoutineList(s) => &s.steps,
            RunStep::MultiRoutine(s) => &s.nodes,
            RunStep::Directory(s) => &s.steps,
            RunStep::Start(_)
            | RunStep::End(_)
            | RunStep::Decision(_)
            | RunStep::SingleRoutine(_) => &[],
        }
    }

    /// Mutable twin of [`RunStep::children`].
    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<RunStep>> {
        match self {
            RunStep::RoutineList(s) => Some(&mut s.steps),
            RunStep::MultiRoutine(s) => Some(&mut s.nodes),
            RunStep::Directory(s) => Some(&mut s.steps),
            RunStep::Start(_)
            | RunStep::End(_)
            | RunStep::Decision(_)
            | RunStep::SingleRoutine(_) => None,
        }
    }

    /// Moves this subtree to a new address.
    ///
    /// Every descendant address (and internal `next_location`) that extends
    /// the subtree's current address is rewritten to extend `new_prefix`
    /// instead. Addresses that point outside the subtree are left alone.
    pub(crate) fn rebase(&mut self, new_prefix: &[usize]) {
        let old_prefix = self.location().clone();
        rebase_subtree(self, &old_prefix, new_prefix);
    }
}

fn swap_prefix(loc: &mut Location, old_prefix: &[usize], new_prefix: &[usize]) {
    if loc.starts_with(old_prefix) {
        let tail: Vec<usize> = loc[old_prefix.len()..].to_vec();
        loc.clear();
        loc.extend_from_slice(new_prefix);
        loc.extend(tail);
    }
}

fn rebase_subtree(step: &mut RunStep, old_prefix: &[usize], new_prefix: &[usize]) {
    swap_prefix(step.location_mut(), old_prefix, new_prefix);
    match step {
        RunStep::Start(s) => {
            if let Some(next) = &mut s.next_location {
                swap_prefix(next, old_prefix, new_prefix);
            }
        }
        RunStep::End(s) => {
            if let Some(next) = &mut s.next_location {
                swap_prefix(next, old_prefix, new_prefix);
            }
        }
        RunStep::Decision(s) => {
            for option in &mut s.options {
                rebase_subtree(&mut option.step, old_prefix, new_prefix);
            }
        }
        RunStep::SingleRoutine(_) => {}
        RunStep::RoutineList(s) => {
            if let Some(next) = &mut s.next_location {
                swap_prefix(next, old_prefix, new_prefix);
            }
            for child in &mut s.steps {
                rebase_subtree(child, old_prefix, new_prefix);
            }
        }
        RunStep::MultiRoutine(s) => {
            for child in &mut s.nodes {
                rebase_subtree(child, old_prefix, new_prefix);
            }
        }
        RunStep::Directory(s) => {
            for child in &mut s.steps {
                rebase_subtree(child, old_prefix, new_prefix);
            }
        }
    }
}

/// The step shapes a run may start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RootStep {
    Directory(DirectoryStep),
    MultiRoutine(MultiRoutineStep),
    SingleRoutine(SingleRoutineStep),
}

impl RootStep {
    pub fn into_step(self) -> RunStep {
        match self {
            RootStep::Directory(s) => RunStep::Directory(s),
            RootStep::MultiRoutine(s) => RunStep::MultiRoutine(s),
            RootStep::SingleRoutine(s) => RunStep::SingleRoutine(s),
        }
    }
}

impl TryFrom<RunStep> for RootStep {
    type Error = InvalidRootStep;

    fn try_from(step: RunStep) -> Result<Self, Self::Error> {
        match step {
            RunStep::Directory(s) => Ok(RootStep::Directory(s)),
            RunStep::MultiRoutine(s) => Ok(RootStep::MultiRoutine(s)),
            RunStep::SingleRoutine(s) => Ok(RootStep::SingleRoutine(s)),
            other => Err(InvalidRootStep {
                kind: other.kind_name(),
            }),
        }
    }
}
