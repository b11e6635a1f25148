//! The Graph Sorter: turns an unordered set of node-derived steps plus
//! directed links into a depth-first ordered, address-assigned step sequence,
//! synthesizing a [`DecisionStep`] wherever a node has more than one outgoing
//! link.

use crate::error::StructuralError;
use crate::record::NodeLink;
use crate::step::{DecisionOption, DecisionStep, Location, RunStep};
use ahash::{AHashMap, AHashSet};

/// Orders `steps` by depth-first traversal from the Start node and assigns
/// each a sequential address under `base`.
///
/// Branching rules per node, by outgoing-link count:
/// - `0` — the step keeps `next_location = None`.
/// - `1` — `next_location` is the target's address: the already-assigned one
///   for a back-edge into a visited node (this is what makes cycles
///   terminate), otherwise the address the target is about to receive.
/// - `>1` — a decision is emitted immediately after the step, holding one
///   option per outgoing link (links back into a Start are skipped, since a
///   Start cannot be re-entered), and the step's `next_location` points at it.
///
/// Nodes unreachable from Start are dropped. A graph with no Start node at
/// all is returned unmodified, with an error logged: a caller displaying a
/// broken graph must not crash.
pub fn sort_steps_and_add_decisions(
    steps: Vec<RunStep>,
    links: &[NodeLink],
    base: &[usize],
) -> Vec<RunStep> {
    let start_id = steps.iter().find_map(|step| match step {
        RunStep::Start(s) => Some(s.node_id.clone()),
        _ => None,
    });
    let Some(start_id) = start_id else {
        tracing::error!("{}", StructuralError::MissingStartNode);
        return steps;
    };

    let start_ids: AHashSet<String> = steps
        .iter()
        .filter(|step| matches!(step, RunStep::Start(_)))
        .filter_map(|step| step.node_id().map(str::to_owned))
        .collect();

    let mut by_id: AHashMap<String, RunStep> = AHashMap::with_capacity(steps.len());
    for step in steps {
        match step.node_id().map(str::to_owned) {
            Some(id) => {
                by_id.insert(id, step);
            }
            None => {
                tracing::warn!(
                    kind = step.kind_name(),
                    "step without a node id cannot be sorted; dropping it"
                );
            }
        }
    }

    let mut outgoing: AHashMap<String, Vec<NodeLink>> = AHashMap::new();
    for link in links {
        outgoing
            .entry(link.from_node_id.clone())
            .or_default()
            .push(link.clone());
    }

    let mut sorter = GraphSorter {
        by_id,
        outgoing,
        start_ids,
        visited: AHashMap::new(),
        emitted: AHashMap::new(),
        output: Vec::new(),
        base: base.to_vec(),
    };
    sorter.visit(&start_id);
    sorter.output
}

struct GraphSorter {
    by_id: AHashMap<String, RunStep>,
    outgoing: AHashMap<String, Vec<NodeLink>>,
    start_ids: AHashSet<String>,
    /// Node id -> assigned address. Keyed by identity, never by address:
    /// addresses are reassigned on every sort.
    visited: AHashMap<String, Location>,
    /// Node id -> index in `output`, for resolving decision option targets.
    emitted: AHashMap<String, usize>,
    output: Vec<RunStep>,
    base: Location,
}

impl GraphSorter {
    fn next_address(&self) -> Location {
        let mut address = self.base.clone();
        address.push(self.output.len() + 1);
        address
    }

    fn visit(&mut self, node_id: &str) {
        if self.visited.contains_key(node_id) {
            return;
        }
        let Some(mut step) = self.by_id.remove(node_id) else {
            return;
        };

        let address = self.next_address();
        place_step(&mut step, &address);
        self.visited.insert(node_id.to_owned(), address);
        let index = self.output.len();
        self.emitted.insert(node_id.to_owned(), index);
        self.output.push(step);

        let links: Vec<NodeLink> = self
            .outgoing
            .get(node_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|link| {
                let known = self.visited.contains_key(&link.to_node_id)
                    || self.by_id.contains_key(&link.to_node_id);
                if !known {
                    tracing::warn!(
                        from = %link.from_node_id,
                        to = %link.to_node_id,
                        "link targets a node that does not exist; ignoring it"
                    );
                }
                known
            })
            .collect();

        match links.len() {
            0 => {}
            1 => {
                let target = &links[0].to_node_id;
                let next = self
                    .visited
                    .get(target)
                    .cloned()
                    // Unvisited target: it is expanded next, so its address
                    // is the next sequential one.
                    .unwrap_or_else(|| self.next_address());
                set_next_location(&mut self.output[index], Some(next));
                self.visit(target);
            }
            _ => {
                let decision_address = self.next_address();
                set_next_location(&mut self.output[index], Some(decision_address.clone()));
                let decision_index = self.output.len();
                self.output.push(RunStep::Decision(DecisionStep {
                    name: "Decision".to_string(),
                    description: None,
                    location: decision_address,
                    options: Vec::new(),
                }));

                for link in &links {
                    self.visit(&link.to_node_id);
                }

                // Options are patched in after traversal, once every target
                // step is fully formed.
                let options: Vec<DecisionOption> = links
                    .iter()
                    .filter(|link| !self.start_ids.contains(&link.to_node_id))
                    .filter_map(|link| {
                        self.emitted.get(&link.to_node_id).map(|&i| DecisionOption {
                            link: link.clone(),
                            step: Box::new(self.output[i].clone()),
                        })
                    })
                    .collect();
                if let RunStep::Decision(decision) = &mut self.output[decision_index] {
                    decision.options = options;
                }
            }
        }
    }
}

/// Assigns a sorted step its address. Routine-list children are re-addressed
/// beneath the finalized parent address.
fn place_step(step: &mut RunStep, address: &[usize]) {
    match step {
        RunStep::RoutineList(list) => {
            list.location = address.to_vec();
            for (index, child) in list.steps.iter_mut().enumerate() {
                let mut child_address = address.to_vec();
                child_address.push(index + 1);
                child.rebase(&child_address);
            }
        }
        other => *other.location_mut() = address.to_vec(),
    }
}

fn set_next_location(step: &mut RunStep, next: Option<Location>) {
    match step {
        RunStep::Start(s) => s.next_location = next,
        RunStep::End(s) => s.next_location = next,
        RunStep::RoutineList(s) => s.next_location = next,
        RunStep::Decision(_)
        | RunStep::SingleRoutine(_)
        | RunStep::MultiRoutine(_)
        | RunStep::Directory(_) => {}
    }
}
