//! The Progress Persister: translates a completed or partial step into the
//! outbound mutation shape for saving run progress.

use crate::error::ApiError;
use crate::step::Location;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of one recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    InProgress,
    Completed,
    Skipped,
}

/// The kind of record a run was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunType {
    Routine,
    Project,
}

/// A previously persisted progress record for one step of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStepRecord {
    pub id: String,
    pub name: String,
    /// The step's address at the time it was recorded.
    pub step: Location,
    pub order: usize,
    pub time_elapsed: i64,
    pub context_switches: i64,
    pub status: StepStatus,
}

/// The run whose progress is being saved, with its recorded steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: String,
    pub run_type: RunType,
    pub steps: Vec<RunStepRecord>,
}

/// Live metrics for the step being saved, gathered by the presentation layer.
#[derive(Debug, Clone)]
pub struct CurrentStepProgress {
    pub location: Location,
    pub name: String,
    /// Origin graph node, when the step came from one.
    pub node_id: Option<String>,
    /// Referenced routine version, for subroutine steps.
    pub routine_version_id: Option<String>,
    pub time_elapsed: i64,
    pub context_switches: i64,
    pub status: StepStatus,
}

/// Outbound payload of one progress save: run-level aggregates plus either an
/// update of an existing step record or the creation of a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProgressMutation {
    pub id: String,
    pub time_elapsed: i64,
    pub context_switches: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_update: Option<RunStepUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_create: Option<RunStepCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStepUpdate {
    pub id: String,
    pub time_elapsed: i64,
    pub context_switches: i64,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStepCreate {
    /// Freshly minted record identity.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_connect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subroutine_connect: Option<String>,
    pub order: usize,
    pub step: Location,
    pub time_elapsed: i64,
    pub context_switches: i64,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_routine_connect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_project_connect: Option<String>,
}

/// The outbound boundary for persisting run progress.
///
/// Implementations own their transport and error reporting; the engine
/// performs exactly one call per save, with no retry or backoff.
pub trait RunApi {
    fn push_progress(&mut self, mutation: &RunProgressMutation) -> Result<(), ApiError>;
}

/// Builds the mutation payload for saving `current` against `run`.
///
/// Run-level `time_elapsed`/`context_switches` are sums across all recorded
/// steps, with the current step's live values substituted in place of its
/// stored ones. Whether the step becomes an update or a create depends on a
/// record already existing at its address.
pub fn build_progress_mutation(
    run: &RunRecord,
    current: &CurrentStepProgress,
) -> RunProgressMutation {
    let mut time_elapsed = current.time_elapsed;
    let mut context_switches = current.context_switches;
    for record in &run.steps {
        if record.step == current.location {
            continue;
        }
        time_elapsed += record.time_elapsed;
        context_switches += record.context_switches;
    }

    let existing = run.steps.iter().find(|r| r.step == current.location);
    let (steps_update, steps_create) = match existing {
        Some(record) => (
            Some(RunStepUpdate {
                id: record.id.clone(),
                time_elapsed: current.time_elapsed,
                context_switches: current.context_switches,
                status: current.status,
            }),
            None,
        ),
        None => {
            let (run_routine_connect, run_project_connect) = match run.run_type {
                RunType::Routine => (Some(run.id.clone()), None),
                RunType::Project => (None, Some(run.id.clone())),
            };
            (
                None,
                Some(RunStepCreate {
                    id: Uuid::new_v4().to_string(),
                    name: current.name.clone(),
                    node_connect: current.node_id.clone(),
                    subroutine_connect: current.routine_version_id.clone(),
                    order: run.steps.len() + 1,
                    step: current.location.clone(),
                    time_elapsed: current.time_elapsed,
                    context_switches: current.context_switches,
                    status: current.status,
                    run_routine_connect,
                    run_project_connect,
                }),
            )
        }
    };

    RunProgressMutation {
        id: run.id.clone(),
        time_elapsed,
        context_switches,
        steps_update,
        steps_create,
    }
}

/// Persists the current step's progress through the run API.
///
/// This is the engine's only I/O: one outbound call, whose failure is handed
/// back untouched.
pub fn save_run_progress(
    api: &mut dyn RunApi,
    run: &RunRecord,
    current: &CurrentStepProgress,
) -> Result<(), ApiError> {
    let mutation = build_progress_mutation(run, current);
    api.push_progress(&mutation)
}
