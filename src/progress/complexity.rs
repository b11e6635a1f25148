//! Aggregate complexity and completion metrics over a finished tree.

use crate::step::RunStep;

/// Recursively folds a step subtree into its additive complexity score.
///
/// Terminal markers cost nothing; a decision costs a fixed `1` for the choice
/// itself; a single routine contributes its authored score; containers sum
/// their children. The closed step set makes the fold exhaustive, so there is
/// no unknown-variant fallback to defend against.
pub fn get_step_complexity(step: &RunStep) -> i64 {
    match step {
        RunStep::Start(_) | RunStep::End(_) => 0,
        RunStep::Decision(_) => 1,
        RunStep::SingleRoutine(s) => s.complexity,
        RunStep::MultiRoutine(s) => s.nodes.iter().map(get_step_complexity).sum(),
        RunStep::RoutineList(s) => s.steps.iter().map(get_step_complexity).sum(),
        RunStep::Directory(s) => s.steps.iter().map(get_step_complexity).sum(),
    }
}

/// Run completion as a whole percentage, clamped to `[0, 100]`.
///
/// Absent inputs and non-positive totals yield `0` rather than an error.
pub fn get_run_percent_complete(completed: Option<i64>, total: Option<i64>) -> i64 {
    match (completed, total) {
        (Some(completed), Some(total)) if total > 0 => {
            let percent = (completed as f64 / total as f64 * 100.0).round() as i64;
            percent.clamp(0, 100)
        }
        _ => 0,
    }
}
