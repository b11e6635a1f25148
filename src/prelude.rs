//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the runtree
//! crate, so consumers can bring the whole navigation surface in with one
//! `use`.

// Step tree shapes
pub use crate::step::{
    DecisionOption, DecisionStep, DirectoryStep, EndStep, Location, MultiRoutineStep, RootStep,
    RoutineListStep, RunStep, SingleRoutineStep, StartStep,
};

// Addressing and navigation
pub use crate::step::{
    get_next_location, get_previous_location, siblings_at_location, step_from_location,
};

// Builders and sorting
pub use crate::builder::{
    build_directory_step, build_project_step, build_routine_step, sort_steps_and_add_decisions,
};

// Lazy materialization
pub use crate::materialize::{
    MAX_RUN_NESTING, detect_substep_load, insert_step, step_needs_querying,
};

// Metrics and persistence
pub use crate::progress::{
    CurrentStepProgress, RunApi, RunProgressMutation, RunRecord, RunStepRecord, RunType,
    StepStatus, build_progress_mutation, get_run_percent_complete, get_step_complexity,
    save_run_progress,
};

// Record shapes
pub use crate::record::{
    Directory, Node, NodeData, NodeLink, ProjectVersion, RoutineListItem, RoutineType,
    RoutineVersion, Translation,
};

// Error types
pub use crate::error::{ApiError, InvalidRootStep, StructuralError};
