//! # Runtree - Run-Step Tree Engine
//!
//! **Runtree** compiles user-authored routine and project graphs (directed
//! node/link graphs with branches, cycles, and arbitrarily nested sub-graphs)
//! into ordered, address-stable step trees, and presents them to a runner as
//! a navigable sequence of steps.
//!
//! ## Core Workflow
//!
//! 1. **Fetch Your Records**: obtain routine-version, project-version, and
//!    directory records from your API layer and deserialize them into the
//!    [`record`] shapes.
//! 2. **Build**: turn a record into a step subtree with the [`builder`]
//!    functions; branch points are synthesized as explicit decision steps by
//!    the graph sorter.
//! 3. **Navigate**: move through the tree with the pure addressing functions
//!    in [`step::location`]; every step carries its own address.
//! 4. **Materialize Lazily**: when navigation approaches an unexpanded
//!    placeholder, [`materialize::detect_substep_load`] tells you what to
//!    fetch, and [`materialize::insert_step`] merges the freshly built
//!    subtree back in at the right address.
//! 5. **Measure and Persist**: fold the tree into complexity/completion
//!    metrics and push progress through the [`progress`] module.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runtree::prelude::*;
//!
//! # fn fetch_routine_version() -> runtree::record::RoutineVersion { unimplemented!() }
//! let languages = vec!["en".to_string()];
//! let version = fetch_routine_version();
//!
//! // Compile the graph into a step tree. Branches become decision steps.
//! let root = build_routine_step(&version, &languages);
//!
//! // Walk it by structural rules rather than by replaying the graph.
//! let mut location = get_next_location(&[], &root);
//! while let Some(current) = location {
//!     let step = step_from_location(&current, &root);
//!     println!("at {:?}: {:?}", current, step.map(|s| s.name()));
//!     location = get_next_location(&current, &root);
//! }
//!
//! // Aggregate metrics over the finished tree.
//! let total = get_step_complexity(&root);
//! let percent = get_run_percent_complete(Some(0), Some(total));
//! assert_eq!(percent, 0);
//! ```
//!
//! ## Failure Policy
//!
//! The engine participates in an interactive navigation loop, where a crash
//! mid-traversal is worse than a best-effort degraded result. Every tree
//! operation is therefore total: structural defects (missing start node,
//! unresolvable address, unmatched merge identity, nesting overflow) are
//! logged through [`tracing`] and answered with a conservative fallback (an
//! unchanged tree, a `None` address, a zero count), never a panic or an
//! error return.

pub mod builder;
pub mod error;
pub mod materialize;
pub mod prelude;
pub mod progress;
pub mod record;
pub mod step;
