use super::translation::Translation;
use serde::{Deserialize, Serialize};

/// One version of a user-authored routine, as fetched from the API layer.
///
/// A routine version with a non-empty node graph (or an explicitly multi-step
/// type) expands into a [`MultiRoutineStep`](crate::step::MultiRoutineStep);
/// anything else stays a single leaf step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutineVersion {
    pub id: String,
    #[serde(rename = "routineType")]
    pub routine_type: RoutineType,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(rename = "nodeLinks", default)]
    pub node_links: Vec<NodeLink>,
    #[serde(default)]
    pub complexity: i64,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl RoutineVersion {
    /// Whether this version carries (or will carry, once fetched) its own
    /// sub-graph of nodes.
    pub fn is_multi_step(&self) -> bool {
        self.routine_type == RoutineType::MultiStep || !self.nodes.is_empty()
    }
}

/// The authored kind of a routine version.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoutineType {
    #[serde(rename = "MultiStep")]
    MultiStep,
    #[default]
    #[serde(rename = "Informational")]
    Informational,
    #[serde(rename = "Action")]
    Action,
}

/// One version of a user-authored project: a set of directories holding
/// routines and nested directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectVersion {
    pub id: String,
    #[serde(default)]
    pub directories: Vec<Directory>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A single directory record within a project version.
///
/// A shallow listing carries only identity and translations; a full fetch
/// additionally populates the child collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    pub id: String,
    #[serde(rename = "isRoot", default)]
    pub is_root: bool,
    #[serde(rename = "childDirectories", default)]
    pub child_directories: Vec<Directory>,
    #[serde(rename = "childRoutineVersions", default)]
    pub child_routine_versions: Vec<RoutineVersion>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A node in a routine version's graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "nodeType")]
    pub node_type: NodeData,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// The shape-specific payload of a graph node.
///
/// Decision points are deliberately absent: branching is never authored, it is
/// synthesized by the sorter from the link structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeData {
    Start,
    End {
        #[serde(rename = "wasSuccessful", default)]
        was_successful: bool,
    },
    RoutineList {
        #[serde(rename = "isOrdered", default)]
        is_ordered: bool,
        #[serde(default)]
        items: Vec<RoutineListItem>,
    },
}

/// One subroutine entry inside a routine-list node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineListItem {
    pub id: String,
    #[serde(rename = "routineVersion")]
    pub routine_version: RoutineVersion,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A directed edge between two nodes in a routine version's graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeLink {
    pub id: String,
    #[serde(rename = "fromNodeId")]
    pub from_node_id: String,
    #[serde(rename = "toNodeId")]
    pub to_node_id: String,
}
