//! Arena-backed precedence graph.
//!
//! Activities are stored in a vector indexed by [`NodeId`]; predecessor and
//! successor links are adjacency lists over the same indices. Building the
//! graph also derives every activity's `successor_ids` from scratch.

use std::collections::BTreeSet;

use crate::interner::{ActivityIdInterner, Interned, NodeId};
use crate::log_warnings;
use crate::models::{Activity, DanglingReference};

/// Data-integrity problems found while building the graph. None of them are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiagnostics {
    pub dangling_references: Vec<DanglingReference>,
    /// Ids defined more than once, ascending. The last definition was kept.
    pub duplicate_ids: Vec<String>,
}

/// Precedence graph over one calculation batch.
#[derive(Debug, Clone)]
pub struct ActivityGraph {
    interner: ActivityIdInterner,
    activities: Vec<Activity>,
    /// Valid predecessors per node (dangling references removed).
    predecessors: Vec<Vec<NodeId>>,
    /// Successors per node, ordered by ascending id.
    successors: Vec<Vec<NodeId>>,
}

impl ActivityGraph {
    /// Index the activities by id and link successors.
    pub fn build(activities: &[Activity], verbosity: u8) -> (Self, GraphDiagnostics) {
        let mut interner = ActivityIdInterner::with_capacity(activities.len());
        let mut nodes: Vec<Activity> = Vec::with_capacity(activities.len());
        let mut duplicates: BTreeSet<String> = BTreeSet::new();

        for activity in activities {
            let mut activity = activity.clone();
            activity.reset_derived();
            match interner.intern(&activity.id) {
                Interned::New(_) => nodes.push(activity),
                Interned::Existing(node) => {
                    duplicates.insert(activity.id.clone());
                    nodes[node as usize] = activity;
                }
            }
        }

        for id in &duplicates {
            log_warnings!(
                verbosity,
                "Warning: activity id '{}' defined more than once; last definition wins",
                id
            );
        }

        let n = nodes.len();
        let mut by_id: Vec<NodeId> = (0..n as NodeId).collect();
        by_id.sort_by(|&a, &b| nodes[a as usize].id.cmp(&nodes[b as usize].id));

        let mut links: Vec<(NodeId, NodeId)> = Vec::new();
        let mut dangling_references = Vec::new();
        for &node in &by_id {
            let activity = &nodes[node as usize];
            for pred_id in &activity.predecessor_ids {
                match interner.get(pred_id) {
                    Some(pred) => links.push((pred, node)),
                    None => {
                        log_warnings!(
                            verbosity,
                            "Warning: predecessor '{}' of activity '{}' not found; link skipped",
                            pred_id,
                            activity.id
                        );
                        dangling_references.push(DanglingReference {
                            activity_id: activity.id.clone(),
                            missing_predecessor_id: pred_id.clone(),
                        });
                    }
                }
            }
        }

        // `links` follows ascending successor id, so each successor list ends up sorted.
        let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        for (pred, succ) in links {
            predecessors[succ as usize].push(pred);
            successors[pred as usize].push(succ);
            let succ_id = nodes[succ as usize].id.clone();
            nodes[pred as usize].successor_ids.insert(succ_id);
        }

        let graph = Self {
            interner,
            activities: nodes,
            predecessors,
            successors,
        };
        let diagnostics = GraphDiagnostics {
            dangling_references,
            duplicate_ids: duplicates.into_iter().collect(),
        };
        (graph, diagnostics)
    }

    pub fn len(&self) -> usize {
        self.interner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interner.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.interner.get(id)
    }

    /// Id of `node`, or the empty string for an index outside the graph.
    pub fn id(&self, node: NodeId) -> &str {
        self.interner.resolve(node).unwrap_or_default()
    }

    pub fn duration(&self, node: NodeId) -> i64 {
        i64::from(self.activities[node as usize].duration)
    }

    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.predecessors[node as usize]
    }

    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.successors[node as usize]
    }

    /// Consume the graph, returning activities with their derived successor sets.
    pub fn into_activities(self) -> Vec<Activity> {
        self.activities
    }
}
