use std::collections::{BTreeMap, HashMap, HashSet};

use super::stats::{DirStats, recompute_stats};
use crate::model::{CategoryNode, ContestId, ContestRef, NodeId};

/// View state of one loaded category. Replaced wholesale on category switch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityStore {
    pub expanded_nodes: HashSet<NodeId>,
    pub visible_contests: HashSet<ContestId>,
    /// Every contest of the tree, flattened once per load.
    pub all_contests: BTreeMap<ContestId, ContestRef>,
    /// Recomputed by `refresh_stats` after every mutation.
    pub directory_stats: HashMap<NodeId, DirStats>,
}

impl VisibilityStore {
    /// Nothing expanded, nothing visible.
    pub fn new(root: &CategoryNode) -> Self {
        let mut all_contests = BTreeMap::new();
        root.for_each_contest(&mut |c| {
            all_contests.entry(c.id.clone()).or_insert_with(|| c.clone());
        });
        let mut store = Self {
            all_contests,
            ..Default::default()
        };
        store.refresh_stats(root);
        store
    }

    /// Initial state after a category load: every contest shown.
    pub fn all_visible(root: &CategoryNode) -> Self {
        let mut store = Self::new(root);
        store.set_subtree_visibility(root, true);
        store.refresh_stats(root);
        store
    }

    /// Flips membership; returns whether the contest is now visible.
    pub fn toggle_contest(&mut self, id: &str) -> bool {
        if self.visible_contests.remove(id) {
            false
        } else {
            self.visible_contests.insert(id.to_string());
            true
        }
    }

    /// Show or hide every contest under `node`, nested directories included.
    pub fn set_subtree_visibility(&mut self, node: &CategoryNode, make_visible: bool) {
        node.for_each_contest(&mut |c| {
            if make_visible {
                self.visible_contests.insert(c.id.clone());
            } else {
                self.visible_contests.remove(&c.id);
            }
        });
    }

    /// Expansion is independent of visibility; collapsing hides nothing.
    pub fn toggle_expansion(&mut self, node_id: &str) -> bool {
        if self.expanded_nodes.remove(node_id) {
            false
        } else {
            self.expanded_nodes.insert(node_id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.expanded_nodes.contains(node_id)
    }

    pub fn is_visible(&self, contest_id: &str) -> bool {
        self.visible_contests.contains(contest_id)
    }

    pub fn refresh_stats(&mut self, root: &CategoryNode) {
        self.directory_stats = recompute_stats(root, &self.visible_contests);
    }

    pub fn stats(&self, node_id: &str) -> DirStats {
        self.directory_stats.get(node_id).copied().unwrap_or_default()
    }

    /// Visible contests that belong to this category.
    pub fn visible_count(&self) -> usize {
        self.visible_contests
            .iter()
            .filter(|id| self.all_contests.contains_key(*id))
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.all_contests.len()
    }
}
