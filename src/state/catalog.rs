use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::Reducible;

use super::stats::{ProblemTally, tally_problems};
use super::visibility::VisibilityStore;
use crate::model::{CategoryNode, ContestDb, ContestId, DifficultyStep, NodeId, Problem, ProblemKey};
use crate::remote::{ChecklistEntry, apply_checklist, checklist_from_tree};
use crate::tree::build_tree;

/// Everything the page renders from. One instance lives in the app's reducer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    /// All contest records, shared by every category tree.
    pub contests: ContestDb,
    pub contests_loaded: bool,
    /// Category the user asked for last; tree responses for others are dropped.
    pub category: Option<String>,
    pub tree: Option<CategoryNode>,
    pub store: VisibilityStore,
    pub tally: ProblemTally,
    /// Why the current category has no tree, if it failed.
    pub load_error: Option<String>,
    /// Latest checklist entry of every contest shown in any category this
    /// session. Switching category does not clear it.
    pub checklist: BTreeMap<ContestId, ChecklistEntry>,
    /// Bumped on every accepted action; problem edits mutate shared records in place.
    pub version: u64,
}

#[derive(Clone, Debug)]
pub enum CatalogAction {
    ContestsLoaded(ContestDb),
    SelectCategory(String),
    TreeLoaded { category: String, raw: Value },
    TreeFailed { category: String, reason: String },
    ToggleExpansion(NodeId),
    ToggleContest(ContestId),
    SetSubtreeVisibility { node_id: NodeId, visible: bool },
    CycleStatus(ProblemKey),
    StepDifficulty { key: ProblemKey, step: DifficultyStep },
    ApplyChecklist(Vec<ChecklistEntry>),
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        self.category.is_some() && self.tree.is_none() && self.load_error.is_none()
    }

    /// Applies one action; returns false when the action was a no-op.
    pub fn apply(&mut self, action: CatalogAction) -> bool {
        use CatalogAction::*;
        match action {
            ContestsLoaded(db) => {
                self.contests.extend(db);
                self.contests_loaded = true;
                if let Some(tree) = self.tree.as_mut() {
                    let resolved = tree.resolve_missing(&self.contests);
                    if resolved > 0 {
                        debug!("resolved {} late contest records", resolved);
                        self.store = rebuild_keeping_view(tree, &self.store);
                    }
                }
            }
            SelectCategory(category) => {
                self.category = Some(category);
                self.tree = None;
                self.store = VisibilityStore::default();
                self.load_error = None;
            }
            TreeLoaded { category, raw } => {
                if !self.is_current(&category) {
                    return false;
                }
                match build_tree(&raw, "", &self.contests) {
                    Ok(tree) => {
                        self.store = VisibilityStore::all_visible(&tree);
                        self.tree = Some(tree);
                        self.load_error = None;
                    }
                    Err(e) => {
                        warn!("category {} rejected: {}", category, e);
                        self.tree = None;
                        self.store = VisibilityStore::default();
                        self.load_error = Some(e.to_string());
                    }
                }
            }
            TreeFailed { category, reason } => {
                if !self.is_current(&category) {
                    return false;
                }
                self.load_error = Some(reason);
            }
            ToggleExpansion(node_id) => {
                self.store.toggle_expansion(&node_id);
            }
            ToggleContest(id) => {
                self.store.toggle_contest(&id);
            }
            SetSubtreeVisibility { node_id, visible } => {
                let Some(node) = self.tree.as_ref().and_then(|t| t.find(&node_id)) else {
                    warn!("no directory `{}` in the current tree", node_id);
                    return false;
                };
                self.store.set_subtree_visibility(node, visible);
            }
            CycleStatus(key) => {
                if !self.with_problem(&key, |p| {
                    p.cycle_status();
                }) {
                    return false;
                }
            }
            StepDifficulty { key, step } => {
                if !self.with_problem(&key, |p| {
                    p.step_difficulty(step);
                }) {
                    return false;
                }
            }
            ApplyChecklist(entries) => {
                let n = apply_checklist(&self.contests, &entries);
                debug!("applied {} saved problem states", n);
            }
        }
        self.refresh();
        true
    }

    /// Entries to write on save, for every category visited so far.
    pub fn checklist_entries(&self) -> Vec<ChecklistEntry> {
        self.checklist.values().cloned().collect()
    }

    fn is_current(&self, category: &str) -> bool {
        if self.category.as_deref() == Some(category) {
            true
        } else {
            debug!("dropping stale tree response for {}", category);
            false
        }
    }

    fn with_problem(&self, key: &ProblemKey, f: impl FnOnce(&mut Problem)) -> bool {
        let Some(rec) = self.contests.get(&key.contest_id) else {
            warn!("contest `{}` has no record", key.contest_id);
            return false;
        };
        let mut rec = rec.borrow_mut();
        match rec.problems.get_mut(key.problem_index) {
            Some(p) => {
                f(p);
                true
            }
            None => false,
        }
    }

    /// Full recompute of directory stats and the problem tally.
    fn refresh(&mut self) {
        if let Some(tree) = &self.tree {
            self.store.refresh_stats(tree);
            for entry in checklist_from_tree(tree) {
                self.checklist.insert(entry.id.clone(), entry);
            }
        } else {
            self.store.directory_stats.clear();
        }
        self.tally = tally_problems(self.store.all_contests.values());
    }
}

fn rebuild_keeping_view(tree: &CategoryNode, old: &VisibilityStore) -> VisibilityStore {
    let mut store = VisibilityStore::new(tree);
    store.expanded_nodes = old.expanded_nodes.clone();
    store.visible_contests = old.visible_contests.clone();
    store
}

impl Reducible for CatalogState {
    type Action = CatalogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if !new.apply(action) {
            return self;
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
