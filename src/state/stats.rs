use std::collections::{HashMap, HashSet};
use std::ops::AddAssign;

use crate::model::{CategoryNode, ContestId, ContestRef, NodeId, ProblemStatus};

/// Aggregate contest counts of one directory, descendants included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirStats {
    pub total: usize,
    pub visible: usize,
}

impl AddAssign for DirStats {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.visible += rhs.visible;
    }
}

/// Postorder pass over the whole tree. Every node gets an entry, empty ones
/// included. Always a full recompute; nothing is carried over between calls.
pub fn recompute_stats(root: &CategoryNode, visible: &HashSet<ContestId>) -> HashMap<NodeId, DirStats> {
    let mut out = HashMap::new();
    accumulate(root, visible, &mut out);
    out
}

fn accumulate(node: &CategoryNode, visible: &HashSet<ContestId>, out: &mut HashMap<NodeId, DirStats>) -> DirStats {
    let mut stats = DirStats {
        total: node.contests.len(),
        visible: node.contests.iter().filter(|c| visible.contains(&c.id)).count(),
    };
    for child in &node.children {
        stats += accumulate(child, visible, out);
    }
    out.insert(node.id.clone(), stats);
    stats
}

/// Problem-level counters shown in the stats bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProblemTally {
    pub total: usize,
    pub solved: usize,
    pub attempted: usize,
}

impl ProblemTally {
    pub fn not_attempted(&self) -> usize {
        self.total - self.solved - self.attempted
    }

    pub fn count(&self, status: ProblemStatus) -> usize {
        match status {
            ProblemStatus::NotAttempted => self.not_attempted(),
            ProblemStatus::Attempted => self.attempted,
            ProblemStatus::Solved => self.solved,
        }
    }
}

/// Counts problems of the given contests. Refs without data contribute nothing.
pub fn tally_problems<'a>(contests: impl IntoIterator<Item = &'a ContestRef>) -> ProblemTally {
    let mut tally = ProblemTally::default();
    for c in contests {
        let Some(data) = &c.data else { continue };
        for p in &data.borrow().problems {
            tally.total += 1;
            match p.status {
                ProblemStatus::Solved => tally.solved += 1,
                ProblemStatus::Attempted => tally.attempted += 1,
                ProblemStatus::NotAttempted => {}
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContestDb;
    use crate::tree::build_tree;
    use serde_json::json;

    fn tree() -> CategoryNode {
        let raw = json!([
            "ICPC",
            ["World Finals", "wf2023", "wf2022"],
            ["Regionals", ["Asia Pacific", "ap2023"], ["Europe"], ["Americas", "na1", "na2", "na3"]]
        ]);
        build_tree(&raw, "", &ContestDb::new()).unwrap()
    }

    fn set(ids: &[&str]) -> HashSet<ContestId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_node_has_an_entry() {
        let root = tree();
        let stats = recompute_stats(&root, &HashSet::new());
        let mut count = 0;
        root.for_each_node(&mut |_| count += 1);
        assert_eq!(stats.len(), count);
        assert_eq!(stats["icpc > regionals > europe"], DirStats::default());
        assert_eq!(stats["icpc"], DirStats { total: 6, visible: 0 });
    }

    #[test]
    fn test_sums_match_subtree_contests() {
        let root = tree();
        let visible = set(&["wf2022", "ap2023", "na3", "not-in-tree"]);
        let stats = recompute_stats(&root, &visible);
        root.for_each_node(&mut |node| {
            let mut total = 0;
            let mut shown = 0;
            node.for_each_contest(&mut |c| {
                total += 1;
                if visible.contains(&c.id) {
                    shown += 1;
                }
            });
            assert_eq!(stats[&node.id], DirStats { total, visible: shown }, "{}", node.id);
        });
        assert_eq!(stats["icpc"].visible, 3);
        assert_eq!(stats["icpc > regionals"], DirStats { total: 4, visible: 2 });
    }

    #[test]
    fn test_direct_contests_add_to_children() {
        let raw = json!(["Root", ["Sub", "a", "b"], "c"]);
        let root = build_tree(&raw, "", &ContestDb::new()).unwrap();
        let stats = recompute_stats(&root, &set(&["b", "c"]));
        assert_eq!(stats["root > sub"], DirStats { total: 2, visible: 1 });
        assert_eq!(stats["root"], DirStats { total: 3, visible: 2 });
    }
}
