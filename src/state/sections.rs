use super::visibility::VisibilityStore;
use crate::model::{CategoryNode, ContestRef, ID_SEPARATOR, NodeId};

/// One table of the contest view: a directory with at least one visible contest.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub node_id: NodeId,
    /// Names from the root down to this directory, joined with ` > `.
    pub title: String,
    /// Visible contests of this directory only, in source order.
    pub rows: Vec<ContestRef>,
    /// Widest problem list among `rows`.
    pub columns: usize,
}

pub fn visible_sections(root: &CategoryNode, store: &VisibilityStore) -> Vec<Section> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect(root, store, &mut path, &mut out);
    out
}

fn collect<'a>(node: &'a CategoryNode, store: &VisibilityStore, path: &mut Vec<&'a str>, out: &mut Vec<Section>) {
    if store.directory_stats.get(&node.id).is_some_and(|s| s.visible == 0) {
        return;
    }
    path.push(&node.name);
    for child in &node.children {
        collect(child, store, path, out);
    }
    let rows: Vec<ContestRef> = node.contests.iter().filter(|c| store.is_visible(&c.id)).cloned().collect();
    if !rows.is_empty() {
        let columns = rows.iter().map(ContestRef::problem_count).max().unwrap_or(0);
        out.push(Section {
            node_id: node.id.clone(),
            title: path.join(ID_SEPARATOR),
            rows,
            columns,
        });
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContestDb, ContestRecord, Problem, shared};
    use crate::tree::build_tree;
    use serde_json::json;

    fn record(problems: usize) -> ContestRecord {
        ContestRecord {
            name: "contest".into(),
            year: None,
            date: None,
            location: None,
            description: None,
            problems: (0..problems)
                .map(|i| Problem {
                    id: ((b'A' + i as u8) as char).to_string(),
                    title: String::new(),
                    status: Default::default(),
                    difficulty: 0,
                    links: Default::default(),
                })
                .collect(),
            link: None,
        }
    }

    fn fixture() -> (CategoryNode, VisibilityStore) {
        let mut db = ContestDb::new();
        db.insert("wf1".into(), shared(record(12)));
        db.insert("wf2".into(), shared(record(9)));
        db.insert("ap1".into(), shared(record(11)));
        let raw = json!(["ICPC", ["World Finals", "wf1", "wf2"], ["Regionals", ["Asia Pacific", "ap1", "ghost"]]]);
        let root = build_tree(&raw, "", &db).unwrap();
        let store = VisibilityStore::all_visible(&root);
        (root, store)
    }

    #[test]
    fn test_one_section_per_directory_with_path_titles() {
        let (root, store) = fixture();
        let sections = visible_sections(&root, &store);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["ICPC > World Finals", "ICPC > Regionals > Asia Pacific"]);
        assert_eq!(sections[0].columns, 12);
        assert_eq!(sections[1].rows.len(), 2);
        assert_eq!(sections[1].columns, 11);
    }

    #[test]
    fn test_columns_follow_visible_rows_only() {
        let (root, mut store) = fixture();
        store.toggle_contest("wf1");
        store.refresh_stats(&root);
        let sections = visible_sections(&root, &store);
        assert_eq!(sections[0].rows.len(), 1);
        assert_eq!(sections[0].rows[0].id, "wf2");
        assert_eq!(sections[0].columns, 9);
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let (root, mut store) = fixture();
        store.set_subtree_visibility(root.find("icpc > world-finals").unwrap(), false);
        store.refresh_stats(&root);
        let sections = visible_sections(&root, &store);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].node_id, "icpc > regionals > asia-pacific");

        store.set_subtree_visibility(&root, false);
        store.refresh_stats(&root);
        assert!(visible_sections(&root, &store).is_empty());
    }
}
