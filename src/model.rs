//! Core data models for the problem-set checklist.
//! Contest records are shared (`Rc<RefCell<_>>`) between the contest database,
//! the category tree and the flattened contest map, so editing a problem in one
//! place is visible everywhere.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

pub type ContestId = String;
pub type NodeId = String;
pub type SharedContest = Rc<RefCell<ContestRecord>>;
/// Contest records keyed by the id used in the category trees.
pub type ContestDb = HashMap<ContestId, SharedContest>;

/// Separator between the slugs of a node id (`icpc > world-finals`).
pub const ID_SEPARATOR: &str = " > ";
/// Difficulty cycles through `0..DIFFICULTY_LEVELS`.
pub const DIFFICULTY_LEVELS: u8 = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProblemStatus {
    #[default]
    NotAttempted,
    Attempted,
    Solved,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 3] = [
        ProblemStatus::NotAttempted,
        ProblemStatus::Attempted,
        ProblemStatus::Solved,
    ];

    /// Next status in the `NotAttempted -> Attempted -> Solved` cycle.
    pub fn next(self) -> Self {
        let n = (u8::from(self) + 1) % Self::ALL.len() as u8;
        Self::ALL[n as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            ProblemStatus::NotAttempted => "Not Attempted",
            ProblemStatus::Attempted => "Attempted",
            ProblemStatus::Solved => "Solved",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProblemStatus::NotAttempted => "#30363d",
            ProblemStatus::Attempted => "#d29922",
            ProblemStatus::Solved => "#2ea043",
        }
    }
}

impl From<ProblemStatus> for u8 {
    fn from(s: ProblemStatus) -> u8 {
        match s {
            ProblemStatus::NotAttempted => 0,
            ProblemStatus::Attempted => 1,
            ProblemStatus::Solved => 2,
        }
    }
}

impl TryFrom<u8> for ProblemStatus {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(v as usize)
            .copied()
            .ok_or_else(|| format!("problem status must be 0, 1 or 2, got {}", v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyStep {
    Up,
    Down,
}

/// Year column of a contest; sources write it either as a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Number(i64),
    Text(String),
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearLabel::Number(n) => write!(f, "{}", n),
            YearLabel::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Short label, e.g. "A".
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub status: ProblemStatus,
    #[serde(default)]
    pub difficulty: u8,
    /// Judge name -> problem URL (BOJ, CF, QOJ, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
}

impl Problem {
    pub fn cycle_status(&mut self) -> ProblemStatus {
        self.status = self.status.next();
        self.status
    }

    pub fn step_difficulty(&mut self, step: DifficultyStep) -> u8 {
        let d = self.difficulty.min(DIFFICULTY_LEVELS - 1);
        self.difficulty = match step {
            DifficultyStep::Up => (d + 1) % DIFFICULTY_LEVELS,
            DifficultyStep::Down => (d + DIFFICULTY_LEVELS - 1) % DIFFICULTY_LEVELS,
        };
        self.difficulty
    }

    /// Preferred judge link: BOJ, then CF, then QOJ, then whatever comes first.
    pub fn primary_link(&self) -> Option<&str> {
        ["BOJ", "CF", "QOJ"]
            .iter()
            .find_map(|judge| self.links.get(*judge))
            .or_else(|| self.links.values().next())
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standings: Option<String>,
    #[serde(rename = "BOJ", default, skip_serializing_if = "Option::is_none")]
    pub boj: Option<String>,
    #[serde(rename = "CF", default, skip_serializing_if = "Option::is_none")]
    pub cf: Option<String>,
    #[serde(rename = "QOJ", default, skip_serializing_if = "Option::is_none")]
    pub qoj: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<ContestLinks>,
}

impl ContestRecord {
    /// Row label: the year when known, else the contest name.
    pub fn label(&self) -> String {
        match &self.year {
            Some(y) => y.to_string(),
            None => self.name.clone(),
        }
    }

    /// Clamp out-of-range difficulties coming from source files.
    pub fn normalize(&mut self) {
        for p in &mut self.problems {
            p.difficulty = p.difficulty.min(DIFFICULTY_LEVELS - 1);
        }
    }
}

/// Typed address of a problem cell in the contest view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProblemKey {
    pub contest_id: ContestId,
    pub problem_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContestRef {
    pub id: ContestId,
    /// `None` while the contest database has no record for `id`.
    pub data: Option<SharedContest>,
}

impl ContestRef {
    pub fn problem_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.borrow().problems.len())
    }

    pub fn label(&self) -> String {
        match &self.data {
            Some(d) => d.borrow().label(),
            None => self.id.clone(),
        }
    }
}

/// A directory of a category tree. Source files may give a directory both
/// sub-directories and direct contests; both are kept in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryNode {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<CategoryNode>,
    pub contests: Vec<ContestRef>,
}

impl CategoryNode {
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Visit every contest in this subtree, depth first: sub-directories
    /// before the directory's own contests.
    pub fn for_each_contest<'a>(&'a self, f: &mut impl FnMut(&'a ContestRef)) {
        for child in &self.children {
            child.for_each_contest(f);
        }
        self.contests.iter().for_each(|c| f(c));
    }

    pub fn for_each_node<'a>(&'a self, f: &mut impl FnMut(&'a CategoryNode)) {
        f(self);
        for child in &self.children {
            child.for_each_node(f);
        }
    }

    /// Fill in `data` for refs that missed the lookup when the tree was built.
    /// Returns how many refs were resolved.
    pub fn resolve_missing(&mut self, db: &ContestDb) -> usize {
        let mut n = 0;
        for c in self.contests.iter_mut().filter(|c| c.data.is_none()) {
            if let Some(rec) = db.get(&c.id) {
                c.data = Some(rec.clone());
                n += 1;
            }
        }
        n + self.children.iter_mut().map(|c| c.resolve_missing(db)).sum::<usize>()
    }
}

pub fn shared(record: ContestRecord) -> SharedContest {
    Rc::new(RefCell::new(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: &str) -> Problem {
        Problem {
            id: id.to_string(),
            title: format!("Problem {}", id),
            status: ProblemStatus::NotAttempted,
            difficulty: 0,
            links: BTreeMap::new(),
        }
    }

    #[test]
    fn test_status_cycle_returns_to_start() {
        let mut p = problem("A");
        assert_eq!(p.cycle_status(), ProblemStatus::Attempted);
        assert_eq!(p.cycle_status(), ProblemStatus::Solved);
        assert_eq!(p.cycle_status(), ProblemStatus::NotAttempted);
    }

    #[test]
    fn test_difficulty_wraps_both_ways() {
        let mut p = problem("A");
        assert_eq!(p.step_difficulty(DifficultyStep::Down), DIFFICULTY_LEVELS - 1);
        assert_eq!(p.step_difficulty(DifficultyStep::Up), 0);
        for _ in 0..DIFFICULTY_LEVELS {
            p.step_difficulty(DifficultyStep::Up);
        }
        assert_eq!(p.difficulty, 0);
    }

    #[test]
    fn test_status_serializes_as_integer() {
        let p: Problem = serde_json::from_str(r#"{"id":"B","title":"T","status":2}"#).unwrap();
        assert_eq!(p.status, ProblemStatus::Solved);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["status"], 2);
        assert!(serde_json::from_str::<Problem>(r#"{"id":"B","status":3}"#).is_err());
    }

    #[test]
    fn test_contest_record_parses_source_shape() {
        let raw = r#"{
            "name": "ICPC World Finals",
            "year": 2023,
            "problems": [
                {"id": "A", "name": "Alpha", "links": {"CF": "cf/a", "BOJ": "boj/a"}},
                {"id": "B", "title": "Beta", "difficulty": 17}
            ],
            "link": {"BOJ": "https://www.acmicpc.net/category/detail/1"}
        }"#;
        let mut rec: ContestRecord = serde_json::from_str(raw).unwrap();
        rec.normalize();
        assert_eq!(rec.label(), "2023");
        assert_eq!(rec.problems[0].title, "Alpha");
        assert_eq!(rec.problems[0].primary_link(), Some("boj/a"));
        assert_eq!(rec.problems[1].difficulty, DIFFICULTY_LEVELS - 1);
        assert!(rec.link.unwrap().boj.is_some());

        let text: ContestRecord =
            serde_json::from_str(r#"{"name":"Open Cup","year":"2019-2020"}"#).unwrap();
        assert_eq!(text.label(), "2019-2020");
        assert!(text.problems.is_empty());
    }

    #[test]
    fn test_resolve_missing_fills_late_records() {
        let mut node = CategoryNode {
            id: "root".into(),
            name: "Root".into(),
            children: Vec::new(),
            contests: vec![ContestRef { id: "c1".into(), data: None }],
        };
        let mut db = ContestDb::new();
        db.insert(
            "c1".into(),
            shared(ContestRecord {
                name: "C1".into(),
                year: None,
                date: None,
                location: None,
                description: None,
                problems: vec![problem("A")],
                link: None,
            }),
        );
        assert_eq!(node.resolve_missing(&db), 1);
        assert_eq!(node.contests[0].problem_count(), 1);
        assert_eq!(node.resolve_missing(&db), 0);
    }
}
