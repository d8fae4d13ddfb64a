//! Flat checklist persisted as a single JSON blob in a repository, through a
//! GitHub-style contents API (`GET`/`PUT /repos/{owner}/{repo}/contents/{path}`).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gloo_net::http::{Request, RequestBuilder};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RemoteConfig;
use crate::error::CatalogError;
use crate::model::{CategoryNode, ContestDb, ContestId, ProblemStatus, YearLabel};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistProblem {
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub status: ProblemStatus,
    #[serde(default)]
    pub difficulty: u8,
}

/// One contest of the checklist, with the names of the directories above it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub id: ContestId,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearLabel>,
    #[serde(default)]
    pub problems: Vec<ChecklistProblem>,
}

#[derive(Debug, PartialEq)]
pub enum ChecklistLoad {
    Found(Vec<ChecklistEntry>),
    /// Nothing stored yet; start from an empty checklist.
    Missing,
}

#[derive(Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: String,
    sha: String,
}

#[derive(Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

pub fn contents_url(cfg: &RemoteConfig) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}",
        cfg.api_base.trim_end_matches('/'),
        cfg.owner.trim(),
        cfg.repo.trim(),
        cfg.path.trim().trim_start_matches('/')
    )
}

/// Decode the base64 `content` field (line-wrapped by the API) into entries.
/// `null` decodes to an empty checklist.
pub fn decode_blob(content: &str) -> Result<Vec<ChecklistEntry>, CatalogError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| CatalogError::Format(format!("content is not base64: {}", e)))?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| CatalogError::Format(e.to_string()))?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value).map_err(|e| CatalogError::Format(e.to_string())),
        other => Err(CatalogError::Format(format!("expected a list, found {}", kind(&other)))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

pub fn encode_blob(entries: &[ChecklistEntry]) -> Result<String, CatalogError> {
    let json = serde_json::to_string_pretty(entries).map_err(|e| CatalogError::Format(e.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Every contest of the tree as a flat checklist, in tree order.
pub fn checklist_from_tree(root: &CategoryNode) -> Vec<ChecklistEntry> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect_entries(root, &mut path, &mut out);
    out
}

fn collect_entries(node: &CategoryNode, path: &mut Vec<String>, out: &mut Vec<ChecklistEntry>) {
    path.push(node.name.clone());
    for child in &node.children {
        collect_entries(child, path, out);
    }
    for c in &node.contests {
        let Some(data) = &c.data else { continue };
        let data = data.borrow();
        out.push(ChecklistEntry {
            id: c.id.clone(),
            category: path.clone(),
            name: data.name.clone(),
            year: data.year.clone(),
            problems: data
                .problems
                .iter()
                .map(|p| ChecklistProblem {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    status: p.status,
                    difficulty: p.difficulty,
                })
                .collect(),
        });
    }
    path.pop();
}

/// Overlay `local` onto the stored checklist: entries with a matching id are
/// replaced in place, new ones are appended, and the rest are kept untouched.
pub fn merge_checklist(stored: Vec<ChecklistEntry>, local: &[ChecklistEntry]) -> Vec<ChecklistEntry> {
    let mut merged = stored;
    for entry in local {
        match merged.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry.clone(),
            None => merged.push(entry.clone()),
        }
    }
    merged
}

/// Copy saved status and difficulty onto the loaded contests, matching by
/// contest id and problem id. Returns the number of problems updated.
pub fn apply_checklist(db: &ContestDb, entries: &[ChecklistEntry]) -> usize {
    let mut applied = 0;
    for entry in entries {
        let Some(rec) = db.get(&entry.id) else {
            debug!("checklist contest `{}` is not loaded", entry.id);
            continue;
        };
        let mut rec = rec.borrow_mut();
        for saved in &entry.problems {
            if let Some(p) = rec.problems.iter_mut().find(|p| p.id == saved.id) {
                p.status = saved.status;
                p.difficulty = saved.difficulty;
                applied += 1;
            }
        }
        rec.normalize();
    }
    applied
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder
        .header("Authorization", &format!("Bearer {}", token))
        .header("Accept", "application/vnd.github.v3+json")
}

async fn get_contents(cfg: &RemoteConfig, token: &str) -> Result<Option<ContentsResponse>, CatalogError> {
    let url = contents_url(cfg);
    let resp = authorized(Request::get(&url), token)
        .query([("ref", cfg.branch.trim())])
        .send()
        .await
        .map_err(|e| CatalogError::network(&url, e))?;
    if resp.status() == 404 {
        return Ok(None);
    }
    if !resp.ok() {
        return Err(CatalogError::Status {
            url,
            status: resp.status(),
        });
    }
    let body = resp
        .json::<ContentsResponse>()
        .await
        .map_err(|e| CatalogError::Format(e.to_string()))?;
    Ok(Some(body))
}

pub async fn load_checklist(cfg: &RemoteConfig, token: &str) -> Result<ChecklistLoad, CatalogError> {
    cfg.validate()?;
    match get_contents(cfg, token).await? {
        None => {
            info!("no checklist at {} on {}", cfg.path, cfg.branch);
            Ok(ChecklistLoad::Missing)
        }
        Some(body) => decode_blob(&body.content).map(ChecklistLoad::Found),
    }
}

/// Merge `entries` into the stored blob and write it back. Contests of
/// categories not visited this session keep their stored state.
pub async fn save_checklist(cfg: &RemoteConfig, token: &str, entries: &[ChecklistEntry]) -> Result<(), CatalogError> {
    cfg.validate()?;
    let (stored, sha) = match get_contents(cfg, token).await? {
        None => (Vec::new(), None),
        Some(body) => match decode_blob(&body.content) {
            Ok(stored) => (stored, Some(body.sha)),
            Err(e) => {
                warn!("replacing unreadable checklist: {}", e);
                (Vec::new(), Some(body.sha))
            }
        },
    };
    let merged = merge_checklist(stored, entries);
    let body = PutContents {
        message: &cfg.commit_message,
        content: encode_blob(&merged)?,
        branch: cfg.branch.trim(),
        sha,
    };
    let url = contents_url(cfg);
    let resp = authorized(Request::put(&url), token)
        .header("Content-Type", "application/json")
        .json(&body)
        .map_err(|e| CatalogError::Format(e.to_string()))?
        .send()
        .await
        .map_err(|e| CatalogError::network(&url, e))?;
    if !resp.ok() {
        return Err(CatalogError::Status {
            url,
            status: resp.status(),
        });
    }
    debug!("saved {} checklist entries ({} from this session)", merged.len(), entries.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContestRecord, Problem, shared};
    use crate::tree::build_tree;
    use serde_json::json;

    fn record(name: &str, ids: &[&str]) -> ContestRecord {
        ContestRecord {
            name: name.into(),
            year: Some(YearLabel::Number(2023)),
            date: None,
            location: None,
            description: None,
            problems: ids
                .iter()
                .map(|id| Problem {
                    id: id.to_string(),
                    title: format!("title {}", id),
                    status: ProblemStatus::NotAttempted,
                    difficulty: 0,
                    links: Default::default(),
                })
                .collect(),
            link: None,
        }
    }

    fn db() -> ContestDb {
        let mut db = ContestDb::new();
        db.insert("wf".into(), shared(record("World Finals", &["A", "B"])));
        db.insert("ap".into(), shared(record("Asia Pacific", &["A"])));
        db
    }

    #[test]
    fn test_contents_url() {
        let cfg = RemoteConfig {
            owner: "me".into(),
            repo: "lists".into(),
            path: "/problemlist/problemlist.json".into(),
            ..Default::default()
        };
        assert_eq!(
            contents_url(&cfg),
            "https://api.github.com/repos/me/lists/contents/problemlist/problemlist.json"
        );
    }

    #[test]
    fn test_decode_accepts_wrapped_base64() {
        let blob = STANDARD.encode(r#"[{"id":"wf","problems":[{"id":"A","status":2}]}]"#);
        let (head, tail) = blob.split_at(10);
        let wrapped = format!("{}\n{}\n", head, tail);
        let entries = decode_blob(&wrapped).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].problems[0].status, ProblemStatus::Solved);
        assert_eq!(decode_blob(&STANDARD.encode("null")).unwrap(), Vec::new());
    }

    #[test]
    fn test_decode_rejects_non_lists() {
        for bad in [r#"{"id":"wf"}"#, "42", "not json", r#"[{"problems":[]}]"#] {
            let err = decode_blob(&STANDARD.encode(bad)).unwrap_err();
            assert!(matches!(err, CatalogError::Format(_)), "{}", bad);
        }
        assert!(matches!(decode_blob("%%%"), Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_checklist_from_tree_carries_category_path() {
        let db = db();
        let root = build_tree(&json!(["ICPC", ["World Finals", "wf", "missing"], ["Regionals", ["Asia", "ap"]]]), "", &db).unwrap();
        let entries = checklist_from_tree(&root);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, vec!["ICPC", "World Finals"]);
        assert_eq!(entries[1].category, vec!["ICPC", "Regionals", "Asia"]);
        assert_eq!(entries[0].problems.len(), 2);

        let encoded = encode_blob(&entries).unwrap();
        assert_eq!(decode_blob(&encoded).unwrap(), entries);
    }

    #[test]
    fn test_apply_checklist_matches_by_id() {
        let db = db();
        let saved = vec![
            ChecklistEntry {
                id: "wf".into(),
                category: vec![],
                name: String::new(),
                year: None,
                problems: vec![
                    ChecklistProblem { id: "B".into(), title: String::new(), status: ProblemStatus::Solved, difficulty: 9 },
                    ChecklistProblem { id: "Z".into(), title: String::new(), status: ProblemStatus::Solved, difficulty: 1 },
                ],
            },
            ChecklistEntry { id: "gone".into(), category: vec![], name: String::new(), year: None, problems: vec![] },
        ];
        assert_eq!(apply_checklist(&db, &saved), 1);
        let wf = db["wf"].borrow();
        assert_eq!(wf.problems[0].status, ProblemStatus::NotAttempted);
        assert_eq!(wf.problems[1].status, ProblemStatus::Solved);
        assert_eq!(wf.problems[1].difficulty, crate::model::DIFFICULTY_LEVELS - 1);
    }

    fn entry(id: &str, status: ProblemStatus) -> ChecklistEntry {
        ChecklistEntry {
            id: id.into(),
            category: vec!["X".into()],
            name: id.into(),
            year: None,
            problems: vec![ChecklistProblem { id: "A".into(), title: String::new(), status, difficulty: 0 }],
        }
    }

    #[test]
    fn test_merge_keeps_entries_from_other_categories() {
        let stored = vec![entry("icpc1", ProblemStatus::Solved), entry("ioi1", ProblemStatus::NotAttempted)];
        let local = vec![entry("ioi1", ProblemStatus::Solved), entry("ioi2", ProblemStatus::Attempted)];
        let merged = merge_checklist(stored, &local);
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["icpc1", "ioi1", "ioi2"]);
        assert_eq!(merged[0].problems[0].status, ProblemStatus::Solved);
        assert_eq!(merged[1].problems[0].status, ProblemStatus::Solved);
        assert_eq!(merge_checklist(Vec::new(), &local), local);
    }

    #[test]
    fn test_checklist_includes_direct_contests_of_a_directory() {
        let db = db();
        let root = build_tree(&json!(["ICPC", ["Regionals", "ap"], "wf"]), "", &db).unwrap();
        let entries = checklist_from_tree(&root);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ap", "wf"]);
        assert_eq!(entries[1].category, vec!["ICPC"]);
    }
}
