//! Builds the typed category tree from the nested-array tree files:
//! `["ICPC", ["World Finals", "wf2023", "wf2022"], ["Regionals", ...]]`.

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::CatalogError;
use crate::model::{CategoryNode, ContestDb, ContestRef, ID_SEPARATOR};

/// Id slug of a display name. A parenthesized part wins over the full name,
/// so `"World Finals (WF)"` becomes `"wf"`.
pub fn slugify(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let base = parenthesized(&lower).unwrap_or(&lower);
    let mut out = String::with_capacity(base.len());
    let mut in_space = false;
    for ch in base.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out
}

/// First `(...)` group with a non-empty body.
fn parenthesized(s: &str) -> Option<&str> {
    let mut rest = s;
    let mut offset = 0;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let close = after.find(')')?;
        if close > 0 {
            let start = offset + open + 1;
            return Some(&s[start..start + close]);
        }
        offset += open + 1;
        rest = after;
    }
    None
}

pub fn node_id(parent_id: &str, name: &str) -> String {
    let slug = slugify(name);
    if parent_id.is_empty() {
        slug
    } else {
        format!("{}{}{}", parent_id, ID_SEPARATOR, slug)
    }
}

/// Parse one category tree. Id collisions are logged, not rejected.
pub fn build_tree(raw: &Value, parent_id: &str, db: &ContestDb) -> Result<CategoryNode, CatalogError> {
    let root = build_node(raw, parent_id, db)?;
    for id in duplicate_ids(&root) {
        warn!("duplicate node id `{}` in category tree", id);
    }
    Ok(root)
}

fn build_node(raw: &Value, parent_id: &str, db: &ContestDb) -> Result<CategoryNode, CatalogError> {
    let location = if parent_id.is_empty() { "<root>" } else { parent_id };
    let items = raw
        .as_array()
        .ok_or_else(|| CatalogError::config(format!("expected a list under `{}`, found {}", location, raw)))?;
    let name = items
        .first()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CatalogError::config(format!("node under `{}` has no name at position 0", location)))?;
    if slugify(name).is_empty() {
        return Err(CatalogError::config(format!(
            "name `{}` under `{}` yields an empty id",
            name, location
        )));
    }
    let id = node_id(parent_id, name);

    let mut children = Vec::new();
    let mut contests = Vec::new();
    for (pos, item) in items.iter().enumerate().skip(1) {
        match item {
            Value::Array(_) => children.push(build_node(item, &id, db)?),
            Value::String(cid) if !cid.is_empty() => contests.push(lookup(cid, db, &id)),
            other => {
                return Err(CatalogError::config(format!(
                    "`{}` position {}: expected a sub-list or contest id, found {}",
                    id, pos, other
                )));
            }
        }
    }

    if !children.is_empty() && !contests.is_empty() {
        debug!("`{}` holds both sub-lists and contest ids", id);
    }
    Ok(CategoryNode {
        id,
        name: name.to_string(),
        children,
        contests,
    })
}

fn lookup(contest_id: &str, db: &ContestDb, node_id: &str) -> ContestRef {
    let data = db.get(contest_id).cloned();
    if data.is_none() {
        warn!("contest `{}` in `{}` has no record", contest_id, node_id);
    }
    ContestRef {
        id: contest_id.to_string(),
        data,
    }
}

/// Node ids that occur more than once, sorted.
pub fn duplicate_ids(root: &CategoryNode) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    root.for_each_node(&mut |n| *seen.entry(n.id.as_str()).or_default() += 1);
    let mut dups: Vec<String> = seen
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    dups.sort();
    dups
}
