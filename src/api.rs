use futures::future::try_join_all;
use gloo_net::http::Request;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CatalogError;
use crate::model::{ContestDb, ContestRecord, shared};
use crate::util::join_url;

/// Row of `problemlists/contestlist.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct ContestIndexEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub filepath: String,
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, CatalogError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::network(url, e))?;
    if !resp.ok() {
        return Err(CatalogError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    resp.json::<T>()
        .await
        .map_err(|e| CatalogError::config(format!("{}: {}", url, e)))
}

/// Loads the index and then every contest it lists, concurrently.
/// One failed contest fails the whole load.
pub async fn fetch_contest_db(data_root: &str) -> Result<ContestDb, CatalogError> {
    let index_url = join_url(data_root, "problemlists/contestlist.json");
    let index: Vec<ContestIndexEntry> = get_json(&index_url).await?;
    let fetches = index
        .into_iter()
        .filter_map(|e| match e.id {
            Some(id) if !id.is_empty() => Some((id, e.filepath)),
            _ => None,
        })
        .map(|(id, filepath)| async move {
            let url = join_url(data_root, &format!("{}contest.json", filepath));
            debug!("fetching contest {} from {}", id, url);
            let mut record: ContestRecord = get_json(&url).await?;
            record.normalize();
            Ok::<_, CatalogError>((id, shared(record)))
        });
    let loaded = try_join_all(fetches).await?;
    debug!("loaded {} contests", loaded.len());
    Ok(loaded.into_iter().collect())
}

/// Raw nested-array tree of one category; parsed by `tree::build_tree`.
pub async fn fetch_category_tree(data_root: &str, category: &str) -> Result<Value, CatalogError> {
    let key = String::from(js_sys::encode_uri_component(category));
    let url = join_url(data_root, &format!("problemlists/{}/contesttree.json", key));
    get_json(&url).await
}
