// Small helpers shared by the components.

use log::warn;

pub fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// `data_root` + relative resource path, tolerant of `./` and stray slashes.
pub fn join_url(root: &str, path: &str) -> String {
    let path = path.trim_start_matches("./").trim_start_matches('/');
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", root, path)
    }
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn storage_get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn storage_set(key: &str, value: &str) {
    match local_storage() {
        Some(store) => {
            if store.set_item(key, value).is_err() {
                warn!("could not write `{}` to localStorage", key);
            }
        }
        None => warn!("localStorage unavailable, `{}` not saved", key),
    }
}
