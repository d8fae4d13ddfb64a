use super::{
    contest_view::ContestView,
    nav_bar::NavBar,
    stats_bar::StatsBar,
    status_toast::{StatusLevel, StatusMessage, StatusToast},
    sync_panel::SyncPanel,
    tree_view::TreeView,
};
use crate::api::{fetch_category_tree, fetch_contest_db};
use crate::config::{AppConfig, RemoteConfig, load_token, save_token};
use crate::error::CatalogError;
use crate::remote::{ChecklistLoad, load_checklist, save_checklist};
use crate::state::{CatalogAction, CatalogState};
use crate::util::plural;
use gloo_timers::future::TimeoutFuture;
use log::{error, info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::load());
    let catalog = use_reducer(CatalogState::default);
    let remote = use_state(|| config.remote.clone());
    let status = use_state(|| None::<StatusMessage>);
    let status_seq = use_mut_ref(|| 0u64);
    let show_sync = use_state(|| false);
    let has_token = use_state(|| load_token().is_some());
    let busy = use_state(|| false);
    let sidebar_width = use_state(|| config.sidebar_default_px);
    let resizing = use_state(|| false);
    let split_ref = use_node_ref();

    // Transient status line; a newer message cancels the older one's timeout.
    let notify: Callback<(StatusLevel, String)> = {
        let status = status.clone();
        let status_seq = status_seq.clone();
        let ttl = config.status_ttl_ms;
        Callback::from(move |(level, text): (StatusLevel, String)| {
            let id = {
                let mut seq = status_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            status.set(Some(StatusMessage { id, level, text }));
            let status = status.clone();
            let status_seq = status_seq.clone();
            spawn_local(async move {
                TimeoutFuture::new(ttl).await;
                if *status_seq.borrow() == id {
                    status.set(None);
                }
            });
        })
    };

    let load_category: Callback<String> = {
        let catalog = catalog.clone();
        let data_root = config.data_root.clone();
        Callback::from(move |category: String| {
            catalog.dispatch(CatalogAction::SelectCategory(category.clone()));
            let catalog = catalog.clone();
            let data_root = data_root.clone();
            spawn_local(async move {
                match fetch_category_tree(&data_root, &category).await {
                    Ok(raw) => catalog.dispatch(CatalogAction::TreeLoaded { category, raw }),
                    Err(e) => {
                        error!("loading category {}: {}", category, e);
                        catalog.dispatch(CatalogAction::TreeFailed {
                            category,
                            reason: e.to_string(),
                        });
                    }
                }
            });
        })
    };

    // Contest records first, then the default category.
    {
        let catalog = catalog.clone();
        let load_category = load_category.clone();
        let notify = notify.clone();
        let data_root = config.data_root.clone();
        let default_category = config.default_category.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_contest_db(&data_root).await {
                    Ok(db) => {
                        info!("contest database ready: {}", plural(db.len(), "contest"));
                        catalog.dispatch(CatalogAction::ContestsLoaded(db));
                    }
                    Err(e) => {
                        error!("loading contest database: {}", e);
                        notify.emit((StatusLevel::Error, format!("Error loading contest data: {}", e)));
                    }
                }
                load_category.emit(default_category);
            });
            || ()
        });
    }

    // Surface tree failures for the active category only; stale ones never land.
    {
        let notify = notify.clone();
        use_effect_with(catalog.load_error.clone(), move |err| {
            if let Some(e) = err {
                notify.emit((StatusLevel::Error, e.clone()));
            }
            || ()
        });
    }

    let on_save_token = {
        let notify = notify.clone();
        let has_token = has_token.clone();
        Callback::from(move |token: String| {
            let token = token.trim().to_string();
            if token.is_empty() {
                notify.emit((StatusLevel::Error, "Please enter a token".to_string()));
                return;
            }
            save_token(&token);
            has_token.set(true);
            notify.emit((StatusLevel::Success, "Token saved locally".to_string()));
        })
    };

    let on_remote_change = {
        let remote = remote.clone();
        Callback::from(move |cfg: RemoteConfig| {
            cfg.save();
            remote.set(cfg);
        })
    };

    let on_load_remote = {
        let catalog = catalog.clone();
        let remote = remote.clone();
        let notify = notify.clone();
        let busy = busy.clone();
        Callback::from(move |_| {
            let Some(token) = load_token() else {
                notify.emit((StatusLevel::Error, CatalogError::MissingCredentials.to_string()));
                return;
            };
            let cfg = (*remote).clone();
            let catalog = catalog.clone();
            let notify = notify.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match load_checklist(&cfg, &token).await {
                    Ok(ChecklistLoad::Found(entries)) => {
                        let n = entries.len();
                        catalog.dispatch(CatalogAction::ApplyChecklist(entries));
                        notify.emit((
                            StatusLevel::Success,
                            format!("Checklist loaded from {} ({})", cfg.branch, plural(n, "contest")),
                        ));
                    }
                    Ok(ChecklistLoad::Missing) => notify.emit((
                        StatusLevel::Success,
                        format!("No checklist found on {}. Starting from an empty one.", cfg.branch),
                    )),
                    Err(CatalogError::Format(reason)) => {
                        warn!("remote checklist ignored: {}", reason);
                        notify.emit((
                            StatusLevel::Warning,
                            "Invalid checklist format, starting from an empty one".to_string(),
                        ));
                    }
                    Err(e) => {
                        error!("loading checklist: {}", e);
                        notify.emit((StatusLevel::Error, format!("Error loading checklist: {}", e)));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_save_remote = {
        let catalog = catalog.clone();
        let remote = remote.clone();
        let notify = notify.clone();
        let busy = busy.clone();
        Callback::from(move |_| {
            let Some(token) = load_token() else {
                notify.emit((StatusLevel::Error, CatalogError::MissingCredentials.to_string()));
                return;
            };
            let entries = catalog.checklist_entries();
            if entries.is_empty() {
                notify.emit((StatusLevel::Warning, "Nothing to save yet".to_string()));
                return;
            }
            let cfg = (*remote).clone();
            let notify = notify.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match save_checklist(&cfg, &token, &entries).await {
                    Ok(()) => notify.emit((StatusLevel::Success, "Checklist saved successfully".to_string())),
                    Err(e) => {
                        error!("saving checklist: {}", e);
                        notify.emit((StatusLevel::Error, format!("Error saving checklist: {}", e)));
                    }
                }
                busy.set(false);
            });
        })
    };

    // Sidebar drag
    let start_resize = {
        let resizing = resizing.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            resizing.set(true);
        })
    };
    let drag_resize = {
        let resizing = resizing.clone();
        let sidebar_width = sidebar_width.clone();
        let split_ref = split_ref.clone();
        let config = config.clone();
        Callback::from(move |e: MouseEvent| {
            if !*resizing {
                return;
            }
            if let Some(el) = split_ref.cast::<web_sys::HtmlElement>() {
                let left = el.get_bounding_client_rect().left();
                sidebar_width.set(config.clamp_sidebar(e.client_x() as f64 - left));
            }
        })
    };
    let stop_resize = {
        let resizing = resizing.clone();
        Callback::from(move |_: MouseEvent| resizing.set(false))
    };

    let open_sync = {
        let show_sync = show_sync.clone();
        Callback::from(move |_| show_sync.set(true))
    };
    let close_sync = {
        let show_sync = show_sync.clone();
        Callback::from(move |_| show_sync.set(false))
    };
    let dismiss_status = {
        let status = status.clone();
        Callback::from(move |_| status.set(None))
    };

    let store = &catalog.store;
    html! {
        <div style="display:flex; flex-direction:column; height:100vh; font-family:-apple-system, 'Segoe UI', sans-serif; color:#1f2328; background:#ffffff;">
            <NavBar
                categories={config.categories.clone()}
                active={catalog.category.clone()}
                on_select={load_category.clone()}
                on_open_sync={open_sync}
                loading={catalog.is_loading()}
            />
            <div
                ref={split_ref}
                onmousemove={drag_resize}
                onmouseup={stop_resize.clone()}
                onmouseleave={stop_resize}
                style={format!("display:flex; flex:1; min-height:0; {}", if *resizing { "cursor:col-resize; user-select:none;" } else { "" })}
            >
                <aside style={format!("width:{}px; flex-shrink:0; overflow:auto; border-right:1px solid #d0d7de;", *sidebar_width)}>
                    <TreeView catalog={catalog.clone()} />
                </aside>
                <div onmousedown={start_resize} style="width:6px; flex-shrink:0; cursor:col-resize; background:#eaeef2;"></div>
                <main style="flex:1; overflow:auto;">
                    <ContestView catalog={catalog.clone()} />
                </main>
            </div>
            <StatsBar visible={store.visible_count()} total={store.total_count()} tally={catalog.tally} />
            <SyncPanel
                show={*show_sync}
                on_close={close_sync}
                remote={(*remote).clone()}
                {on_remote_change}
                has_token={*has_token}
                {on_save_token}
                on_load={on_load_remote}
                on_save={on_save_remote}
                busy={*busy}
            />
            <StatusToast message={(*status).clone()} on_dismiss={dismiss_status} />
        </div>
    }
}
