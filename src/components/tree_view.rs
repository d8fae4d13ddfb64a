use crate::model::{CategoryNode, ContestId, ContestRef, NodeId};
use crate::state::{CatalogAction, CatalogState, VisibilityStore, visibility_color};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TreeViewProps {
    pub catalog: UseReducerHandle<CatalogState>,
}

/// Callbacks shared by every node of one render pass.
struct TreeActions {
    toggle_expansion: Callback<NodeId>,
    set_subtree: Callback<(NodeId, bool)>,
    toggle_contest: Callback<ContestId>,
}

#[function_component(TreeView)]
pub fn tree_view(props: &TreeViewProps) -> Html {
    let state = &*props.catalog;
    let Some(root) = &state.tree else {
        let text = match &state.load_error {
            Some(e) => format!("Could not load this category: {}", e),
            None if state.is_loading() => "Loading contests…".to_string(),
            None => "Pick a category".to_string(),
        };
        return html! { <div style="padding:12px; color:#57606a; font-size:13px;">{ text }</div> };
    };

    let actions = TreeActions {
        toggle_expansion: {
            let catalog = props.catalog.clone();
            Callback::from(move |id: NodeId| catalog.dispatch(CatalogAction::ToggleExpansion(id)))
        },
        set_subtree: {
            let catalog = props.catalog.clone();
            Callback::from(move |(node_id, visible): (NodeId, bool)| {
                catalog.dispatch(CatalogAction::SetSubtreeVisibility { node_id, visible })
            })
        },
        toggle_contest: {
            let catalog = props.catalog.clone();
            Callback::from(move |id: ContestId| catalog.dispatch(CatalogAction::ToggleContest(id)))
        },
    };

    html! { <div style="padding:8px 4px; font-size:14px;">{ render_node(root, &state.store, &actions) }</div> }
}

// Collapsed nodes do not build their children at all.
fn render_node(node: &CategoryNode, store: &VisibilityStore, actions: &TreeActions) -> Html {
    let stats = store.stats(&node.id);
    let color = visibility_color(stats.visible, stats.total);
    let expanded = store.is_expanded(&node.id);

    let header_click = {
        let cb = actions.toggle_expansion.clone();
        let id = node.id.clone();
        Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
    };
    let bulk = |visible: bool| {
        let cb = actions.set_subtree.clone();
        let id = node.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit((id.clone(), visible))
        })
    };

    let body = if expanded {
        html! {
            <>
                { for node.children.iter().map(|c| render_node(c, store, actions)) }
                { for node.contests.iter().map(|c| render_leaf(c, store, actions, &color)) }
            </>
        }
    } else {
        html! {}
    };

    html! {
        <div>
            <div onclick={header_click} style="display:flex; align-items:center; gap:6px; padding:3px 6px; border-radius:6px; cursor:pointer; user-select:none;">
                <span style="width:14px; font-size:11px; color:#57606a;">{ if expanded { "▼" } else { "▶" } }</span>
                <span style={format!("color:{}; font-weight:600;", color)}>{ node.name.clone() }</span>
                <span style="font-size:12px; color:#6e7681; font-variant-numeric:tabular-nums;">{ format!("{}/{}", stats.visible, stats.total) }</span>
                <div style="margin-left:auto; display:flex; gap:2px;">
                    <button title="Show all contests in this directory" onclick={bulk(true)} style="padding:0 6px;">{"✓"}</button>
                    <button title="Hide all contests in this directory" onclick={bulk(false)} style="padding:0 6px;">{"✗"}</button>
                </div>
            </div>
            <div style="padding-left:16px;">{ body }</div>
        </div>
    }
}

fn render_leaf(contest: &ContestRef, store: &VisibilityStore, actions: &TreeActions, color: &str) -> Html {
    let visible = store.is_visible(&contest.id);
    let onclick = {
        let cb = actions.toggle_contest.clone();
        let id = contest.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(id.clone())
        })
    };
    let title = if contest.data.is_some() {
        contest.id.clone()
    } else {
        format!("{} (no contest record)", contest.id)
    };
    html! {
        <div {onclick} {title} style={format!("display:flex; gap:6px; padding:2px 6px 2px 20px; cursor:pointer; opacity:{};", if visible { "1" } else { "0.55" })}>
            <span style="width:12px;">{ if visible { "✓" } else { "✗" } }</span>
            <span style={format!("color:{};", color)}>{ contest.label() }</span>
        </div>
    }
}
