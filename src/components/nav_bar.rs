use crate::config::CategoryTab;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavBarProps {
    pub categories: Vec<CategoryTab>,
    pub active: Option<String>,
    pub on_select: Callback<String>,
    pub on_open_sync: Callback<()>,
    #[prop_or(false)]
    pub loading: bool,
}

#[function_component]
pub fn NavBar(props: &NavBarProps) -> Html {
    let sync_cb = {
        let cb = props.on_open_sync.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let tabs = props.categories.iter().map(|tab| {
        let active = props.active.as_deref() == Some(tab.key.as_str());
        let onclick = {
            let cb = props.on_select.clone();
            let key = tab.key.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                cb.emit(key.clone())
            })
        };
        let style = if active {
            "padding:6px 12px; border:none; border-bottom:2px solid #0969da; background:none; font-weight:600; cursor:pointer;"
        } else {
            "padding:6px 12px; border:none; border-bottom:2px solid transparent; background:none; color:#57606a; cursor:pointer;"
        };
        html! { <button {onclick} {style}>{ tab.label.clone() }</button> }
    });
    html! {<nav style="display:flex; align-items:center; gap:4px; padding:0 12px; border-bottom:1px solid #d0d7de; background:#f6f8fa; height:44px;">
        <span style="font-weight:700; margin-right:16px;">{"PS Checklist"}</span>
        { for tabs }
        { if props.loading { html!{ <span style="font-size:12px; color:#57606a; margin-left:8px;">{"Loading…"}</span> } } else { html!{} } }
        <button onclick={sync_cb} style="margin-left:auto; padding:4px 10px;">{"Sync"}</button>
    </nav>}
}
