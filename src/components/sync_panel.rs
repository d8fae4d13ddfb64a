use crate::config::RemoteConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SyncPanelProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub remote: RemoteConfig,
    pub on_remote_change: Callback<RemoteConfig>,
    pub has_token: bool,
    pub on_save_token: Callback<String>,
    pub on_load: Callback<()>,
    pub on_save: Callback<()>,
    #[prop_or(false)]
    pub busy: bool,
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

#[function_component]
pub fn SyncPanel(props: &SyncPanelProps) -> Html {
    let token_input = use_state(String::new);
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let token_oninput = {
        let token_input = token_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(v) = input_value(&e) {
                token_input.set(v);
            }
        })
    };
    let save_token_cb = {
        let cb = props.on_save_token.clone();
        let token_input = token_input.clone();
        Callback::from(move |_| {
            cb.emit((*token_input).clone());
            token_input.set(String::new());
        })
    };
    let load_cb = {
        let cb = props.on_load.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let save_cb = {
        let cb = props.on_save.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // One text field per remote setting; edits are pushed up immediately.
    let field = |label: &'static str, value: &str, set: fn(&mut RemoteConfig, String)| {
        let cb = props.on_remote_change.clone();
        let remote = props.remote.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            if let Some(v) = input_value(&e) {
                let mut next = remote.clone();
                set(&mut next, v);
                cb.emit(next);
            }
        });
        html! {
            <label style="display:flex; align-items:center; gap:8px;">
                <span style="width:64px; font-size:12px; color:#57606a;">{ label }</span>
                <input type="text" value={value.to_string()} {oninput} style="flex:1; padding:3px 6px;" />
            </label>
        }
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.35); z-index:50;">
        <div style="background:#ffffff; border:1px solid #d0d7de; border-radius:12px; padding:16px 20px; min-width:360px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Checklist Sync"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; gap:8px; align-items:center;">
                <input type="password" placeholder={ if props.has_token { "Token saved (enter to replace)" } else { "Access token" } } value={(*token_input).clone()} oninput={token_oninput} style="flex:1; padding:3px 6px;" />
                <button onclick={save_token_cb}>{"Save Token"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                { field("Owner", &props.remote.owner, |r, v| r.owner = v) }
                { field("Repo", &props.remote.repo, |r, v| r.repo = v) }
                { field("Path", &props.remote.path, |r, v| r.path = v) }
                { field("Branch", &props.remote.branch, |r, v| r.branch = v) }
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={load_cb} disabled={props.busy} style="flex:1;">{"Load Checklist"}</button>
                <button onclick={save_cb} disabled={props.busy} style="flex:1;">{"Save Checklist"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"The token is stored only in this browser and sent as-is to the contents API."}</div>
        </div>
    </div>}
}
