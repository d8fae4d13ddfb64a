use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    fn colors(self) -> (&'static str, &'static str) {
        match self {
            StatusLevel::Success => ("#dafbe1", "#2ea043"),
            StatusLevel::Warning => ("#fff8c5", "#d29922"),
            StatusLevel::Error => ("#ffebe9", "#cf222e"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    /// Increases with every message so an old timeout cannot clear a newer one.
    pub id: u64,
    pub level: StatusLevel,
    pub text: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct StatusToastProps {
    pub message: Option<StatusMessage>,
    pub on_dismiss: Callback<()>,
}

#[function_component]
pub fn StatusToast(props: &StatusToastProps) -> Html {
    let Some(msg) = &props.message else {
        return html! {};
    };
    let (bg, border) = msg.level.colors();
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style={format!("position:fixed; bottom:56px; right:16px; background:{}; border:1px solid {}; border-radius:8px; padding:8px 12px; max-width:420px; display:flex; gap:10px; align-items:flex-start; font-size:13px; box-shadow:0 4px 12px rgba(0,0,0,0.15); z-index:60;", bg, border)}>
            <span style="flex:1; line-height:1.35;">{ msg.text.clone() }</span>
            <button onclick={dismiss} style="border:none; background:none; cursor:pointer; font-size:14px; padding:0;">{"×"}</button>
        </div>
    }
}
