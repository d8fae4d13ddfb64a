use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    html! { <div style="display:flex; align-items:center; gap:6px;"> <span style={format!("display:inline-block; width:10px; height:10px; background:{}; border:1px solid #d0d7de; border-radius:2px;", props.color)}></span> <span>{ props.label }</span> <span style="font-variant-numeric:tabular-nums; font-weight:600;">{ props.count }</span> </div> }
}
