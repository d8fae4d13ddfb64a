use super::legend::LegendRow;
use crate::model::ProblemStatus;
use crate::state::ProblemTally;
use crate::util::{percent, plural};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsBarProps {
    pub visible: usize,
    pub total: usize,
    pub tally: ProblemTally,
}

#[function_component]
pub fn StatsBar(props: &StatsBarProps) -> Html {
    let tally = props.tally;
    let segments = ProblemStatus::ALL.iter().filter_map(|&status| {
        let count = tally.count(status);
        if count == 0 {
            return None;
        }
        let pct = percent(count, tally.total);
        let title = format!("{}: {}/{} ({:.1}%)", status.label(), count, tally.total, pct);
        Some(html! {
            <div title={title} style={format!("width:{}%; background:{}; color:#fff; font-size:11px; text-align:center; line-height:14px; overflow:hidden;", pct, status.color())}>
                { if pct > 15.0 { count.to_string() } else { String::new() } }
            </div>
        })
    });
    html! {
        <footer style="display:flex; align-items:center; gap:16px; padding:6px 14px; border-top:1px solid #d0d7de; background:#f6f8fa; font-size:13px;">
            <span style="min-width:130px;">{ format!("{} visible", plural(props.visible, "contest")) }</span>
            <div style="width:160px; height:8px; background:#d0d7de; border-radius:4px; overflow:hidden;">
                <div style={format!("width:{}%; height:100%; background:#57606a;", percent(props.visible, props.total))}></div>
            </div>
            <span style="font-variant-numeric:tabular-nums;">{ format!("{}/{}", props.visible, props.total) }</span>
            <div style="flex:1; display:flex; height:14px; background:#eaeef2; border-radius:4px; overflow:hidden;">
                { for segments }
            </div>
            <div style="display:flex; gap:10px;">
                <LegendRow color={ProblemStatus::Solved.color()} label="Solved" count={tally.solved} />
                <LegendRow color={ProblemStatus::Attempted.color()} label="Attempted" count={tally.attempted} />
                <LegendRow color={ProblemStatus::NotAttempted.color()} label="Open" count={tally.not_attempted()} />
            </div>
        </footer>
    }
}
