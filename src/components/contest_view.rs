use crate::model::{ContestRef, DIFFICULTY_LEVELS, DifficultyStep, NodeId, Problem, ProblemKey};
use crate::state::{CatalogAction, CatalogState, Section, visible_sections};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ContestViewProps {
    pub catalog: UseReducerHandle<CatalogState>,
}

struct CellActions {
    cycle_status: Callback<ProblemKey>,
    step_difficulty: Callback<(ProblemKey, DifficultyStep)>,
    hide_section: Callback<NodeId>,
}

#[function_component(ContestView)]
pub fn contest_view(props: &ContestViewProps) -> Html {
    let state = &*props.catalog;
    let Some(root) = &state.tree else {
        return html! {};
    };
    if state.store.visible_count() == 0 {
        return html! { <div style="padding:40px; text-align:center; color:#57606a;">{"No contests selected. Click on contests in the tree to view them."}</div> };
    }

    let actions = CellActions {
        cycle_status: {
            let catalog = props.catalog.clone();
            Callback::from(move |key: ProblemKey| catalog.dispatch(CatalogAction::CycleStatus(key)))
        },
        step_difficulty: {
            let catalog = props.catalog.clone();
            Callback::from(move |(key, step): (ProblemKey, DifficultyStep)| {
                catalog.dispatch(CatalogAction::StepDifficulty { key, step })
            })
        },
        hide_section: {
            let catalog = props.catalog.clone();
            Callback::from(move |node_id: NodeId| {
                catalog.dispatch(CatalogAction::SetSubtreeVisibility { node_id, visible: false })
            })
        },
    };

    let sections = visible_sections(root, &state.store);
    html! {
        <div style="padding:12px; display:flex; flex-direction:column; gap:14px;">
            { for sections.iter().map(|s| render_section(s, &actions)) }
        </div>
    }
}

fn render_section(section: &Section, actions: &CellActions) -> Html {
    let close = {
        let cb = actions.hide_section.clone();
        let id = section.node_id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    html! {
        <section style="border:1px solid #d0d7de; border-radius:8px; overflow:hidden;">
            <div style="display:flex; align-items:center; padding:6px 10px; background:#f6f8fa; border-bottom:1px solid #d0d7de;">
                <div style="font-weight:600; flex:1;">{ section.title.clone() }</div>
                <button onclick={close} title="Hide this directory" style="border:none; background:none; font-size:16px; cursor:pointer;">{"×"}</button>
            </div>
            <div style="overflow-x:auto;">
                <table style="border-collapse:collapse; width:100%; font-size:13px;">
                    <thead>
                        <tr>
                            <th style="text-align:left; padding:4px 8px; width:80px;">{"Year"}</th>
                            <th colspan={section.columns.max(1).to_string()} style="text-align:left; padding:4px 8px;">{"Problems"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for section.rows.iter().map(|c| render_row(c, section.columns, actions)) }
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn render_row(contest: &ContestRef, columns: usize, actions: &CellActions) -> Html {
    let Some(data) = &contest.data else {
        return html! {
            <tr>
                <td style="padding:4px 8px;">{ contest.id.clone() }</td>
                <td colspan={columns.max(1).to_string()} style="padding:4px 8px; color:#6e7681; font-style:italic;">{"contest data not loaded"}</td>
            </tr>
        };
    };
    let data = data.borrow();
    let year = match data.link.as_ref().and_then(|l| l.boj.clone()) {
        Some(href) => html! { <a {href} target="_blank" rel="noopener">{ data.label() }</a> },
        None => html! { <>{ data.label() }</> },
    };
    let cells = data
        .problems
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let key = ProblemKey {
                contest_id: contest.id.clone(),
                problem_index: i,
            };
            render_problem(key, p, actions)
        })
        .collect::<Html>();
    let padding = (data.problems.len()..columns).map(|_| html! { <td></td> }).collect::<Html>();
    html! {
        <tr style="border-top:1px solid #eaeef2;">
            <td title={data.name.clone()} style="padding:4px 8px; white-space:nowrap;">{ year }</td>
            { cells }
            { padding }
        </tr>
    }
}

fn difficulty_stars(d: u8) -> String {
    let max = (DIFFICULTY_LEVELS - 1) as usize;
    let d = (d as usize).min(max);
    format!("{}{}", "★".repeat(d), "☆".repeat(max - d))
}

fn render_problem(key: ProblemKey, problem: &Problem, actions: &CellActions) -> Html {
    let cycle = {
        let cb = actions.cycle_status.clone();
        let key = key.clone();
        Callback::from(move |_: MouseEvent| cb.emit(key.clone()))
    };
    let step = |step: DifficultyStep| {
        let cb = actions.step_difficulty.clone();
        let key = key.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit((key.clone(), step))
        })
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let label = format!("{}. {}", problem.id, problem.title);
    let title = match problem.primary_link() {
        Some(href) => html! { <a href={href.to_string()} target="_blank" rel="noopener" onclick={stop}>{ label }</a> },
        None => html! { <>{ label }</> },
    };
    html! {
        <td onclick={cycle} title={problem.status.label()} style={format!("padding:4px 8px; min-width:120px; cursor:pointer; border-left:4px solid {}; vertical-align:top;", problem.status.color())}>
            <div style="white-space:nowrap; overflow:hidden; text-overflow:ellipsis;">{ title }</div>
            <div style="display:flex; align-items:center; gap:4px; font-size:11px; color:#9a6700;">
                <button onclick={step(DifficultyStep::Down)} title="Lower difficulty" style="padding:0 4px; font-size:11px;">{"−"}</button>
                <span>{ difficulty_stars(problem.difficulty) }</span>
                <button onclick={step(DifficultyStep::Up)} title="Raise difficulty" style="padding:0 4px; font-size:11px;">{"+"}</button>
            </div>
        </td>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_stars() {
        assert_eq!(difficulty_stars(0), "☆☆☆☆☆");
        assert_eq!(difficulty_stars(2), "★★☆☆☆");
        assert_eq!(difficulty_stars(99), "★★★★★");
    }
}
