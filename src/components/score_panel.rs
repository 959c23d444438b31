use crate::session::ScoreBoard;
use crate::util::format_delta;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ScorePanelProps {
    pub score: ScoreBoard,
    pub busy: bool,
}

#[function_component]
pub fn ScorePanel(props: &ScorePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let s = props.score;
    html! {
        <div style="display:flex; flex-direction:column; gap:6px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:200px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37; font-size:18px;", value_style)}>{ s.total }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Last"}</span>
                <span style={format!("{} color:#2ea043;", value_style)}>{ format_delta(s.last_delta) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Chain"}</span>
                <span style={value_style}>{ format!("{} (best {})", s.chain, s.best_chain) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Moves"}</span>
                <span style={value_style}>{ s.moves }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Cleared"}</span>
                <span style={value_style}>{ s.tiles_cleared }</span>
            </div>
            { if props.busy { html!{ <div style="font-size:11px; opacity:0.7;">{"Cascading…"}</div> } } else { html!{} } }
        </div>
    }
}
