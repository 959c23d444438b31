use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_new_game: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let new_game_cb = {
        let cb = props.on_new_game.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:160px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={new_game_cb}>{"New Game"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Drag a tile onto a neighbour to swap"}</div>
    </div>}
}
