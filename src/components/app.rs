use super::{board_view::BoardView, controls_panel::ControlsPanel, score_panel::ScorePanel};
use crate::config::GameConfig;
use crate::session::{GameAction, GameSession};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = js_sys::Date::now() as u64;
    (hi << 32) ^ lo
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(|| GameSession::new(GameConfig::load(), random_seed()));
    let cascade_timer = use_mut_ref(|| None::<Timeout>);

    // Pace the cascade: one step per tick while the board is busy. Replacing
    // the timer also cancels a tick left over from an abandoned game.
    {
        let session = session.clone();
        let cascade_timer = cascade_timer.clone();
        let deps = (session.game_id, session.version);
        use_effect_with(deps, move |_| {
            let next = session.is_busy().then(|| {
                let handle = session.clone();
                Timeout::new(session.config.cascade_delay_ms, move || {
                    handle.dispatch(GameAction::CascadeTick);
                })
            });
            *cascade_timer.borrow_mut() = next;
            || ()
        });
    }

    let new_game = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(GameAction::NewGame))
    };

    html! {
        <div id="root" style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <div id="top-bar" style="display:flex; justify-content:space-between; align-items:flex-start; gap:12px; padding:12px;">
                <ScorePanel score={session.score} busy={session.is_busy()} />
                <h2 style="margin:0; color:#58a6ff;">{"Match Three"}</h2>
                <ControlsPanel on_new_game={new_game} />
            </div>
            <BoardView session={session.clone()} />
        </div>
    }
}
