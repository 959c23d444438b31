mod cascade;
mod components;
mod config;
mod error;
mod matcher;
mod model;
mod session;
mod state;
mod swap;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
