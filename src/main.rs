mod api;
mod components;
mod config;
mod error;
mod model;
mod remote;
mod state;
mod tree;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) fails harmlessly.
    let _ = console_log::init_with_level(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
