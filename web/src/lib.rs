mod app;
mod config;
mod data;
mod leaderboard;
mod share;
mod user;
mod widgets;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
