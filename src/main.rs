mod components;
mod model;
mod recognizer;
mod settings;
mod state;
mod tracker;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
