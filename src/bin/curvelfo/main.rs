//! curvelfo - terminal host for the spline LFO
//!
//! Plays a test tone through the LFO and shows the graph, parameters and
//! output. Run with: cargo run

mod app;
mod ui;

use app::CurveLfo;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    CurveLfo::new().bpm(120.0).tone(220.0).run()
}
