//! Command-line front end for the futurebank projection engine
//!
//! Loads scenarios from YAML, runs them through `futurebank_core` and renders
//! the outcome as a yearly text report or JSON.

pub mod logging;
pub mod report;
pub mod scenario_file;
pub mod util;

pub use logging::init_logging;
pub use report::{render_json, render_report};
pub use scenario_file::{ScenarioFileError, load_scenario, save_scenario};
