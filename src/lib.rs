// Library surface for UI layers and integration tests. All scoring
// logic lives here; presentation code only calls in.
pub mod app_dirs;
pub mod cards;
pub mod config;
pub mod history;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod trend;
pub mod util;
