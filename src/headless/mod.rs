//! Headless mode for automated testing
//!
//! Runs a duel without any graphical output. A seeded bot plays the player
//! side through the same input surface the windowed app uses.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless duel
//! cargo run --release -- --headless duel.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "game_config": "assets/config/duel.ron",
//!   "random_seed": 42,
//!   "max_duration_secs": 120,
//!   "output_path": "duel_logs/seed42.json"
//! }
//! ```

pub mod bot;
pub mod config;
pub mod runner;

pub use config::HeadlessDuelConfig;
pub use runner::{run_headless_duel, DuelResult};
