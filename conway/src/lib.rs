// lib.rs - Conway's Game of Life for fixed-size pixel panels
//
// A toroidal Life engine that reseeds itself when the grid dies out or stops
// changing, a white-on-black renderer, and a frame-paced loop that pushes to
// any `DisplaySink` until interrupted.

pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;   // Grid type
pub mod pacing;
pub mod patterns;
pub mod render;
pub mod sink;

pub use cancel::CancellationToken;
pub use config::{FrameBudget, LifeSettings, SeedDensity};
pub use engine::{SimulationEngine, seed, step};
pub use error::{ConfigError, DisplayError, RunError};
pub use grid::Grid;
pub use pacing::{PacingScheduler, RunSummary};
pub use render::{Bitmap, Rgb, render};
pub use sink::DisplaySink;
