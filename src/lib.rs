//! lifecanvas — an interactive, unbounded Game of Life on a pannable canvas.
//!
//! The simulation core is engine-free and unit-tested: a sparse live-cell
//! set with the Conway step ([`grid`]), the pixel/grid coordinate transform
//! and pan offset ([`viewport`]), an explicit pointer-gesture state machine
//! ([`input`]), and a fixed-rate tick accumulator ([`scheduler`]). Bevy
//! supplies the window, rendering, and raw input on top of it.
//!
//! # Example
//! ```
//! use lifecanvas::{CellCoord, LifeGrid};
//! let mut grid = LifeGrid::new();
//! grid.set_alive(CellCoord::new(0, 0));
//! grid.step();
//! assert!(grid.is_empty()); // a lone cell dies
//! ```

pub mod config;
pub mod grid;
pub mod hud;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod viewport;

pub use config::{Cli, Config, ConfigError};
pub use grid::{CellCoord, LifeGrid, NEIGHBOR_OFFSETS};
pub use input::{EditAction, PointerEvent, PointerMode, PointerSession};
pub use scheduler::{SimStats, TickScheduler};
pub use viewport::Viewport;
