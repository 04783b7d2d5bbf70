#![forbid(unsafe_code)]

//! Terminal host for `marquee-core`.
//!
//! - [`canvas::CellCanvas`]: a text surface measured in terminal cells.
//! - [`ticker::FrameTicker`]: a polled fixed-rate frame clock.
//! - [`config::DemoConfig`]: demo settings from the environment or JSON.
//! - [`app::MarqueeApp`]: key handling and drawing state for the demo.
//! - [`session::TerminalSession`]: raw mode and alternate screen guard.

pub mod app;
pub mod canvas;
pub mod config;
pub mod session;
pub mod ticker;

pub use app::{Action, MarqueeApp};
pub use canvas::CellCanvas;
pub use config::{ConfigError, DemoConfig};
pub use session::TerminalSession;
pub use ticker::FrameTicker;
