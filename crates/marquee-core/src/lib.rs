#![forbid(unsafe_code)]

//! Scroll-cycle engine for horizontally scrolling text marquees.
//!
//! # Role
//! `marquee-core` owns everything about a marquee except pixels: which text
//! comes next, where each glyph run sits on the strip, when runs leave and
//! get recycled, and whether ticks should be flowing at all. Drawing and
//! frame timing belong to the host, reached through the [`host`] traits.
//!
//! # Primary pieces
//! - **[`RecyclePool`]**: idle display elements, handed out last-in-first-out.
//! - **[`VisibleQueue`]**: visible elements, leftmost first.
//! - **[`IndexCycler`]**: the next text index, wrapping over the list.
//! - **[`ScrollEngine`]**: per-tick offset update, eviction and admission.
//! - **[`Marquee`]**: the widget; run/pause/stop state machine plus the
//!   attach/detach gate on tick delivery.
//!
//! # Driving a marquee
//!
//! ```
//! use std::time::Duration;
//! use marquee_core::geometry::Size;
//! use marquee_core::testing::{ManualClock, RecordingSurface};
//! use marquee_core::{Marquee, RunState};
//!
//! let mut marquee = Marquee::new(RecordingSurface::new(), ManualClock::new());
//! marquee.set_viewport(Size::new(200.0, 20.0));
//! marquee.set_text_list(["breaking", "news"]);
//! marquee.attach_to_display();
//! marquee.run();
//! assert_eq!(marquee.state(), RunState::Running);
//!
//! marquee.on_tick(Duration::from_millis(16));
//! assert!(marquee.engine().offset() > 0.0);
//! ```

pub mod config;
pub mod cycler;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod lifecycle;
pub mod marquee;
pub mod pool;
pub mod queue;
pub mod style;
pub mod testing;

pub use config::MarqueeConfig;
pub use cycler::IndexCycler;
pub use element::DisplayElement;
pub use engine::{MAX_VISIBLE, ScrollEngine, TickReport};
pub use error::{MarqueeError, Property};
pub use host::{FrameClock, TextSurface, TickId};
pub use lifecycle::{LifecycleController, RunState};
pub use marquee::Marquee;
pub use pool::RecyclePool;
pub use queue::VisibleQueue;
pub use style::{Color, Font, TextStyle};
