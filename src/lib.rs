//! # landing-fx
//!
//! Interactive behaviour for a marketing landing page.
//!
//! This crate provides platform-agnostic state and logic for:
//! - Parsing statistic strings like `"₹500K+"` and counting them up with easing
//! - One-shot visibility tracking for scroll reveal animations
//! - The navbar scrolled state, smooth anchor scrolling and parallax offsets
//! - The mobile menu open/close state
//! - A hidden key sequence effect
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for configuration
//! - `toml` - Load [`PageConfig`] from a TOML document
//! - `web` - Wire everything to the browser DOM (WASM)
//!
//! ## Example
//!
//! ```rust
//! use landing_fx::{parse_counter_text, CounterAnimation, CounterGlyphs, FrameTiming};
//! use landing_fx::{ObserveOptions, Visibility, VisibilityObserver};
//!
//! let mut observer = VisibilityObserver::new(ObserveOptions::counter());
//! let stat = observer.observe();
//!
//! if observer.report(stat, Visibility::new(true, 0.75)) {
//!     let target = parse_counter_text("24K", &CounterGlyphs::default()).unwrap();
//!     let frames: Vec<String> = CounterAnimation::new(target, FrameTiming::default()).collect();
//!     assert_eq!(frames.last().unwrap(), "24K");
//! }
//! ```

mod animation;
pub mod config;
mod menu;
mod observer;
mod parser;
pub mod scroll;
mod sequence;

#[cfg(feature = "web")]
pub mod web;

pub use animation::{ease_out_quad, CounterAnimation, CounterState, FrameTiming};
pub use config::{ConfigError, PageConfig};
pub use menu::{MenuState, MenuToggle};
pub use observer::{ObserveOptions, Visibility, VisibilityObserver, WatchId, WatchState};
pub use parser::{parse_counter_text, CounterGlyphs, CounterText, ParseError};
pub use scroll::{NavbarScroll, Parallax};
pub use sequence::{SequenceDetector, KONAMI_CODE};

#[cfg(feature = "web")]
pub use web::{install, start};
