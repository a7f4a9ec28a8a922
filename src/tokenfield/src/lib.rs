//! # Tokenfield
//!
//! Core of a token-based multi-value input: the user builds an ordered list
//! of values (tokens) by typing into a text entry, picking from a filtered
//! dropdown, or committing free text as a custom value.
//!
//! ## Quick Start
//!
//! ```rust
//! use tokenfield::prelude::*;
//!
//! let config = TokenFieldConfig::new(["Red", "Green", "Blue"]).with_custom_options(true);
//! let mut field = InteractionController::new(config)
//!     .with_on_change(|selected| println!("now {selected:?}"));
//!
//! field.dispatch(Intent::Focus(FocusTarget::TextEntry));
//! field.dispatch(Intent::ArrowDown);
//! field.dispatch(Intent::Enter);
//! assert_eq!(field.selected(), ["Red"]);
//!
//! field.dispatch(Intent::Type("Purple".into()));
//! field.dispatch(Intent::Enter);
//! assert_eq!(field.selected(), ["Red", "Purple"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TokenFieldComponent (crossterm keys, mouse, paste)          │
//! │     │ Intent                        ▲ Reaction               │
//! │  ┌──▼────────────────────────────────┴─────────────────────┐  │
//! │  │              InteractionController                      │  │
//! │  │  TokenSequence | CandidateList | DropdownNavigator      │  │
//! │  │  DeferredQueue (blur close)                             │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! │  TokenField widget ── FieldLayout ── ScrollState (ratatui)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state modules ([`sequence`], [`filter`], [`navigator`], [`controller`])
//! know nothing about terminals. Text measuring, row scrolling and focus
//! containment reach them through the traits in [`collaborator`].

pub mod collaborator;
pub mod component;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod filter;
pub mod keymap;
pub mod navigator;
pub mod render;
pub mod sequence;

pub use collaborator::{ControlFocus, FocusProbe, FocusTarget, RowScroller, TextMeasure};
pub use config::{ConfigError, ConfigResult, TokenFieldConfig};
pub use controller::{InteractionController, Intent, Reaction, Snapshot};

/// Commonly used types and traits for quick imports.
///
/// ```rust
/// use tokenfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collaborator::{ControlFocus, FocusProbe, FocusTarget, RowScroller, TextMeasure};
    pub use crate::component::{Component, ComponentResult, FocusState, TokenFieldComponent};
    pub use crate::config::{ConfigError, ConfigResult, TokenFieldConfig};
    pub use crate::controller::{ChangeHandler, InteractionController, Intent, Reaction, Snapshot};
    pub use crate::deferred::{DeferredCheck, DeferredQueue};
    pub use crate::filter::{CandidateList, Row, admits_custom_entry, filter_options};
    pub use crate::navigator::DropdownNavigator;
    pub use crate::render::{ColorScheme, FieldLayout, Hit, ScrollState, TokenField, UnicodeMeasure};
    pub use crate::sequence::TokenSequence;
}

/// Tokenfield version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
