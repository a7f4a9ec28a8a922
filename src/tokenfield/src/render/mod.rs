//! Terminal rendering for the token field.
//!
//! The core state lives in [`InteractionController`](crate::InteractionController);
//! this module only draws it and maps screen positions back to tokens and rows.

pub mod measure;
pub mod scroll;
pub mod theme;
pub mod widget;

pub use measure::UnicodeMeasure;
pub use scroll::{ScrollState, render_scrollbar};
pub use theme::ColorScheme;
pub use widget::{ChipSlot, FieldLayout, Hit, TokenField};
