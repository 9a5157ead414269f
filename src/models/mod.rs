//! Serde models of the records exchanged with the pitch-deck backend, plus the
//! editor-side form state.

pub mod brand_kit;
pub mod common;
pub mod content;
pub mod elements;
pub mod form;
pub mod generation;
pub mod slide;
pub mod template;
