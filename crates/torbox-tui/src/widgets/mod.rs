//! Reusable widgets shared across screens.

pub mod form;
pub mod panel;
