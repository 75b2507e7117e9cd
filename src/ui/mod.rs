//! UI module - contains UI rendering components
//!
//! Standalone widgets and the roast markup renderer used by the app views.

pub mod components;
pub mod markup;
