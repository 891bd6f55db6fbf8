//! Page controllers
//!
//! Each module extends [`crate::Page`] with one area of page behaviour.

pub mod alerts;
pub mod confirm;
pub mod counters;
pub mod expense_form;
pub mod loader;
pub mod members;
pub mod modal;
pub mod nav;
pub mod notifications;
pub mod tabs;
pub mod validation;
