//! Yew hooks.

pub mod use_stack;

pub use use_stack::*;
