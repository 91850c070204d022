//! Retained widget model for the UV lamp screens
//!
//! This crate provides:
//! - `WidgetTree`, an implementation of the core's `UiBackend` that keeps
//!   the last value of every widget
//! - Dirty tracking, so a renderer only redraws what changed since the
//!   last frame
//! - Pending screen changes with their transition timing
//!
//! # Architecture
//!
//! The control core pushes labels, arc values and visibility into the tree
//! as state changes. Once per frame the firmware drains the dirty set and
//! the pending screen change and hands them to whatever draws the panel.

#![cfg_attr(not(test), no_std)]

pub mod tree;

pub use tree::{ScreenChange, WidgetState, WidgetTree, LABEL_LEN};
