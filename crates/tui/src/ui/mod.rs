//! UI rendering module for the terminal host.
//!
//! This module provides the components, the main view that lays them out and
//! routes input, the theme, and the runtime loop.

pub mod components;
pub mod main_view;
pub mod runtime;
pub mod theme;
pub mod utils;
