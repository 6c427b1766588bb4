//! atlas library
//!
//! Search providers, result normalization and the terminal result browser.

pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod opener;
pub mod search;
pub mod tui;
