//! macOS / AeroSpace-specific implementations.
//!
//! This module provides concrete backends for the
//! [`WindowManager`](crate::traits::WindowManager) and
//! [`AppLocator`](crate::traits::AppLocator) traits, powered by the
//! `aerospace` and `mdfind` command-line tools.
//!
//! Nothing outside this module should spawn those tools directly.

pub mod app_path;
pub mod process;
pub mod wm;
