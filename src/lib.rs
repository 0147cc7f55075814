//! **aerolaunch** is a launcher backend for the AeroSpace tiling window
//! manager.
//!
//! Each invocation answers one launcher request: list and fuzzy-rank
//! windows, browse workspaces, change the focused window's layout, search
//! the keybindings declared in the AeroSpace config, or carry out the chosen
//! action.  List requests print a single JSON result document on stdout.
//!
//! # Architecture
//!
//! The crate is organised around three traits in [`traits`]:
//!
//! * [`traits::WindowManager`] abstracts window and workspace queries so
//!   ranking and rendering are not coupled to the `aerospace` CLI.
//! * [`traits::AppLocator`] resolves bundle identifiers to application
//!   paths (for icons).
//! * [`traits::ScriptRunner`] runs the AppleScript that synthesizes
//!   keyboard shortcuts and posts notifications.
//!
//! Concrete macOS implementations live in [`aerospace`] and
//! [`shortcut::script`].  [`launcher::Launcher`] ties them together behind
//! one method per entry point.

pub mod aerospace;
pub mod cache;
pub mod config;
pub mod fuzzy;
pub mod launcher;
pub mod output;
pub mod record;
pub mod settings;
pub mod shortcut;
pub mod snapshot;
pub mod traits;
