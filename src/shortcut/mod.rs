//! Keyboard shortcuts declared in the AeroSpace configuration.
//!
//! [`extract`] flattens the `mode.<name>.binding` tables, [`compile`] turns
//! a token such as `alt-shift-j` into modifier flags plus a key, and
//! [`script`] synthesizes the keystroke through System Events.

pub mod compile;
pub mod extract;
pub mod script;
