//! Interactive terminal front end for the grocery tracker.
//!
//! The binary wires settings, logging and the file-backed stores together and
//! hands stdin/stdout to [`app::App::run`]. Everything here is generic over the
//! reader/writer so sessions can be scripted in tests.

pub mod app;
pub mod commands;
pub mod prompt;
pub mod views;

pub use app::{App, MenuChoice};
