//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the form focus, cursor and popup state around the recorder.

pub mod state;

pub use state::*;
