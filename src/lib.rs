//! FITLOG - Terminal Workout Recorder Library
//!
//! A terminal form for logging workouts during a session, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
