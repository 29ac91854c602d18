// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod log;
pub mod merge;
pub mod normalize;
pub mod progress;
pub mod query;
pub mod record;
pub mod schema;
pub mod sentiment;
pub mod store;

pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
