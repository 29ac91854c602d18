// src/gui/mod.rs
pub mod app;
pub mod components;

pub use app::{App, run};
