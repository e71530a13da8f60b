//! Core engine functionality

pub mod analytics;
pub mod models;
