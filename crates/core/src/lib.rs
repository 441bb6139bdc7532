//! Core library: scanning, classification, folder taxonomy and moves.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod mover;
pub mod organizer;
pub mod scanner;
pub mod taxonomy;
