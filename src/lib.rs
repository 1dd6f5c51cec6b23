//! Nutricore Library
//!
//! Core functionality for nutrition tracking: per-food serving catalogs
//! and conversion from user-entered quantities to scaled nutrition values.

pub mod catalog;
pub mod error;
pub mod models;
pub mod quantity;
