//! Aggregates CSV price lists into one catalog and finds the cheapest offers per kilogram.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod session;
pub mod utils;
