//! Shared models used across the capture features

pub mod models;
