//! Application layer - Use case implementations
//!
//! This module drives the domain layer across worker threads to implement
//! enumeration and narrowing.

pub mod config;
pub mod enumerator;
pub mod report;
pub mod seed_set;
pub mod workers;
