//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without threading or I/O.

pub mod battle_rng;
pub mod datetime;
pub mod message;
pub mod parameters;
pub mod seed_state;
pub mod sha1;
pub mod timing;
pub mod turn;
