//! gen5seed-search - Initial seed search for Gen 5 Pokemon (Black / White)
//!
//! This crate provides functionality to:
//! - Build the DS seed message and hash it with a single-block SHA-1
//! - Enumerate every Timer0 / VCount / TickCount / RTC combination of a search window
//! - Narrow the candidates with observed battle turns using the reversible battle RNG

pub mod app;
pub mod constants;
pub mod domain;

// Re-export commonly used types
pub use app::config::SearchConfig;
pub use app::report::{DecodedSeed, Report, SearchError};
pub use app::seed_set::SeedSet;
pub use constants::*;
pub use domain::datetime::{GameDate, GameDateTime, GameTime};
pub use domain::parameters::{
    GameVersion, MacAddress, ParameterError, SeedParameters, Timer0Window, parse_date,
    parse_range, parse_time,
};
pub use domain::seed_state::SeedState;
pub use domain::turn::{BattleTurnOutcome, EnemyAction, PlayerAction, StatusProgress, TurnError};
