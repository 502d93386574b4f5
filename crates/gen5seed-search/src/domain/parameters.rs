//! Search parameters and their validation
//!
//! Everything here is checked before a search starts; a `SeedParameters`
//! value is always well-formed.

use crate::constants::{MAX_VCOUNT, NAZO_BLACK, NAZO_WHITE, TIMER0_FULL, TIMER0_WINDOW};
use crate::domain::datetime::{GameDate, GameDateTime, GameTime};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Invalid or missing search input
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("MAC Address is not fully set")]
    MacIncomplete,
    #[error("MAC Address is invalid: '{0}'")]
    MacInvalid(String),
    #[error("Version is not selected: '{0}' (expected black or white)")]
    UnknownVersion(String),
    #[error("Year {0} is outside the DS clock range (2000-2099)")]
    YearOutOfRange(u16),
    #[error("Date {year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: u16, month: u8, day: u8 },
    #[error("Time {hour:02}:{minute:02}:{second:02} is not a valid time of day")]
    InvalidTime { hour: u8, minute: u8, second: u8 },
    #[error("{field} is invalid: '{value}'")]
    InvalidValue { field: &'static str, value: String },
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("VCount {0} is out of range (0-262)")]
    VCountOutOfRange(u32),
}

/// Game version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameVersion {
    Black,
    White,
}

impl GameVersion {
    /// Nazo values for message words 0-4
    pub const fn nazo(self) -> [u32; 5] {
        match self {
            GameVersion::Black => NAZO_BLACK,
            GameVersion::White => NAZO_WHITE,
        }
    }
}

impl FromStr for GameVersion {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(GameVersion::Black),
            "white" | "w" => Ok(GameVersion::White),
            _ => Err(ParameterError::UnknownVersion(s.to_string())),
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameVersion::Black => write!(f, "Black"),
            GameVersion::White => write!(f, "White"),
        }
    }
}

/// 48-bit console MAC address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 6] {
        self.0
    }

    /// Lower 16 bits as used in message word 6
    pub fn lower(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    /// Upper 32 bits as used in message word 7
    pub fn upper(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl FromStr for MacAddress {
    type Err = ParameterError;

    /// Parse `00:11:22:33:44:55` (`-` also accepted as separator)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.contains('_') {
            return Err(ParameterError::MacIncomplete);
        }

        let parts: Vec<&str> = s.split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(ParameterError::MacIncomplete);
        }

        let mut bytes = [0u8; 6];
        for (byte, part) in bytes.iter_mut().zip(&parts) {
            if part.len() != 2 {
                return Err(ParameterError::MacInvalid(s.to_string()));
            }
            *byte = u8::from_str_radix(part, 16)
                .map_err(|_| ParameterError::MacInvalid(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Timer0 values visited for each VFrame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timer0Window {
    /// Narrow band around the value predicted from VFrame timing
    #[default]
    Predicted,
    /// Every 16-bit value
    Full,
}

impl Timer0Window {
    /// Number of Timer0 values in the window
    pub fn value_count(self) -> u32 {
        match self {
            Timer0Window::Predicted => TIMER0_WINDOW,
            Timer0Window::Full => TIMER0_FULL,
        }
    }
}

/// Parse `N` or `MIN-MAX` into an inclusive range
pub fn parse_range(field: &'static str, s: &str) -> Result<RangeInclusive<u32>, ParameterError> {
    let invalid = || ParameterError::InvalidValue {
        field,
        value: s.to_string(),
    };
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|_| invalid());

    let (min, max) = match s.split_once('-') {
        Some((min, max)) => (parse(min)?, parse(max)?),
        None => {
            let v = parse(s)?;
            (v, v)
        }
    };
    if min > max {
        return Err(ParameterError::InvertedRange { field, min, max });
    }
    Ok(min..=max)
}

/// Parse `YYYY-MM-DD` (`/` also accepted)
pub fn parse_date(s: &str) -> Result<GameDate, ParameterError> {
    let invalid = || ParameterError::InvalidValue {
        field: "Date",
        value: s.to_string(),
    };
    let parts: Vec<&str> = s.trim().split(['-', '/']).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(invalid());
    };
    GameDate::new(
        year.parse().map_err(|_| invalid())?,
        month.parse().map_err(|_| invalid())?,
        day.parse().map_err(|_| invalid())?,
    )
}

/// Parse `HH:MM:SS`
pub fn parse_time(s: &str) -> Result<GameTime, ParameterError> {
    let invalid = || ParameterError::InvalidValue {
        field: "Time",
        value: s.to_string(),
    };
    let parts: Vec<&str> = s.trim().split(':').collect();
    let [hour, minute, second] = parts.as_slice() else {
        return Err(invalid());
    };
    GameTime::new(
        hour.parse().map_err(|_| invalid())?,
        minute.parse().map_err(|_| invalid())?,
        second.parse().map_err(|_| invalid())?,
    )
}

/// Validated input of one search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedParameters {
    pub mac: MacAddress,
    pub version: GameVersion,
    pub vcount: RangeInclusive<u16>,
    pub vframe: RangeInclusive<u32>,
    pub datetime: GameDateTime,
    pub timer0_window: Timer0Window,
}

impl SeedParameters {
    /// Create parameters with the predicted Timer0 window
    pub fn new(
        mac: MacAddress,
        version: GameVersion,
        vcount: RangeInclusive<u32>,
        vframe: RangeInclusive<u32>,
        datetime: GameDateTime,
    ) -> Result<Self, ParameterError> {
        if vcount.start() > vcount.end() {
            return Err(ParameterError::InvertedRange {
                field: "VCount",
                min: *vcount.start(),
                max: *vcount.end(),
            });
        }
        if *vcount.end() > MAX_VCOUNT as u32 {
            return Err(ParameterError::VCountOutOfRange(*vcount.end()));
        }
        if vframe.start() > vframe.end() {
            return Err(ParameterError::InvertedRange {
                field: "VFrame",
                min: *vframe.start(),
                max: *vframe.end(),
            });
        }

        Ok(Self {
            mac,
            version,
            vcount: *vcount.start() as u16..=*vcount.end() as u16,
            vframe,
            datetime,
            timer0_window: Timer0Window::Predicted,
        })
    }

    /// Use a different Timer0 window
    pub fn with_timer0_window(mut self, window: Timer0Window) -> Self {
        self.timer0_window = window;
        self
    }

    /// Every VCount value
    pub fn full_vcount() -> RangeInclusive<u32> {
        0..=MAX_VCOUNT as u32
    }
}
