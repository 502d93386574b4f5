//! DS real-time clock values
//!
//! Dates are limited to the range the DS clock can hold (2000-2099).
//! Adding seconds wraps from 2099 back to 2000 like the hardware does.

use crate::constants::{BASE_YEAR, HOUR_PM_FLAG, LAST_YEAR};
use crate::domain::parameters::ParameterError;
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Days in the 2000-2099 cycle (25 leap years)
const DAYS_PER_CYCLE: i64 = 36_525;

/// Encode a value 0-99 as binary-coded decimal
#[inline]
pub fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn days_in_year(year: u16) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Julian day number of a civil date
fn julian_day(year: i64, month: i64, day: i64) -> i64 {
    let a = if month < 3 { 1 } else { 0 };
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 - 32045 + 365 * y + y / 4 - y / 100 + y / 400
}

/// Calendar date
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameDate {
    year: u16,
    month: u8,
    day: u8,
}

impl GameDate {
    /// Create a validated date
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParameterError> {
        if !(BASE_YEAR..=LAST_YEAR).contains(&year) {
            return Err(ParameterError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(ParameterError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Day of the week (0 = Sunday)
    pub fn weekday(&self) -> u8 {
        let jd = julian_day(self.year as i64, self.month as i64, self.day as i64);
        ((jd + 1) % 7) as u8
    }

    /// Days elapsed since 2000-01-01
    fn days_since_base(&self) -> i64 {
        julian_day(self.year as i64, self.month as i64, self.day as i64)
            - julian_day(BASE_YEAR as i64, 1, 1)
    }

    /// Inverse of `days_since_base` (0 <= days < DAYS_PER_CYCLE)
    fn from_days_since_base(mut days: i64) -> Self {
        let mut year = BASE_YEAR;
        while days >= days_in_year(year) {
            days -= days_in_year(year);
            year += 1;
        }
        let mut month = 1;
        while days >= days_in_month(year, month) as i64 {
            days -= days_in_month(year, month) as i64;
            month += 1;
        }
        Self {
            year,
            month,
            day: days as u8 + 1,
        }
    }

    /// Message word 8: weekday, day, month and year in BCD
    pub fn to_message_word(&self) -> u32 {
        let year = to_bcd((self.year - BASE_YEAR) as u8) as u32;
        let month = to_bcd(self.month) as u32;
        let day = to_bcd(self.day) as u32;
        ((self.weekday() as u32) << 24) | (day << 16) | (month << 8) | year
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

/// Time of day (24-hour)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl GameTime {
    /// Create a validated time
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ParameterError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ParameterError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    fn seconds_of_day(&self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    fn from_seconds_of_day(seconds: i64) -> Self {
        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    /// Message word 9: second, minute and hour in BCD, hour with PM flag
    pub fn to_message_word(&self) -> u32 {
        let mut hour = to_bcd(self.hour);
        if self.hour >= 12 {
            hour |= HOUR_PM_FLAG;
        }
        let minute = to_bcd(self.minute) as u32;
        let second = to_bcd(self.second) as u32;
        (second << 16) | (minute << 8) | hour as u32
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Date and time used in one seed message
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameDateTime {
    pub date: GameDate,
    pub time: GameTime,
}

impl GameDateTime {
    pub fn new(date: GameDate, time: GameTime) -> Self {
        Self { date, time }
    }

    /// Shift by a (possibly negative) number of seconds
    pub fn add_seconds(&self, seconds: i64) -> Self {
        let cycle = DAYS_PER_CYCLE * SECONDS_PER_DAY;
        let total = (self.date.days_since_base() * SECONDS_PER_DAY
            + self.time.seconds_of_day()
            + seconds)
            .rem_euclid(cycle);

        Self {
            date: GameDate::from_days_since_base(total / SECONDS_PER_DAY),
            time: GameTime::from_seconds_of_day(total % SECONDS_PER_DAY),
        }
    }
}

impl fmt::Display for GameDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}
