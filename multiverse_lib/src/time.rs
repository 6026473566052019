use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub const TICKS_PER_DAY: u64 = 24_000;

/// Time of day on the host's tick clock. Tick 0 is 06:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorldTime(u32);

impl WorldTime {
    pub const MORNING: WorldTime = WorldTime(0);
    pub const DAY: WorldTime = WorldTime(1_000);
    pub const NOON: WorldTime = WorldTime(6_000);
    pub const SUNSET: WorldTime = WorldTime(12_000);
    pub const NIGHT: WorldTime = WorldTime(13_000);
    pub const MIDNIGHT: WorldTime = WorldTime(18_000);

    pub fn from_ticks(ticks: u64) -> Self {
        WorldTime((ticks % TICKS_PER_DAY) as u32)
    }

    pub fn ticks(&self) -> u64 {
        self.0 as u64
    }

    /// Wall-clock hours and minutes for this tick.
    pub fn hours_minutes(&self) -> (u32, u32) {
        let hours = (self.0 / 1_000 + 6) % 24;
        let minutes = (self.0 % 1_000) * 60 / 1_000;
        (hours, minutes)
    }

    fn from_clock(hours: u32, minutes: u32) -> Self {
        // Rounded up so that formatting the result yields the same minute again.
        let minute_ticks = (minutes * 1_000).div_ceil(60);
        WorldTime(((hours + 18) % 24) * 1_000 + minute_ticks)
    }
}

impl fmt::Display for WorldTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes) = self.hours_minutes();
        write!(f, "{:02}:{:02}", hours, minutes)
    }
}

impl FromStr for WorldTime {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidTime(value.to_string());
        let trimmed = value.trim().to_ascii_lowercase();

        let named = match trimmed.as_str() {
            "morning" | "sunrise" => Some(Self::MORNING),
            "day" => Some(Self::DAY),
            "noon" => Some(Self::NOON),
            "sunset" => Some(Self::SUNSET),
            "night" => Some(Self::NIGHT),
            "midnight" => Some(Self::MIDNIGHT),
            _ => None,
        };
        if let Some(time) = named {
            return Ok(time);
        }

        if let Some((hours, minutes)) = trimmed.split_once(':') {
            let hours: u32 = hours.parse().map_err(|_| invalid())?;
            let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
            if hours >= 24 || minutes >= 60 {
                return Err(invalid());
            }
            return Ok(Self::from_clock(hours, minutes));
        }

        let ticks = trimmed.strip_suffix('t').unwrap_or(&trimmed);
        ticks.parse::<u64>().map(Self::from_ticks).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_times() {
        assert_eq!("Noon".parse::<WorldTime>().unwrap(), WorldTime::NOON);
        assert_eq!(WorldTime::NOON.to_string(), "12:00");
        assert_eq!(WorldTime::MIDNIGHT.to_string(), "00:00");
        assert_eq!(WorldTime::MORNING.to_string(), "06:00");
    }

    #[test]
    fn clock_format_survives_formatting() {
        for text in ["06:30", "18:07", "23:59", "00:01", "13:45"] {
            let time: WorldTime = text.parse().unwrap();
            assert_eq!(time.to_string(), text);
        }
    }

    #[test]
    fn ticks_wrap_around_the_day() {
        assert_eq!("30000t".parse::<WorldTime>().unwrap().ticks(), 6_000);
        assert_eq!("1000".parse::<WorldTime>().unwrap(), WorldTime::DAY);
    }

    #[test]
    fn rejects_out_of_range_clock() {
        assert!("24:00".parse::<WorldTime>().is_err());
        assert!("12:60".parse::<WorldTime>().is_err());
        assert!("teatime".parse::<WorldTime>().is_err());
    }
}
