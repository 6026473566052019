use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A block-independent position plus the direction an entity faces there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FacingCoordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl FacingCoordinates {
    /// Stands in for "no location set"; stored instead of an absent value. Its coordinates
    /// are NaN so no real position, the origin included, is mistaken for it.
    pub const NULL: FacingCoordinates = FacingCoordinates {
        x: f64::NAN,
        y: f64::NAN,
        z: f64::NAN,
        yaw: 0.0,
        pitch: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self { x, y, z, yaw, pitch }
    }

    pub fn is_null(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl Default for FacingCoordinates {
    fn default() -> Self {
        Self::NULL
    }
}

/// Null locations are all equal to each other.
impl PartialEq for FacingCoordinates {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_null(), other.is_null()) {
            (true, true) => true,
            (false, false) => {
                self.x == other.x
                    && self.y == other.y
                    && self.z == other.z
                    && self.yaw == other.yaw
                    && self.pitch == other.pitch
            }
            _ => false,
        }
    }
}

/// The null location is written as an empty string.
impl fmt::Display for FacingCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return Ok(());
        }
        write!(f, "{},{},{},{},{}", self.x, self.y, self.z, self.yaw, self.pitch)
    }
}

impl FromStr for FacingCoordinates {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Ok(Self::NULL);
        }

        let invalid = || ParseError::InvalidLocation(value.to_string());
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 5 {
            return Err(invalid());
        }

        let coord = |i: usize| parts[i].parse::<f64>().map_err(|_| invalid());
        let angle = |i: usize| match parts.get(i) {
            Some(part) => part.parse::<f32>().map_err(|_| invalid()),
            None => Ok(0.0),
        };

        Ok(FacingCoordinates::new(coord(0)?, coord(1)?, coord(2)?, angle(3)?, angle(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_facing() {
        let short: FacingCoordinates = "1, 64, -3.5".parse().unwrap();
        assert_eq!(short, FacingCoordinates::new(1.0, 64.0, -3.5, 0.0, 0.0));

        let full: FacingCoordinates = "1,64,-3.5,90,-10".parse().unwrap();
        assert_eq!(full.yaw, 90.0);
        assert_eq!(full.pitch, -10.0);
        assert_eq!(full.to_string().parse::<FacingCoordinates>().unwrap(), full);
    }

    #[test]
    fn rejects_wrong_arity_and_garbage() {
        assert!("1,2".parse::<FacingCoordinates>().is_err());
        assert!("1,2,3,4".parse::<FacingCoordinates>().is_err());
        assert!("a,b,c".parse::<FacingCoordinates>().is_err());
    }

    #[test]
    fn default_is_the_null_sentinel() {
        assert!(FacingCoordinates::default().is_null());
        assert_eq!(FacingCoordinates::default(), FacingCoordinates::NULL);
        assert!(!FacingCoordinates::new(0.0, 1.0, 0.0, 0.0, 0.0).is_null());
    }

    #[test]
    fn origin_is_a_real_location() {
        let origin = FacingCoordinates::new(0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!origin.is_null());
        assert_ne!(origin, FacingCoordinates::NULL);
    }

    #[test]
    fn null_is_written_as_an_empty_string() {
        assert_eq!(FacingCoordinates::NULL.to_string(), "");
        assert!("".parse::<FacingCoordinates>().unwrap().is_null());
        assert!("  ".parse::<FacingCoordinates>().unwrap().is_null());
    }
}
