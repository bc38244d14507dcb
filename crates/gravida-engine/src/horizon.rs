//! Follow-up horizon for the survival models.
//!
//! The published baseline hazards exist only at 2, 7 and 14 days, so the
//! horizon is a closed enum rather than a free integer: an out-of-set value
//! is rejected at construction, before any arithmetic runs, and a hazard
//! lookup can never miss.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Horizon {
    Day2,
    Day7,
    Day14,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Day2, Horizon::Day7, Horizon::Day14];

    /// The horizon as a day count.
    pub fn days(self) -> u32 {
        match self {
            Horizon::Day2 => 2,
            Horizon::Day7 => 7,
            Horizon::Day14 => 14,
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = EngineError;

    fn try_from(days: u32) -> Result<Self, EngineError> {
        match days {
            2 => Ok(Horizon::Day2),
            7 => Ok(Horizon::Day7),
            14 => Ok(Horizon::Day14),
            other => Err(EngineError::InvalidHorizon(other)),
        }
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> u32 {
        horizon.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_three_published_horizons() {
        assert_eq!(Horizon::try_from(2), Ok(Horizon::Day2));
        assert_eq!(Horizon::try_from(7), Ok(Horizon::Day7));
        assert_eq!(Horizon::try_from(14), Ok(Horizon::Day14));
    }

    #[test]
    fn rejects_anything_else() {
        assert_eq!(Horizon::try_from(5), Err(EngineError::InvalidHorizon(5)));
        assert_eq!(Horizon::try_from(0), Err(EngineError::InvalidHorizon(0)));
    }

    #[test]
    fn serializes_as_plain_day_count() {
        let json = serde_json::to_string(&Horizon::Day7).unwrap();
        assert_eq!(json, "7");
        let back: Horizon = serde_json::from_str("14").unwrap();
        assert_eq!(back, Horizon::Day14);
    }

    #[test]
    fn deserialization_rejects_out_of_set_values() {
        assert!(serde_json::from_str::<Horizon>("5").is_err());
    }
}
