use std::fmt;
use std::str::FromStr;

/// First championship season the upstream API carries data for
pub const FIRST_SEASON: u16 = 1950;
/// Upper bound accepted for a season year
pub const LAST_SEASON: u16 = 2100;

/// Which championship season to ask the upstream API for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Season {
    /// The season the upstream API considers current
    #[default]
    Current,
    Year(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeasonError {
    #[error("Invalid season {0:?}. Use 'current' or a year (e.g., 2024)")]
    Unrecognized(String),

    #[error("Season {0} is out of range. Valid years: {first}-{last}", first = FIRST_SEASON, last = LAST_SEASON)]
    OutOfRange(u16),
}

impl FromStr for Season {
    type Err = SeasonError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("current") {
            return Ok(Season::Current);
        }

        let year = input
            .parse::<u16>()
            .map_err(|_| SeasonError::Unrecognized(input.to_string()))?;

        if !(FIRST_SEASON..=LAST_SEASON).contains(&year) {
            return Err(SeasonError::OutOfRange(year));
        }

        Ok(Season::Year(year))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Current => write!(f, "current"),
            Season::Year(year) => write!(f, "{year}"),
        }
    }
}
