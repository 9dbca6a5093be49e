use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Audience classification (MPA style)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rating {
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG13", alias = "PG-13")]
    Pg13,
    R,
    #[serde(rename = "NR")]
    Nr,
}

impl Rating {
    pub const ALL: [Rating; 5] = [Rating::G, Rating::Pg, Rating::Pg13, Rating::R, Rating::Nr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG13",
            Rating::R => "R",
            Rating::Nr => "NR",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Pg13 => f.write_str("PG-13"),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRatingError(pub String);

impl fmt::Display for ParseRatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rating: {}", self.0)
    }
}

impl std::error::Error for ParseRatingError {}

impl FromStr for Rating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('-', "");
        Rating::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| ParseRatingError(s.to_string()))
    }
}
