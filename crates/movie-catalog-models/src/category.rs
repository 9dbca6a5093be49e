use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Genre bucket a movie is filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    SciFi,
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Documentary,
    Drama,
    Horror,
    Romance,
    Thriller,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::SciFi,
        Category::Action,
        Category::Adventure,
        Category::Animation,
        Category::Biography,
        Category::Comedy,
        Category::Documentary,
        Category::Drama,
        Category::Horror,
        Category::Romance,
        Category::Thriller,
    ];

    /// Stored form, e.g. `SCI_FI`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SciFi => "SCI_FI",
            Category::Action => "ACTION",
            Category::Adventure => "ADVENTURE",
            Category::Animation => "ANIMATION",
            Category::Biography => "BIOGRAPHY",
            Category::Comedy => "COMEDY",
            Category::Documentary => "DOCUMENTARY",
            Category::Drama => "DRAMA",
            Category::Horror => "HORROR",
            Category::Romance => "ROMANCE",
            Category::Thriller => "THRILLER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SciFi => "Sci-Fi",
            Category::Action => "Action",
            Category::Adventure => "Adventure",
            Category::Animation => "Animation",
            Category::Biography => "Biography",
            Category::Comedy => "Comedy",
            Category::Documentary => "Documentary",
            Category::Drama => "Drama",
            Category::Horror => "Horror",
            Category::Romance => "Romance",
            Category::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the stored form or the label, ignoring case; `-` and spaces count as `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace(['-', ' '], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted || c.as_str().replace('_', "") == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
