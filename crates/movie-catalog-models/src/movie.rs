use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::category::Category;
use crate::rating::Rating;

/// A movie as held by the catalog.
///
/// `id`, `date_added` and `is_watched` (initially) are assigned by the store, never by callers.
/// `poster_url` is always an absolute URL once a record has passed through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub release_year: u16,
    pub category: Category,
    pub rating: Rating,
    /// Runtime in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f32>,
    pub poster_url: String,
    pub date_added: DateTime<Utc>,
    pub is_watched: bool,
}

/// Creation payload: everything except the store-assigned fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: u16,
    pub category: Category,
    pub rating: Rating,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<Vec<String>>,
    #[serde(default)]
    pub imdb_rating: Option<f32>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, release_year: u16, category: Category, rating: Rating) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            release_year,
            category,
            rating,
            duration: None,
            director: None,
            cast: None,
            imdb_rating: None,
            poster_url: None,
        }
    }

    /// Split a comma-separated cast list, dropping blank names
    pub fn parse_cast(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Partial update. `None` leaves the field untouched; `id` and `date_added` cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_watched: Option<bool>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }

    /// Shallow merge onto `record`: every field present in the patch overwrites the record's value
    pub fn merge_into(&self, record: &mut MovieRecord) {
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(year) = self.release_year {
            record.release_year = year;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(duration) = self.duration {
            record.duration = Some(duration);
        }
        if let Some(director) = &self.director {
            record.director = Some(director.clone());
        }
        if let Some(cast) = &self.cast {
            record.cast = Some(cast.clone());
        }
        if let Some(imdb_rating) = self.imdb_rating {
            record.imdb_rating = Some(imdb_rating);
        }
        if let Some(poster_url) = &self.poster_url {
            record.poster_url = poster_url.clone();
        }
        if let Some(watched) = self.is_watched {
            record.is_watched = watched;
        }
    }
}
