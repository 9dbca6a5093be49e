pub mod category;
pub mod movie;
pub mod rating;

pub use category::{Category, ParseCategoryError};
pub use movie::{MovieRecord, MoviePatch, NewMovie};
pub use rating::{ParseRatingError, Rating};
