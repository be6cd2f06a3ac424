//! Core domain layer. No external I/O dependencies.
//!
//! Entities, outcomes and errors live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod outcome;

pub use entities::{
    CommentAuthor, ContactMethod, ContactPlatform, CourseExchange, CourseTeaming,
    DEFAULT_CAMPUS_GEO, ExchangeComment, ExchangeCourseDetail, ExchangeStatus, GeoPoint,
    NewExchange, NewPost, NewTeaming, PartialGeoPoint, Post, PostAuthor, PostCategory, PostType,
    Poster, SOCIAL_TAGS, TeamingComment, TeamingStatus,
};
pub use errors::DomainError;
pub use outcome::{Created, Fetched, LikeResult};
