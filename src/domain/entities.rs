//! Domain entities. Pure data structures for the core business.
//!
//! No wire-row types here; rows are mapped in `crate::mapper`.
//! Entities serialize camelCase, the shape the app screens consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selectable social tags shown next to an author's name.
pub const SOCIAL_TAGS: &[&str] = &[
    "Library Ghost 📚",
    "Canteen Philosopher 🍜",
    "Shaw Campus Runner 🏃",
    "Deadline Fighter ⏰",
    "Milk Tea Connoisseur 🧋",
    "Night Owl 🦉",
    "Morning Bird 🐦",
    "Group Project Leader 👑",
    "Solo Warrior 🗡️",
    "Coffee Addict ☕",
];

/// Campus centre. Substituted for missing coordinates on demo posts.
pub const DEFAULT_CAMPUS_GEO: GeoPoint = GeoPoint {
    latitude: 22.3380,
    longitude: 114.1813,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feed posts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Event,
    Review,
    Guide,
    LostFound,
}

impl PostType {
    /// Column value stored in `posts.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Event => "event",
            PostType::Review => "review",
            PostType::Guide => "guide",
            PostType::LostFound => "lost_found",
        }
    }
}

/// Feed tabs. Every tab except `All` narrows the feed to one post type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    All,
    Events,
    Reviews,
    Guides,
    #[serde(rename = "Lost & Found")]
    LostFound,
}

impl PostCategory {
    pub fn post_type(self) -> Option<PostType> {
        match self {
            PostCategory::All => None,
            PostCategory::Events => Some(PostType::Event),
            PostCategory::Reviews => Some(PostType::Review),
            PostCategory::Guides => Some(PostType::Guide),
            PostCategory::LostFound => Some(PostType::LostFound),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinates as supplied by a caller; either component may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialGeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PartialGeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Fill each missing or zero component from `fallback`.
    pub fn or_fallback(self, fallback: GeoPoint) -> GeoPoint {
        let pick = |value: Option<f64>, default: f64| match value {
            Some(v) if v != 0.0 => v,
            _ => default,
        };
        GeoPoint {
            latitude: pick(self.latitude, fallback.latitude),
            longitude: pick(self.longitude, fallback.longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: PostAuthor,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub images: Vec<String>,
    pub location_tag: Option<String>,
    pub geo_point: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    /// Post comments are not stored; always 0.
    pub comments: i64,
    /// Anonymous posting is not offered; always false.
    pub is_anonymous: bool,
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author: PostAuthor,
    pub content: String,
    pub post_type: PostType,
    pub location_tag: String,
    pub geo: PartialGeoPoint,
    pub images: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared identity / contact types
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of whoever opened an exchange or teaming request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub major: Option<String>,
}

/// Identity attached to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactPlatform {
    WeChat,
    WhatsApp,
    Email,
    Instagram,
    Telegram,
    /// Also what any unrecognised platform tag decodes to.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMethod {
    pub platform: ContactPlatform,
    /// Free-form platform name when `platform` is `Other`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_platform_name: Option<String>,
    #[serde(default)]
    pub value: String,
}

impl ContactMethod {
    pub fn new(platform: ContactPlatform, value: impl Into<String>) -> Self {
        Self {
            platform,
            other_platform_name: None,
            value: value.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Course exchange
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExchangeCourseDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl ExchangeCourseDetail {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    #[default]
    Open,
    Completed,
    Cancelled,
}

impl ExchangeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExchangeStatus::Open => "open",
            ExchangeStatus::Completed => "completed",
            ExchangeStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseExchange {
    pub id: String,
    pub poster: Poster,
    /// Section the poster currently holds.
    pub have: ExchangeCourseDetail,
    /// Acceptable alternatives, in the poster's order of preference.
    pub want_courses: Vec<ExchangeCourseDetail>,
    pub reason: Option<String>,
    pub contacts: Vec<ContactMethod>,
    pub status: ExchangeStatus,
    pub created_at: DateTime<Utc>,
    pub comment_count: i64,
    pub likes: i64,
}

/// Input for opening an exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewExchange {
    pub poster: Poster,
    pub have: ExchangeCourseDetail,
    pub want_courses: Vec<ExchangeCourseDetail>,
    pub reason: Option<String>,
    pub contacts: Vec<ContactMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeComment {
    pub id: String,
    pub exchange_id: String,
    pub author: CommentAuthor,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Course teaming
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamingStatus {
    #[default]
    Open,
    Closed,
}

impl TeamingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamingStatus::Open => "open",
            TeamingStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTeaming {
    pub id: String,
    pub course_id: String,
    pub poster: Poster,
    pub section: String,
    pub self_intro: Option<String>,
    pub target_teammate: Option<String>,
    pub contacts: Vec<ContactMethod>,
    pub status: TeamingStatus,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comment_count: i64,
}

/// Input for opening a teaming request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTeaming {
    pub course_id: String,
    pub poster: Poster,
    pub section: String,
    pub self_intro: Option<String>,
    pub target_teammate: Option<String>,
    pub contacts: Vec<ContactMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamingComment {
    pub id: String,
    pub teaming_id: String,
    pub author: CommentAuthor,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
