//! `course_exchanges` and `exchange_comments` rows.
//!
//! `want_courses` and `contacts` are jsonb columns holding the entity shape
//! directly, so they pass through untouched.

use crate::domain::{
    CommentAuthor, ContactMethod, CourseExchange, ExchangeComment, ExchangeCourseDetail,
    ExchangeStatus, NewExchange, Poster,
};
use crate::mapper::{id_string, lenient, null_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExchangeRow {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_avatar: String,
    pub user_major: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub have_course: String,
    pub have_section: Option<String>,
    pub have_instructor: Option<String>,
    pub have_time: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub want_courses: Vec<ExchangeCourseDetail>,
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub contacts: Vec<ContactMethod>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ExchangeStatus>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub comment_count: Option<i64>,
    pub likes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExchangeRow {
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_major: Option<String>,
    pub have_course: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_time: Option<String>,
    pub want_courses: Vec<ExchangeCourseDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub contacts: Vec<ContactMethod>,
    pub status: ExchangeStatus,
    pub comment_count: i64,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExchangeCommentRow {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub exchange_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_avatar: String,
    #[serde(default, deserialize_with = "null_default")]
    pub content: String,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExchangeCommentRow {
    pub exchange_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
}

impl From<ExchangeRow> for CourseExchange {
    fn from(row: ExchangeRow) -> Self {
        CourseExchange {
            id: row.id,
            poster: Poster {
                id: row.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
                major: row.user_major,
            },
            have: ExchangeCourseDetail {
                code: row.have_course,
                section: row.have_section,
                instructor: row.have_instructor,
                time: row.have_time,
            },
            want_courses: row.want_courses,
            reason: row.reason,
            contacts: row.contacts,
            status: row.status.unwrap_or_default(),
            created_at: row.created_at.unwrap_or_default(),
            comment_count: row.comment_count.unwrap_or_default(),
            likes: row.likes.unwrap_or_default(),
        }
    }
}

impl From<&CourseExchange> for ExchangeRow {
    fn from(exchange: &CourseExchange) -> Self {
        ExchangeRow {
            id: exchange.id.clone(),
            user_id: exchange.poster.id.clone(),
            user_name: exchange.poster.name.clone(),
            user_avatar: exchange.poster.avatar.clone(),
            user_major: exchange.poster.major.clone(),
            have_course: exchange.have.code.clone(),
            have_section: exchange.have.section.clone(),
            have_instructor: exchange.have.instructor.clone(),
            have_time: exchange.have.time.clone(),
            want_courses: exchange.want_courses.clone(),
            reason: exchange.reason.clone(),
            contacts: exchange.contacts.clone(),
            status: Some(exchange.status),
            created_at: Some(exchange.created_at),
            comment_count: Some(exchange.comment_count),
            likes: Some(exchange.likes),
        }
    }
}

impl From<&NewExchange> for NewExchangeRow {
    fn from(draft: &NewExchange) -> Self {
        NewExchangeRow {
            user_id: draft.poster.id.clone(),
            user_name: draft.poster.name.clone(),
            user_avatar: draft.poster.avatar.clone(),
            user_major: draft.poster.major.clone(),
            have_course: draft.have.code.clone(),
            have_section: draft.have.section.clone(),
            have_instructor: draft.have.instructor.clone(),
            have_time: draft.have.time.clone(),
            want_courses: draft.want_courses.clone(),
            reason: draft.reason.clone(),
            contacts: draft.contacts.clone(),
            status: ExchangeStatus::Open,
            comment_count: 0,
            likes: 0,
        }
    }
}

impl From<ExchangeCommentRow> for ExchangeComment {
    fn from(row: ExchangeCommentRow) -> Self {
        ExchangeComment {
            id: row.id,
            exchange_id: row.exchange_id,
            author: CommentAuthor {
                id: row.author_id,
                name: row.author_name,
                avatar: row.author_avatar,
            },
            content: row.content,
            created_at: row.created_at.unwrap_or_default(),
        }
    }
}

impl From<&ExchangeComment> for ExchangeCommentRow {
    fn from(comment: &ExchangeComment) -> Self {
        ExchangeCommentRow {
            id: comment.id.clone(),
            exchange_id: comment.exchange_id.clone(),
            author_id: comment.author.id.clone(),
            author_name: comment.author.name.clone(),
            author_avatar: comment.author.avatar.clone(),
            content: comment.content.clone(),
            created_at: Some(comment.created_at),
        }
    }
}

impl NewExchangeCommentRow {
    pub fn new(exchange_id: &str, author: &CommentAuthor, content: &str) -> Self {
        NewExchangeCommentRow {
            exchange_id: exchange_id.to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_avatar: author.avatar.clone(),
            content: content.to_string(),
        }
    }
}
