//! `course_teaming` and `teaming_comments` rows.

use crate::domain::{
    CommentAuthor, ContactMethod, CourseTeaming, NewTeaming, Poster, TeamingComment,
    TeamingStatus,
};
use crate::mapper::{id_string, lenient, null_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamingRow {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub course_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub user_avatar: String,
    pub user_major: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub section: String,
    pub self_intro: Option<String>,
    pub target_teammate: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub contacts: Vec<ContactMethod>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<TeamingStatus>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub likes: Option<i64>,
    pub comment_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTeamingRow {
    pub course_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_major: Option<String>,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_teammate: Option<String>,
    pub contacts: Vec<ContactMethod>,
    pub status: TeamingStatus,
    pub likes: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamingCommentRow {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub teaming_id: String,
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
pub struct NewTeamingCommentRow {
    pub teaming_id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
}

impl From<TeamingRow> for CourseTeaming {
    fn from(row: TeamingRow) -> Self {
        CourseTeaming {
            id: row.id,
            course_id: row.course_id,
            poster: Poster {
                id: row.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
                major: row.user_major,
            },
            section: row.section,
            self_intro: row.self_intro,
            target_teammate: row.target_teammate,
            contacts: row.contacts,
            status: row.status.unwrap_or_default(),
            created_at: row.created_at.unwrap_or_default(),
            likes: row.likes.unwrap_or_default(),
            comment_count: row.comment_count.unwrap_or_default(),
        }
    }
}

impl From<&CourseTeaming> for TeamingRow {
    fn from(teaming: &CourseTeaming) -> Self {
        TeamingRow {
            id: teaming.id.clone(),
            course_id: teaming.course_id.clone(),
            user_id: teaming.poster.id.clone(),
            user_name: teaming.poster.name.clone(),
            user_avatar: teaming.poster.avatar.clone(),
            user_major: teaming.poster.major.clone(),
            section: teaming.section.clone(),
            self_intro: teaming.self_intro.clone(),
            target_teammate: teaming.target_teammate.clone(),
            contacts: teaming.contacts.clone(),
            status: Some(teaming.status),
            created_at: Some(teaming.created_at),
            likes: Some(teaming.likes),
            comment_count: Some(teaming.comment_count),
        }
    }
}

impl From<&NewTeaming> for NewTeamingRow {
    fn from(draft: &NewTeaming) -> Self {
        NewTeamingRow {
            course_id: draft.course_id.clone(),
            user_id: draft.poster.id.clone(),
            user_name: draft.poster.name.clone(),
            user_avatar: draft.poster.avatar.clone(),
            user_major: draft.poster.major.clone(),
            section: draft.section.clone(),
            self_intro: draft.self_intro.clone(),
            target_teammate: draft.target_teammate.clone(),
            contacts: draft.contacts.clone(),
            status: TeamingStatus::Open,
            likes: 0,
            comment_count: 0,
        }
    }
}

impl From<TeamingCommentRow> for TeamingComment {
    fn from(row: TeamingCommentRow) -> Self {
        TeamingComment {
            id: row.id,
            teaming_id: row.teaming_id,
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

impl From<&TeamingComment> for TeamingCommentRow {
    fn from(comment: &TeamingComment) -> Self {
        TeamingCommentRow {
            id: comment.id.clone(),
            teaming_id: comment.teaming_id.clone(),
            author_id: comment.author.id.clone(),
            author_name: comment.author.name.clone(),
            author_avatar: comment.author.avatar.clone(),
            content: comment.content.clone(),
            created_at: Some(comment.created_at),
        }
    }
}

impl NewTeamingCommentRow {
    pub fn new(teaming_id: &str, author: &CommentAuthor, content: &str) -> Self {
        NewTeamingCommentRow {
            teaming_id: teaming_id.to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_avatar: author.avatar.clone(),
            content: content.to_string(),
        }
    }
}
