//! `posts` table rows.

use crate::domain::{GeoPoint, NewPost, Post, PostAuthor, PostType};
use crate::mapper::{id_string, lenient, null_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostRow {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub author_tags: Vec<String>,
    pub author_avatar: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub content: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub post_type: Option<PostType>,
    #[serde(default, deserialize_with = "null_default")]
    pub images: Vec<String>,
    pub location_tag: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    pub likes: Option<i64>,
}

/// Insert payload; `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPostRow {
    pub author_id: String,
    pub author_name: String,
    pub author_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub images: Vec<String>,
    pub location_tag: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub likes: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author: PostAuthor {
                id: row.author_id,
                name: row.author_name,
                tags: row.author_tags,
                avatar: row.author_avatar,
            },
            content: row.content,
            post_type: row.post_type,
            images: row.images,
            location_tag: row.location_tag,
            geo_point: GeoPoint {
                latitude: row.lat.unwrap_or_default(),
                longitude: row.lng.unwrap_or_default(),
            },
            created_at: row.created_at.unwrap_or_default(),
            likes: row.likes.unwrap_or_default(),
            comments: 0,
            is_anonymous: false,
        }
    }
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        PostRow {
            id: post.id.clone(),
            author_id: post.author.id.clone(),
            author_name: post.author.name.clone(),
            author_tags: post.author.tags.clone(),
            author_avatar: post.author.avatar.clone(),
            content: post.content.clone(),
            post_type: post.post_type,
            images: post.images.clone(),
            location_tag: post.location_tag.clone(),
            lat: Some(post.geo_point.latitude),
            lng: Some(post.geo_point.longitude),
            created_at: Some(post.created_at),
            likes: Some(post.likes),
        }
    }
}

impl From<&NewPost> for NewPostRow {
    fn from(draft: &NewPost) -> Self {
        NewPostRow {
            author_id: draft.author.id.clone(),
            author_name: draft.author.name.clone(),
            author_tags: draft.author.tags.clone(),
            author_avatar: draft.author.avatar.clone(),
            content: draft.content.clone(),
            post_type: draft.post_type,
            images: draft.images.clone(),
            location_tag: draft.location_tag.clone(),
            lat: draft.geo.latitude,
            lng: draft.geo.longitude,
            likes: 0,
        }
    }
}
