//! Campus feed: create, list and like posts; upload post images.
//!
//! - Post creation and image upload return their failures to the caller
//! - Feed reads never fail; a backend failure yields an empty, degraded feed
//! - Likes never fail; missing posts and backend errors are logged and dropped

use crate::domain::{
    DEFAULT_CAMPUS_GEO, DomainError, Fetched, NewPost, Post, PostCategory, PostType,
};
use crate::mapper::{NewPostRow, PostRow};
use crate::ports::{MediaSourcePort, QueryPort, SelectQuery, StoragePort};
use crate::shared::config::GatewaySettings;
use crate::usecases::counters::increment_counter;
use crate::usecases::rows::{fetch_mapped, insert_mapped};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const POSTS_TABLE: &str = "posts";

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Feed gateway.
pub struct FeedService {
    query: Arc<dyn QueryPort>,
    storage: Arc<dyn StoragePort>,
    media: Arc<dyn MediaSourcePort>,
    settings: GatewaySettings,
}

impl FeedService {
    pub fn new(
        query: Arc<dyn QueryPort>,
        storage: Arc<dyn StoragePort>,
        media: Arc<dyn MediaSourcePort>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            query,
            storage,
            media,
            settings,
        }
    }

    /// Publish a post and return it as stored.
    ///
    /// The demo author never touches the backend: after the configured delay
    /// a local post is returned, with campus-centre coordinates filling any
    /// missing component.
    pub async fn create_post(&self, draft: NewPost) -> Result<Post, DomainError> {
        if draft.author.id == self.settings.demo_author_id {
            info!(
                delay_ms = self.settings.demo_delay.as_millis() as u64,
                "demo author, fabricating post locally"
            );
            tokio::time::sleep(self.settings.demo_delay).await;
            return Ok(demo_post(draft, Utc::now()));
        }

        let post: Post =
            insert_mapped::<_, PostRow, _>(&*self.query, POSTS_TABLE, &NewPostRow::from(&draft))
                .await
                .map_err(|e| {
                    warn!(author_id = %draft.author.id, error = %e, "creating post failed");
                    DomainError::Persistence(e.to_string())
                })?;

        info!(post_id = %post.id, post_type = ?post.post_type, "created post");
        Ok(post)
    }

    /// Newest posts first, up to `limit` (page size when `None`).
    pub async fn posts(&self, limit: Option<usize>) -> Fetched<Post> {
        self.read_posts(None, limit).await
    }

    /// Newest posts of one type first, up to `limit`.
    pub async fn posts_by_type(&self, post_type: PostType, limit: Option<usize>) -> Fetched<Post> {
        self.read_posts(Some(post_type), limit).await
    }

    /// Feed tab view; `All` is the unfiltered feed.
    pub async fn posts_by_category(
        &self,
        category: PostCategory,
        limit: Option<usize>,
    ) -> Fetched<Post> {
        self.read_posts(category.post_type(), limit).await
    }

    async fn read_posts(&self, post_type: Option<PostType>, limit: Option<usize>) -> Fetched<Post> {
        let limit = limit.unwrap_or(self.settings.page_size);
        let mut select = SelectQuery::new();
        if let Some(post_type) = post_type {
            select = select.eq("type", post_type.as_str());
        }
        let select = select.order_by("created_at", false).limit(limit);

        match fetch_mapped::<PostRow, Post>(&*self.query, POSTS_TABLE, &select).await {
            Ok(posts) => {
                debug!(count = posts.len(), ?post_type, "fetched posts");
                Fetched::Live(posts)
            }
            Err(e) => {
                warn!(?post_type, error = %e, "fetching posts failed, serving empty feed");
                Fetched::Degraded {
                    items: Vec::new(),
                    cause: e,
                }
            }
        }
    }

    /// Add one like. Failures are logged, never returned.
    pub async fn like_post(&self, post_id: &str) {
        match increment_counter(
            &*self.query,
            POSTS_TABLE,
            post_id,
            "likes",
            self.settings.counter_attempts,
        )
        .await
        {
            Ok(likes) => debug!(post_id, likes, "liked post"),
            Err(e) => warn!(post_id, error = %e, "liking post failed"),
        }
    }

    /// Upload an image for `post_id` and return its public URL.
    ///
    /// The object key is `<post_id>/<unix millis>.jpg` in the configured bucket.
    pub async fn upload_post_image(&self, uri: &str, post_id: &str) -> Result<String, DomainError> {
        let bytes = self.media.read(uri).await.map_err(|e| {
            warn!(uri, error = %e, "reading image failed");
            e
        })?;

        let bucket = &self.settings.storage_bucket;
        let key = format!("{}/{}.jpg", post_id, Utc::now().timestamp_millis());
        self.storage
            .upload(bucket, &key, bytes, IMAGE_CONTENT_TYPE)
            .await
            .map_err(|e| {
                warn!(bucket = %bucket, key = %key, error = %e, "image upload failed");
                e
            })?;

        Ok(self.storage.public_url(bucket, &key))
    }
}

fn demo_post(draft: NewPost, now: DateTime<Utc>) -> Post {
    Post {
        id: format!("mock_post_{}", now.timestamp_millis()),
        author: draft.author,
        content: draft.content,
        post_type: Some(draft.post_type),
        images: draft.images,
        location_tag: Some(draft.location_tag),
        geo_point: draft.geo.or_fallback(DEFAULT_CAMPUS_GEO),
        created_at: now,
        likes: 0,
        comments: 0,
        is_anonymous: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::media::LocalMediaSource;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::{PartialGeoPoint, PostAuthor};
    use serde_json::json;
    use std::time::Duration;

    fn service(store: &Arc<InMemoryStore>) -> FeedService {
        FeedService::new(
            store.clone(),
            store.clone(),
            Arc::new(LocalMediaSource::new()),
            GatewaySettings::default(),
        )
    }

    fn draft(author_id: &str, post_type: PostType, geo: PartialGeoPoint) -> NewPost {
        NewPost {
            author: PostAuthor {
                id: author_id.to_string(),
                name: "Zhang Wei".to_string(),
                tags: vec!["Night Owl 🦉".to_string()],
                avatar: Some("👤".to_string()),
            },
            content: "Free pizza at the student hall".to_string(),
            post_type,
            location_tag: "Student Hall".to_string(),
            geo,
            images: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_post_is_local_and_delayed() {
        let store = Arc::new(InMemoryStore::new());
        store.set_offline(true);
        let feed = service(&store);

        let started = tokio::time::Instant::now();
        let post = feed
            .create_post(draft("demo_user", PostType::Event, PartialGeoPoint::default()))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert!(post.id.starts_with("mock_post_"));
        assert_eq!(post.geo_point.latitude, 22.3380);
        assert_eq!(post.geo_point.longitude, 114.1813);
        assert_eq!(post.likes, 0);
        assert!(store.rows(POSTS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_post_returns_stored_row() {
        let store = Arc::new(InMemoryStore::new());
        let feed = service(&store);

        let post = feed
            .create_post(draft("u1", PostType::Guide, PartialGeoPoint::new(22.33, 114.17)))
            .await
            .unwrap();

        assert!(!post.id.is_empty());
        assert_eq!(post.post_type, Some(PostType::Guide));
        assert_eq!(post.geo_point.latitude, 22.33);
        assert_eq!(post.likes, 0);
        assert_eq!(post.comments, 0);
        assert_eq!(store.rows(POSTS_TABLE).await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_post_failure_propagates() {
        let store = Arc::new(InMemoryStore::new());
        store.set_offline(true);

        let err = service(&store)
            .create_post(draft("u1", PostType::Event, PartialGeoPoint::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_posts_by_type_limit_and_order() {
        let store = Arc::new(InMemoryStore::new());
        let rows = (0..8).map(|day| {
            let post_type = if day % 3 == 0 { "event" } else { "lost_found" };
            json!({
                "id": format!("p{day}"),
                "type": post_type,
                "created_at": format!("2025-03-{:02}T09:00:00+00:00", day + 1),
            })
        });
        store.seed(POSTS_TABLE, rows).await;

        let fetched = service(&store)
            .posts_by_type(PostType::LostFound, Some(5))
            .await;

        assert!(fetched.is_live());
        let posts = fetched.into_items();
        assert_eq!(posts.len(), 5);
        assert!(posts.iter().all(|p| p.post_type == Some(PostType::LostFound)));
        assert!(posts.windows(2).all(|w| w[0].created_at > w[1].created_at));
        assert_eq!(posts[0].id, "p7");
    }

    #[tokio::test]
    async fn test_category_all_is_unfiltered() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed(
                POSTS_TABLE,
                [
                    json!({ "id": "a", "type": "review" }),
                    json!({ "id": "b", "type": "guide" }),
                ],
            )
            .await;
        let feed = service(&store);

        assert_eq!(feed.posts_by_category(PostCategory::All, None).await.len(), 2);
        assert_eq!(
            feed.posts_by_category(PostCategory::Reviews, None)
                .await
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_offline_feed_is_empty_and_degraded() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(POSTS_TABLE, [json!({ "id": "a" })]).await;
        store.set_offline(true);

        let fetched = service(&store).posts(None).await;
        assert!(!fetched.is_live());
        assert!(fetched.is_empty());
        assert!(matches!(fetched.cause(), Some(DomainError::Backend(_))));
    }

    #[tokio::test]
    async fn test_like_post_increments_and_ignores_missing() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed(POSTS_TABLE, [json!({ "id": "p1", "likes": 2 })])
            .await;
        let feed = service(&store);

        feed.like_post("p1").await;
        feed.like_post("missing").await;

        assert_eq!(store.rows(POSTS_TABLE).await[0]["likes"], 3);
    }

    #[tokio::test]
    async fn test_upload_post_image() {
        let store = Arc::new(InMemoryStore::new());
        let path = std::env::temp_dir().join(format!("{}.jpg", uuid::Uuid::new_v4()));
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let url = service(&store)
            .upload_post_image(path.to_str().unwrap(), "p1")
            .await
            .unwrap();

        assert!(url.starts_with("memory://posts/p1/"));
        assert!(url.ends_with(".jpg"));
        let key = url.trim_start_matches("memory://posts/");
        assert_eq!(
            store.object("posts", key).await,
            Some(vec![0xFF, 0xD8, 0xFF, 0xE0])
        );
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_upload_failure_propagates() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store)
            .upload_post_image("/no/such/image.jpg", "p1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Media(_)));
    }
}
