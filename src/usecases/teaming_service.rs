//! Course teaming board, scoped per course. Same failure policy as the
//! exchange board.

use crate::domain::{
    CommentAuthor, Created, CourseTeaming, Fetched, LikeResult, NewTeaming, TeamingComment,
    TeamingStatus,
};
use crate::mapper::{NewTeamingCommentRow, NewTeamingRow, TeamingCommentRow, TeamingRow};
use crate::ports::{QueryPort, SelectQuery};
use crate::shared::config::GatewaySettings;
use crate::usecases::counters::increment_counter;
use crate::usecases::placeholders;
use crate::usecases::rows::{fetch_mapped, insert_mapped};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const TEAMING_TABLE: &str = "course_teaming";
pub const TEAMING_COMMENTS_TABLE: &str = "teaming_comments";

pub struct TeamingService {
    query: Arc<dyn QueryPort>,
    counter_attempts: u32,
}

impl TeamingService {
    pub fn new(query: Arc<dyn QueryPort>, settings: &GatewaySettings) -> Self {
        Self {
            query,
            counter_attempts: settings.counter_attempts,
        }
    }

    /// Open teaming requests for `course_id`, newest first.
    pub async fn fetch_teaming_requests(&self, course_id: &str) -> Fetched<CourseTeaming> {
        let select = SelectQuery::new()
            .eq("course_id", course_id)
            .eq("status", TeamingStatus::Open.as_str())
            .order_by("created_at", false);

        match fetch_mapped::<TeamingRow, CourseTeaming>(&*self.query, TEAMING_TABLE, &select).await
        {
            Ok(requests) => {
                debug!(course_id, count = requests.len(), "fetched teaming requests");
                Fetched::Live(requests)
            }
            Err(e) => {
                warn!(course_id, error = %e, "fetching teaming requests failed, serving placeholder");
                Fetched::Degraded {
                    items: placeholders::teaming_requests(course_id, Utc::now()),
                    cause: e,
                }
            }
        }
    }

    pub async fn post_teaming_request(&self, draft: NewTeaming) -> Created<CourseTeaming> {
        let row = NewTeamingRow::from(&draft);
        match insert_mapped::<_, TeamingRow, CourseTeaming>(&*self.query, TEAMING_TABLE, &row).await
        {
            Ok(request) => {
                info!(teaming_id = %request.id, course_id = %request.course_id, "posted teaming request");
                Created::Stored(request)
            }
            Err(e) => {
                warn!(course_id = %draft.course_id, error = %e, "posting teaming request failed, keeping local copy");
                Created::Local {
                    record: local_request(draft),
                    cause: e,
                }
            }
        }
    }

    /// Comments on one request, oldest first.
    pub async fn fetch_teaming_comments(&self, teaming_id: &str) -> Fetched<TeamingComment> {
        let select = SelectQuery::new()
            .eq("teaming_id", teaming_id)
            .order_by("created_at", true);

        match fetch_mapped::<TeamingCommentRow, TeamingComment>(
            &*self.query,
            TEAMING_COMMENTS_TABLE,
            &select,
        )
        .await
        {
            Ok(comments) => Fetched::Live(comments),
            Err(e) => {
                warn!(teaming_id, error = %e, "fetching teaming comments failed, serving placeholder");
                Fetched::Degraded {
                    items: placeholders::teaming_comments(teaming_id, Utc::now()),
                    cause: e,
                }
            }
        }
    }

    /// Store a comment and bump the parent's `comment_count` (best effort).
    pub async fn post_teaming_comment(
        &self,
        teaming_id: &str,
        author: &CommentAuthor,
        content: &str,
    ) -> Created<TeamingComment> {
        let row = NewTeamingCommentRow::new(teaming_id, author, content);
        let comment = match insert_mapped::<_, TeamingCommentRow, TeamingComment>(
            &*self.query,
            TEAMING_COMMENTS_TABLE,
            &row,
        )
        .await
        {
            Ok(comment) => comment,
            Err(e) => {
                warn!(teaming_id, error = %e, "posting teaming comment failed, keeping local copy");
                return Created::Local {
                    record: TeamingComment {
                        id: placeholders::local_id(),
                        teaming_id: teaming_id.to_string(),
                        author: author.clone(),
                        content: content.to_string(),
                        created_at: Utc::now(),
                    },
                    cause: e,
                };
            }
        };

        if let Err(e) = increment_counter(
            &*self.query,
            TEAMING_TABLE,
            teaming_id,
            "comment_count",
            self.counter_attempts,
        )
        .await
        {
            warn!(teaming_id, error = %e, "comment count not updated");
        }

        Created::Stored(comment)
    }

    /// Add one like; not a toggle.
    pub async fn toggle_teaming_like(&self, teaming_id: &str, user_id: &str) -> LikeResult {
        match increment_counter(
            &*self.query,
            TEAMING_TABLE,
            teaming_id,
            "likes",
            self.counter_attempts,
        )
        .await
        {
            Ok(likes) => {
                debug!(teaming_id, user_id, likes, "liked teaming request");
                LikeResult::OK
            }
            Err(e) => {
                warn!(teaming_id, user_id, error = %e, "liking teaming request failed");
                LikeResult::FAILED
            }
        }
    }
}

fn local_request(draft: NewTeaming) -> CourseTeaming {
    CourseTeaming {
        id: placeholders::local_id(),
        course_id: draft.course_id,
        poster: draft.poster,
        section: draft.section,
        self_intro: draft.self_intro,
        target_teammate: draft.target_teammate,
        contacts: draft.contacts,
        status: TeamingStatus::Open,
        created_at: Utc::now(),
        likes: 0,
        comment_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::{ContactMethod, ContactPlatform, Poster};
    use serde_json::json;

    fn service(store: &Arc<InMemoryStore>) -> TeamingService {
        TeamingService::new(store.clone(), &GatewaySettings::default())
    }

    fn draft(course_id: &str) -> NewTeaming {
        NewTeaming {
            course_id: course_id.to_string(),
            poster: Poster {
                id: "u4".to_string(),
                name: "Kelly Ho".to_string(),
                avatar: "🧑‍💻".to_string(),
                major: Some("Data Science".to_string()),
            },
            section: "Sec2".to_string(),
            self_intro: Some("Backend and SQL".to_string()),
            target_teammate: None,
            contacts: vec![
                ContactMethod::new(ContactPlatform::WhatsApp, "91234567"),
                ContactMethod::new(ContactPlatform::Instagram, "kelly.codes"),
            ],
        }
    }

    fn author() -> CommentAuthor {
        CommentAuthor {
            id: "u5".to_string(),
            name: "David Chen".to_string(),
            avatar: "👨‍🎓".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_scoped_to_course_and_open() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed(
                TEAMING_TABLE,
                [
                    json!({ "id": "a", "course_id": "COMP3015", "status": "open" }),
                    json!({ "id": "b", "course_id": "COMP3015", "status": "closed" }),
                    json!({ "id": "c", "course_id": "MKTG2005", "status": "open" }),
                ],
            )
            .await;

        let fetched = service(&store).fetch_teaming_requests("COMP3015").await;
        assert!(fetched.is_live());
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched.items()[0].id, "a");
    }

    #[tokio::test]
    async fn test_offline_placeholders_use_requested_ids() {
        let store = Arc::new(InMemoryStore::new());
        store.set_offline(true);
        let teaming = service(&store);

        let requests = teaming.fetch_teaming_requests("ISOM3000").await;
        assert!(!requests.is_live());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests.items()[0].course_id, "ISOM3000");

        let comments = teaming.fetch_teaming_comments("t-8").await;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments.items()[0].teaming_id, "t-8");
    }

    #[tokio::test]
    async fn test_post_request_keeps_contact_order() {
        let store = Arc::new(InMemoryStore::new());
        let created = service(&store).post_teaming_request(draft("COMP3015")).await;

        assert!(created.is_stored());
        let request = created.into_record();
        assert_eq!(request.status, TeamingStatus::Open);
        assert_eq!(request.course_id, "COMP3015");
        assert_eq!(request.contacts[0].platform, ContactPlatform::WhatsApp);
        assert_eq!(request.contacts[1].platform, ContactPlatform::Instagram);
    }

    #[tokio::test]
    async fn test_post_request_offline_is_local() {
        let store = Arc::new(InMemoryStore::new());
        store.set_offline(true);

        let created = service(&store).post_teaming_request(draft("COMP3015")).await;
        assert!(!created.is_stored());
        assert!(created.record().id.starts_with("local-"));
        assert_eq!(created.record().likes, 0);
    }

    #[tokio::test]
    async fn test_comment_thread_and_count() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(TEAMING_TABLE, [json!({ "id": "t1" })]).await;
        let teaming = service(&store);

        teaming.post_teaming_comment("t1", &author(), "Count me in").await;
        teaming.post_teaming_comment("t1", &author(), "DM sent").await;

        let comments = teaming.fetch_teaming_comments("t1").await.into_items();
        let texts: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, ["Count me in", "DM sent"]);
        assert_eq!(store.rows(TEAMING_TABLE).await[0]["comment_count"], 2);
    }

    #[tokio::test]
    async fn test_like_results() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed(TEAMING_TABLE, [json!({ "id": "t1", "likes": 3 })])
            .await;
        let teaming = service(&store);

        assert!(teaming.toggle_teaming_like("t1", "u1").await.success);
        assert_eq!(store.rows(TEAMING_TABLE).await[0]["likes"], 4);

        store.set_offline(true);
        assert!(!teaming.toggle_teaming_like("t1", "u1").await.success);
    }
}
