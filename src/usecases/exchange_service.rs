//! Course exchange board.
//!
//! Reads fall back to placeholders, writes fall back to records built locally,
//! likes report `{success: false}`. Nothing here returns an error.

use crate::domain::{
    CommentAuthor, CourseExchange, Created, ExchangeComment, ExchangeStatus, Fetched, LikeResult,
    NewExchange,
};
use crate::mapper::{ExchangeCommentRow, ExchangeRow, NewExchangeCommentRow, NewExchangeRow};
use crate::ports::{QueryPort, SelectQuery};
use crate::shared::config::GatewaySettings;
use crate::usecases::counters::increment_counter;
use crate::usecases::placeholders;
use crate::usecases::rows::{fetch_mapped, insert_mapped};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EXCHANGES_TABLE: &str = "course_exchanges";
pub const EXCHANGE_COMMENTS_TABLE: &str = "exchange_comments";

pub struct ExchangeService {
    query: Arc<dyn QueryPort>,
    counter_attempts: u32,
}

impl ExchangeService {
    pub fn new(query: Arc<dyn QueryPort>, settings: &GatewaySettings) -> Self {
        Self {
            query,
            counter_attempts: settings.counter_attempts,
        }
    }

    /// Open exchange requests, newest first.
    pub async fn fetch_exchanges(&self) -> Fetched<CourseExchange> {
        let select = SelectQuery::new()
            .eq("status", ExchangeStatus::Open.as_str())
            .order_by("created_at", false);

        match fetch_mapped::<ExchangeRow, CourseExchange>(&*self.query, EXCHANGES_TABLE, &select)
            .await
        {
            Ok(exchanges) => {
                debug!(count = exchanges.len(), "fetched exchanges");
                Fetched::Live(exchanges)
            }
            Err(e) => {
                warn!(error = %e, "fetching exchanges failed, serving placeholders");
                Fetched::Degraded {
                    items: placeholders::exchanges(Utc::now()),
                    cause: e,
                }
            }
        }
    }

    /// Store a new open request with zeroed counters.
    pub async fn post_exchange(&self, draft: NewExchange) -> Created<CourseExchange> {
        let row = NewExchangeRow::from(&draft);
        match insert_mapped::<_, ExchangeRow, CourseExchange>(&*self.query, EXCHANGES_TABLE, &row)
            .await
        {
            Ok(exchange) => {
                info!(exchange_id = %exchange.id, have = %exchange.have.code, "posted exchange");
                Created::Stored(exchange)
            }
            Err(e) => {
                warn!(error = %e, "posting exchange failed, keeping local copy");
                Created::Local {
                    record: local_exchange(draft),
                    cause: e,
                }
            }
        }
    }

    /// Comments on one exchange, oldest first.
    pub async fn fetch_exchange_comments(&self, exchange_id: &str) -> Fetched<ExchangeComment> {
        let select = SelectQuery::new()
            .eq("exchange_id", exchange_id)
            .order_by("created_at", true);

        match fetch_mapped::<ExchangeCommentRow, ExchangeComment>(
            &*self.query,
            EXCHANGE_COMMENTS_TABLE,
            &select,
        )
        .await
        {
            Ok(comments) => Fetched::Live(comments),
            Err(e) => {
                warn!(exchange_id, error = %e, "fetching exchange comments failed, serving placeholders");
                Fetched::Degraded {
                    items: placeholders::exchange_comments(exchange_id, Utc::now()),
                    cause: e,
                }
            }
        }
    }

    /// Store a comment and bump the parent's `comment_count`.
    ///
    /// The count bump is best effort; its failure does not affect the result.
    pub async fn post_exchange_comment(
        &self,
        exchange_id: &str,
        author: &CommentAuthor,
        content: &str,
    ) -> Created<ExchangeComment> {
        let row = NewExchangeCommentRow::new(exchange_id, author, content);
        let comment = match insert_mapped::<_, ExchangeCommentRow, ExchangeComment>(
            &*self.query,
            EXCHANGE_COMMENTS_TABLE,
            &row,
        )
        .await
        {
            Ok(comment) => comment,
            Err(e) => {
                warn!(exchange_id, error = %e, "posting exchange comment failed, keeping local copy");
                return Created::Local {
                    record: ExchangeComment {
                        id: placeholders::local_id(),
                        exchange_id: exchange_id.to_string(),
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
            EXCHANGES_TABLE,
            exchange_id,
            "comment_count",
            self.counter_attempts,
        )
        .await
        {
            warn!(exchange_id, error = %e, "comment count not updated");
        }

        Created::Stored(comment)
    }

    /// Add one like. Repeated calls by the same user keep counting.
    pub async fn toggle_exchange_like(&self, exchange_id: &str, user_id: &str) -> LikeResult {
        match increment_counter(
            &*self.query,
            EXCHANGES_TABLE,
            exchange_id,
            "likes",
            self.counter_attempts,
        )
        .await
        {
            Ok(likes) => {
                debug!(exchange_id, user_id, likes, "liked exchange");
                LikeResult::OK
            }
            Err(e) => {
                warn!(exchange_id, user_id, error = %e, "liking exchange failed");
                LikeResult::FAILED
            }
        }
    }
}

fn local_exchange(draft: NewExchange) -> CourseExchange {
    CourseExchange {
        id: placeholders::local_id(),
        poster: draft.poster,
        have: draft.have,
        want_courses: draft.want_courses,
        reason: draft.reason,
        contacts: draft.contacts,
        status: ExchangeStatus::Open,
        created_at: Utc::now(),
        comment_count: 0,
        likes: 0,
    }
}
