//! Fixed placeholder data served when the backend cannot be reached, so the
//! exchange and teaming boards stay populated offline and in demos.
//!
//! Content is fixed; timestamps are offsets from `now`.

use crate::domain::{
    CommentAuthor, ContactMethod, ContactPlatform, CourseExchange, CourseTeaming,
    ExchangeComment, ExchangeCourseDetail, ExchangeStatus, Poster, TeamingComment, TeamingStatus,
};
use chrono::{DateTime, Duration, Utc};

/// Id for a record that only exists client-side.
pub fn local_id() -> String {
    format!("local-{}", uuid::Uuid::new_v4())
}

fn detail(code: &str, section: Option<&str>, instructor: Option<&str>, time: Option<&str>) -> ExchangeCourseDetail {
    ExchangeCourseDetail {
        code: code.to_string(),
        section: section.map(String::from),
        instructor: instructor.map(String::from),
        time: time.map(String::from),
    }
}

fn poster(id: &str, name: &str, avatar: &str, major: &str) -> Poster {
    Poster {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        major: Some(major.to_string()),
    }
}

fn author(id: &str, name: &str, avatar: &str) -> CommentAuthor {
    CommentAuthor {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
    }
}

pub fn exchanges(now: DateTime<Utc>) -> Vec<CourseExchange> {
    vec![
        CourseExchange {
            id: "mock1".to_string(),
            poster: poster("u1", "Zhang Wei", "👤", "Computer Science"),
            have: detail("COMP3015", Some("Sec1"), Some("Dr. Smith"), Some("Mon 2:30 PM")),
            want_courses: vec![
                detail("COMP3011", Some("Sec2"), Some("Prof. Wong"), Some("Wed 10:30 AM")),
                detail("COMP3016", Some("Sec1"), None, None),
            ],
            reason: Some("Time conflict with my other core course.".to_string()),
            contacts: vec![
                ContactMethod::new(ContactPlatform::WeChat, "zw12345"),
                ContactMethod::new(ContactPlatform::Email, "wei.zhang@example.com"),
            ],
            status: ExchangeStatus::Open,
            created_at: now,
            comment_count: 2,
            likes: 5,
        },
        CourseExchange {
            id: "mock2".to_string(),
            poster: poster("u2", "Sarah Lee", "👩‍🎓", "Marketing"),
            have: detail("MKTG2005", Some("Sec3"), Some("Dr. Johnson"), Some("Tue 1:00 PM")),
            want_courses: vec![
                detail("MKTG3010", Some("Sec1"), None, None),
                detail("MKTG3020", None, None, None),
            ],
            reason: None,
            contacts: vec![ContactMethod::new(ContactPlatform::WhatsApp, "98765432")],
            status: ExchangeStatus::Open,
            created_at: now - Duration::days(1),
            comment_count: 0,
            likes: 2,
        },
    ]
}

pub fn exchange_comments(exchange_id: &str, now: DateTime<Utc>) -> Vec<ExchangeComment> {
    vec![
        ExchangeComment {
            id: "c1".to_string(),
            exchange_id: exchange_id.to_string(),
            author: author("u3", "David Wong", "👨‍🎓"),
            content: "Is this COMP3015 section 1 or 2?".to_string(),
            created_at: now - Duration::hours(1),
        },
        ExchangeComment {
            id: "c2".to_string(),
            exchange_id: exchange_id.to_string(),
            author: author("u1", "Zhang Wei", "👤"),
            content: "It is section 1.".to_string(),
            created_at: now - Duration::minutes(30),
        },
    ]
}

pub fn teaming_requests(course_id: &str, now: DateTime<Utc>) -> Vec<CourseTeaming> {
    vec![CourseTeaming {
        id: "t1".to_string(),
        course_id: course_id.to_string(),
        poster: poster("u1", "Zhang Wei", "👤", "Computer Science"),
        section: "Sec1".to_string(),
        self_intro: Some("I am a Year 3 student proficient in Python and React.".to_string()),
        target_teammate: Some(
            "Looking for someone who is responsible and can contribute to the frontend."
                .to_string(),
        ),
        contacts: vec![ContactMethod::new(ContactPlatform::WeChat, "zw12345")],
        status: TeamingStatus::Open,
        created_at: now - Duration::days(1),
        likes: 3,
        comment_count: 1,
    }]
}

pub fn teaming_comments(teaming_id: &str, now: DateTime<Utc>) -> Vec<TeamingComment> {
    vec![TeamingComment {
        id: "tc1".to_string(),
        teaming_id: teaming_id.to_string(),
        author: author("u5", "David Chen", "👨‍🎓"),
        content: "I am interested! I am in Sec1 too.".to_string(),
        created_at: now - Duration::hours(1),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_bound_to_requested_parent() {
        let now = Utc::now();
        assert!(exchange_comments("ex-9", now)
            .iter()
            .all(|c| c.exchange_id == "ex-9"));
        assert_eq!(teaming_requests("COMP3015", now)[0].course_id, "COMP3015");
        assert_eq!(teaming_comments("t-4", now)[0].teaming_id, "t-4");
    }

    #[test]
    fn test_placeholder_comments_ascending() {
        let comments = exchange_comments("ex-1", Utc::now());
        assert!(comments[0].created_at < comments[1].created_at);
    }

    #[test]
    fn test_local_ids_unique() {
        assert_ne!(local_id(), local_id());
        assert!(local_id().starts_with("local-"));
    }
}
