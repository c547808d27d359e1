//! Message entity - a short note that vanishes 24 hours after it was posted

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Message entity
///
/// `expires_at` is derived once, at creation, and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub content: String,
    pub author_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Message {
    /// Lifetime of every message, in hours
    pub const TTL_HOURS: i64 = 24;

    /// Shortest accepted content, in characters
    pub const MIN_CONTENT_CHARS: usize = 1;

    /// Longest accepted content, in characters
    pub const MAX_CONTENT_CHARS: usize = 500;

    /// Create a new Message posted at `now`
    ///
    /// # Errors
    /// Returns `DomainError::ContentLength` if the content is empty or longer
    /// than 500 characters.
    pub fn new(
        id: Snowflake,
        content: String,
        author_id: Option<Snowflake>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_content(&content)?;

        Ok(Self {
            id,
            content,
            author_id,
            created_at: now,
            expires_at: now + message_ttl(),
        })
    }

    /// Check if the message was posted without a signed-in author
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.author_id.is_none()
    }

    /// Check if the message was posted by `user_id`
    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == Some(user_id)
    }

    /// A message is expired from the instant `expires_at` is reached
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now)
    }

    /// Time left before the message vanishes (zero once expired)
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    /// Share of the lifetime still left, from 1.0 at creation down to 0.0
    pub fn remaining_fraction(&self, now: DateTime<Utc>) -> f64 {
        let total = (self.expires_at - self.created_at).num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        let left = self.remaining(now).num_milliseconds();
        (left as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Leading `max_chars` characters of the content
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}

/// Fixed lifetime applied to every message
#[inline]
pub fn message_ttl() -> Duration {
    Duration::hours(Message::TTL_HOURS)
}

/// Validate message content length, counted in Unicode scalar values
///
/// # Errors
/// Returns `DomainError::ContentLength` when the length is outside 1..=500.
pub fn validate_content(content: &str) -> Result<(), DomainError> {
    let len = content.chars().count();
    if (Message::MIN_CONTENT_CHARS..=Message::MAX_CONTENT_CHARS).contains(&len) {
        Ok(())
    } else {
        Err(DomainError::ContentLength {
            len,
            min: Message::MIN_CONTENT_CHARS,
            max: Message::MAX_CONTENT_CHARS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn message(content: &str) -> Message {
        Message::new(Snowflake::new(1), content.to_string(), None, t0()).unwrap()
    }

    #[test]
    fn test_message_expires_exactly_24h_after_creation() {
        for len in [1, 2, 250, 499, 500] {
            let msg = message(&"a".repeat(len));
            assert_eq!(msg.expires_at - msg.created_at, Duration::hours(24));
            assert_eq!(msg.created_at, t0());
        }
    }

    #[test]
    fn test_content_length_bounds() {
        assert!(matches!(
            Message::new(Snowflake::new(1), String::new(), None, t0()),
            Err(DomainError::ContentLength { len: 0, .. })
        ));
        assert!(matches!(
            Message::new(Snowflake::new(1), "a".repeat(501), None, t0()),
            Err(DomainError::ContentLength { len: 501, .. })
        ));
    }

    #[test]
    fn test_content_length_counts_characters_not_bytes() {
        // 500 multi-byte characters are still 500 characters
        let content = "é".repeat(500);
        assert!(content.len() > 500);
        assert!(validate_content(&content).is_ok());
        assert!(validate_content(&"é".repeat(501)).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let msg = message("hello");
        assert!(msg.is_active(t0()));
        assert!(msg.is_active(msg.expires_at - Duration::seconds(1)));
        assert!(msg.is_expired(msg.expires_at));
        assert!(msg.is_expired(msg.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_remaining_time() {
        let msg = message("hello");
        assert_eq!(msg.remaining(t0() + Duration::hours(1)), Duration::hours(23));
        assert_eq!(msg.remaining(t0() + Duration::hours(30)), Duration::zero());
    }

    #[test]
    fn test_remaining_fraction() {
        let msg = message("hello");
        assert!((msg.remaining_fraction(t0()) - 1.0).abs() < f64::EPSILON);
        assert!((msg.remaining_fraction(t0() + Duration::hours(12)) - 0.5).abs() < 1e-9);
        assert!(msg.remaining_fraction(t0() + Duration::hours(48)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_authorship() {
        let anon = message("hi");
        assert!(anon.is_anonymous());

        let owned = Message::new(
            Snowflake::new(2),
            "mine".to_string(),
            Some(Snowflake::new(42)),
            t0(),
        )
        .unwrap();
        assert!(!owned.is_anonymous());
        assert!(owned.is_authored_by(Snowflake::new(42)));
        assert!(!owned.is_authored_by(Snowflake::new(43)));
    }

    #[test]
    fn test_message_preview() {
        let msg = message("Hello, world!");
        assert_eq!(msg.preview(5), "Hello");
        assert_eq!(msg.preview(100), "Hello, world!");

        let msg = message("héllo");
        assert_eq!(msg.preview(2), "hé");
    }
}
