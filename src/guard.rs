//! Edit policy for messages.
//!
//! A message can be changed only by its author and only during the first
//! [`MUTATION_WINDOW`] after creation. Once the window has passed the message
//! is reported as missing, to everyone, including its author.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use thiserror::Error;

use crate::{identity::Requester, models::Message};

pub const MUTATION_WINDOW: TimeDelta = TimeDelta::minutes(30);

pub const NOT_AUTHOR_MESSAGE: &str = "Only author of message can update";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationDenied {
    /// Older than the mutation window; must look exactly like a missing record.
    #[error("message not found")]
    Expired,
    #[error("{}", NOT_AUTHOR_MESSAGE)]
    NotAuthor,
}

/// Mutability state of a message at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Expired,
}

pub fn freshness(created: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
    if now - created > MUTATION_WINDOW {
        Freshness::Expired
    } else {
        Freshness::Fresh
    }
}

/// Decides whether `requester` may update `message` at `now`.
///
/// Expiry is checked before authorship. An unparseable creation timestamp
/// is treated as expired. `now` is cut to the microsecond precision that
/// creation timestamps are stored with.
pub fn check_update(
    message: &Message,
    requester: &Requester,
    now: DateTime<Utc>,
) -> Result<(), MutationDenied> {
    let created = match DateTime::parse_from_rfc3339(&message.created_at) {
        Ok(created) => created.with_timezone(&Utc),
        Err(err) => {
            log::warn!("message {} has invalid created_at: {err}", message.id);
            return Err(MutationDenied::Expired);
        }
    };

    if freshness(created, now.trunc_subsecs(6)) == Freshness::Expired {
        return Err(MutationDenied::Expired);
    }

    if !requester.is_author(message.author_id.as_deref()) {
        return Err(MutationDenied::NotAuthor);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::format_timestamp;
    use rstest::rstest;
    use uuid::Uuid;

    fn message(author: Option<Uuid>, created: DateTime<Utc>) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            text: "put_test".to_string(),
            room_id: Uuid::new_v4().to_string(),
            author_id: author.map(|id| id.to_string()),
            created_at: format_timestamp(created),
        }
    }

    #[rstest]
    #[case::just_created(0, Ok(()))]
    #[case::twenty_nine_minutes(29 * 60, Ok(()))]
    #[case::exactly_thirty_minutes(30 * 60, Ok(()))]
    #[case::one_second_late(30 * 60 + 1, Err(MutationDenied::Expired))]
    #[case::a_day_old(24 * 60 * 60, Err(MutationDenied::Expired))]
    fn author_can_edit_only_within_window(
        #[case] age_secs: i64,
        #[case] expected: Result<(), MutationDenied>,
    ) {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let msg = message(Some(author), now - TimeDelta::seconds(age_secs));

        assert_eq!(check_update(&msg, &Requester::User(author), now), expected);
    }

    #[test]
    fn stored_precision_does_not_shorten_the_window() {
        let author = Uuid::new_v4();
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:30:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        let msg = message(Some(author), now - MUTATION_WINDOW);
        assert_eq!(msg.created_at, "2024-05-01T12:00:00.123456Z");

        assert_eq!(check_update(&msg, &Requester::User(author), now), Ok(()));
    }

    #[rstest]
    #[case::other_user(Requester::User(Uuid::new_v4()))]
    #[case::anonymous(Requester::Anonymous)]
    fn non_author_is_rejected_while_fresh(#[case] requester: Requester) {
        let now = Utc::now();
        let msg = message(Some(Uuid::new_v4()), now - TimeDelta::minutes(5));

        assert_eq!(
            check_update(&msg, &requester, now),
            Err(MutationDenied::NotAuthor)
        );
    }

    #[rstest]
    #[case::other_user(Requester::User(Uuid::new_v4()))]
    #[case::anonymous(Requester::Anonymous)]
    fn expiry_wins_over_authorship(#[case] requester: Requester) {
        let now = Utc::now();
        let msg = message(Some(Uuid::new_v4()), now - TimeDelta::minutes(31));

        assert_eq!(
            check_update(&msg, &requester, now),
            Err(MutationDenied::Expired)
        );
    }

    #[test]
    fn message_without_author_cannot_be_edited() {
        let now = Utc::now();
        let msg = message(None, now);

        assert_eq!(
            check_update(&msg, &Requester::User(Uuid::new_v4()), now),
            Err(MutationDenied::NotAuthor)
        );
        assert_eq!(
            check_update(&msg, &Requester::Anonymous, now),
            Err(MutationDenied::NotAuthor)
        );
    }

    #[test]
    fn garbage_timestamp_is_treated_as_expired() {
        let author = Uuid::new_v4();
        let mut msg = message(Some(author), Utc::now());
        msg.created_at = "yesterday".to_string();

        assert_eq!(
            check_update(&msg, &Requester::User(author), Utc::now()),
            Err(MutationDenied::Expired)
        );
    }

    #[test]
    fn not_author_error_carries_the_client_message() {
        assert_eq!(
            MutationDenied::NotAuthor.to_string(),
            "Only author of message can update"
        );
    }
}
