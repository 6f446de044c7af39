//! Time capsule: a message sealed until a reveal date.
//!
//! The locked/revealed state is never stored. It is recomputed from the
//! clock every time the capsule is looked at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::ValidationError;
use crate::validation::require;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCapsule {
    #[serde(default)]
    pub id: String,
    pub message: String,
    pub reveal_date: DateTime<Utc>,
}

/// What a reader may see right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapsuleState<'a> {
    Locked { days_remaining: i64 },
    Revealed { message: &'a str },
}

impl TimeCapsule {
    /// Seal `message` until `reveal_date`, which may not lie before `now`.
    pub fn lock(
        message: &str,
        reveal_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require("message", message)?;
        if reveal_date < now {
            return Err(ValidationError::DateInPast {
                field: "revealDate",
            });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            message: message.trim().to_string(),
            reveal_date,
        })
    }

    pub fn is_revealed(&self, now: DateTime<Utc>) -> bool {
        self.reveal_date <= now
    }

    /// Locked while the reveal date is in the future. Days remaining are
    /// rounded up, so anything under a day left reads as 1.
    pub fn state(&self, now: DateTime<Utc>) -> CapsuleState<'_> {
        if self.is_revealed(now) {
            return CapsuleState::Revealed {
                message: &self.message,
            };
        }
        let secs = (self.reveal_date - now).num_seconds();
        CapsuleState::Locked {
            days_remaining: (secs + SECS_PER_DAY - 1) / SECS_PER_DAY,
        }
    }
}

impl Resource for TimeCapsule {
    const PATH: &'static str = "/timecapsule";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 29, 10, 0, 0).unwrap()
    }

    fn capsule(reveal: DateTime<Utc>) -> TimeCapsule {
        TimeCapsule {
            id: "c1".into(),
            message: "Hello, future me".into(),
            reveal_date: reveal,
        }
    }

    #[test]
    fn tomorrow_is_locked() {
        let c = capsule(now() + Duration::days(1));
        let state = c.state(now());
        assert_eq!(state, CapsuleState::Locked { days_remaining: 1 });
    }

    #[test]
    fn yesterday_is_revealed_with_message() {
        let c = capsule(now() - Duration::days(1));
        assert_eq!(
            c.state(now()),
            CapsuleState::Revealed {
                message: "Hello, future me"
            }
        );
    }

    #[test]
    fn reveal_instant_counts_as_revealed() {
        assert!(capsule(now()).is_revealed(now()));
    }

    #[test]
    fn partial_days_round_up() {
        let c = capsule(now() + Duration::days(2) + Duration::hours(1));
        assert_eq!(c.state(now()), CapsuleState::Locked { days_remaining: 3 });
        let c = capsule(now() + Duration::minutes(5));
        assert_eq!(c.state(now()), CapsuleState::Locked { days_remaining: 1 });
    }

    #[test]
    fn state_follows_the_clock() {
        let c = capsule(now() + Duration::hours(3));
        assert!(matches!(c.state(now()), CapsuleState::Locked { .. }));
        assert!(matches!(
            c.state(now() + Duration::hours(3)),
            CapsuleState::Revealed { .. }
        ));
    }

    #[test]
    fn lock_validates_message_and_date() {
        assert_eq!(
            TimeCapsule::lock("", now() + Duration::days(1), now()),
            Err(ValidationError::MissingField("message"))
        );
        assert!(matches!(
            TimeCapsule::lock("hi", now() - Duration::seconds(1), now()),
            Err(ValidationError::DateInPast { .. })
        ));
        assert!(TimeCapsule::lock("hi", now() + Duration::days(30), now()).is_ok());
    }
}
