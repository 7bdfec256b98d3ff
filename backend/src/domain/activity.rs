//! Audit records appended on login and logout.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Session transition recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Login,
    Logout,
}

impl ActivityAction {
    /// Label stored alongside the record.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    action: ActivityAction,
    user_id: Option<UserId>,
    timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(action: ActivityAction, user_id: Option<UserId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            action,
            user_id,
            timestamp,
        }
    }

    /// Stamp `action` with the clock's current time.
    pub fn now(action: ActivityAction, user_id: Option<UserId>, clock: &dyn Clock) -> Self {
        Self::new(action, user_id, clock.utc())
    }

    pub fn action(&self) -> ActivityAction {
        self.action
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
