//! Subscriber records managed through the `/api/subscribers` routes.
//!
//! Writes only accept values that passed the subscriber rule-set. Bodies are
//! whitelisted: only `name`, `email`, `subs_date` and `description` are read,
//! anything else in the payload is dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{FieldSource, ValidationRejection, subscriber_rules};

/// Message used when a patch body names none of the subscriber fields.
pub const EMPTY_PATCH_MESSAGE: &str =
    "At least one of name, email, subs_date or description is required";

/// Stable subscriber identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SubscriberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Stored subscriber.
///
/// Serialised with snake_case keys, the same shape the request bodies use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    id: SubscriberId,
    name: String,
    email: String,
    /// Subscription date as `YYYY-MM-DD`.
    subs_date: String,
    description: String,
}

impl Subscriber {
    /// Assign `id` to a validated draft.
    pub fn new(id: SubscriberId, draft: NewSubscriber) -> Self {
        let NewSubscriber {
            name,
            email,
            subs_date,
            description,
        } = draft;
        Self {
            id,
            name,
            email,
            subs_date,
            description,
        }
    }

    /// Rehydrate a subscriber from trusted storage without re-validating.
    pub fn from_parts(
        id: SubscriberId,
        name: impl Into<String>,
        email: impl Into<String>,
        subs_date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            subs_date: subs_date.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn subs_date(&self) -> &str {
        self.subs_date.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Subscriber fields that passed the full rule-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    name: String,
    email: String,
    subs_date: String,
    description: String,
}

impl NewSubscriber {
    /// Validate every subscriber field in `source`.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use subscriber_api::domain::NewSubscriber;
    ///
    /// let body = json!({
    ///     "name": "Ada",
    ///     "email": "ada@example.com",
    ///     "subs_date": "2024-01-01",
    ///     "description": "Weekly digest",
    /// });
    /// let draft = NewSubscriber::try_from_fields(body.as_object().unwrap()).unwrap();
    /// assert_eq!(draft.email(), "ada@example.com");
    /// ```
    pub fn try_from_fields<S>(source: &S) -> Result<Self, ValidationRejection>
    where
        S: FieldSource + ?Sized,
    {
        subscriber_rules().validate(source).into_outcome()?;
        let read = |field: &str| source.value(field).unwrap_or_default().into_owned();
        Ok(Self {
            name: read("name"),
            email: read("email"),
            subs_date: read("subs_date"),
            description: read("description"),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn subs_date(&self) -> &str {
        self.subs_date.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Partial update for a stored subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberPatch {
    name: Option<String>,
    email: Option<String>,
    subs_date: Option<String>,
    description: Option<String>,
}

impl SubscriberPatch {
    /// Validate only the subscriber fields present in `source`.
    ///
    /// A body with none of the four fields is rejected with a single `body`
    /// failure.
    pub fn try_from_fields<S>(source: &S) -> Result<Self, ValidationRejection>
    where
        S: FieldSource + ?Sized,
    {
        let rules = subscriber_rules();
        if !rules.fields().any(|field| source.contains(field)) {
            return Err(ValidationRejection::single("body", EMPTY_PATCH_MESSAGE));
        }
        rules.validate_present(source).into_outcome()?;
        let read = |field: &str| {
            source
                .contains(field)
                .then(|| source.value(field).unwrap_or_default().into_owned())
        };
        Ok(Self {
            name: read("name"),
            email: read("email"),
            subs_date: read("subs_date"),
            description: read("description"),
        })
    }

    /// Overlay the present fields onto `current`.
    #[must_use]
    pub fn apply(&self, current: Subscriber) -> Subscriber {
        let Subscriber {
            id,
            name,
            email,
            subs_date,
            description,
        } = current;
        Subscriber {
            id,
            name: self.name.clone().unwrap_or(name),
            email: self.email.clone().unwrap_or(email),
            subs_date: self.subs_date.clone().unwrap_or(subs_date),
            description: self.description.clone().unwrap_or(description),
        }
    }
}
