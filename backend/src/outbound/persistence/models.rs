//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{activity_logs, subscribers, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscribers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriberRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subs_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscribers)]
pub(crate) struct NewSubscriberRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub subs_date: &'a str,
    pub description: &'a str,
}

/// Full replacement of the mutable subscriber columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subscribers)]
pub(crate) struct SubscriberUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub subs_date: &'a str,
    pub description: &'a str,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_logs)]
pub(crate) struct NewActivityLogRow<'a> {
    pub action: &'a str,
    pub user_id: Option<Uuid>,
    pub recorded_at: DateTime<Utc>,
}
