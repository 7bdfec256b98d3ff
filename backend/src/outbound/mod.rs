//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **mail**: reqwest client for a JSON mail API
//! - **password**: bcrypt hash verification
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod mail;
pub mod password;
pub mod persistence;
