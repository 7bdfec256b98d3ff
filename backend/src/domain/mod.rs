//! Domain primitives, ports, and use-case services.
//!
//! Purpose: keep request validation, credential checks, and subscriber
//! bookkeeping free of HTTP and storage details. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - validation: the field-level rule-set executor.
//! - Subscriber, NewSubscriber, SubscriberPatch: subscriber records and the
//!   validated inputs that create or change them.
//! - LoginCredentials, UserAccount, UserId: authentication inputs and accounts.
//! - SideEffectDispatcher / SideEffectWorker: background audit and email jobs.

pub mod activity;
pub mod auth;
pub mod authentication_service;
pub mod error;
pub mod notification;
pub mod ports;
pub mod side_effects;
pub mod subscriber;
pub mod subscriber_service;
pub mod timeout;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::activity::{ActivityAction, ActivityRecord};
pub use self::auth::LoginCredentials;
pub use self::authentication_service::AuthenticationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{OutgoingEmail, WELCOME_SUBJECT};
pub use self::side_effects::{
    DEFAULT_QUEUE_CAPACITY, SideEffect, SideEffectDispatcher, SideEffectJob, SideEffectPorts,
    SideEffectWorker, spawn_side_effects,
};
pub use self::subscriber::{
    EMPTY_PATCH_MESSAGE, NewSubscriber, Subscriber, SubscriberId, SubscriberPatch,
};
pub use self::subscriber_service::SubscriberService;
pub use self::timeout::{CallError, CollaboratorTimeout};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserAccount, UserId, UserValidationError};
pub use self::validation::{ValidationFailure, ValidationRejection};
