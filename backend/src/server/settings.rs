//! Application settings loaded via OrthoConfig.
//!
//! Values come from `SUBSCRIBERS_*` environment variables and matching CLI
//! flags. Everything is optional; accessors apply the defaults.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use subscriber_api::domain::{CollaboratorTimeout, DEFAULT_QUEUE_CAPACITY};
use subscriber_api::outbound::mail::MailApiSettings;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_COLLABORATOR_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MAIL_SENDER: &str = "noreply@localhost";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for {name}='{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl SettingsError {
    fn invalid(name: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            name,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Runtime configuration for the subscriber API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUBSCRIBERS")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Without it the in-memory adapters are used.
    pub database_url: Option<String>,
    /// Replaces the database named in `database_url`.
    pub database_name: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Upper bound for every collaborator call, in milliseconds.
    pub collaborator_timeout_ms: Option<u64>,
    /// JSON mail API endpoint. Without it outgoing mail is only logged.
    pub mail_api_url: Option<String>,
    /// Bearer token for the mail API.
    pub mail_api_token: Option<String>,
    /// `from` address for outgoing mail.
    pub mail_sender: Option<String>,
    /// Pending side effects held before new ones are dropped.
    pub side_effect_queue_capacity: Option<usize>,
}

impl AppSettings {
    /// Socket address assembled from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host
            .parse()
            .map_err(|err| SettingsError::invalid("host", host, err))?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL with the `database_name` override applied.
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        let Some(raw) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let Some(name) = self.database_name.as_deref() else {
            return Ok(Some(raw.to_owned()));
        };
        let mut url = Url::parse(raw)
            .map_err(|err| SettingsError::invalid("database_url", "<redacted>", err))?;
        url.set_path(&format!("/{name}"));
        Ok(Some(url.into()))
    }

    pub fn collaborator_timeout(&self) -> CollaboratorTimeout {
        CollaboratorTimeout::from_millis(
            self.collaborator_timeout_ms
                .unwrap_or(DEFAULT_COLLABORATOR_TIMEOUT_MS),
        )
    }

    pub fn side_effect_queue_capacity(&self) -> usize {
        self.side_effect_queue_capacity
            .filter(|capacity| *capacity > 0)
            .unwrap_or(DEFAULT_QUEUE_CAPACITY)
    }

    /// Mail API settings, present only when `mail_api_url` is set.
    pub fn mail_api(&self) -> Result<Option<MailApiSettings>, SettingsError> {
        let Some(raw) = self.mail_api_url.as_deref() else {
            return Ok(None);
        };
        let endpoint =
            Url::parse(raw).map_err(|err| SettingsError::invalid("mail_api_url", raw, err))?;
        Ok(Some(MailApiSettings {
            endpoint,
            token: self.mail_api_token.clone().map(Zeroizing::new),
            sender: self
                .mail_sender
                .clone()
                .unwrap_or_else(|| DEFAULT_MAIL_SENDER.to_owned()),
        }))
    }
}
