//! Intake server settings and the server configuration object.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use intake::inbound::http::session_config::SessionInputs;
use intake::outbound::record_store::PocketBaseConfig;
use url::Url;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STAFF_COLLECTION: &str = "staff";

/// Settings for the intake server, loaded from CLI, `INTAKE_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INTAKE")]
pub struct IntakeSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Base URL of the hosted record store. The in-memory store is used when
    /// absent.
    pub record_store_url: Option<String>,
    /// Token sent in the `Authorization` header to the record store.
    pub record_store_token: Option<String>,
    /// Record store request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Auth collection holding staff accounts.
    pub staff_collection: Option<String>,
    /// File holding the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Mark session cookies `Secure`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for session cookies.
    pub same_site: Option<String>,
    /// Staff account registered with the in-memory store, as `user:password`.
    pub dev_staff_account: Option<String>,
}

impl IntakeSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn staff_collection(&self) -> &str {
        self.staff_collection
            .as_deref()
            .unwrap_or(DEFAULT_STAFF_COLLECTION)
    }

    /// Split `dev_staff_account` into username and password.
    pub fn dev_staff_account(&self) -> Option<(&str, &str)> {
        self.dev_staff_account
            .as_deref()
            .and_then(|raw| raw.split_once(':'))
            .filter(|(user, password)| !user.trim().is_empty() && !password.is_empty())
    }

    /// Record store adapter selected by these settings.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when `record_store_url` is not a URL.
    pub fn record_store_choice(&self) -> Result<RecordStoreChoice, url::ParseError> {
        let Some(raw) = self.record_store_url.as_deref() else {
            return Ok(RecordStoreChoice::InMemory {
                staff_account: self
                    .dev_staff_account()
                    .map(|(user, password)| (user.to_owned(), password.to_owned())),
            });
        };
        Ok(RecordStoreChoice::PocketBase(PocketBaseConfig {
            base_url: Url::parse(raw)?,
            api_token: self.record_store_token.clone(),
            timeout: self.request_timeout(),
            staff_collection: self.staff_collection().to_owned(),
        }))
    }

    /// Session toggles for [`intake::inbound::http::session_config::session_settings`].
    pub fn session_inputs(&self) -> SessionInputs {
        SessionInputs {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE)),
            cookie_secure: self.cookie_secure,
            same_site: self.same_site.clone(),
            allow_ephemeral: self.allow_ephemeral_session_key,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) record_store: RecordStoreChoice,
}

/// Which record store backs the intake flows.
#[derive(Debug, Clone)]
pub enum RecordStoreChoice {
    /// Process-local store, optionally with one staff account.
    InMemory {
        staff_account: Option<(String, String)>,
    },
    /// Hosted PocketBase instance.
    PocketBase(PocketBaseConfig),
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            record_store: RecordStoreChoice::InMemory {
                staff_account: None,
            },
        }
    }

    /// Select the record store adapter.
    #[must_use]
    pub fn with_record_store(mut self, record_store: RecordStoreChoice) -> Self {
        self.record_store = record_store;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for intake settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "INTAKE_BIND_ADDR",
        "INTAKE_RECORD_STORE_URL",
        "INTAKE_RECORD_STORE_TOKEN",
        "INTAKE_REQUEST_TIMEOUT_SECS",
        "INTAKE_STAFF_COLLECTION",
        "INTAKE_SESSION_KEY_FILE",
        "INTAKE_ALLOW_EPHEMERAL_SESSION_KEY",
        "INTAKE_COOKIE_SECURE",
        "INTAKE_SAME_SITE",
        "INTAKE_DEV_STAFF_ACCOUNT",
    ];

    fn load_from_empty_args() -> IntakeSettings {
        IntakeSettings::load_from_iter([OsString::from("intake")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(settings.record_store_url.is_none());
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.staff_collection(), "staff");
        assert!(!settings.allow_ephemeral_session_key);

        let inputs = settings.session_inputs();
        assert_eq!(inputs.key_file, PathBuf::from(DEFAULT_SESSION_KEY_FILE));
        assert!(inputs.cookie_secure.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "INTAKE_BIND_ADDR" => Some("127.0.0.1:9000"),
                "INTAKE_RECORD_STORE_URL" => Some("http://pb.local:8090"),
                "INTAKE_REQUEST_TIMEOUT_SECS" => Some("3"),
                "INTAKE_STAFF_COLLECTION" => Some("clerks"),
                "INTAKE_COOKIE_SECURE" => Some("false"),
                "INTAKE_DEV_STAFF_ACCOUNT" => Some("clerk:s3cret"),
                _ => None,
            };
            (name, value.map(str::to_owned))
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(
            settings.record_store_url.as_deref(),
            Some("http://pb.local:8090")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.staff_collection(), "clerks");
        assert_eq!(settings.session_inputs().cookie_secure, Some(false));
        assert_eq!(settings.dev_staff_account(), Some(("clerk", "s3cret")));

        match settings.record_store_choice().expect("valid store URL") {
            RecordStoreChoice::PocketBase(config) => {
                assert_eq!(config.base_url.as_str(), "http://pb.local:8090/");
                assert_eq!(config.staff_collection, "clerks");
                assert_eq!(config.timeout, Duration::from_secs(3));
            }
            other => panic!("expected hosted store, got {other:?}"),
        }
    }

    #[rstest]
    fn missing_store_url_selects_memory_with_dev_account() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "INTAKE_DEV_STAFF_ACCOUNT").then(|| "clerk:s3cret".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        match settings.record_store_choice().expect("in-memory choice") {
            RecordStoreChoice::InMemory { staff_account } => assert_eq!(
                staff_account,
                Some(("clerk".to_owned(), "s3cret".to_owned()))
            ),
            other => panic!("expected in-memory store, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_store_url_is_rejected() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "INTAKE_RECORD_STORE_URL").then(|| "not a url".to_owned());
            (name, value)
        }));

        assert!(load_from_empty_args().record_store_choice().is_err());
    }
}
