//! Mail transport seam

use std::{fmt, path::PathBuf};

use clap::ValueEnum;

#[cfg(test)]
use mockall::mock;

use crate::domain::mail::{errors::TransportError, Message};

/// How messages leave the transport client
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DeliveryMethod {
    /// Deliver over the network to an SMTP relay
    #[default]
    Network,

    /// Write each message into the configured pickup directory
    SpecifiedPickupDirectory,
}

/// Credentials for authenticating against a mail relay
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Get the username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Mutable configuration state of a transport client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportSettings {
    /// Relay host
    pub host: String,

    /// Relay port
    pub port: u16,

    /// Upgrade the connection with STARTTLS
    pub use_tls: bool,

    /// Dispatch mechanism
    pub delivery_method: DeliveryMethod,

    /// When set, no explicit credentials are attached to the session
    pub use_default_credentials: bool,

    /// Explicit relay credentials
    pub credentials: Option<Credentials>,

    /// Directory messages are written to under pickup delivery
    pub pickup_directory: Option<PathBuf>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 25,
            use_tls: false,
            delivery_method: DeliveryMethod::Network,
            use_default_credentials: false,
            credentials: None,
            pickup_directory: None,
        }
    }
}

/// A disposable mail transport client
pub trait MailTransport {
    /// Read access to the client's configuration state
    fn settings(&self) -> &TransportSettings;

    /// Mutable access to the client's configuration state
    fn settings_mut(&mut self) -> &mut TransportSettings;

    /// Deliver a message, blocking until it is accepted or refused.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the transport has accepted the
    /// message, or an [`Err`] containing a [`TransportError`] if assembly or
    /// delivery failed. There is no partial success.
    fn send(&mut self, message: &Message) -> Result<(), TransportError>;

    /// Release the client's resources. Safe to call more than once.
    fn close(&mut self);
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl MailTransport for MailTransport {
        fn settings(&self) -> &TransportSettings;
        fn settings_mut(&mut self) -> &mut TransportSettings;
        fn send(&mut self, message: &Message) -> Result<(), TransportError>;
        fn close(&mut self);
    }
}
