//! Mailer configuration

use std::path::PathBuf;

use clap::Parser;

use crate::domain::mail::{Credentials, DeliveryMethod, TransportSettings};

/// Optional transport configuration.
///
/// Every field is independently present-or-absent; a present field overwrites
/// the corresponding transport setting, an absent field leaves the
/// pre-existing value untouched. Applied exactly once, when the sender is
/// constructed.
#[derive(Clone, Default, Debug, Parser)]
pub struct MailerConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: Option<String>,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: Option<u16>,

    /// Upgrade the connection with STARTTLS
    #[clap(long, env = "SMTP_USE_TLS")]
    pub use_tls: Option<bool>,

    /// How messages leave the client
    #[clap(long, env = "SMTP_DELIVERY_METHOD", value_enum)]
    pub delivery_method: Option<DeliveryMethod>,

    /// Skip explicit authentication and let the environment decide
    #[clap(long, env = "SMTP_USE_DEFAULT_CREDENTIALS")]
    pub use_default_credentials: Option<bool>,

    /// Explicit relay credentials, set programmatically
    #[clap(skip)]
    pub credentials: Option<Credentials>,

    /// Directory messages are written to under pickup delivery
    #[clap(long, env = "SMTP_PICKUP_DIRECTORY")]
    pub pickup_directory: Option<PathBuf>,
}

impl MailerConfig {
    /// Applies every present field to `settings`, leaving absent fields
    /// untouched. Nothing is ever cleared back to a default.
    pub fn apply(self, settings: &mut TransportSettings) {
        if let Some(host) = self.host {
            settings.host = host;
        }

        if let Some(port) = self.port {
            settings.port = port;
        }

        if let Some(use_tls) = self.use_tls {
            settings.use_tls = use_tls;
        }

        if let Some(delivery_method) = self.delivery_method {
            settings.delivery_method = delivery_method;
        }

        if let Some(use_default_credentials) = self.use_default_credentials {
            settings.use_default_credentials = use_default_credentials;
        }

        if let Some(credentials) = self.credentials {
            settings.credentials = Some(credentials);
        }

        if let Some(pickup_directory) = self.pickup_directory {
            settings.pickup_directory = Some(pickup_directory);
        }
    }
}
