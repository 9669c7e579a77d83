//! SMTP transport adapter

use std::fmt;

use anyhow::anyhow;
use lettre::{
    address::Address,
    message::{header, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication,
    FileTransport, SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::mail::{
    errors::TransportError, value_objects::EmailAddress, AlternateView, DeliveryMethod,
    MailSender, MailTransport, MailerConfig, MarkdownRenderer, Message, TransportSettings,
};

/// Transport client delivering through `lettre`.
///
/// Network delivery goes through a lazily-built SMTP relay that is cached
/// between sends; pickup delivery writes each message into the configured
/// pickup directory instead.
#[derive(Default)]
pub struct SmtpClient {
    settings: TransportSettings,
    relay: Option<SmtpTransport>,
}

impl SmtpClient {
    /// Creates a client with default settings: `localhost:25`, network
    /// delivery, no TLS and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with the given settings.
    pub fn with_settings(settings: TransportSettings) -> Self {
        Self {
            settings,
            relay: None,
        }
    }

    fn build_relay(&self) -> Result<SmtpTransport, TransportError> {
        let builder = if self.settings.use_tls {
            SmtpTransport::starttls_relay(&self.settings.host)?
        } else {
            SmtpTransport::builder_dangerous(&self.settings.host)
        };

        let mut builder = builder.port(self.settings.port);

        if !self.settings.use_default_credentials {
            if let Some(credentials) = &self.settings.credentials {
                builder = builder.credentials(authentication::Credentials::new(
                    credentials.username().to_owned(),
                    credentials.password().to_owned(),
                ));
            }
        }

        debug!(
            "built SMTP relay for {}:{}",
            self.settings.host, self.settings.port
        );

        Ok(builder.build())
    }

    fn compose(&self, message: &Message) -> Result<lettre::Message, TransportError> {
        let builder = lettre::Message::builder()
            .from(mailbox(&message.from)?)
            .to(mailbox(&message.to)?)
            .subject(message.subject.clone());

        let first = match message.views.first() {
            Some(view) => view,
            // no views assembled; fall back to the raw body as plain text
            None => {
                return Ok(builder
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(message.body.clone())?)
            }
        };

        let mut alternative = MultiPart::alternative().singlepart(single_part(first)?);

        for view in &message.views[1..] {
            alternative = alternative.singlepart(single_part(view)?);
        }

        Ok(builder.multipart(alternative)?)
    }
}

fn mailbox(address: &EmailAddress) -> Result<Mailbox, TransportError> {
    let parsed = address.address().parse::<Address>()?;

    Ok(Mailbox::new(
        address.display_name().map(str::to_owned),
        parsed,
    ))
}

fn single_part(view: &AlternateView) -> Result<SinglePart, TransportError> {
    Ok(SinglePart::builder()
        .header(header::ContentType::parse(&view.content_type)?)
        .body(view.content.clone()))
}

impl fmt::Debug for SmtpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpClient")
            .field("settings", &self.settings)
            .field("relay_cached", &self.relay.is_some())
            .finish()
    }
}

impl MailTransport for SmtpClient {
    fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut TransportSettings {
        &mut self.settings
    }

    fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        let email = self.compose(message)?;

        match self.settings.delivery_method {
            DeliveryMethod::Network => {
                if self.relay.is_none() {
                    self.relay = Some(self.build_relay()?);
                }

                if let Some(relay) = &self.relay {
                    relay.send(&email)?;
                }
            }
            DeliveryMethod::SpecifiedPickupDirectory => {
                let directory = self.settings.pickup_directory.as_deref().ok_or_else(|| {
                    TransportError::InvalidMessage(anyhow!(
                        "pickup delivery requires a pickup directory"
                    ))
                })?;

                debug!(
                    "writing message into pickup directory {}",
                    directory.display()
                );

                FileTransport::new(directory).send(&email)?;
            }
        }

        Ok(())
    }

    fn close(&mut self) {
        self.relay = None;
    }
}

impl<R> MailSender<SmtpClient, R>
where
    R: MarkdownRenderer + Default,
{
    /// Creates a sender over a default SMTP client, with no configuration
    /// applied.
    pub fn new() -> Self {
        Self::with_transport(SmtpClient::new())
    }

    /// Creates a sender over a default SMTP client, applying `config` on top
    /// of the client's defaults.
    pub fn with_config(config: MailerConfig) -> Self {
        Self::with_transport_and_config(SmtpClient::new(), config)
    }
}

impl<R> Default for MailSender<SmtpClient, R>
where
    R: MarkdownRenderer + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
