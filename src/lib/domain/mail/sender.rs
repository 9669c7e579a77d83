//! Mail sender

use std::fs;

use tracing::debug;

use crate::domain::mail::{
    errors::SendError, value_objects::EmailAddress, AlternateView, DeliveryMethod, MailTransport,
    MailerConfig, MarkdownRenderer, Message,
};

/// Sends markdown-authored mail through an owned transport client.
///
/// Each send renders the markdown body to HTML with the renderer family `R`,
/// attaches the raw source as the plain-text view and the rendering as the
/// HTML view, and dispatches the result through `T`. The transport is owned
/// exclusively and released by [`MailSender::close`] or on drop.
#[derive(Debug)]
pub struct MailSender<T, R>
where
    T: MailTransport,
    R: MarkdownRenderer,
{
    transport: T,
    renderer: R,
    closed: bool,
}

impl<T, R> MailSender<T, R>
where
    T: MailTransport,
    R: MarkdownRenderer + Default,
{
    /// Creates a sender that owns `transport`, leaving its settings
    /// untouched. No I/O is performed until the first send.
    pub fn with_transport(transport: T) -> Self {
        Self::with_renderer(transport, R::default())
    }

    /// Creates a sender that owns `transport`, applying `config` on top of
    /// the transport's pre-existing settings.
    ///
    /// The configuration is applied here, exactly once; it is not re-applied
    /// on later sends.
    pub fn with_transport_and_config(mut transport: T, config: MailerConfig) -> Self {
        config.apply(transport.settings_mut());

        Self::with_transport(transport)
    }
}

impl<T, R> MailSender<T, R>
where
    T: MailTransport,
    R: MarkdownRenderer,
{
    /// Creates a sender that owns `transport` and uses `renderer` as its
    /// default renderer.
    pub fn with_renderer(transport: T, renderer: R) -> Self {
        Self {
            transport,
            renderer,
            closed: false,
        }
    }

    /// Parses both addresses, then sends `markdown` under `subject`.
    ///
    /// # Errors
    /// [`SendError::InvalidAddress`] if either address is malformed; parsing
    /// happens before any filesystem or network I/O.
    pub fn send(
        &mut self,
        from: &str,
        to: &str,
        subject: &str,
        markdown: &str,
    ) -> Result<(), SendError> {
        let from = EmailAddress::new(from)?;
        let to = EmailAddress::new(to)?;

        self.send_to(from, to, subject, markdown)
    }

    /// Sends `markdown` from `from` to `to` under `subject`.
    pub fn send_to(
        &mut self,
        from: EmailAddress,
        to: EmailAddress,
        subject: &str,
        markdown: &str,
    ) -> Result<(), SendError> {
        self.send_message(Message::new(from, to, subject, markdown))
    }

    /// Sends a pre-built message, rendering with the sender's default
    /// renderer.
    pub fn send_message(&mut self, message: Message) -> Result<(), SendError> {
        self.send_message_with(message, None)
    }

    /// Sends a pre-built message, rendering with `renderer` when one is
    /// given.
    ///
    /// The raw markdown body is attached as the plain-text view byte for
    /// byte, followed by the rendered HTML view. Mail readers prefer the
    /// last view they can display, so the order is part of the wire
    /// contract.
    pub fn send_message_with(
        &mut self,
        mut message: Message,
        renderer: Option<&R>,
    ) -> Result<(), SendError> {
        self.ensure_pickup_directory()?;

        let html = match renderer {
            Some(renderer) => renderer.render(&message.body)?,
            None => self.renderer.render(&message.body)?,
        };

        let plain = message.body.clone();
        message.views.push(AlternateView::plain(plain));
        message.views.push(AlternateView::html(html));

        debug!("dispatching message to {}", message.to);
        self.transport.send(&message)?;

        Ok(())
    }

    /// The owned transport client.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Closes the owned transport. Safe to call more than once; also runs on
    /// drop.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.transport.close();
        }
    }

    fn ensure_pickup_directory(&self) -> Result<(), SendError> {
        let settings = self.transport.settings();

        if settings.delivery_method != DeliveryMethod::SpecifiedPickupDirectory {
            return Ok(());
        }

        let path = settings
            .pickup_directory
            .as_deref()
            .ok_or(SendError::MissingPickupDirectory)?;

        if !path.exists() {
            debug!("creating pickup directory {}", path.display());

            fs::create_dir_all(path).map_err(|source| SendError::PickupDirectory {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Ok(())
    }
}

impl<T, R> Drop for MailSender<T, R>
where
    T: MailTransport,
    R: MarkdownRenderer,
{
    #[mutants::skip]
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use anyhow::anyhow;
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::mail::{
            errors::{RenderError, TransportError},
            tests::{MockMailTransport, MockMarkdownRenderer},
            TransportSettings, TEXT_HTML, TEXT_PLAIN,
        },
        infrastructure::email::InMemoryTransport,
    };

    use super::*;

    fn uppercase_renderer() -> MockMarkdownRenderer {
        let mut renderer = MockMarkdownRenderer::new();

        renderer
            .expect_render()
            .returning(|markdown| Ok(markdown.to_uppercase()));

        renderer
    }

    fn pickup_settings(directory: Option<std::path::PathBuf>) -> TransportSettings {
        TransportSettings {
            delivery_method: DeliveryMethod::SpecifiedPickupDirectory,
            pickup_directory: directory,
            ..TransportSettings::default()
        }
    }

    #[test]
    fn test_send_attaches_plain_and_html_views_in_order() -> TestResult {
        let mut sender = MailSender::with_renderer(InMemoryTransport::new(), uppercase_renderer());

        sender.send("a@x.com", "b@y.com", "Hi", "**bold**")?;

        let sent = sender.transport().sent();
        assert_eq!(sent.len(), 1);

        let message = &sent[0];
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.views.len(), 2);
        assert_eq!(message.views[0].content_type, TEXT_PLAIN);
        assert_eq!(message.views[0].content, "**bold**");
        assert_eq!(message.views[1].content_type, TEXT_HTML);
        assert_eq!(message.views[1].content, "**BOLD**");

        Ok(())
    }

    #[test]
    fn test_send_rejects_malformed_address_before_any_io() {
        let mut renderer = MockMarkdownRenderer::new();
        renderer.expect_render().times(0);

        let mut sender = MailSender::with_renderer(InMemoryTransport::new(), renderer);

        let result = sender.send("not-an-address", "b@y.com", "Hi", "body");

        assert!(matches!(result, Err(SendError::InvalidAddress(_))));
        assert!(sender.transport().sent().is_empty());
    }

    #[test]
    fn test_send_creates_a_missing_pickup_directory() -> TestResult {
        let root = tempfile::tempdir()?;
        let pickup = root.path().join("outbox");

        let transport = InMemoryTransport::with_settings(pickup_settings(Some(pickup.clone())));
        let mut sender = MailSender::with_renderer(transport, uppercase_renderer());

        sender.send("a@x.com", "b@y.com", "Hi", "first")?;
        assert!(pickup.is_dir());

        // already present now; the second send must not fail
        sender.send("a@x.com", "b@y.com", "Hi", "second")?;
        assert_eq!(sender.transport().sent().len(), 2);

        Ok(())
    }

    #[test]
    fn test_pickup_delivery_without_a_directory_fails() {
        let transport = InMemoryTransport::with_settings(pickup_settings(None));
        let mut sender = MailSender::with_renderer(transport, uppercase_renderer());

        let result = sender.send("a@x.com", "b@y.com", "Hi", "body");

        assert!(matches!(result, Err(SendError::MissingPickupDirectory)));
        assert!(sender.transport().sent().is_empty());
    }

    #[test]
    fn test_renderer_failure_surfaces_before_dispatch() {
        let mut renderer = MockMarkdownRenderer::new();
        renderer
            .expect_render()
            .returning(|_| Err(RenderError::UnknownError(anyhow!("renderer exploded"))));

        let mut sender = MailSender::with_renderer(InMemoryTransport::new(), renderer);

        let result = sender.send("a@x.com", "b@y.com", "Hi", "body");

        assert!(matches!(result, Err(SendError::Render(_))));
        assert!(sender.transport().sent().is_empty());
    }

    #[test]
    fn test_transport_failure_surfaces_unmodified() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_settings()
            .return_const(TransportSettings::default());
        transport.expect_send().times(1).returning(|_| {
            Err(TransportError::DeliveryFailed(anyhow!(
                "connection refused"
            )))
        });
        transport.expect_close().times(1).return_const(());

        let mut sender = MailSender::with_renderer(transport, uppercase_renderer());

        let result = sender.send("a@x.com", "b@y.com", "Hi", "body");

        assert!(matches!(
            result,
            Err(SendError::Transport(TransportError::DeliveryFailed(_)))
        ));
    }

    #[test]
    fn test_per_send_renderer_overrides_the_default() -> TestResult {
        // the default renderer would panic if it were consulted
        let default_renderer = MockMarkdownRenderer::new();

        let mut override_renderer = MockMarkdownRenderer::new();
        override_renderer
            .expect_render()
            .with(eq("*hi*"))
            .times(1)
            .returning(|_| Ok(String::from("<em>hi</em>")));

        let mut sender = MailSender::with_renderer(InMemoryTransport::new(), default_renderer);

        let message = Message::new(
            EmailAddress::new("a@x.com")?,
            EmailAddress::new("b@y.com")?,
            "Hi",
            "*hi*",
        );

        sender.send_message_with(message, Some(&override_renderer))?;

        assert_eq!(
            sender.transport().sent()[0].views[1].content,
            "<em>hi</em>"
        );

        Ok(())
    }

    #[test]
    fn test_configuration_is_applied_at_construction() {
        let config = MailerConfig {
            host: Some(String::from("mail.example.com")),
            port: Some(2525),
            ..MailerConfig::default()
        };

        let sender = MailSender::<_, MockMarkdownRenderer>::with_transport_and_config(
            InMemoryTransport::new(),
            config,
        );

        let settings = sender.transport().settings();
        assert_eq!(settings.host, "mail.example.com");
        assert_eq!(settings.port, 2525);
        assert!(!settings.use_tls);
    }

    #[test]
    fn test_close_is_idempotent() {
        let transport = InMemoryTransport::new();
        let closes = transport.close_count();

        let mut sender = MailSender::<_, MockMarkdownRenderer>::with_transport(transport);

        sender.close();
        sender.close();
        drop(sender);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes_the_transport() {
        let transport = InMemoryTransport::new();
        let closes = transport.close_count();

        let sender = MailSender::<_, MockMarkdownRenderer>::with_transport(transport);
        drop(sender);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
