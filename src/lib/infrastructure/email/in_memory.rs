//! In-memory mail transport

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::anyhow;

use crate::domain::mail::{errors::TransportError, MailTransport, Message, TransportSettings};

/// A transport client that keeps every message in memory.
///
/// Records each delivered message and every close call, and can be primed to
/// fail sends. Useful as a spy in tests and for local runs that must not
/// touch the network.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    settings: TransportSettings,
    sent: Vec<Message>,
    closes: Arc<AtomicUsize>,
    fail_sends: bool,
}

impl InMemoryTransport {
    /// Creates a transport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport with the given settings.
    pub fn with_settings(settings: TransportSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Makes every subsequent send fail.
    pub fn fail_sends(&mut self) {
        self.fail_sends = true;
    }

    /// The messages delivered so far, in order.
    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    /// A handle observing the number of close calls, usable after the owning
    /// sender is gone.
    pub fn close_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

impl MailTransport for InMemoryTransport {
    fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut TransportSettings {
        &mut self.settings
    }

    fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::DeliveryFailed(anyhow!(
                "in-memory transport primed to fail"
            )));
        }

        self.sent.push(message.clone());

        Ok(())
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
