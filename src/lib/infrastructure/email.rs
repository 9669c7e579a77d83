//! Mail transport adapters

mod in_memory;
mod smtp;

pub use in_memory::InMemoryTransport;
pub use smtp::SmtpClient;

use crate::{
    domain::mail::MailSender,
    infrastructure::render::{ComrakRenderer, PulldownCmarkRenderer},
};

/// Sender delivering through SMTP and rendering with the comrak pipeline
pub type ComrakMailSender = MailSender<SmtpClient, ComrakRenderer>;

/// Sender delivering through SMTP and rendering with the plain CommonMark
/// transformer
pub type PulldownCmarkMailSender = MailSender<SmtpClient, PulldownCmarkRenderer>;
