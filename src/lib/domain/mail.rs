//! Markdown mail: the message model, renderer and transport seams,
//! transport configuration and the sender itself.

mod config;
mod message;
mod renderer;
mod sender;
mod transport;

pub mod errors;
pub mod value_objects;

pub use config::MailerConfig;
pub use message::{AlternateView, Message, TEXT_HTML, TEXT_PLAIN};
pub use renderer::MarkdownRenderer;
pub use sender::MailSender;
pub use transport::{Credentials, DeliveryMethod, MailTransport, TransportSettings};
