//! Error types for rendering, transport and the send pipeline

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::domain::mail::value_objects::EmailAddressError;

/// Errors that can occur while rendering markdown to HTML
#[derive(Debug, Error)]
pub enum RenderError {
    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Errors that can occur inside a transport client
#[derive(Debug, Error)]
pub enum TransportError {
    /// The message could not be assembled into a wire format
    #[error("the message could not be assembled for delivery")]
    InvalidMessage(#[source] anyhow::Error),

    /// The transport refused or failed the delivery
    #[error("the message could not be delivered")]
    DeliveryFailed(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<lettre::address::AddressError> for TransportError {
    fn from(err: lettre::address::AddressError) -> Self {
        debug!("lettre address error: {:?}", err);

        TransportError::InvalidMessage(err.into())
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        debug!("lettre message error: {:?}", err);

        TransportError::InvalidMessage(err.into())
    }
}

impl From<lettre::message::header::ContentTypeErr> for TransportError {
    fn from(err: lettre::message::header::ContentTypeErr) -> Self {
        debug!("lettre content type error: {:?}", err);

        TransportError::InvalidMessage(err.into())
    }
}

impl From<lettre::transport::smtp::Error> for TransportError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        debug!("lettre smtp error: {:?}", err);

        TransportError::DeliveryFailed(err.into())
    }
}

impl From<lettre::transport::file::Error> for TransportError {
    fn from(err: lettre::transport::file::Error) -> Self {
        debug!("lettre file transport error: {:?}", err);

        TransportError::DeliveryFailed(err.into())
    }
}

/// Errors that can occur when sending a message
#[derive(Debug, Error)]
pub enum SendError {
    /// An address could not be parsed
    #[error(transparent)]
    InvalidAddress(#[from] EmailAddressError),

    /// Pickup delivery was selected without configuring a pickup directory
    #[error("pickup delivery requires a pickup directory to be configured")]
    MissingPickupDirectory,

    /// The pickup directory could not be created
    #[error("could not create pickup directory {}", path.display())]
    PickupDirectory {
        /// The directory that could not be created
        path: PathBuf,

        /// The underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// The renderer failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The transport failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use lettre::address::Address;

    use super::*;

    #[test]
    fn test_address_errors_map_to_invalid_message() {
        let err = "definitely not an address".parse::<Address>().unwrap_err();

        let transport_err = TransportError::from(err);

        assert!(matches!(transport_err, TransportError::InvalidMessage(_)));
    }
}
