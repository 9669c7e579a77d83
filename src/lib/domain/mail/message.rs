//! Mail message model

use crate::domain::mail::value_objects::EmailAddress;

/// Content type of the plain-text alternate view
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Content type of the HTML alternate view
pub const TEXT_HTML: &str = "text/html; charset=utf-8";

/// One content-typed rendering of a message body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlternateView {
    /// MIME content type of this rendering
    pub content_type: String,

    /// Rendered text
    pub content: String,
}

impl AlternateView {
    /// Creates a view with an explicit content type.
    pub fn new(content_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content: content.into(),
        }
    }

    /// Creates a plain-text view.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(TEXT_PLAIN, content)
    }

    /// Creates an HTML view.
    pub fn html(content: impl Into<String>) -> Self {
        Self::new(TEXT_HTML, content)
    }
}

/// A mail message with a markdown body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The sender of the message
    pub from: EmailAddress,

    /// The recipient of the message
    pub to: EmailAddress,

    /// The subject line
    pub subject: String,

    /// The raw markdown body, the message's source of truth
    pub body: String,

    /// Alternate renderings of the body, in the order they go on the wire.
    /// Mail readers prefer the last view they can display, so plain text
    /// comes before HTML.
    pub views: Vec<AlternateView>,
}

impl Message {
    /// Creates a message with no alternate views.
    pub fn new(
        from: EmailAddress,
        to: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            subject: subject.into(),
            body: body.into(),
            views: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_has_no_views() {
        let message = Message::new(
            EmailAddress::new_unchecked("a@example.com"),
            EmailAddress::new_unchecked("b@example.com"),
            "Hi",
            "**body**",
        );

        assert!(message.views.is_empty());
        assert_eq!(message.body, "**body**");
    }

    #[test]
    fn test_view_constructors_tag_content_types() {
        assert_eq!(AlternateView::plain("x").content_type, TEXT_PLAIN);
        assert_eq!(AlternateView::html("x").content_type, TEXT_HTML);
    }

    #[test]
    fn test_views_keep_insertion_order() {
        let mut message = Message::new(
            EmailAddress::new_unchecked("a@example.com"),
            EmailAddress::new_unchecked("b@example.com"),
            "Hi",
            "body",
        );

        message.views.push(AlternateView::plain("body"));
        message.views.push(AlternateView::html("<p>body</p>"));

        assert_eq!(message.views[0].content_type, TEXT_PLAIN);
        assert_eq!(message.views[1].content_type, TEXT_HTML);
    }
}
