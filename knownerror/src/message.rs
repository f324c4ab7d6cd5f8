use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Arguments;

/// The plain text error a [`Proxy`](crate::Proxy) is built around when it is created from a
/// message rather than from another error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{text}")]
pub struct Message {
    text: Cow<'static, str>,
}
impl Message {
    /// Creates a message from static or owned text.
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Message { text: text.into() }
    }

    /// Creates a message from preformatted arguments.
    ///
    /// Arguments without any interpolation are kept as a static string and never allocate.
    pub fn from_args(args: Arguments<'_>) -> Self {
        let text = match args.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(alloc::fmt::format(args)),
        };
        Message { text }
    }

    /// Returns the text of this message.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the text is borrowed from static storage.
    pub fn is_static(&self) -> bool {
        matches!(self.text, Cow::Borrowed(_))
    }
}
impl From<&'static str> for Message {
    fn from(value: &'static str) -> Self {
        Message::new(value)
    }
}
impl From<String> for Message {
    fn from(value: String) -> Self {
        Message::new(value)
    }
}
