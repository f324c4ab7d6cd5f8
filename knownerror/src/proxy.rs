use crate::chain;
use crate::message::Message;
use crate::shared::{IntoSharedError, SharedError};
use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Arguments, Debug, Display, Formatter};
use core::slice;

/// An error value that also matches every error it extends.
///
/// A proxy reports the message of its base error, unwraps to that base error through
/// [`Error::source`], and can carry a root cause that is kept apart from the source chain.
/// [`is`](crate::is) and [`find`](crate::find) treat a proxy as matching each of its
/// [extended](Proxy::extends) errors, transitively.
///
/// Proxies are immutable. Cloning is cheap and every clone is the same error: it compares equal
/// to the original and is matched by [`is`](crate::is) wherever the original would be. Methods
/// that look like they modify a proxy return a new, independent proxy instead.
///
/// # Formatting
///
/// * `{}` writes the message.
/// * `{:#}` writes `<message> (cause: <cause>)` when a cause is attached, and the message
///   otherwise. The cause is written with `{}`, so its own cause is not expanded.
/// * `{:?}` writes the message as a quoted string literal.
/// * `{:#?}` writes a structured view of the proxy.
#[derive(Clone, Default)]
pub struct Proxy {
    body: Arc<ProxyBody>,
}

#[derive(Default)]
struct ProxyBody {
    base: Option<SharedError>,
    cause: Option<SharedError>,
    extends: Vec<SharedError>,
}

impl Proxy {
    fn from_body(body: ProxyBody) -> Self {
        Proxy { body: Arc::new(body) }
    }

    fn from_base(base: SharedError) -> Self {
        Proxy::from_body(ProxyBody { base: Some(base), cause: None, extends: Vec::new() })
    }

    /// Creates a proxy around a plain text message.
    ///
    /// ```
    /// let err = knownerror::Proxy::new("some validation error");
    /// assert_eq!(err.to_string(), "some validation error");
    /// ```
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Proxy::from_base(Arc::new(Message::new(text)))
    }

    /// Creates a proxy around a formatted message.
    ///
    /// This is usually called through [`newf!`](crate::newf).
    pub fn from_args(args: Arguments<'_>) -> Self {
        Proxy::from_base(Arc::new(Message::from_args(args)))
    }

    /// Creates a proxy whose base is `err`, stored as is.
    pub fn from_error<E: Error + Send + Sync + 'static>(err: E) -> Self {
        Proxy::from_base(Arc::new(err))
    }

    /// Creates a proxy whose base is `err`, stored as is.
    ///
    /// Returns `None` when there is no error to wrap.
    ///
    /// ```
    /// use knownerror::{Proxy, SharedError};
    ///
    /// assert!(Proxy::wrap(None::<SharedError>).is_none());
    /// ```
    pub fn wrap(err: impl IntoSharedError) -> Option<Self> {
        err.into_shared_error().map(Proxy::from_base)
    }

    /// Attaches a root cause while keeping the identity of `self`.
    ///
    /// The returned proxy extends `self` (ahead of everything `self` already extends), so it is
    /// still matched by [`is`](crate::is) against `self`. Only the newest cause is reported by
    /// [`Proxy::cause`].
    ///
    /// If `cause` is `None`, `self` is returned unchanged.
    ///
    /// ```
    /// use knownerror::Proxy;
    ///
    /// let user_not_found = Proxy::new("user not found");
    /// let err = user_not_found.with_cause(Proxy::new("no rows in result set"));
    ///
    /// assert!(knownerror::is(&err, &user_not_found));
    /// assert_eq!(err.cause().unwrap().to_string(), "no rows in result set");
    /// ```
    pub fn with_cause(&self, cause: impl IntoSharedError) -> Proxy {
        let Some(cause) = cause.into_shared_error() else {
            return self.clone();
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "knownerror", error = %self, cause = %cause, "attached root cause");

        let mut extends = Vec::with_capacity(self.body.extends.len() + 1);
        extends.push(Arc::new(self.clone()) as SharedError);
        extends.extend(self.body.extends.iter().cloned());
        Proxy::from_body(ProxyBody {
            base: self.body.base.clone(),
            cause: Some(cause),
            extends,
        })
    }

    /// Adds error categories that the returned proxy also matches.
    ///
    /// The new errors are appended after the ones `self` already extends, in order and without
    /// removing duplicates. Entries that are `None` are skipped, and if nothing is left, `self`
    /// is returned unchanged.
    pub fn extends<I>(&self, errs: I) -> Proxy
    where
        I: IntoIterator,
        I::Item: IntoSharedError,
    {
        let added: Vec<SharedError> =
            errs.into_iter().filter_map(IntoSharedError::into_shared_error).collect();
        if added.is_empty() {
            return self.clone();
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "knownerror", error = %self, added = added.len(), "extended error categories");

        let mut extends = Vec::with_capacity(self.body.extends.len() + added.len());
        extends.extend(self.body.extends.iter().cloned());
        extends.extend(added);
        Proxy::from_body(ProxyBody {
            base: self.body.base.clone(),
            cause: self.body.cause.clone(),
            extends,
        })
    }

    /// Returns the message of the base error, or an empty string if there is none.
    pub fn message(&self) -> String {
        match &self.body.base {
            Some(base) => base.to_string(),
            None => String::new(),
        }
    }

    /// Returns the base error, which is also what [`Error::source`] returns.
    pub fn unwrap_base(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.body.base.as_deref()
    }

    /// Returns the root cause attached through [`Proxy::with_cause`].
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.body.cause.as_deref()
    }

    /// Returns the errors this proxy extends, in order.
    pub fn extended(&self) -> Extended<'_> {
        Extended { inner: self.body.extends.iter() }
    }

    /// Returns whether any extended error matches `target` according to [`is`](crate::is).
    ///
    /// The base error is not checked here, as [`is`](crate::is) reaches it through
    /// [`Error::source`] on its own.
    pub fn matches(&self, target: &(dyn Error + 'static)) -> bool {
        self.body.extends.iter().any(|ext| chain::is(&**ext, target))
    }

    /// Returns the first value of type `T` found by [`find`](crate::find) in the extended
    /// errors, in order.
    pub fn extract_as<T: Error + 'static>(&self) -> Option<&T> {
        self.body.extends.iter().find_map(|ext| chain::find::<T>(&**ext))
    }

    /// Returns `true` if both proxies are the same error.
    pub fn ptr_eq(&self, other: &Proxy) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    fn write_message(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.body.base {
            Some(base) => write!(f, "{base}"),
            None => Ok(()),
        }
    }
}

impl Display for Proxy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.body.cause {
            Some(cause) if f.alternate() => {
                self.write_message(f)?;
                write!(f, " (cause: {cause})")
            }
            _ => self.write_message(f),
        }
    }
}
impl Debug for Proxy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Proxy")
                .field("message", &self.message())
                .field("cause", &self.body.cause)
                .field("extends", &self.body.extends.len())
                .finish()
        } else {
            Debug::fmt(self.message().as_str(), f)
        }
    }
}
impl Error for Proxy {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.unwrap_base().map(|base| base as &(dyn Error + 'static))
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
impl Eq for Proxy {}

/// An iterator over the errors a [`Proxy`] extends.
///
/// Returned by [`Proxy::extended`].
#[derive(Clone)]
pub struct Extended<'a> {
    inner: slice::Iter<'a, SharedError>,
}
impl<'a> Iterator for Extended<'a> {
    type Item = &'a (dyn Error + Send + Sync + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|err| &**err)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
impl ExactSizeIterator for Extended<'_> {}
