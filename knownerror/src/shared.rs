use crate::Proxy;
use alloc::sync::Arc;
use core::error::Error;

/// A shared, thread-safe handle to an arbitrary error value.
///
/// This is how a [`Proxy`] stores its base error, its root cause and the errors it extends.
/// The identity of the error is the allocation this points to.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Values that can be stored in a [`Proxy`] as a base, a cause or an extended error.
///
/// `None` is the absence of an error, and converts to `None`.
pub trait IntoSharedError {
    /// Converts this value into a shared error, or `None` if there is no error.
    fn into_shared_error(self) -> Option<SharedError>;
}

impl IntoSharedError for SharedError {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(self)
    }
}
impl IntoSharedError for &SharedError {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(self.clone())
    }
}
impl<E: Error + Send + Sync + 'static> IntoSharedError for Arc<E> {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(self)
    }
}
impl<E: Error + Send + Sync + 'static> IntoSharedError for &Arc<E> {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(self.clone())
    }
}
impl IntoSharedError for Proxy {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(Arc::new(self))
    }
}
impl IntoSharedError for &Proxy {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(Arc::new(self.clone()))
    }
}
#[cfg(feature = "std")]
impl<F: FnOnce() -> Proxy> IntoSharedError for &std::sync::LazyLock<Proxy, F> {
    fn into_shared_error(self) -> Option<SharedError> {
        Some(Arc::new(std::sync::LazyLock::force(self).clone()))
    }
}
impl<T: IntoSharedError> IntoSharedError for Option<T> {
    fn into_shared_error(self) -> Option<SharedError> {
        self.and_then(IntoSharedError::into_shared_error)
    }
}
