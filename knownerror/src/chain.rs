//! Identity matching and typed extraction over error chains.

use crate::proxy::Proxy;
use crate::shared::SharedError;
use core::error::Error;
use core::{mem, ptr};

/// Looks through [`SharedError`] handles to the error they point to.
fn peel<'a>(mut err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    while let Some(shared) = err.downcast_ref::<SharedError>() {
        err = &**shared;
    }
    err
}

/// Whether two errors are the same error.
///
/// Clones of a [`Proxy`] are the same error. Anything else has to be the same value of the same
/// type, see [`same_value`].
fn same_error(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    let (a, b) = (peel(a), peel(b));
    match (a.downcast_ref::<Proxy>(), b.downcast_ref::<Proxy>()) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => same_value(a, b),
        _ => false,
    }
}

/// Whether two error references point at the same value of the same type.
///
/// A shared address alone is not enough: zero sized errors of different types can live at one
/// address, and so can an error and its leading field. Matching vtables settle it, but one type
/// may get several vtables, so differing vtables only rule out zero sized values, values of
/// different sizes, and an error whose source sits at its own address.
fn same_value(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    if !ptr::addr_eq(a, b) {
        return false;
    }
    if ptr::eq(a, b) {
        return true;
    }
    let size = mem::size_of_val(a);
    size != 0
        && size == mem::size_of_val(b)
        && !shares_address_with_source(a)
        && !shares_address_with_source(b)
}

fn shares_address_with_source(err: &(dyn Error + 'static)) -> bool {
    err.source().is_some_and(|source| ptr::addr_eq(source, err))
}

/// Returns whether `err`, or any error in its [`source`](Error::source) chain, is `target`.
///
/// Errors are compared by identity, not by message: two errors are the same if they are the
/// same value of the same type, so sentinels are usually kept in an `Arc` or a [`Proxy`]. Every
/// [`Proxy`] on the chain is also asked whether it [`matches`](Proxy::matches) `target`.
///
/// ```
/// use knownerror::Proxy;
///
/// let not_found = Proxy::new("not found");
/// let forbidden = Proxy::new("forbidden");
/// let err = Proxy::new("hidden resource").extends([&not_found, &forbidden]);
///
/// assert!(knownerror::is(&err, &not_found));
/// assert!(knownerror::is(&err, &forbidden));
/// ```
pub fn is(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    let mut node = Some(err);
    while let Some(current) = node {
        let current = peel(current);
        if same_error(current, target) {
            return true;
        }
        if let Some(proxy) = current.downcast_ref::<Proxy>() {
            if proxy.matches(target) {
                return true;
            }
        }
        node = current.source();
    }
    false
}

/// Returns the first error of type `T` in the [`source`](Error::source) chain of `err`.
///
/// Every [`Proxy`] on the chain is searched with [`extract_as`](Proxy::extract_as) before
/// moving on to its source.
pub fn find<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    let mut node = Some(err);
    while let Some(current) = node {
        let current = peel(current);
        if let Some(found) = current.downcast_ref::<T>() {
            return Some(found);
        }
        if let Some(proxy) = current.downcast_ref::<Proxy>() {
            if let Some(found) = proxy.extract_as::<T>() {
                return Some(found);
            }
        }
        node = current.source();
    }
    None
}

/// Method forms of [`is`] and [`find`].
pub trait ErrorExt {
    /// See [`is`].
    fn is_known(&self, target: &(dyn Error + 'static)) -> bool;

    /// See [`find`].
    fn find_known<T: Error + 'static>(&self) -> Option<&T>;
}
impl<E: Error + 'static> ErrorExt for E {
    fn is_known(&self, target: &(dyn Error + 'static)) -> bool {
        is(self, target)
    }

    fn find_known<T: Error + 'static>(&self) -> Option<&T> {
        find(self)
    }
}
impl ErrorExt for dyn Error + 'static {
    fn is_known(&self, target: &(dyn Error + 'static)) -> bool {
        is(self, target)
    }

    fn find_known<T: Error + 'static>(&self) -> Option<&T> {
        find(self)
    }
}
impl ErrorExt for dyn Error + Send + Sync + 'static {
    fn is_known(&self, target: &(dyn Error + 'static)) -> bool {
        is(self, target)
    }

    fn find_known<T: Error + 'static>(&self) -> Option<&T> {
        find(self)
    }
}
