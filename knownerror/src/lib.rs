//! Sentinel errors that can belong to several error categories at once.
//!
//! A [`Proxy`] is an immutable error value with a message, an optional root cause, and a list
//! of other errors it also counts as. Comparing errors by identity goes through [`is`], and
//! typed extraction goes through [`find`]. Both walk the [`source`] chain and consult every
//! proxy they pass on the way.
//!
//! ```
//! use knownerror::Proxy;
//!
//! let not_found = Proxy::new("not found");
//! let user_not_found = Proxy::new("user not found").extends([&not_found]);
//!
//! assert!(knownerror::is(&user_not_found, &not_found));
//! assert!(!knownerror::is(&user_not_found, &Proxy::new("other")));
//! ```
//!
//! [`source`]: core::error::Error::source

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chain;
mod macros;
mod message;
mod proxy;
mod shared;

pub use chain::{ErrorExt, find, is};
pub use message::Message;
pub use proxy::{Extended, Proxy};
pub use shared::{IntoSharedError, SharedError};
