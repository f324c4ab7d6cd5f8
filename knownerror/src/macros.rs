/// Creates a [`Proxy`](crate::Proxy) with a formatted message.
///
/// Takes the same arguments as `format!`, and rejects mismatched arguments at compile time in
/// the same way.
///
/// ```
/// let err = knownerror::newf!("error: {} {}", "some code", 8234);
/// assert_eq!(err.to_string(), "error: some code 8234");
/// ```
///
/// A missing argument does not build:
///
/// ```compile_fail
/// let err = knownerror::newf!("{} {}", 1);
/// ```
#[macro_export]
macro_rules! newf {
    ($($arg:tt)*) => {
        $crate::Proxy::from_args(::core::format_args!($($arg)*))
    };
}

/// Declares sentinel errors as lazily initialized statics.
///
/// Each sentinel is a `std::sync::LazyLock<Proxy>`, so it is built once on first use and every
/// later use refers to the same error.
///
/// ```
/// use knownerror::Proxy;
///
/// knownerror::sentinel! {
///     /// The requested item does not exist.
///     pub static NOT_FOUND = Proxy::new("not found");
///     pub static USER_NOT_FOUND = Proxy::new("user not found").extends([&NOT_FOUND]);
/// }
///
/// assert!(knownerror::is(&*USER_NOT_FOUND, &*NOT_FOUND));
/// ```
#[cfg(feature = "std")]
#[macro_export]
macro_rules! sentinel {
    ($($(#[$attr:meta])* $vis:vis static $name:ident = $init:expr;)*) => {$(
        $(#[$attr])*
        $vis static $name: ::std::sync::LazyLock<$crate::Proxy> =
            ::std::sync::LazyLock::new(|| $init);
    )*};
}
