use knownerror::{ErrorExt, Proxy, SharedError};
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("custom error {code}")]
struct CustomError {
    code: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("unrelated error")]
struct UnrelatedError;

fn plain(text: &'static str) -> SharedError {
    Arc::new(knownerror::Message::new(text))
}

#[test]
fn new_reports_text() {
    for text in ["some validation error", "", "with \"quotes\" and\nnewlines"] {
        assert_eq!(Proxy::new(text).message(), text);
        assert_eq!(Proxy::new(text).to_string(), text);
    }
}

#[test]
fn new_accepts_owned_text() {
    let err = Proxy::new(format!("user {} not found", 42));
    assert_eq!(err.message(), "user 42 not found");
}

#[test]
fn newf_formats_arguments() {
    let err = knownerror::newf!("error: {} {}", "some code", 8234);
    assert_eq!(err.message(), "error: some code 8234");
}

#[test]
fn wrap_keeps_base() {
    let base = plain("some base error");
    let wrapped = Proxy::wrap(&base).unwrap();
    assert_eq!(wrapped.message(), "some base error");
    assert!(std::ptr::addr_eq(wrapped.unwrap_base().unwrap(), &*base));
    assert!(std::ptr::addr_eq(wrapped.source().unwrap(), &*base));
}

#[test]
fn wrap_of_nothing_is_nothing() {
    assert!(Proxy::wrap(None::<SharedError>).is_none());
    assert!(Proxy::wrap(None::<&Proxy>).is_none());
}

#[test]
fn from_error_keeps_typed_base() {
    let wrapped = Proxy::from_error(CustomError { code: 7 });
    assert_eq!(wrapped.message(), "custom error 7");
    assert_eq!(wrapped.find_known::<CustomError>().unwrap().code, 7);
}

#[test]
fn with_cause_sets_cause() {
    let outer = Proxy::new("some outer error");
    let cause = plain("some root cause");
    let result = outer.with_cause(&cause);

    assert!(std::ptr::addr_eq(result.cause().unwrap(), &*cause));
    assert_eq!(result.message(), "some outer error");
    assert!(outer.cause().is_none());
}

#[test]
fn with_cause_preserves_identity() {
    let outer = Proxy::new("some outer error");
    let result = outer.with_cause(plain("some cause"));

    assert!(knownerror::is(&result, &outer));
    assert!(result.matches(&outer));
    assert_ne!(result, outer);
}

#[test]
fn with_cause_keeps_only_newest_cause() {
    let outer = Proxy::new("some outer error");
    let first = outer.with_cause(plain("first cause"));
    let second = first.with_cause(plain("second cause"));

    assert_eq!(second.cause().unwrap().to_string(), "second cause");
    assert!(second.is_known(&first));
    assert!(second.is_known(&outer));
}

#[test]
fn with_cause_keeps_categories() {
    let not_found = Proxy::new("not found");
    let outer = Proxy::new("user not found").extends([&not_found]);
    let result = outer.with_cause(plain("no rows"));
    assert!(result.is_known(&not_found));
}

#[test]
fn extends_matches_each_error() {
    let ext1 = plain("some first extension");
    let ext2 = plain("some second extension");
    let result = Proxy::new("some base error").extends([&ext1, &ext2]);

    assert!(knownerror::is(&result, &*ext1));
    assert!(knownerror::is(&result, &*ext2));
    assert!(result.matches(&*ext1));
}

#[test]
fn extends_ignores_nothing() {
    let ext = plain("some extension");
    let result = Proxy::new("some base error").extends([None, Some(&ext), None]);

    assert!(result.is_known(&*ext));
    assert_eq!(result.extended().len(), 1);
}

#[test]
fn extends_with_only_nothing_returns_same_proxy() {
    let base = Proxy::new("some base error");
    assert!(base.extends([None::<SharedError>, None]).ptr_eq(&base));
    assert!(base.extends(Vec::<Proxy>::new()).ptr_eq(&base));
}

#[test]
fn extends_accumulates() {
    let err1 = plain("some first error");
    let err2 = plain("some second error");
    let base = Proxy::new("some base error").extends([&err1]).extends([&err2]);

    assert!(base.is_known(&*err1));
    assert!(base.is_known(&*err2));
}

#[test]
fn extends_does_not_touch_receiver() {
    let base = Proxy::new("some base error");
    let ext = plain("some extension");
    let _ = base.extends([&ext]);
    assert!(!base.is_known(&*ext));
}

#[test]
fn matches_skips_unrelated_errors() {
    let base = Proxy::new("some base error");
    let other = plain("some other error");
    assert!(!base.matches(&*other));
    assert!(!knownerror::is(&base, &*other));
}

#[test]
fn matches_ignores_base() {
    let base = plain("some base error");
    let wrapped = Proxy::wrap(&base).unwrap();
    assert!(!wrapped.matches(&*base));
    assert!(knownerror::is(&wrapped, &*base));
}

#[test]
fn matches_nested_proxies() {
    let root = Proxy::new("root");
    let middle = Proxy::new("middle").extends([&root]);
    let leaf = Proxy::new("leaf").extends([&middle]);
    assert!(leaf.matches(&root));
    assert!(leaf.matches(&middle));
}

#[test]
fn extract_as_finds_extended_type() {
    let custom = Arc::new(CustomError { code: 8234 });
    let base = Proxy::new("some base error").extends([&custom]);

    let found = base.extract_as::<CustomError>().unwrap();
    assert_eq!(found.code, 8234);
    assert!(std::ptr::eq(found, &*custom));
    assert_eq!(knownerror::find::<CustomError>(&base).unwrap().code, 8234);
}

#[test]
fn extract_as_returns_first_match() {
    let first = Arc::new(CustomError { code: 1 });
    let second = Arc::new(CustomError { code: 2 });
    let base = Proxy::new("some base error")
        .extends([Arc::new(UnrelatedError) as SharedError])
        .extends([&first, &second]);

    assert_eq!(base.extract_as::<CustomError>().unwrap().code, 1);
}

#[test]
fn extract_as_without_match_is_none() {
    let base = Proxy::new("some base error").extends([Arc::new(UnrelatedError)]);
    assert!(base.extract_as::<CustomError>().is_none());
    assert!(knownerror::find::<CustomError>(&base).is_none());
}

#[test]
fn extract_as_searches_nested_proxies() {
    let inner = Proxy::new("inner").extends([Arc::new(CustomError { code: 5 })]);
    let outer = Proxy::new("outer").extends([&inner]);
    assert_eq!(outer.extract_as::<CustomError>().unwrap().code, 5);
}

#[test]
fn dyn_errors_use_the_same_walk() {
    let not_found = Proxy::new("not found");
    let err: Box<dyn Error + Send + Sync> = Box::new(Proxy::new("missing").extends([&not_found]));
    assert!(err.is_known(&not_found));
    assert!(err.find_known::<Proxy>().is_some());
}

#[test]
fn proxies_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Proxy>();

    let not_found = Proxy::new("not found");
    let err = Proxy::new("user not found").extends([&not_found]);
    let handle = std::thread::spawn(move || err.is_known(&not_found));
    assert!(handle.join().unwrap());
}

#[derive(Debug, thiserror::Error)]
#[error("not found")]
struct NotFound;

#[derive(Debug, thiserror::Error)]
#[error("forbidden")]
struct Forbidden;

static NOT_FOUND: NotFound = NotFound;
static FORBIDDEN: Forbidden = Forbidden;

#[derive(Debug, thiserror::Error)]
#[error("outer error")]
struct Outer {
    #[source]
    inner: knownerror::Message,
}

#[test]
fn unit_errors_of_different_types_are_distinct() {
    assert!(!knownerror::is(&NOT_FOUND, &FORBIDDEN));
    assert!(!knownerror::is(&NotFound, &Forbidden));
    assert!(knownerror::is(&NOT_FOUND, &NOT_FOUND));

    let err = Proxy::new("missing").extends([Arc::new(NotFound)]);
    assert!(!err.is_known(&FORBIDDEN));
    assert!(!err.matches(&FORBIDDEN));
}

#[test]
fn leading_source_field_is_not_its_owner() {
    let outer = Outer { inner: knownerror::Message::new("inner error") };
    assert!(!knownerror::is(&outer.inner, &outer));
    assert!(knownerror::is(&outer, &outer.inner));
}
