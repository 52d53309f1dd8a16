use error_meta::extract::{self, AttrFn};
use error_meta::{Code, Error, Value, CALLER, ERROR, MESSAGE};
use std::sync::Arc;

#[test]
fn absent_error_reads_as_success() {
    assert_eq!(extract::app(None), "");
    assert_eq!(extract::source(None), "");
    assert_eq!(extract::code(None), "success(0)");
    assert_eq!(extract::message(None), "success");
}

#[test]
fn unclassified_error_reads_as_unknown() {
    let err = Error::new("boom");

    assert_eq!(extract::app(Some(&err)), "");
    assert_eq!(extract::code(Some(&err)), "unknown(2)");
    assert_eq!(extract::message(Some(&err)), "server throws an exception");
}

#[test]
fn classified_error_reads_latest_meta() {
    let runtime = crate::myapp();
    let err = crate::layered(&runtime);

    assert_eq!(extract::app(Some(&err)), "myapp");
    assert_eq!(extract::source(Some(&err)), "error-meta");
    assert_eq!(extract::code(Some(&err)), "already_exists(6)");
    assert_eq!(extract::message(Some(&err)), "already exists");
}

#[test]
fn attrs_adds_status_and_extra_getters() {
    let runtime = crate::myapp();
    let err = crate::layered(&runtime);
    let extra: Vec<AttrFn> = vec![Box::new(|err: Option<&Error>| {
        ("caller".to_string(), Arc::new(CALLER.get(err).unwrap_or_default()) as Value)
    }) as AttrFn];

    let map = extract::attrs(Some(&err), &extra);
    assert_eq!(map.len(), 6);
    assert_eq!(map[extract::APP_FIELD].to_string(), "myapp");
    assert_eq!(map[extract::CODE_FIELD].to_string(), "already_exists(6)");
    assert_eq!(map[extract::MESSAGE_FIELD].to_string(), "already exists");
    assert_eq!(map["status"].downcast_ref::<u16>(), Some(&409));
    assert_eq!(map["caller"].to_string(), "caller2");

    let map = extract::attrs(None, &[]);
    assert_eq!(map["status"].downcast_ref::<u16>(), Some(&200));
    assert_eq!(map[extract::CODE_FIELD].to_string(), "success(0)");
}

#[test]
fn all_errors_lists_cause_then_sub_errors() {
    let runtime = crate::myapp();
    let err = crate::layered(&runtime);

    let all = extract::all_errors(&err);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].to_string(), "xxx");
    assert!(all[1].ptr_eq(runtime.code(Code::NotFound).as_error()));
    assert!(all[2].ptr_eq(runtime.code(Code::AlreadyExists).as_error()));
}

#[test]
fn latest_meta_error_skips_plain_sub_errors() {
    let runtime = crate::myapp();
    let not_found = runtime.code(Code::NotFound);
    let already_exists = runtime.code(Code::AlreadyExists);

    let err = ERROR.attach(&Error::new("xxx"), not_found.as_error().clone());
    assert_eq!(extract::latest_meta_error(&err), Some(not_found.clone()));
    let err = MESSAGE.attach(&err, "wrapper".into());
    assert_eq!(extract::latest_meta_error(&err), Some(not_found.clone()));
    let err = ERROR.attach(&err, Error::new("yyy"));
    assert_eq!(extract::latest_meta_error(&err), Some(not_found.clone()));
    let err = ERROR.attach(&err, already_exists.as_error().clone());
    assert_eq!(extract::latest_meta_error(&err), Some(already_exists.clone()));
    let err = MESSAGE.attach(&err, "wrapper2".into());
    let err = ERROR.attach(&err, Error::new("zzz"));
    assert_eq!(extract::latest_meta_error(&err), Some(already_exists));

    assert!(extract::latest_meta_error(&Error::new("plain")).is_none());
}
