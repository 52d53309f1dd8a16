use error_meta::{
    AdaptError, Adapter, Code, Error, Meta, Runtime, RuntimeConfig, CALLER, ERROR, MESSAGE, META, STATUS,
};
use std::sync::Arc;

fn adapter(runtime: &Arc<Runtime>) -> Adapter {
    Adapter::builder().runtime(runtime.clone()).build()
}

#[test]
fn absent_error_passes_through() {
    let runtime = crate::myapp();

    assert!(adapter(&runtime).adapt(None, None).is_none());
    assert_eq!(adapter(&runtime).try_adapt_with(None, None, []), Ok(None));
}

#[test]
fn unclassified_error_gets_the_guard() {
    let runtime = crate::myapp();
    let guard = runtime.new_meta_error("myapp/db", "unavailable(1)", "db unavailable", [STATUS.option(503)]);
    let base = Error::new("connection refused");

    let adapted = adapter(&runtime).adapt(Some(base.clone()), Some(&guard)).unwrap();
    assert!(META.get(&adapted).unwrap().ptr_eq(guard.meta()));
    assert_eq!(STATUS.get(&adapted), Some(503));
    assert!(adapted.is(&guard));
    assert!(adapted.is(&base));
}

#[test]
fn missing_guard_falls_back_to_unknown() {
    let runtime = crate::myapp();

    let adapted = adapter(&runtime).adapt(Some(Error::new("boom")), None).unwrap();
    assert!(adapted.is(&runtime.unknown()));
    assert_eq!(STATUS.get(&adapted), Some(500));
}

#[test]
fn local_classification_is_kept() {
    let runtime = crate::myapp();
    let not_found = runtime.code(Code::NotFound);
    let failed_precondition = runtime.code(Code::FailedPrecondition);
    let err = ERROR.attach(&Error::new("xxx"), not_found.as_error().clone());

    let adapted = adapter(&runtime)
        .adapt(Some(err.clone()), Some(&failed_precondition))
        .unwrap();
    assert!(adapted.ptr_eq(&err));
    assert!(adapted.is(&not_found));
    assert!(!adapted.is(&failed_precondition));
    assert_eq!(STATUS.get(&adapted), Some(404));
}

#[test]
fn unregistered_local_meta_is_kept() {
    let runtime = crate::myapp();
    let ad_hoc = runtime.new_meta("adhoc", "odd(1)", "odd");
    let err = META.attach(&Error::new("xxx"), ad_hoc.clone());

    let adapted = adapter(&runtime).adapt(Some(err), None).unwrap();
    assert!(META.get(&adapted).unwrap().ptr_eq(&ad_hoc));
    assert!(runtime.meta_error(&ad_hoc.id()).is_none());
}

#[test]
fn upstream_classification_is_mapped_and_kept() {
    let runtime = crate::myapp();
    let local = runtime.new_meta_error("shared/errors", "quota(7)", "quota exceeded", [STATUS.option(429)]);
    let upstream = Meta::foreign("svc-up", "shared/errors", "quota(7)", "quota exceeded");
    let err = META.attach(&Error::new("from upstream"), upstream.clone());

    let adapted = adapter(&runtime).adapt(Some(err), None).unwrap();
    assert!(META.get(&adapted).unwrap().ptr_eq(local.meta()));
    assert_eq!(STATUS.get(&adapted), Some(429));

    let apps: Vec<String> = META.get_all(&adapted).iter().map(Meta::app).collect();
    assert_eq!(apps, ["svc-up", "myapp"]);
    assert!(META.get_all(&adapted)[0].ptr_eq(&upstream));
}

#[test]
fn missing_upstream_mapping_is_an_error() {
    let runtime = crate::myapp();
    let err = META.attach(&Error::new("xxx"), Meta::foreign("svc-up", "shared/errors", "nope(9)", "nope"));

    assert_eq!(
        adapter(&runtime).try_adapt_with(Some(err), None, []),
        Err(AdaptError::MissingMapping { upstream: "svc-up:shared/errors:nope(9)".into() })
    );
}

#[test]
#[should_panic(expected = "no local meta error mapped for upstream")]
fn adapt_panics_on_missing_mapping() {
    let runtime = crate::myapp();
    let err = META.attach(&Error::new("xxx"), Meta::foreign("svc-up", "shared/errors", "nope(9)", "nope"));

    adapter(&runtime).adapt(Some(err), None);
}

#[test]
fn foreign_guard_is_rejected() {
    let runtime = crate::myapp();
    let other = Runtime::with_config(RuntimeConfig::default().with_app_name("other"));
    let guard = other.code(Code::Internal);

    let result = adapter(&runtime).try_adapt_with(Some(Error::new("xxx")), Some(&guard), []);
    assert_eq!(
        result,
        Err(AdaptError::ForeignGuard { guard: "other:error-meta:internal(13)".into(), app: "myapp".into() })
    );
}

#[test]
fn extras_follow_call_site_then_caller_then_defaults() {
    let runtime = crate::myapp();
    let adapter = Adapter::builder()
        .runtime(runtime.clone())
        .add_caller(true)
        .caller_skip(2)
        .caller_fn(|_, skip| format!("caller@{skip}"))
        .default_attachment(MESSAGE.option("default".into()))
        .build();

    let adapted = adapter
        .adapt_with(Some(Error::new("xxx")), None, [MESSAGE.option("site".into())])
        .unwrap();
    assert!(adapted.to_string().ends_with(":msg={site}:caller={caller@2}:msg={default}"));
    assert_eq!(MESSAGE.get_all(&adapted), ["site", "default"]);
}

#[test]
fn default_caller_is_the_call_site() {
    let runtime = crate::myapp();
    let adapter = Adapter::builder().runtime(runtime.clone()).add_caller(true).build();

    let line = line!() + 1;
    let adapted = adapter.adapt(Some(Error::new("xxx")), None).unwrap();
    assert_eq!(CALLER.get(&adapted), Some(format!("{}:{line}", file!())));
}

#[test]
fn default_caller_ignores_skip_depth() {
    let runtime = crate::myapp();
    let adapter = Adapter::builder()
        .runtime(runtime.clone())
        .add_caller(true)
        .caller_skip(3)
        .build();

    let line = line!() + 1;
    let adapted = adapter.adapt(Some(Error::new("xxx")), None).unwrap();
    assert_eq!(CALLER.get(&adapted), Some(format!("{}:{line}", file!())));
}

#[test]
fn mapping_policy_can_be_replaced() {
    let runtime = crate::myapp();
    let adapter = Adapter::builder()
        .runtime(runtime.clone())
        .mapping(|runtime, _| Some(runtime.code(Code::Internal)))
        .build();
    let err = META.attach(&Error::new("xxx"), Meta::foreign("svc-up", "anything", "any(1)", "any"));

    let adapted = adapter.adapt(Some(err), None).unwrap();
    assert!(adapted.is(&runtime.code(Code::Internal)));
}
