use error_meta::{
    extract, Attr, AttrOptions, Code, Error, RegistryError, Runtime, RuntimeConfig, CALLER, MESSAGE, STATUS,
};

#[test]
fn defined_attr_is_found_by_name_and_key() {
    let runtime = crate::myapp();
    let retries: Attr<u32> = runtime.define_attr("retries", AttrOptions::new().default_fn(|_| 0));

    let by_name = runtime.attr_by_name::<u32>("retries").unwrap();
    let by_key = runtime.attr_by_key::<u32>(retries.key()).unwrap();
    assert_eq!(by_name.key(), retries.key());
    assert_eq!(by_key.key(), retries.key());
    assert_eq!(by_name.name(), "retries");
}

#[test]
fn well_known_attrs_are_registered_in_every_runtime() {
    let runtime = crate::myapp();

    assert_eq!(runtime.attr_by_name::<String>("caller").unwrap().key(), CALLER.key());
    assert_eq!(runtime.attr_by_name::<u16>("status").unwrap().name(), "status");
    assert_eq!(runtime.attr_by_name::<String>("msg").unwrap().key(), MESSAGE.key());
}

#[test]
fn lookup_misses_are_classified_not_found() {
    let runtime = crate::myapp();
    let not_found = runtime.code(Code::NotFound);

    let bad_type = runtime.attr_by_name::<String>("status").unwrap_err();
    assert!(bad_type.is(&not_found));
    assert_eq!(STATUS.get(&bad_type), Some(404));

    let bad_name = runtime.attr_by_name::<u16>("_status").unwrap_err();
    assert!(bad_name.is(&not_found));
    assert_eq!(extract::code(Some(&bad_name)), "not_found(5)");
    assert_eq!(bad_name.cause().to_string(), "attr _status not found");
}

#[test]
fn later_name_registration_supersedes_earlier() {
    let runtime = crate::myapp();
    let first: Attr<String> = runtime.define_attr("dup", AttrOptions::new());
    let second: Attr<String> = runtime.define_attr("dup", AttrOptions::new());

    assert_ne!(first.key(), second.key());
    assert_eq!(runtime.attr_by_name::<String>("dup").unwrap().key(), second.key());
    assert_eq!(runtime.attr_by_key::<String>(first.key()).unwrap().key(), first.key());
}

#[test]
fn duplicate_names_can_be_rejected_per_attr() {
    let runtime = crate::myapp();
    let _: Attr<String> = runtime.define_attr("tenant", AttrOptions::new());

    let rejected = runtime.try_define_attr::<String>("tenant", AttrOptions::new().reject_duplicate_names(true));
    assert_eq!(rejected.unwrap_err(), RegistryError::DuplicateAttrName { name: "tenant".into() });
}

#[test]
fn duplicate_names_can_be_rejected_per_runtime() {
    let runtime = Runtime::with_config(RuntimeConfig::default().with_app_name("strict").reject_duplicate_attr_names(true));

    assert!(runtime.try_define_attr::<String>("msg", AttrOptions::new()).is_err());
    assert!(runtime
        .try_define_attr::<String>("msg", AttrOptions::new().reject_duplicate_names(false))
        .is_ok());
}

#[test]
#[should_panic(expected = "attr named tenant already exists")]
fn define_attr_panics_on_rejected_duplicate() {
    let runtime = crate::myapp();
    let _: Attr<String> = runtime.define_attr("tenant", AttrOptions::new());
    let _: Attr<String> = runtime.define_attr("tenant", AttrOptions::new().reject_duplicate_names(true));
}

#[test]
fn unregistered_attr_can_be_published_later() {
    let runtime = crate::myapp();
    let shard: Attr<u32> = runtime.define_attr("shard", AttrOptions::new().do_not_register());

    assert!(runtime.attr_by_name::<u32>("shard").is_err());
    runtime.register_attr(&shard).unwrap();
    assert_eq!(runtime.attr_by_key::<u32>(shard.key()).unwrap().key(), shard.key());
}

#[test]
fn publishing_a_handle_twice_is_rejected() {
    let runtime = crate::myapp();
    let shard: Attr<u32> = runtime.define_attr("shard", AttrOptions::new().do_not_register());

    runtime.register_attr(&shard).unwrap();
    assert_eq!(runtime.register_attr(&shard), Err(RegistryError::DuplicateAttrKey { name: "shard".into() }));
    assert_eq!(runtime.register_attr(&STATUS), Err(RegistryError::DuplicateAttrKey { name: "status".into() }));
    assert_eq!(STATUS.get(None), Some(200));
}

#[test]
fn attrs_snapshot_is_keyed_by_name_and_id() {
    let runtime = crate::myapp();
    let region: Attr<String> = runtime.define_attr("region", AttrOptions::new().description("deployment region"));

    let attrs = runtime.attrs();
    let entry = &attrs[&format!("region#{}", region.key().id())];
    assert_eq!(entry.description(), "deployment region");
    assert!(attrs.contains_key(&format!("msg#{}", MESSAGE.key().id())));
}

#[test]
fn status_default_depends_on_error_presence() {
    assert_eq!(STATUS.get(None), Some(200));

    let err = MESSAGE.attach(&Error::new("xxx"), "wrapper".into());
    assert_eq!(STATUS.get(&err), Some(500));

    let runtime = crate::myapp();
    let err = error_meta::ERROR.attach(&err, runtime.code(Code::NotFound).into_error());
    assert_eq!(STATUS.get(&err), Some(404));
}

#[test]
fn missing_value_without_default_is_none() {
    let runtime = crate::myapp();
    let retries: Attr<u32> = runtime.define_attr("retries", AttrOptions::new());
    let err = Error::new("flaky");

    assert!(!retries.has_default());
    assert_eq!(retries.get(&err), None);
    assert_eq!(retries.get_or_default(&err), 0);

    let err = retries.attach(&err, 3);
    assert_eq!(retries.get_or_default(&err), 3);
}

#[test]
fn option_replays_as_attachment() {
    let option = CALLER.option("handler".into());
    let err = option.apply(Error::new("xxx"));

    assert_eq!(option.key(), CALLER.key());
    assert_eq!(CALLER.get(&err).as_deref(), Some("handler"));
}

#[test]
fn descriptor_reports_definition() {
    let runtime = crate::myapp();
    let retries: Attr<u32> =
        runtime.define_attr("retries", AttrOptions::new().description("retry count").default_fn(|_| 1));
    let descriptor = retries.descriptor();

    assert_eq!(descriptor.name, "retries");
    assert_eq!(descriptor.description, "retry count");
    assert!(descriptor.has_default_value_func);
    assert!(descriptor.type_name.ends_with("u32"));
}
