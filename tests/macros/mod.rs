use error_meta::{compat, errorf, impl_attr_value, with_messagef, wrapf, Attr, AttrOptions, AttrValue, Error};
use error_meta::{MESSAGE, STACK};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct TenantId(u32);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tenant-{}", self.0)
    }
}

impl_attr_value!(TenantId);

#[test]
fn errorf_formats_a_leaf() {
    let id = 7;
    let err = errorf!("user {id} missing from {}", "cache");

    assert_eq!(err.to_string(), "user 7 missing from cache");
    assert!(err.as_leaf().is_some());
}

#[test]
fn with_messagef_attaches_formatted_message() {
    let err = with_messagef!(&Error::new("eof"), "reading {} bytes", 16);

    assert_eq!(MESSAGE.get(&err).as_deref(), Some("reading 16 bytes"));
    assert!(STACK.get(&err).is_none());
}

#[test]
fn wrapf_attaches_message_then_stack() {
    let err = wrapf!(&Error::new("eof"), "reading {}", "header");
    let names: Vec<String> = err.attachments().iter().map(|a| a.key().to_string()).collect();

    assert_eq!(names, ["msg", "stack"]);
    assert_eq!(MESSAGE.get(&err).as_deref(), Some("reading header"));
}

#[test]
fn compat_helpers_mirror_the_macros() {
    let base = Error::new("eof");

    let with_message = compat::with_message(&base, "reading");
    assert_eq!(with_message.to_string(), "eof:msg={reading}");

    let with_stack = compat::with_stack(&base);
    assert!(STACK.get(&with_stack).is_some());

    let wrapped = compat::wrap(&base, "reading");
    assert!(wrapped.cause().ptr_eq(&base));
    assert_eq!(wrapped.attachments().len(), 2);
}

#[test]
fn custom_values_attach_and_render() {
    let tenant: Attr<TenantId> = Attr::define("tenant", AttrOptions::new().do_not_register());
    let err = tenant.attach(&Error::new("quota"), TenantId(3));

    assert_eq!(tenant.get(&err), Some(TenantId(3)));
    assert_eq!(err.to_string(), "quota:tenant={tenant-3}");
    assert_eq!(TenantId(3).to_json(), serde_json::json!("tenant-3"));
}
