use error_meta::{Code, Error, FormatMode, ERROR, MESSAGE};

#[test]
fn display_with_renders_each_mode() {
    let runtime = crate::myapp();
    let err = ERROR.attach(&Error::new("xxx"), runtime.code(Code::NotFound).into_error());
    let err = MESSAGE.attach(&err, "wrapper".into());

    assert_eq!(
        err.display_with(FormatMode::Default).to_string(),
        "xxx:error={meta={source=error-meta;code=not_found(5)}:status={404}}:msg={wrapper}"
    );
    assert_eq!(err.display_with(FormatMode::NoValue).to_string(), "xxx:error={*}:msg={*}");
    assert_eq!(err.display_with(FormatMode::Simplified).to_string(), "xxx:*={*}:*={*}");
}

#[test]
fn meta_error_renders_without_leading_separator() {
    let runtime = crate::myapp();

    assert_eq!(
        runtime.code(Code::NotFound).to_string(),
        "meta={source=error-meta;code=not_found(5)}:status={404}"
    );
}

#[test]
fn meta_alternate_form_shows_every_field() {
    let runtime = crate::myapp();
    let meta = runtime.new_meta("github.com/acme/errors", "quota(1)", "quota exceeded");

    assert_eq!(meta.to_string(), "source=errors;code=quota(1)");
    assert_eq!(format!("{meta:#}"), "myapp:github.com/acme/errors:quota(1):quota exceeded");
}

#[test]
fn debug_prints_one_node_per_line() {
    let err = MESSAGE.attach(&MESSAGE.attach(&Error::new("xxx"), "first".into()), "second".into());
    let debug = format!("{err:?}");
    let lines: Vec<&str> = debug.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], r#"msg={"first"}"#);
    assert_eq!(lines[2], r#"msg={"second"}"#);
    assert_eq!(format!("{:?}", Error::empty()), "Empty");
}
