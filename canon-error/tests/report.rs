use ariadne::Source;
use canon_attrs::ErrorKind;
use canon_error::Error;

/// A test error with a field used in its message.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot use `{}` here", symbol),
    labels = ["this character"],
    help = "remove it",
)]
struct Unexpected {
    symbol: char,
}

/// A test error without fields or spans.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something went wrong", labels = ["here"])]
struct Plain;

/// Renders the report of the given error to plain text.
fn render(err: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(input)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn message_uses_fields() {
    let err = Error::new(vec![2..3], Unexpected { symbol: '$' });
    assert_eq!(err.to_string(), "cannot use `$` here");
    assert!(err.is::<Unexpected>());
    assert!(!err.is::<Plain>());
    assert_eq!(err.downcast_ref::<Unexpected>(), Some(&Unexpected { symbol: '$' }));
}

#[test]
fn report_contains_label_and_help() {
    let err = Error::new(vec![2..3], Unexpected { symbol: '$' });
    let report = render(&err, "1 $ 2");
    assert!(report.contains("cannot use `$` here"));
    assert!(report.contains("this character"));
    assert!(report.contains("remove it"));
}

#[test]
fn spanless_report_does_not_panic() {
    let err = Error::spanless(Plain);
    let report = render(&err, "x");
    assert!(report.contains("something went wrong"));
}

#[test]
fn with_spans_keeps_existing_spans() {
    let err = Error::new(vec![0..1], Plain).with_spans(vec![4..5]);
    assert_eq!(err.spans, vec![0..1]);

    let err = Error::spanless(Plain).with_spans(vec![4..5]);
    assert_eq!(err.spans, vec![4..5]);
}
