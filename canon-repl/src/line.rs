//! Processing of a single input line.
//!
//! A line is an expression, optionally followed by a `;` and a comma-separated list of bindings:
//!
//! ```text
//! x^2 + y; x = 3, y = 1/2
//! ```
//!
//! Each bound value is itself parsed as an expression, so values may refer to other variables.

use ariadne::Fmt;
use canon_attrs::ErrorKind;
use canon_compute::Expr;
use canon_error::{Error, EXPR};
use canon_parser::{parse_with, ParseOptions};
use crate::options::Options;
use std::ops::Range;
use tracing::debug;

/// A binding that is not of the form `name = value`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed binding",
    labels = ["this binding"],
    help = format!("bindings look like {}, where the name is a single letter", "x = 1/2".fg(EXPR)),
)]
pub struct MalformedBinding;

/// A `name = value` binding, before its value is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding<'a> {
    name: &'a str,
    value: &'a str,

    /// The position of `value` in the line.
    value_offset: usize,
}

/// Splits a line into its expression and its bindings.
fn split(line: &str) -> Result<(&str, Vec<Binding>), Error> {
    let Some((expr, rest)) = line.split_once(';') else {
        return Ok((line, Vec::new()));
    };

    let mut bindings = Vec::new();
    let mut offset = expr.len() + 1;
    for part in rest.split(',') {
        let span = offset..offset + part.len();
        offset += part.len() + 1;
        if part.trim().is_empty() {
            continue;
        }

        let malformed = || Error::new(vec![trimmed_span(part, span.clone())], MalformedBinding);
        let (name, value) = part.split_once('=').ok_or_else(malformed)?;
        let name = name.trim();
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => {},
            _ => return Err(malformed()),
        }

        bindings.push(Binding {
            name,
            value,
            value_offset: span.start + part.len() - value.len(),
        });
    }

    Ok((expr, bindings))
}

/// Narrows a span to exclude the leading and trailing whitespace of the text it covers.
fn trimmed_span(text: &str, span: Range<usize>) -> Range<usize> {
    let start = span.start + (text.len() - text.trim_start().len());
    let end = span.end - (text.len() - text.trim_end().len());
    start..end.max(start)
}

/// Moves the spans of an error by the given offset.
fn shift(mut err: Error, offset: usize) -> Error {
    for span in &mut err.spans {
        *span = span.start + offset..span.end + offset;
    }
    err
}

/// Parses, evaluates, and renders one line.
pub fn process(line: &str, options: &Options) -> Result<String, Error> {
    let parse_options = ParseOptions { max_depth: options.max_depth };
    let (expr_text, bindings) = split(line)?;
    let expr_span = trimmed_span(expr_text, 0..expr_text.len());

    let mut result = parse_with(expr_text, &parse_options)?;
    if !bindings.is_empty() {
        let mut values = Vec::with_capacity(bindings.len());
        for binding in &bindings {
            let value = parse_with(binding.value, &parse_options)
                .map_err(|err| shift(err, binding.value_offset))?;
            values.push((binding.name, value));
        }
        debug!(bindings = values.len(), "evaluating line");
        result = result.evaluate(&values)
            .map_err(|err| err.with_spans(vec![expr_span.clone()]))?;
    }

    if options.simplify {
        result = result.simplify().map_err(|err| err.with_spans(vec![expr_span]))?;
    }

    Ok(render(&result, options))
}

fn render(expr: &Expr, options: &Options) -> String {
    if options.tree {
        expr.function_form().to_string()
    } else {
        expr.to_string()
    }
}
