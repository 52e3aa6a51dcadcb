//! Response and body assertions used by the check suites.
//!
//! Every helper returns `Result<_, AssertionError>` instead of panicking, so
//! a suite can record the failure and move on to the next check. In tests,
//! `?` or `.unwrap()` turns them into ordinary test failures.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::HttpResponse;

/// A failed expectation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionError {
    #[error("Item at index {index} should have {property} === {expected}, found {}", describe(.actual))]
    ItemMismatch {
        index: usize,
        property: String,
        expected: Value,
        actual: Option<Value>,
    },
    #[error("expected {property} === {expected}, found {}", describe(.actual))]
    PropertyMismatch {
        property: String,
        expected: Value,
        actual: Option<Value>,
    },
    #[error("expected property {0:?} to be present")]
    MissingProperty(String),
    #[error("expected property {0:?} to be absent")]
    UnexpectedProperty(String),
    #[error("expected a 2xx response from {url}, got HTTP {status}")]
    NotOk { status: u16, url: String },
    #[error("expected a JSON array, got {0}")]
    NotArray(&'static str),
    #[error("expected a non-empty array")]
    EmptyArray,
    #[error("expected a JSON object, got {0}")]
    NotObject(&'static str),
    #[error("body does not match at {path}: expected {expected}, found {}", describe(.actual))]
    ObjectMismatch {
        path: String,
        expected: Value,
        actual: Option<Value>,
    },
    #[error("expected {property} to be longer than {min} characters, got {actual}")]
    TooShort {
        property: String,
        min: usize,
        actual: usize,
    },
    #[error("item at index {index} could not be inspected: {message}")]
    Unserializable { index: usize, message: String },
}

fn describe(actual: &Option<Value>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => "nothing".to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scalar equality with numbers compared by value, so `1` equals `1.0`.
fn same_value(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual, expected) {
        (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Some(a), b) => a == b,
        (None, _) => false,
    }
}

/// Check that every item has `item[property] == expected`.
///
/// Stops at the first mismatch and reports its index.
pub fn expect_all_to_have_property<T: Serialize>(
    items: &[T],
    property: &str,
    expected: impl Into<Value>,
) -> Result<(), AssertionError> {
    let expected = expected.into();
    for (index, item) in items.iter().enumerate() {
        let item = serde_json::to_value(item).map_err(|e| AssertionError::Unserializable {
            index,
            message: e.to_string(),
        })?;
        let actual = item.get(property);
        if !same_value(actual, &expected) {
            return Err(AssertionError::ItemMismatch {
                index,
                property: property.to_string(),
                expected,
                actual: actual.cloned(),
            });
        }
    }
    Ok(())
}

/// The response status is 2xx.
pub fn expect_ok(response: &HttpResponse) -> Result<(), AssertionError> {
    if response.ok() {
        Ok(())
    } else {
        Err(AssertionError::NotOk {
            status: response.status,
            url: response.url.clone(),
        })
    }
}

/// The body is a JSON array with at least one element; returns the items.
pub fn expect_non_empty_array(body: &Value) -> Result<&[Value], AssertionError> {
    let items = body
        .as_array()
        .ok_or_else(|| AssertionError::NotArray(kind(body)))?;
    if items.is_empty() {
        return Err(AssertionError::EmptyArray);
    }
    Ok(items)
}

fn expect_object(body: &Value) -> Result<&serde_json::Map<String, Value>, AssertionError> {
    body.as_object()
        .ok_or_else(|| AssertionError::NotObject(kind(body)))
}

/// `body[property] == expected`.
pub fn expect_property(
    body: &Value,
    property: &str,
    expected: impl Into<Value>,
) -> Result<(), AssertionError> {
    let expected = expected.into();
    let actual = expect_object(body)?.get(property);
    if same_value(actual, &expected) {
        Ok(())
    } else {
        Err(AssertionError::PropertyMismatch {
            property: property.to_string(),
            expected,
            actual: actual.cloned(),
        })
    }
}

pub fn expect_has_property(body: &Value, property: &str) -> Result<(), AssertionError> {
    if expect_object(body)?.contains_key(property) {
        Ok(())
    } else {
        Err(AssertionError::MissingProperty(property.to_string()))
    }
}

pub fn expect_no_property(body: &Value, property: &str) -> Result<(), AssertionError> {
    if expect_object(body)?.contains_key(property) {
        Err(AssertionError::UnexpectedProperty(property.to_string()))
    } else {
        Ok(())
    }
}

/// `body[property]` is a string with more than `min` characters.
pub fn expect_longer_than(
    body: &Value,
    property: &str,
    min: usize,
) -> Result<(), AssertionError> {
    let value = expect_object(body)?
        .get(property)
        .ok_or_else(|| AssertionError::MissingProperty(property.to_string()))?;
    let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
    if len > min {
        Ok(())
    } else {
        Err(AssertionError::TooShort {
            property: property.to_string(),
            min,
            actual: len,
        })
    }
}

/// `body` contains everything in `expected`.
///
/// Objects match when every expected key matches recursively (extra keys in
/// `body` are fine). Arrays must have the same length and match element-wise.
/// Anything else compares by equality.
pub fn expect_matches_object<T: Serialize>(
    body: &Value,
    expected: &T,
) -> Result<(), AssertionError> {
    let expected = serde_json::to_value(expected).map_err(|e| AssertionError::Unserializable {
        index: 0,
        message: e.to_string(),
    })?;
    match_at("$", Some(body), &expected)
}

fn match_at(path: &str, actual: Option<&Value>, expected: &Value) -> Result<(), AssertionError> {
    let mismatch = || AssertionError::ObjectMismatch {
        path: path.to_string(),
        expected: expected.clone(),
        actual: actual.cloned(),
    };

    match (expected, actual) {
        (Value::Object(want), Some(Value::Object(have))) => {
            for (key, value) in want {
                match_at(&format!("{}.{}", path, key), have.get(key), value)?;
            }
            Ok(())
        }
        (Value::Array(want), Some(Value::Array(have))) => {
            if want.len() != have.len() {
                return Err(mismatch());
            }
            for (i, (w, h)) in want.iter().zip(have).enumerate() {
                match_at(&format!("{}[{}]", path, i), Some(h), w)?;
            }
            Ok(())
        }
        (want, have) if same_value(have, want) => Ok(()),
        _ => Err(mismatch()),
    }
}
