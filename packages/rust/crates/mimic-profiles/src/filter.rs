//! Structural filter language over profile records.
//!
//! A [`FilterSpec`] is compiled once into a [`CompiledFilter`], a single predicate
//! over the JSON projection of a record:
//!
//! ```text
//! FilterSpec ── compile(projection) ──► Fn(&Value) -> bool
//!   Predicate    f(projected)
//!   Pattern      regex on identity string (records) or coerced scalar
//!   Conjunction  every child, each compiled against the projected value
//!   FieldMap     child compiled with projection `value[field]`
//!   Literal      equality, same identity-string special case as Pattern
//! ```
//!
//! A projection that cannot be resolved (missing key, non-object parent) never
//! errors; the branch simply does not match.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::ProfileError;

/// Field holding the identity string of a record projection.
const IDENTITY_FIELD: &str = "userAgent";
/// Key marking a pattern in the document form of a filter.
const REGEX_KEY: &str = "$regex";

/// Opaque predicate over a (sub)value.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Compiled predicate over a whole record projection.
pub type CompiledFilter = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Recursive filter specification.
#[derive(Clone)]
pub enum FilterSpec {
    /// Arbitrary predicate on the projected value.
    Predicate(PredicateFn),
    /// Regular expression tested against the identity string or coerced value.
    Pattern(Regex),
    /// Matches iff every child matches.
    Conjunction(Vec<FilterSpec>),
    /// Matches iff each named field satisfies its nested filter.
    FieldMap(Vec<(String, FilterSpec)>),
    /// Scalar equality, same identity-string special case as `Pattern`.
    Literal(Value),
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Conjunction(children) => f.debug_tuple("Conjunction").field(children).finish(),
            Self::FieldMap(entries) => f.debug_tuple("FieldMap").field(entries).finish(),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

impl FilterSpec {
    /// Wrap a closure as a `Predicate` filter.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Compile `pattern` into a `Pattern` filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the regular expression is invalid.
    pub fn pattern(pattern: &str) -> Result<Self, ProfileError> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Scalar equality filter.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Single-entry `FieldMap`.
    pub fn field(name: impl Into<String>, nested: FilterSpec) -> Self {
        Self::FieldMap(vec![(name.into(), nested)])
    }

    /// `Conjunction` of the given filters.
    pub fn all(children: impl IntoIterator<Item = FilterSpec>) -> Self {
        Self::Conjunction(children.into_iter().collect())
    }

    /// Parse the document form used in settings files.
    ///
    /// Object keys become `FieldMap` entries in document order.
    ///
    /// - string, number, bool, null → `Literal`
    /// - array → `Conjunction`
    /// - `{"$regex": "..."}` → `Pattern`
    /// - any other object → `FieldMap`
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid `$regex` or a non-string `$regex` value.
    pub fn from_json(document: &Value) -> Result<Self, ProfileError> {
        match document {
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Conjunction),
            Value::Object(map) if map.len() == 1 && map.contains_key(REGEX_KEY) => {
                match map.get(REGEX_KEY) {
                    Some(Value::String(pattern)) => Self::pattern(pattern),
                    other => Err(ProfileError::InvalidFilter(format!(
                        "{REGEX_KEY} must be a string, got {other:?}"
                    ))),
                }
            }
            Value::Object(map) => map
                .iter()
                .map(|(key, nested)| Ok((key.clone(), Self::from_json(nested)?)))
                .collect::<Result<Vec<_>, ProfileError>>()
                .map(Self::FieldMap),
            scalar => Ok(Self::Literal(scalar.clone())),
        }
    }

    /// Compile into a single predicate over a record projection.
    #[must_use]
    pub fn compile(&self) -> CompiledFilter {
        let compiled = compile_with(self, None);
        Box::new(move |value: &Value| compiled(value))
    }
}

/// Compile `spec` against the value reached by `field` (the value itself when `None`).
fn compile_with(spec: &FilterSpec, field: Option<&str>) -> PredicateFn {
    let children: Vec<PredicateFn> = match spec {
        FilterSpec::Predicate(predicate) => vec![Arc::clone(predicate)],
        FilterSpec::Pattern(regex) => {
            let regex = regex.clone();
            let child: PredicateFn = Arc::new(move |value: &Value| {
                coerce_for_match(value).is_some_and(|text| regex.is_match(&text))
            });
            vec![child]
        }
        FilterSpec::Conjunction(items) => {
            items.iter().map(|item| compile_with(item, None)).collect()
        }
        FilterSpec::FieldMap(entries) => entries
            .iter()
            .map(|(key, nested)| compile_with(nested, Some(key.as_str())))
            .collect(),
        FilterSpec::Literal(expected) => {
            let expected = expected.clone();
            let child: PredicateFn = Arc::new(move |value: &Value| match identity_of(value) {
                Some(identity) => expected.as_str() == Some(identity),
                None => scalar_eq(&expected, value),
            });
            vec![child]
        }
    };

    let field = field.map(str::to_owned);
    Arc::new(move |parent: &Value| {
        let projected = match &field {
            None => Some(parent),
            Some(key) => parent.as_object().and_then(|object| object.get(key)),
        };
        projected.is_some_and(|value| children.iter().all(|child| child(value)))
    })
}

/// Identity string of a value that looks like a full record.
fn identity_of(value: &Value) -> Option<&str> {
    value
        .as_object()?
        .get(IDENTITY_FIELD)?
        .as_str()
        .filter(|identity| !identity.is_empty())
}

/// String form a `Pattern` is tested against.
fn coerce_for_match(value: &Value) -> Option<String> {
    if let Some(identity) = identity_of(value) {
        return Some(identity.to_string());
    }
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        _ => expected == actual,
    }
}
