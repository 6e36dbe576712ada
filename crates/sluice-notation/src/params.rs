//! Raw and parsed parameter mappings.
//!
//! Both mappings preserve insertion order: parameters are dispatched in the
//! order the request listed them. Re-inserting an existing key replaces its
//! value but keeps its original position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::value::Arg;

/// One raw parameter value as it arrives from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An already-structured argument list; bypasses the grammar.
    List(Vec<Arg>),
    /// A string in bracket notation (or a bare scalar string).
    Text(String),
    /// A single non-string scalar from a structured source.
    Scalar(Arg),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<Vec<Arg>> for RawValue {
    fn from(args: Vec<Arg>) -> Self {
        RawValue::List(args)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Scalar(Arg::Int(n))
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Scalar(Arg::Float(n))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Scalar(Arg::Bool(b))
    }
}

/// Ordered mapping from parameter name to raw value.
///
/// # Example
///
/// ```
/// use sluice_notation::{Arg, RawParameters};
///
/// let params = RawParameters::from_query("where=%5Bage%2C%3E%2C18%5D&sort=[id,-1]&page=2");
/// let keys: Vec<&str> = params.keys().collect();
/// assert_eq!(keys, ["where", "sort", "page"]);
///
/// let structured = RawParameters::new()
///     .with("where", vec![Arg::from("age"), Arg::from(">"), Arg::Int(18)])
///     .with("perPage", 5i64);
/// assert_eq!(structured.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParameters {
    entries: IndexMap<String, RawValue>,
}

impl RawParameters {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, replacing any previous value for the key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builds a mapping from flat string pairs, as an HTTP adapter would
    /// hand them over.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), RawValue::Text(v.into())))
            .collect()
    }

    /// Splits and percent-decodes a URL query string.
    ///
    /// A leading `?` is ignored, `+` decodes to a space, and a key without
    /// `=` gets an empty value. Undecodable components are kept as-is.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), RawValue::Text(decode_component(value)))
            })
            .collect()
    }

    /// Returns the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// Iterates over entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.entries.iter()
    }

    /// Iterates over keys in request order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawParameters {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        RawParameters {
            entries: iter.into_iter().collect(),
        }
    }
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(|s| s.into_owned());
    decoded.unwrap_or(spaced)
}

/// Ordered mapping from parameter name to parsed argument list.
///
/// Malformed entries keep their position in the mapping but carry the
/// parse error instead of arguments. [`get`](Self::get), [`first`](Self::first)
/// and [`iter`](Self::iter) only see well-formed entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedParameters {
    entries: IndexMap<String, Result<Vec<Arg>, NotationError>>,
}

impl ParsedParameters {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, parsed: Result<Vec<Arg>, NotationError>) {
        self.entries.insert(key, parsed);
    }

    /// Returns the arguments parsed for a key.
    pub fn get(&self, key: &str) -> Option<&[Arg]> {
        match self.entries.get(key)? {
            Ok(args) => Some(args),
            Err(_) => None,
        }
    }

    /// Returns the first argument parsed for a key.
    pub fn first(&self, key: &str) -> Option<&Arg> {
        self.get(key).and_then(<[Arg]>::first)
    }

    /// Iterates over well-formed entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arg])> {
        self.entries().filter_map(|(key, parsed)| Some((key, parsed.ok()?)))
    }

    /// Iterates over every entry in request order, malformed ones included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Result<&[Arg], &NotationError>)> {
        self.entries
            .iter()
            .map(|(key, parsed)| (key.as_str(), parsed.as_deref()))
    }

    /// Entries dropped because their value was malformed, in request order.
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &NotationError)> {
        self.entries().filter_map(|(key, parsed)| Some((key, parsed.err()?)))
    }

    /// Returns the number of successfully parsed entries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no entry parsed successfully.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(String, Result<Vec<Arg>, NotationError>)> for ParsedParameters {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<Vec<Arg>, NotationError>)>,
    {
        ParsedParameters {
            entries: iter.into_iter().collect(),
        }
    }
}
