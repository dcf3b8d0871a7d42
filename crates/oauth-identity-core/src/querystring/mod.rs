//! Query string construction and parsing for protocol parameters.
//!
//! This module provides the ordered parameter container and the matching
//! build/parse functions used to carry OAuth/OIDC protocol parameters in
//! URL query components:
//!
//! - [`QueryParameterSet`] — ordered name → values mapping that preserves
//!   insertion order of distinct names and of repeated values.
//! - [`append_parameter`] / [`append_parameters`] — rewrite the query
//!   component of a [`Url`], keeping whatever query is already present.
//! - [`parse_query`] — tolerant parse of a raw query string into a
//!   [`QueryParameterSet`].
//!
//! ## Encoding contract
//!
//! Percent-encoding follows query-component escaping: letters, digits and
//! `-_.~` stay bare, everything else is escaped, space becomes `%20`
//! (never `+`). Parsing accepts both `&` and `;` as separators; building
//! always emits `&`. Malformed input never raises an error — key-less and
//! empty segments are dropped.

use serde::{Deserialize, Serialize};
use url::Url;

// ── QueryParameterSet ────────────────────────────────────────────────────────

/// Ordered mapping from parameter name to its value occurrences.
///
/// Each distinct name appears once, at the position it was first added;
/// its values keep the order in which they were appended. An empty
/// `String` value is the flag/absent-value marker. A name may also carry
/// zero values, meaning the bare name is emitted once when building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameterSet {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one value occurrence for `name`, creating the entry at the
    /// end when the name is new.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entry_mut(&name) {
            Some(values) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Register `name` with no value occurrence (flag-style parameter).
    ///
    /// Does nothing when the name already exists.
    pub fn add_flag(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.entry_mut(&name).is_none() {
            self.entries.push((name, Vec::new()));
        }
    }

    /// Return the value occurrences recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Whether `name` is present, with or without values.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, Vec<V>)> for QueryParameterSet {
    fn from_iter<T: IntoIterator<Item = (N, Vec<V>)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, values) in iter {
            let name = name.into();
            if values.is_empty() {
                set.add_flag(name);
            } else {
                for value in values {
                    set.append(name.clone(), value);
                }
            }
        }
        set
    }
}

impl IntoIterator for QueryParameterSet {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ── append_parameter ─────────────────────────────────────────────────────────

/// Append a single parameter to the query component of `uri`.
///
/// An existing query is kept verbatim as the prefix. `None` or an empty
/// value emits the bare percent-encoded name (flag form, no `=`). All
/// other URI components are preserved unchanged.
pub fn append_parameter(uri: &Url, name: &str, value: Option<&str>) -> Url {
    let mut buffer = uri.query().unwrap_or("").to_string();
    push_pair(&mut buffer, name, value.filter(|v| !v.is_empty()));
    replace_query(uri, &buffer)
}

// ── append_parameters ────────────────────────────────────────────────────────

/// Append every parameter in `parameters` to the query component of
/// `uri`, in the set's iteration order.
///
/// A name with zero values emits the bare name once; a name with values
/// emits one `name=value` pair per value, where an empty value again
/// degrades to the bare name. An empty set returns `uri` unchanged.
pub fn append_parameters(uri: &Url, parameters: &QueryParameterSet) -> Url {
    if parameters.is_empty() {
        return uri.clone();
    }

    let mut buffer = uri.query().unwrap_or("").to_string();
    for (name, values) in parameters.iter() {
        if values.is_empty() {
            push_pair(&mut buffer, name, None);
        } else {
            for value in values {
                push_pair(&mut buffer, name, Some(value.as_str()).filter(|v| !v.is_empty()));
            }
        }
    }
    replace_query(uri, &buffer)
}

// ── parse_query ──────────────────────────────────────────────────────────────

/// Parse a raw query string into a [`QueryParameterSet`].
///
/// A single leading `?` is stripped. Segments are split on `&` and `;`;
/// empty segments are discarded. Each segment splits once on its first
/// `=`; key and value are percent-decoded independently. A segment whose
/// decoded key is empty is dropped entirely, value included. A segment
/// with no `=` contributes the empty-value marker for its key.
///
/// Query strings arrive from untrusted network input, so malformed
/// fragments are tolerated, never rejected: this function cannot fail.
pub fn parse_query(query: &str) -> QueryParameterSet {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut parameters = QueryParameterSet::new();
    for segment in query.split(['&', ';']) {
        if segment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match segment.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (segment, None),
        };
        let key = decode_component(raw_key);
        if key.is_empty() {
            // Key-less segments are dropped even when a value is present.
            continue;
        }
        let value = raw_value.map(decode_component).unwrap_or_default();
        parameters.append(key, value);
    }
    parameters
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// Append one `name` or `name=value` piece to `buffer`, `&`-joined when
/// the buffer is non-empty. Name and value are percent-encoded
/// independently.
fn push_pair(buffer: &mut String, name: &str, value: Option<&str>) {
    if !buffer.is_empty() {
        buffer.push('&');
    }
    buffer.push_str(&urlencoding::encode(name));
    if let Some(value) = value {
        buffer.push('=');
        buffer.push_str(&urlencoding::encode(value));
    }
}

/// Return a copy of `uri` whose query component is `buffer`; scheme,
/// host, path and fragment are untouched.
fn replace_query(uri: &Url, buffer: &str) -> Url {
    let mut out = uri.clone();
    out.set_query(if buffer.is_empty() { None } else { Some(buffer) });
    out
}

/// Percent-decode one key or value. Malformed sequences decode lossily
/// instead of failing.
fn decode_component(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────
