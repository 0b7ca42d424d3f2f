//! Query string decoding.
//!
//! The parser does not decode query strings by itself. It hands the text
//! after `'?'` to a [`QueryDecoder`] and keeps the first value of each key.

use crate::pct_enc::EStr;
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Decoded query parameters: every key with its values in order of appearance.
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// A decoder of query strings.
///
/// A decoder never fails: on malformed input it returns an empty map.
///
/// The trait is implemented for closures, which comes in handy when
/// a fixed result is wanted:
///
/// ```
/// use dsn_parse::{query::QueryValues, Dsn};
///
/// let fixed = |_: &str| QueryValues::from([("k".into(), vec!["v".into()])]);
/// let dsn = Dsn::parse_with("/db?whatever", fixed)?;
/// assert_eq!(dsn.param("k"), Some("v"));
/// # Ok::<_, dsn_parse::ParseError>(())
/// ```
pub trait QueryDecoder {
    /// Decodes a query string, with the leading `'?'` already removed.
    fn decode(&self, query: &str) -> QueryValues;
}

impl<F: Fn(&str) -> QueryValues> QueryDecoder for F {
    #[inline]
    fn decode(&self, query: &str) -> QueryValues {
        self(query)
    }
}

/// A decoder for `application/x-www-form-urlencoded` query strings.
///
/// - Pairs are separated by `'&'`. Empty pairs are skipped.
/// - A pair is split on its first `'='`. A pair without `'='` has an empty value.
/// - `'+'` decodes to a space and `%XX` to the byte `0xXX`.
///
/// Invalid UTF-8 in the decoded bytes is replaced with `U+FFFD`.
///
/// The query is malformed, and an empty map is returned, if any pair contains
/// `';'` or has a `'%'` not followed by two hexadecimal digits.
///
/// # Examples
///
/// ```
/// use dsn_parse::query::{FormDecoder, QueryDecoder};
///
/// let values = FormDecoder.decode("a=1&b=x+y&a=2&flag");
/// assert_eq!(values["a"], ["1", "2"]);
/// assert_eq!(values["b"], ["x y"]);
/// assert_eq!(values["flag"], [""]);
///
/// assert!(FormDecoder.decode("a=%zz").is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FormDecoder;

impl QueryDecoder for FormDecoder {
    fn decode(&self, query: &str) -> QueryValues {
        decode_form(query).unwrap_or_default()
    }
}

fn decode_form(query: &str) -> Option<QueryValues> {
    let mut values = QueryValues::new();
    for pair in EStr::new(query)?.split('&') {
        if pair.is_empty() {
            continue;
        }
        if pair.as_str().contains(';') {
            return None;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, EStr::EMPTY));
        let key = key.decode_form().to_string_lossy().into_owned();
        let value = value.decode_form().to_string_lossy().into_owned();
        values.entry(key).or_default().push(value);
    }
    Some(values)
}

/// Collapses decoded query values to the first value of each key.
///
/// Keys without any value are dropped.
///
/// # Examples
///
/// ```
/// use dsn_parse::query::{collapse, QueryValues};
///
/// let values = QueryValues::from([
///     ("a".into(), vec!["1".into(), "2".into()]),
///     ("b".into(), vec![]),
/// ]);
/// let params = collapse(values);
/// assert_eq!(params.len(), 1);
/// assert_eq!(params["a"], "1");
/// ```
#[must_use]
pub fn collapse(values: QueryValues) -> BTreeMap<String, String> {
    values
        .into_iter()
        .filter_map(|(key, values)| values.into_iter().next().map(|value| (key, value)))
        .collect()
}
