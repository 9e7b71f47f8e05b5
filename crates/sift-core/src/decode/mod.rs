//! Module: decode
//! Responsibility: flat request parameters → ordered directive arguments.
//! Does not own: directive resolution or pagination decisions.


use derive_more::{Deref, IntoIterator};
use std::slice;

///
/// RawValue
///
/// One request parameter: a single string or an ordered list of strings.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawValue {
    Single(String),
    Multi(Vec<String>),
}

impl RawValue {
    /// Every argument string, in arrival order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }

    /// Append `value`, turning a scalar into a list.
    fn push(&mut self, value: String) {
        match self {
            Self::Single(existing) => {
                *self = Self::Multi(vec![std::mem::take(existing), value]);
            }
            Self::Multi(values) => values.push(value),
        }
    }

    fn extend(&mut self, other: Self) {
        match other {
            Self::Single(value) => self.push(value),
            Self::Multi(values) => {
                for value in values {
                    self.push(value);
                }
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

///
/// RawParams
///
/// Ordered name → value(s) mapping with unique names.
/// Iteration order is first-seen name order.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct RawParams(#[into_iterator(owned, ref)] Vec<(String, RawValue)>);

impl RawParams {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from `(name, value)` pairs, e.g. a decoded query string.
    ///
    /// Repeated names and `name[]` keys fold into one multi-valued entry.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.push(key.as_ref(), value.into());
        }

        params
    }

    /// Insert a whole entry.
    ///
    /// A name that is already present absorbs the new values after its
    /// existing ones; scalar and list occurrences are never kept apart.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => existing.extend(value),
            None => self.0.push((name, value)),
        }
    }

    /// Append one query-string pair.
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();

        match key.strip_suffix("[]") {
            Some(name) => self.insert(name, RawValue::Multi(vec![value])),
            None => self.insert(key, RawValue::Single(value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// First value supplied for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(RawValue::first)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Copy of these parameters without the names `reserved` holds.
    #[must_use]
    pub fn without(&self, reserved: &ReservedKeys) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(name, _)| !reserved.contains(name))
                .cloned()
                .collect(),
        )
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

///
/// ReservedKeys
///
/// Transport-level parameter names that are never directives:
/// page number, page size and the pagination toggle.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservedKeys {
    page: String,
    per_page: String,
    paginate: String,
}

impl ReservedKeys {
    pub const DEFAULT_PAGE: &'static str = "page";
    pub const DEFAULT_PER_PAGE: &'static str = "per_page";
    pub const DEFAULT_PAGINATE: &'static str = "paginate";

    #[must_use]
    pub fn new(
        page: impl Into<String>,
        per_page: impl Into<String>,
        paginate: impl Into<String>,
    ) -> Self {
        Self {
            page: page.into(),
            per_page: per_page.into(),
            paginate: paginate.into(),
        }
    }

    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    #[must_use]
    pub fn per_page(&self) -> &str {
        &self.per_page
    }

    #[must_use]
    pub fn paginate(&self) -> &str {
        &self.paginate
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == self.page || name == self.per_page || name == self.paginate
    }
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PAGE,
            Self::DEFAULT_PER_PAGE,
            Self::DEFAULT_PAGINATE,
        )
    }
}

///
/// decode
///
/// Strip reserved transport keys, keeping the remaining names in the
/// order they were received. Never fails; an empty result is valid.
///
#[must_use]
pub fn decode(params: &RawParams, reserved: &ReservedKeys) -> RawParams {
    let decoded = params.without(reserved);

    tracing::debug!(
        received = params.len(),
        directives = decoded.len(),
        "decoded request parameters"
    );

    decoded
}

///
/// parse_query_string
///
/// Decode an `application/x-www-form-urlencoded` query string.
/// A leading `?` is ignored.
///
#[must_use]
pub fn parse_query_string(query: &str) -> RawParams {
    let query = query.strip_prefix('?').unwrap_or(query);

    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}
