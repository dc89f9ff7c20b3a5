//! Raw request query parameters.
//!
//! Keys keep the order in which the client sent them so that pagination
//! links can reproduce the request with only `page` changed.

use url::form_urlencoded;

const FILTER_PREFIX: &str = "q[";
const FILTER_SUFFIX: &str = "]";

/// Percent-decoded `(key, value)` pairs of one request, immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQueryParams {
    pairs: Vec<(String, String)>,
}

impl RawQueryParams {
    /// Parse a raw query string (without the leading `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Value of a scalar parameter. The last occurrence wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `q[<inner>]=<value>` entries as `(inner, value)`, in order of first
    /// appearance; a repeated inner key keeps its last value.
    #[must_use]
    pub fn predicates(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = Vec::new();
        for (k, v) in &self.pairs {
            let Some(inner) = k
                .strip_prefix(FILTER_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILTER_SUFFIX))
            else {
                continue;
            };
            if let Some(slot) = out.iter_mut().find(|(seen, _)| *seen == inner) {
                slot.1 = v.as_str();
            } else {
                out.push((inner, v.as_str()));
            }
        }
        out
    }

    /// Copy with `key` set to `value`: the first occurrence is replaced in
    /// place, later duplicates are dropped, and the pair is appended when the
    /// key was absent.
    #[must_use]
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut replaced = false;
        for (k, v) in &self.pairs {
            if k == key {
                if !replaced {
                    pairs.push((k.clone(), value.to_owned()));
                    replaced = true;
                }
            } else {
                pairs.push((k.clone(), v.clone()));
            }
        }
        if !replaced {
            pairs.push((key.to_owned(), value.to_owned()));
        }
        Self { pairs }
    }

    /// Re-encode as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for RawQueryParams
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}
