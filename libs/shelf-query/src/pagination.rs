//! `page`/`per` validation, window arithmetic and the `Link` header.

use std::fmt;

use crate::error::Error;
use crate::limits::QueryLimits;
use crate::params::RawQueryParams;

pub const PAGE_PARAM: &str = "page";
pub const PER_PARAM: &str = "per";

/// Largest row offset SQL backends accept (`i64::MAX`).
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Validated page request; the window needs the filtered row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per: u64,
}

fn positive(key: &str, raw: &str) -> Result<u64, Error> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(Error::invalid_value(key, raw)),
    }
}

impl PageRequest {
    /// # Errors
    ///
    /// `Error::InvalidValue` as `page=<raw>` or `per=<raw>` when the token is
    /// not an integer >= 1. `page` is checked first. A `page` whose row
    /// offset does not fit a signed 64-bit SQL offset is rejected as
    /// `page=<raw>` as well.
    pub fn parse(page: Option<&str>, per: Option<&str>, limits: &QueryLimits) -> Result<Self, Error> {
        let page_num = page.map_or(Ok(1), |raw| positive(PAGE_PARAM, raw))?;
        let per = match per {
            Some(raw) => limits.clamp_per(positive(PER_PARAM, raw)?),
            None => limits.effective_default_per(),
        };
        let offset = (page_num - 1).checked_mul(per);
        if !offset.is_some_and(|o| o <= MAX_OFFSET) {
            return Err(Error::invalid_value(PAGE_PARAM, page.unwrap_or_default()));
        }
        Ok(Self { page: page_num, per })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub per: u64,
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageWindow {
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let offset = (request.page - 1).saturating_mul(request.per);
        let limit = request.per;
        Self {
            page: request.page,
            per: request.per,
            offset,
            limit,
            total,
            has_next: offset.saturating_add(limit) < total,
            has_prev: request.page > 1,
        }
    }

    /// Number of the last non-empty page (1 for an empty collection).
    #[must_use]
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per).max(1)
    }

    /// Rows this window yields out of `total`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.total.saturating_sub(self.offset).min(self.limit)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Link relations for this window in `first, prev, next, last` order.
    #[must_use]
    pub fn links(&self) -> Vec<(LinkRel, u64)> {
        let mut out = Vec::with_capacity(4);
        if self.has_prev {
            out.push((LinkRel::First, 1));
            out.push((LinkRel::Prev, (self.page - 1).min(self.last_page())));
        }
        if self.has_next {
            out.push((LinkRel::Next, self.page + 1));
            out.push((LinkRel::Last, self.last_page()));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRel {
    First,
    Prev,
    Next,
    Last,
}

impl fmt::Display for LinkRel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkRel::First => "first",
            LinkRel::Prev => "prev",
            LinkRel::Next => "next",
            LinkRel::Last => "last",
        })
    }
}

/// Build the `Link` header value, or `None` when there is a single page.
///
/// `base` is the request URL without its query (absolute or just the
/// path). Every parameter of `params` is kept in place; only `page` changes.
#[must_use]
pub fn link_header(base: &str, params: &RawQueryParams, window: &PageWindow) -> Option<String> {
    let entries: Vec<String> = window
        .links()
        .into_iter()
        .map(|(rel, page)| {
            let query = params
                .with_param(PAGE_PARAM, &page.to_string())
                .to_query_string();
            format!("<{base}?{query}>; rel=\"{rel}\"")
        })
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(entries.join(", "))
    }
}
