//! Fixed-size page-number pagination for list endpoints.

use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    models::Page,
};

pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { number: 1 }
    }
}

impl PageRequest {
    /// Parses the `page` query value. Absent means the first page.
    pub fn parse(raw: Option<&str>) -> ApiResult<Self> {
        match raw {
            None => Ok(Self::default()),
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(number) if number >= 1 => Ok(Self { number }),
                _ => Err(ApiError::InvalidPage),
            },
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * PAGE_SIZE
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    /// The first page always exists, even for an empty listing.
    pub fn ensure_within(&self, count: i64) -> ApiResult<()> {
        if self.number > page_count(count) {
            return Err(ApiError::InvalidPage);
        }
        Ok(())
    }
}

pub fn page_count(count: i64) -> i64 {
    ((count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// Query string shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Builds a page of `results`, with links that keep `filters` in place.
pub fn into_page<T>(
    request: PageRequest,
    count: i64,
    results: Vec<T>,
    path: &str,
    filters: &[(&str, String)],
) -> Page<T> {
    let link = |number: i64| {
        let mut pairs = filters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>();
        pairs.push(format!("page={number}"));
        format!("{path}?{}", pairs.join("&"))
    };

    let next = (request.number < page_count(count)).then(|| link(request.number + 1));
    let previous = (request.number > 1).then(|| link(request.number - 1));

    Page {
        count,
        next,
        previous,
        results,
    }
}
