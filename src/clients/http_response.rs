//! Response types returned by the request pipeline.
//!
//! The pipeline never interprets a status code beyond 429. An
//! [`HttpResponse`] carries the raw status and body along with the two
//! Shopify headers the client understands: the `Link` pagination header and
//! the `X-Shopify-Shop-Api-Call-Limit` rate-limit header.

/// Rate limit information parsed from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is `"X/Y"` where X is the number of calls made and Y is
/// the bucket size.
///
/// # Example
///
/// ```rust
/// use shopify_rest::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("2/40");
/// assert_eq!(limit.calls_made, 2);
/// assert_eq!(limit.call_limit, 40);
///
/// assert_eq!(ApiCallLimit::parse("bad"), ApiCallLimit::default());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls made in the current bucket.
    pub calls_made: u32,
    /// Size of the bucket.
    pub call_limit: u32,
}

impl ApiCallLimit {
    /// Parses the rate limit header value.
    ///
    /// Malformed values (wrong number of parts, non-numeric parts) yield
    /// `0/0` instead of an error.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        Self::try_parse(header_value).unwrap_or_default()
    }

    fn try_parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split('/');
        let calls_made = parts.next()?.trim().parse().ok()?;
        let call_limit = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            calls_made,
            call_limit,
        })
    }
}

/// Next and previous page links parsed from the `Link` header.
///
/// Both links are `None` unless the matching relation was present.
///
/// # Example
///
/// ```rust
/// use shopify_rest::PaginationInfo;
///
/// let info = PaginationInfo::parse_link_header(
///     r#"<https://x/a>; rel="next", <https://x/b>; rel="previous""#,
/// );
/// assert_eq!(info.next.as_deref(), Some("https://x/a"));
/// assert_eq!(info.previous.as_deref(), Some("https://x/b"));
/// assert!(info.has_next_page());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Link to the previous page.
    pub previous: Option<String>,
    /// Link to the next page.
    pub next: Option<String>,
}

impl PaginationInfo {
    /// Parses a `Link` header value.
    ///
    /// Segments are `<url>; rel="..."` pairs separated by commas. A segment
    /// whose relation is exactly `rel="next"` sets the next link; any other
    /// relation sets the previous link. Segments that do not split into
    /// exactly two `;`-separated parts are skipped.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for segment in header_value.split(',') {
            if segment.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = segment.split(';').collect();
            let [url, rel] = parts.as_slice() else {
                tracing::debug!(segment, "Skipping malformed Link header segment");
                continue;
            };

            let url = url
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string();

            if rel.trim() == r#"rel="next""# {
                result.next = Some(url);
            } else {
                result.previous = Some(url);
            }
        }

        result
    }

    /// Returns `true` if a next page link is present.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next.as_deref().is_some_and(|link| !link.is_empty())
    }

    /// Returns `true` if a previous page link is present.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.previous.as_deref().is_some_and(|link| !link.is_empty())
    }

    /// Returns the decoded `page_info` cursor of the next link.
    #[must_use]
    pub fn next_page_info(&self) -> Option<String> {
        self.next.as_deref().and_then(extract_page_info)
    }

    /// Returns the decoded `page_info` cursor of the previous link.
    #[must_use]
    pub fn prev_page_info(&self) -> Option<String> {
        self.previous.as_deref().and_then(extract_page_info)
    }
}

fn extract_page_info(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;

    query.split('&').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key != "page_info" {
            return None;
        }
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}

/// A response from the request pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Pagination links from the `Link` header.
    pub pagination: PaginationInfo,
    /// Rate-limit counters from `X-Shopify-Shop-Api-Call-Limit`.
    pub api_call_limit: ApiCallLimit,
}

impl HttpResponse {
    /// Builds a response served from the cache: status 200, no pagination.
    #[must_use]
    pub fn from_cache(body: Vec<u8>) -> Self {
        Self {
            code: 200,
            body,
            pagination: PaginationInfo::default(),
            api_call_limit: ApiCallLimit::default(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the server throttled the request.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.code == 429
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
