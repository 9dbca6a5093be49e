use movie_catalog_config::{PosterConfig, DEFAULT_FALLBACK_POSTER, DEFAULT_PROXY_BASE};
use tracing::debug;
use url::Url;

/// Rewrites poster URLs into absolute, proxy-routed addresses.
///
/// Many image hosts block hotlinking or cross-origin fetches, so every poster is
/// served through one image proxy that takes the target as `?url=<host+path+query>`.
/// All methods are pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterPolicy {
    proxy_base: String,
    fallback: String,
    /// Parsed `proxy_base`, used to recognize proxied URLs written in another shape
    endpoint: Option<Url>,
}

impl PosterPolicy {
    pub fn new(proxy_base: impl Into<String>, fallback: impl Into<String>) -> Self {
        let proxy_base = proxy_base.into();
        let endpoint = Url::parse(&absolutize(&proxy_base)).ok();
        Self {
            proxy_base,
            fallback: fallback.into(),
            endpoint,
        }
    }

    pub fn from_config(config: &PosterConfig) -> Self {
        Self::new(config.proxy_base.clone(), config.fallback.clone())
    }

    pub fn proxy_base(&self) -> &str {
        &self.proxy_base
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Absent or blank input yields `None`; the caller decides on a fallback.
    ///
    /// Already-proxied URLs and the fallback itself are not wrapped again, so
    /// normalizing twice is the same as normalizing once.
    pub fn normalize(&self, url: Option<&str>) -> Option<String> {
        let trimmed = url.map(str::trim).filter(|u| !u.is_empty())?;

        if self.is_proxied(trimmed) || trimmed == self.fallback {
            return Some(trimmed.to_string());
        }

        let absolute = absolutize(trimmed);
        if self.is_proxied(&absolute) {
            return Some(absolute);
        }

        match Url::parse(&absolute) {
            Ok(parsed) => {
                if let Some(query) = self.proxied_query(&parsed) {
                    return Some(format!("{}{}{}", self.proxy_base, self.separator(), query));
                }
                match proxy_target(&parsed) {
                    Some(target) => Some(format!(
                        "{}{}url={}",
                        self.proxy_base,
                        self.separator(),
                        urlencoding::encode(&target)
                    )),
                    None => Some(absolute),
                }
            }
            Err(e) => {
                debug!("Poster URL not parseable ({}), keeping as-is: {}", e, absolute);
                Some(absolute)
            }
        }
    }

    /// Write-time variant: never empty
    pub fn normalize_or_fallback(&self, url: Option<&str>) -> String {
        self.normalize(url).unwrap_or_else(|| self.fallback.clone())
    }

    /// Display-time variant: absolute but not proxied
    pub fn display_url(&self, url: Option<&str>) -> String {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(u) => absolutize(u),
            None => self.fallback.clone(),
        }
    }

    /// Exact canonical form: `<proxy_base>?url=...`
    pub fn is_proxied(&self, url: &str) -> bool {
        let marker = format!("{}url=", self.separator());
        url.strip_prefix(self.proxy_base.as_str())
            .is_some_and(|rest| rest.starts_with(&marker))
    }

    /// A base that already carries a query gets `url` appended with `&`
    fn separator(&self) -> char {
        if self.proxy_base.contains('?') {
            '&'
        } else {
            '?'
        }
    }

    /// Query of a URL that already points at the proxy endpoint with a `url` parameter.
    /// Scheme, host case and a trailing slash on the path do not matter.
    fn proxied_query<'a>(&self, parsed: &'a Url) -> Option<&'a str> {
        let endpoint = self.endpoint.as_ref()?;
        let same_host = parsed.host_str().is_some() && parsed.host_str() == endpoint.host_str();
        let same_path = parsed.path().trim_end_matches('/') == endpoint.path().trim_end_matches('/');
        if !same_host || !same_path || parsed.port() != endpoint.port() {
            return None;
        }
        if !parsed.query_pairs().any(|(key, _)| key == "url") {
            return None;
        }
        // keep only the part after the base's own query, if it has one
        let query = parsed.query()?;
        match endpoint.query() {
            Some(base_query) => query
                .strip_prefix(base_query)
                .map(|rest| rest.trim_start_matches('&'))
                .filter(|rest| !rest.is_empty()),
            None => Some(query),
        }
    }
}

impl Default for PosterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_BASE, DEFAULT_FALLBACK_POSTER)
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// `//host/path` and `host/path` both become `https://host/path`
fn absolutize(url: &str) -> String {
    let mut u = url.to_string();
    if u.starts_with("//") {
        u = format!("https:{}", u);
    }
    if !has_http_scheme(&u) {
        u = format!("https://{}", u.trim_start_matches('/'));
    }
    u
}

/// `host[:port]/path[?query]`, fragment dropped
fn proxy_target(parsed: &Url) -> Option<String> {
    let host = parsed.host_str()?;
    let mut target = host.to_string();
    if let Some(port) = parsed.port() {
        target.push_str(&format!(":{}", port));
    }
    target.push_str(parsed.path());
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    Some(target)
}
