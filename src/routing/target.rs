//! Upstream target resolution.

use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{QueryError, QueryResult};

/// Usage text returned for paths that cannot be routed.
pub const USAGE: &str = "Invalid request, should be /org/site/branch/path?query={<json query>}";

/// Upstream coordinates extracted from an inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub org: String,
    pub site: String,
    pub branch: String,
    /// Remaining path, segments joined with `/`, no leading slash.
    pub path: String,
}

impl UpstreamTarget {
    /// Parse `/<org>/<site>/<branch>/<rest...>`.
    pub fn from_path(path: &str) -> QueryResult<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let (Some(org), Some(site), Some(branch)) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(QueryError::BadRequest(USAGE.to_string()));
        };

        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            return Err(QueryError::BadRequest(USAGE.to_string()));
        }

        Ok(Self {
            org: org.to_string(),
            site: site.to_string(),
            branch: branch.to_string(),
            path: rest.join("/"),
        })
    }

    /// Host name of the upstream for this target.
    pub fn host(&self, upstream: &UpstreamConfig) -> String {
        format!("{}--{}--{}.{}", self.branch, self.site, self.org, upstream.host)
    }

    /// Full upstream URL.
    pub fn url(&self, upstream: &UpstreamConfig) -> QueryResult<Url> {
        let raw = format!("{}://{}/{}", upstream.scheme, self.host(upstream), self.path);
        Url::parse(&raw)
            .map_err(|e| QueryError::BadRequest(format!("Invalid upstream URL '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        let target = UpstreamTarget::from_path("/org/proj/branch/path/idx.json").unwrap();
        assert_eq!(target.org, "org");
        assert_eq!(target.site, "proj");
        assert_eq!(target.branch, "branch");
        assert_eq!(target.path, "path/idx.json");
    }

    #[test]
    fn test_empty_segments_ignored() {
        let target = UpstreamTarget::from_path("//org//site/main///query-index.json").unwrap();
        assert_eq!(target.branch, "main");
        assert_eq!(target.path, "query-index.json");
    }

    #[test]
    fn test_too_few_segments() {
        for path in ["/", "/org", "/org/site", "/org/site/main", "/org/site/main/"] {
            let err = UpstreamTarget::from_path(path).unwrap_err();
            assert!(matches!(err, QueryError::BadRequest(ref m) if m == USAGE), "{}", path);
        }
    }

    #[test]
    fn test_upstream_url() {
        let target = UpstreamTarget::from_path("/adobe/site/main/data/sheet.json").unwrap();
        let url = target.url(&UpstreamConfig::default()).unwrap();
        assert_eq!(url.as_str(), "https://main--site--adobe.aem.page/data/sheet.json");
    }

    #[test]
    fn test_upstream_url_with_port() {
        let target = UpstreamTarget::from_path("/o/s/b/x.json").unwrap();
        let upstream = UpstreamConfig {
            scheme: "http".into(),
            host: "sheets.test:3000".into(),
            ..UpstreamConfig::default()
        };
        let url = target.url(&upstream).unwrap();
        assert_eq!(url.as_str(), "http://b--s--o.sheets.test:3000/x.json");
    }

    #[test]
    fn test_unroutable_host_is_bad_request() {
        let target = UpstreamTarget::from_path("/o/s/b%20c:d/x.json").unwrap();
        let err = target.url(&UpstreamConfig::default()).unwrap_err();
        assert!(matches!(err, QueryError::BadRequest(_)));
    }
}
