//! Outbound HTTP policy.
//!
//! Every request RxLens makes leaves through [`SandboxClient`], which refuses
//! hosts outside its allowlist before anything touches the network.

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::warn;
use url::Url;

use crate::error::RxLensError;

/// Hosts reachable out of the box: every Wikipedia edition and local mirrors.
const DEFAULT_HOSTS: [&str; 3] = ["wikipedia.org", "localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: BTreeSet<String>,
}

/// `host` is `allowed` itself or one of its subdomains.
fn host_matches(host: &str, allowed: &str) -> bool {
    match host.strip_suffix(allowed) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}

impl SandboxClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, RxLensError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RxLensError::Client(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            allowlist: DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect(),
        })
    }

    /// Allow `domain` and its subdomains.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.trim().to_ascii_lowercase());
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| self.allowlist.iter().any(|a| host_matches(&host, a)))
    }

    /// Start a GET request, or fail with `Security` if the host is not allowed.
    pub fn get(&self, url: &str) -> Result<RequestBuilder, RxLensError> {
        if self.is_allowed(url) {
            Ok(self.client.get(url))
        } else {
            warn!(url, "Blocked request to a host outside the allowlist");
            Err(RxLensError::Security(format!("{} is not an allowed host", url)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SandboxClient {
        SandboxClient::new(Duration::from_secs(2), "rxlens-test").unwrap()
    }

    #[test]
    fn test_wikipedia_subdomains_allowed() {
        let c = client();
        assert!(c.is_allowed("https://en.wikipedia.org/w/api.php"));
        assert!(c.is_allowed("https://de.wikipedia.org/w/api.php?action=query"));
        assert!(c.is_allowed("http://localhost:8080/w/api.php"));
    }

    #[test]
    fn test_other_hosts_rejected() {
        let c = client();
        assert!(!c.is_allowed("https://example.com/"));
        assert!(!c.is_allowed("https://notwikipedia.org/"));
        assert!(!c.is_allowed("not a url"));
        assert!(matches!(c.get("https://example.com/"), Err(RxLensError::Security(_))));
    }

    #[test]
    fn test_host_matches_on_label_boundary() {
        assert!(host_matches("wikipedia.org", "wikipedia.org"));
        assert!(host_matches("en.m.wikipedia.org", "wikipedia.org"));
        assert!(!host_matches("evilwikipedia.org", "wikipedia.org"));
        assert!(!host_matches("wikipedia.org.evil.com", "wikipedia.org"));
    }

    #[test]
    fn test_allow_domain_extends_policy() {
        let mut c = client();
        assert!(!c.is_allowed("https://wiki.internal.example/api.php"));
        c.allow_domain("wiki.internal.example");
        assert!(c.is_allowed("https://wiki.internal.example/api.php"));
        assert!(c.get("https://wiki.internal.example/api.php").is_ok());
    }
}
