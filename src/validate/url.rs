use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

/// Host used to decide whether outbound connectivity is available at all.
const CONNECTIVITY_PROBE_URL: &str = "http://www.google.com";

/// Answers reachability questions for URL validation.
pub trait Reachability {
    /// Whether outbound connectivity is currently available.
    fn network_available(&self) -> bool;
    /// Whether `url` answers a request.
    fn is_reachable(&self, url: &str) -> bool;
}

/// Used when URL checks must not touch the network.
pub struct Offline;

impl Reachability for Offline {
    fn network_available(&self) -> bool {
        false
    }

    fn is_reachable(&self, _url: &str) -> bool {
        false
    }
}

/// HTTP probe backed by a blocking `reqwest` client.
pub struct HttpProbe {
    client: Client,
    available: OnceLock<bool>,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("about-checkr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            available: OnceLock::new(),
        })
    }

    fn status(&self, url: &str) -> Option<StatusCode> {
        let head = self.client.head(url).send().ok()?;
        if head.status() != StatusCode::METHOD_NOT_ALLOWED {
            return Some(head.status());
        }
        // Some servers only answer GET.
        self.client.get(url).send().ok().map(|r| r.status())
    }
}

impl Reachability for HttpProbe {
    fn network_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let available = self.status(CONNECTIVITY_PROBE_URL).is_some();
            debug!(available, "checked network connectivity");
            available
        })
    }

    fn is_reachable(&self, url: &str) -> bool {
        match self.status(url) {
            Some(status) => status.is_success() || status.is_redirection(),
            None => false,
        }
    }
}

/// `true` when `url` has an `http://` or `https://` scheme followed by a
/// non-empty host. The shape of the host and the rest of the URL are not
/// checked.
pub fn is_well_formed(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return false;
    };
    let host = rest.split(|c: char| matches!(c, '/' | '?' | '#')).next().unwrap_or("");
    !host.is_empty() && !host.contains(char::is_whitespace)
}

/// Check a URL value.
///
/// Without `use_network`, well-formedness alone decides. With it, the URL
/// must also be reachable through `probe`, unless the probe reports that no
/// network is available, in which case reachability is treated as unknown
/// and does not fail the check.
pub fn check_url(url: &str, use_network: bool, probe: &dyn Reachability) -> bool {
    if !is_well_formed(url) {
        return false;
    }
    if !use_network || !probe.network_available() {
        return true;
    }
    probe.is_reachable(url.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeNetwork {
        available: bool,
        reachable: &'static [&'static str],
    }

    impl Reachability for FakeNetwork {
        fn network_available(&self) -> bool {
            self.available
        }

        fn is_reachable(&self, url: &str) -> bool {
            self.reachable.contains(&url)
        }
    }

    const ONLINE: FakeNetwork = FakeNetwork {
        available: true,
        reachable: &["http://www.google.com", "https://nexb.com"],
    };

    #[test]
    fn test_check_url_without_network() {
        assert!(check_url("http://www.google.com", false, &Offline));
        assert!(check_url("https://nexb.com", false, &Offline));
        assert!(check_url(
            "http://archive.apache.org/dist/httpcomponents/commons-httpclient/2.0/source/commons-httpclient-2.0-alpha2-src.tar.gz",
            false,
            &Offline
        ));
        assert!(check_url("http://de.wikipedia.org/wiki/Elf (Begriffsklärung)", false, &Offline));
        assert!(check_url("http://nothing_here.com", false, &Offline));
    }

    #[test]
    fn test_check_url_without_network_ignores_tld_and_trailing_slash() {
        assert!(check_url("http://www.google", false, &Offline));
        assert!(check_url("http://www.google.co.uk/", false, &Offline));
    }

    #[test]
    fn test_check_url_requires_scheme_and_host() {
        for url in ["google.com", "www.google.com", "", "http:", "http://", "ftp://x.org"] {
            assert!(!check_url(url, false, &Offline), "{url}");
            assert!(!check_url(url, true, &ONLINE), "{url}");
        }
    }

    #[test]
    fn test_check_url_with_network() {
        assert!(check_url("http://www.google.com", true, &ONLINE));
        assert!(check_url("https://nexb.com", true, &ONLINE));
        assert!(!check_url("http://nothing_here.com", true, &ONLINE));
        assert!(!check_url("http://www.google", true, &ONLINE));
    }

    #[test]
    fn test_check_url_with_network_unavailable_is_indeterminate() {
        let down = FakeNetwork { available: false, reachable: &[] };
        assert!(check_url("http://nothing_here.com", true, &down));
        assert!(check_url("http://nothing_here.com", true, &Offline));
    }
}
