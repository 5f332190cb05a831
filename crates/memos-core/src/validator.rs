use regex::Regex;

use super::state::ErrorCode;

const SECURE_SCHEME: &str = "https";
const INSECURE_SCHEME: &str = "http";
const SCHEME_SEPARATOR: &str = "://";

/// One or more `label.` groups followed by an alphabetic top-level label.
/// Labels are 1-63 alphanumerics with hyphens allowed only inside.
const HOST_PATTERN: &str =
    r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}$";

pub trait UrlValidator {
    fn validate(&self, candidate: &str) -> Result<String, ErrorCode>;
}

#[derive(Debug, Clone)]
pub struct HttpsUrlValidator {
    host: Regex,
}

impl HttpsUrlValidator {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            host: Regex::new(HOST_PATTERN)?,
        })
    }
}

impl UrlValidator for HttpsUrlValidator {
    fn validate(&self, candidate: &str) -> Result<String, ErrorCode> {
        let trimmed = candidate.trim();
        let (scheme, host) = match trimmed.split_once(SCHEME_SEPARATOR) {
            Some((scheme, host)) => (scheme.to_ascii_lowercase(), host),
            None => (SECURE_SCHEME.to_string(), trimmed),
        };
        if scheme == INSECURE_SCHEME {
            return Err(ErrorCode::InsecureScheme);
        }
        if scheme != SECURE_SCHEME || !self.host.is_match(host) {
            return Err(ErrorCode::InvalidFormat);
        }
        Ok(format!("{SECURE_SCHEME}{SCHEME_SEPARATOR}{host}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn validate(candidate: &str) -> Result<String, ErrorCode> {
        HttpsUrlValidator::new().expect("pattern").validate(candidate)
    }

    #[test]
    fn bare_domain_gets_secure_scheme() {
        assert_eq!(validate("domain.com"), Ok("https://domain.com".to_string()));
    }

    #[test]
    fn secure_url_is_unchanged() {
        assert_eq!(
            validate("https://domain.com"),
            Ok("https://domain.com".to_string())
        );
        assert_eq!(
            validate("HTTPS://domain.com"),
            Ok("https://domain.com".to_string())
        );
    }

    #[test]
    fn insecure_scheme_is_rejected_explicitly() {
        assert_eq!(validate("http://domain.com"), Err(ErrorCode::InsecureScheme));
        assert_eq!(validate("HTTP://domain.com"), Err(ErrorCode::InsecureScheme));
    }

    #[test]
    fn other_schemes_are_malformed() {
        assert_eq!(validate("ftp://domain.com"), Err(ErrorCode::InvalidFormat));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(validate("  domain.com  "), Ok("https://domain.com".to_string()));
    }

    #[test]
    fn host_shape_is_enforced() {
        for bad in [
            "invalid",
            "https://domain",
            "domain#.com",
            "-domain.com",
            "domain-.com",
            "domain.c0m",
            "domain..com",
            "",
            "https://",
        ] {
            assert_eq!(validate(bad), Err(ErrorCode::InvalidFormat), "{bad:?}");
        }
    }

    #[test]
    fn subdomains_and_inner_hyphens_are_accepted() {
        assert_eq!(
            validate("memos.my-host.example.org"),
            Ok("https://memos.my-host.example.org".to_string())
        );
        let longest_label = "a".repeat(63);
        assert!(validate(&format!("{longest_label}.com")).is_ok());
        let too_long = "a".repeat(64);
        assert_eq!(
            validate(&format!("{too_long}.com")),
            Err(ErrorCode::InvalidFormat)
        );
    }
}
