//! Hostname classification for the GCR registry family.

use url::Url;

use crate::consts::GCR_DOMAINS;

/// Returns true if `server_url` names a GCR registry.
///
/// Accepts bare hosts (`us.gcr.io`), scheme-qualified URLs
/// (`https://us.gcr.io`) and either form with a port or repository path
/// attached. A host matches when it equals a GCR domain or is a subdomain of
/// one; unparseable input simply does not match.
///
/// # Examples
///
/// ```
/// use gcred_core::is_gcr_hostname;
///
/// assert!(is_gcr_hostname("https://eu.gcr.io"));
/// assert!(is_gcr_hostname("gcr.io/my-project/app"));
/// assert!(!is_gcr_hostname("docker.io"));
/// assert!(!is_gcr_hostname("evilgcr.io"));
/// ```
pub fn is_gcr_hostname(server_url: &str) -> bool {
  match extract_host(server_url) {
    Some(host) => GCR_DOMAINS.iter().any(|domain| matches_domain(&host, domain)),
    None => false,
  }
}

fn matches_domain(host: &str, domain: &str) -> bool {
  host == domain
    || host
      .strip_suffix(domain)
      .is_some_and(|prefix| prefix.len() > 1 && prefix.ends_with('.'))
}

/// Pull the lowercase hostname out of a server URL.
fn extract_host(server_url: &str) -> Option<String> {
  let trimmed = server_url.trim();

  let host = if has_scheme(trimmed) {
    Url::parse(trimmed).ok()?.host_str()?.to_string()
  } else {
    // `url` needs a scheme, so bare hosts are split by hand.
    let authority = trimmed.split(['/', '?', '#']).next()?;
    let authority = authority.rsplit('@').next()?;
    authority.split(':').next()?.to_string()
  };

  let host = host.trim_end_matches('.').to_ascii_lowercase();
  (!host.is_empty()).then_some(host)
}

/// True when `input` starts with an RFC 3986 scheme followed by `://`.
fn has_scheme(input: &str) -> bool {
  input.split_once("://").is_some_and(|(scheme, _)| {
    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
      && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
  })
}
