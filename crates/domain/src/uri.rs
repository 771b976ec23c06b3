//! Service URI normalization and derived endpoints.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Path every organization service URI ends with.
pub const ORGANIZATION_SERVICE_PATH: &str = "/XRMServices/2011/Organization.svx";

/// Discovery endpoint path, relative to the service root.
pub const DISCOVERY_SERVICE_PATH: &str = "XRMServices/2011/Discovery.svc";

// The `\d` before `dynamics` is kept exactly as stored configurations were
// matched historically; see DESIGN.md.
const REGION_HOST_PATTERN: &str = r"\.([^.]+)\ddynamics\.com$";

static REGION_HOST: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(REGION_HOST_PATTERN).ok());

/// Ensure a service URI ends with [`ORGANIZATION_SERVICE_PATH`].
///
/// A URI already ending with the path (ASCII case-insensitive) is returned
/// unchanged; otherwise trailing `/` are stripped and the path appended.
/// Normalizing twice is the same as normalizing once.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use xrm_connection_domain::normalize_service_uri;
///
/// let raw = Url::parse("https://org.crm.dynamics.com")?;
/// let normalized = normalize_service_uri(Some(raw));
/// assert_eq!(
///     normalized.as_ref().map(Url::as_str),
///     Some("https://org.crm.dynamics.com/XRMServices/2011/Organization.svx")
/// );
/// # Ok::<(), url::ParseError>(())
/// ```
pub fn normalize_service_uri(uri: Option<Url>) -> Option<Url> {
    let uri = uri?;
    if ends_with_service_path(uri.as_str()) {
        return Some(uri);
    }

    let candidate = format!(
        "{}{ORGANIZATION_SERVICE_PATH}",
        uri.as_str().trim_end_matches('/')
    );
    match Url::parse(&candidate) {
        Ok(normalized) => Some(normalized),
        Err(error) => {
            tracing::debug!(%error, "dropping service uri that cannot carry the service path");
            None
        },
    }
}

/// Root of the service: the service URI text without the organization path,
/// trailing `/` trimmed.
pub fn base_uri_text(service_uri: &Url) -> Option<&str> {
    let text = service_uri.as_str();
    let cut = text.len().checked_sub(ORGANIZATION_SERVICE_PATH.len())?;
    text.get(..cut).map(|base| base.trim_end_matches('/'))
}

/// Parsed form of [`base_uri_text`].
pub fn base_uri(service_uri: &Url) -> Option<Url> {
    base_uri_text(service_uri).and_then(|text| Url::parse(text).ok())
}

/// Discovery endpoint for the service.
///
/// Hosts matching the regional pattern map onto the shared
/// `disco.<region>.dynamics.com` host; all others get the discovery path
/// under their own service root.
pub fn discovery_service_uri(service_uri: &Url) -> Option<Url> {
    let base = base_uri_text(service_uri)?;
    let region = Url::parse(base)
        .ok()
        .and_then(|parsed| parsed.host_str().and_then(region_of).map(str::to_owned));

    let candidate = match region {
        Some(region) => {
            format!("https://disco.{region}.dynamics.com/{DISCOVERY_SERVICE_PATH}")
        },
        None => format!("{base}/{DISCOVERY_SERVICE_PATH}"),
    };
    Url::parse(&candidate).ok()
}

/// Region segment captured from a host, if it matches the regional pattern.
pub fn region_of(host: &str) -> Option<&str> {
    REGION_HOST
        .as_ref()?
        .captures(host)?
        .get(1)
        .map(|capture| capture.as_str())
}

fn ends_with_service_path(text: &str) -> bool {
    text.len()
        .checked_sub(ORGANIZATION_SERVICE_PATH.len())
        .and_then(|start| text.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(ORGANIZATION_SERVICE_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::error::Error;

    fn parse_url(text: &str) -> Result<Url, url::ParseError> {
        Url::parse(text)
    }

    #[test]
    fn appends_service_path_once() -> Result<(), Box<dyn Error>> {
        let normalized = normalize_service_uri(Some(parse_url("https://org.crm.dynamics.com///")?));
        assert_eq!(
            normalized.as_ref().map(Url::as_str),
            Some("https://org.crm.dynamics.com/XRMServices/2011/Organization.svx")
        );
        Ok(())
    }

    #[test]
    fn keeps_existing_path_regardless_of_case() -> Result<(), Box<dyn Error>> {
        let raw = parse_url("https://org.crm.dynamics.com/xrmservices/2011/organization.svx")?;
        let normalized = normalize_service_uri(Some(raw.clone()));
        assert_eq!(normalized, Some(raw));
        Ok(())
    }

    #[test]
    fn none_stays_none() {
        assert_eq!(normalize_service_uri(None), None);
    }

    #[test]
    fn base_uri_strips_service_path() -> Result<(), Box<dyn Error>> {
        let service =
            parse_url("https://contoso.api.crm.dynamics.com/XRMServices/2011/Organization.svx")?;
        assert_eq!(
            base_uri_text(&service),
            Some("https://contoso.api.crm.dynamics.com")
        );
        assert_eq!(
            base_uri(&service),
            Some(parse_url("https://contoso.api.crm.dynamics.com")?)
        );
        Ok(())
    }

    #[test]
    fn base_uri_keeps_organization_segment() -> Result<(), Box<dyn Error>> {
        let service = parse_url("https://crm.contoso.local/Sales/XRMServices/2011/Organization.svx")?;
        assert_eq!(base_uri_text(&service), Some("https://crm.contoso.local/Sales"));
        Ok(())
    }

    #[test]
    fn regional_hosts_use_shared_discovery_host() -> Result<(), Box<dyn Error>> {
        let service = parse_url("https://contoso.crm5dynamics.com/XRMServices/2011/Organization.svx")?;
        assert_eq!(
            discovery_service_uri(&service),
            Some(parse_url(
                "https://disco.crm.dynamics.com/XRMServices/2011/Discovery.svc"
            )?)
        );
        Ok(())
    }

    #[test]
    fn dotted_online_hosts_do_not_match_the_regional_pattern() -> Result<(), Box<dyn Error>> {
        let service =
            parse_url("https://contoso.api.crm4.dynamics.com/XRMServices/2011/Organization.svx")?;
        assert_eq!(
            discovery_service_uri(&service),
            Some(parse_url(
                "https://contoso.api.crm4.dynamics.com/XRMServices/2011/Discovery.svc"
            )?)
        );
        Ok(())
    }

    #[test]
    fn on_premises_hosts_use_their_own_root() -> Result<(), Box<dyn Error>> {
        let service = parse_url("http://crm.contoso.local/Sales/XRMServices/2011/Organization.svx")?;
        assert_eq!(
            discovery_service_uri(&service),
            Some(parse_url(
                "http://crm.contoso.local/Sales/XRMServices/2011/Discovery.svc"
            )?)
        );
        Ok(())
    }

    #[test]
    fn region_capture() {
        assert_eq!(region_of("org.crm9dynamics.com"), Some("crm"));
        assert_eq!(region_of("org.crm.dynamics.com"), None);
        assert_eq!(region_of("crm5dynamics.com"), None);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(
            host in "[a-z][a-z0-9]{0,10}(\\.[a-z][a-z0-9]{0,8}){0,3}",
            path in "(/[A-Za-z0-9._-]{1,8}){0,3}/{0,2}",
        ) {
            let raw = Url::parse(&format!("https://{host}{path}"));
            prop_assume!(raw.is_ok());
            let once = normalize_service_uri(raw.ok());
            let twice = normalize_service_uri(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
