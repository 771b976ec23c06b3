//! Discovery service boundary contract.
//!
//! A discovery service lists the organizations a user can reach. The codec
//! only derives where that service lives; talking to it is left to an
//! adapter implementing [`DiscoveryPort`].

use crate::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use xrm_connection_domain::{AuthenticationType, ConnectionConfig};
use xrm_connection_shared::{ErrorCode, ErrorEnvelope, Result, ResultExt, SecretString};

/// Everything an adapter needs to query the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Discovery endpoint derived from the service URI.
    pub discovery_uri: Url,
    /// Authentication type of the source connection.
    pub authentication_type: Option<AuthenticationType>,
    /// Windows domain.
    pub domain: Option<String>,
    /// User name.
    pub username: Option<String>,
    /// Password.
    pub password: Option<SecretString>,
    /// Home realm for federated sign-in.
    pub home_realm_uri: Option<Url>,
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth authority.
    pub authority: Option<String>,
    /// Time budget for the call.
    pub timeout: Duration,
}

impl DiscoveryRequest {
    /// Build a request from a parsed connection.
    ///
    /// Fails with `discovery:missing_service_uri` when the connection has no
    /// service URI, and with `core:invalid_input` when no discovery endpoint
    /// can be derived from it.
    pub fn from_connection(config: &ConnectionConfig) -> Result<Self> {
        let service_uri = config.service_uri().ok_or_else(|| {
            ErrorEnvelope::expected(
                ErrorCode::missing_service_uri(),
                "connection has no service uri to discover from",
            )
        })?;

        let discovery_uri = config
            .discovery_service_uri()
            .ok_or_else(|| {
                ErrorEnvelope::expected(
                    ErrorCode::invalid_input(),
                    "discovery endpoint cannot be derived from the service uri",
                )
            })
            .with_error_metadata("serviceUri", service_uri.as_str())?;

        Ok(Self {
            discovery_uri,
            authentication_type: config.authentication_type(),
            domain: config.domain().map(str::to_owned),
            username: config.username().map(str::to_owned),
            password: config.password().cloned(),
            home_realm_uri: config.home_realm_uri().cloned(),
            client_id: config.client_id().map(str::to_owned),
            authority: config.authority().map(str::to_owned),
            timeout: config.timeout(),
        })
    }
}

/// One organization returned by the discovery service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentDescriptor {
    /// Stable organization name.
    pub unique_name: String,
    /// Display name.
    pub friendly_name: String,
    /// Name used in the organization's URLs.
    pub url_name: String,
    /// Organization service endpoint.
    pub organization_service_uri: Url,
    /// Server version string.
    pub version: String,
}

impl EnvironmentDescriptor {
    /// Copy `template` with its service URI pointed at this organization.
    ///
    /// Credentials, timeout and unknown options carry over; subscriptions
    /// do not.
    #[must_use]
    pub fn connection_from(&self, template: &ConnectionConfig) -> ConnectionConfig {
        let mut config = template.clone();
        config.set_service_uri(Some(self.organization_service_uri.clone()));
        config
    }
}

/// Boundary contract for discovery adapters.
pub trait DiscoveryPort: Send + Sync {
    /// List the organizations reachable with the request's credentials.
    fn discover(
        &self,
        request: DiscoveryRequest,
    ) -> BoxFuture<'_, Result<Vec<EnvironmentDescriptor>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn connection(service_uri: &str) -> std::result::Result<ConnectionConfig, Box<dyn Error>> {
        let mut config = ConnectionConfig::new();
        config.set_service_uri(Some(Url::parse(service_uri)?));
        config.set_username(Some("jsmith".to_owned()));
        config.set_password(Some(SecretString::new("passcode")));
        config.set_authentication_type(Some(AuthenticationType::Ad));
        Ok(config)
    }

    #[test]
    fn request_targets_the_derived_discovery_endpoint() -> std::result::Result<(), Box<dyn Error>>
    {
        let config = connection("http://crm.contoso.local/Sales")?;
        let request = DiscoveryRequest::from_connection(&config)?;

        assert_eq!(
            request.discovery_uri.as_str(),
            "http://crm.contoso.local/Sales/XRMServices/2011/Discovery.svc"
        );
        assert_eq!(request.username.as_deref(), Some("jsmith"));
        assert_eq!(request.password.as_ref().map(SecretString::expose), Some("passcode"));
        assert_eq!(request.authentication_type, Some(AuthenticationType::Ad));
        assert_eq!(request.timeout, config.timeout());
        Ok(())
    }

    #[test]
    fn missing_service_uri_is_an_expected_error() {
        let error = DiscoveryRequest::from_connection(&ConnectionConfig::new()).err();
        assert_eq!(
            error.as_ref().map(|error| error.code.to_string()).as_deref(),
            Some("discovery:missing_service_uri")
        );
        assert_eq!(
            error.map(|error| error.kind),
            Some(xrm_connection_shared::ErrorKind::Expected)
        );
    }

    #[test]
    fn request_debug_output_hides_the_password() -> std::result::Result<(), Box<dyn Error>> {
        let config = connection("https://org.crm.dynamics.com")?;
        let request = DiscoveryRequest::from_connection(&config)?;
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("passcode"));
        Ok(())
    }

    #[test]
    fn descriptor_uses_camel_case_fields() -> std::result::Result<(), Box<dyn Error>> {
        let descriptor: EnvironmentDescriptor = serde_json::from_str(
            r#"{
                "uniqueName": "contoso",
                "friendlyName": "Contoso",
                "urlName": "contoso",
                "organizationServiceUri": "https://contoso.crm.dynamics.com/XRMServices/2011/Organization.svc",
                "version": "9.2.0.0"
            }"#,
        )?;
        assert_eq!(descriptor.unique_name, "contoso");

        let value = serde_json::to_value(&descriptor)?;
        assert_eq!(
            value.get("friendlyName").and_then(serde_json::Value::as_str),
            Some("Contoso")
        );
        Ok(())
    }

    #[test]
    fn descriptor_retargets_a_template_connection() -> std::result::Result<(), Box<dyn Error>> {
        let template = connection("https://disco.crm.dynamics.com")?;
        let descriptor = EnvironmentDescriptor {
            unique_name: "contoso".to_owned(),
            friendly_name: "Contoso".to_owned(),
            url_name: "contoso".to_owned(),
            organization_service_uri: Url::parse("https://contoso.crm.dynamics.com")?,
            version: "9.2.0.0".to_owned(),
        };

        let config = descriptor.connection_from(&template);
        assert_eq!(
            config.service_uri().map(Url::as_str),
            Some("https://contoso.crm.dynamics.com/XRMServices/2011/Organization.svx")
        );
        assert_eq!(config.username(), Some("jsmith"));
        Ok(())
    }
}
