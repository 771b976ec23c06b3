//! Authentication enums carried by a connection.
//!
//! Parsing matches declared member names, ASCII case-insensitively. Unknown
//! names yield `None`; callers decide the fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the connection authenticates against the organization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationType {
    /// Active Directory (on-premises, Windows credentials).
    #[serde(rename = "AD")]
    Ad,
    /// Internet-facing deployment (claims-based).
    #[serde(rename = "IFD")]
    Ifd,
    /// OAuth against an authority.
    #[serde(rename = "OAuth")]
    OAuth,
    /// Office 365 online identity.
    #[serde(rename = "Office365")]
    Office365,
}

impl AuthenticationType {
    /// All members in declaration order.
    pub const ALL: [Self; 4] = [Self::Ad, Self::Ifd, Self::OAuth, Self::Office365];

    /// Canonical member name as written in connection strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ad => "AD",
            Self::Ifd => "IFD",
            Self::OAuth => "OAuth",
            Self::Office365 => "Office365",
        }
    }

    /// Parse a member name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|member| member.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for AuthenticationType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// When an interactive login prompt may be shown (OAuth only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoginPrompt {
    /// Always prompt.
    Always,
    /// Prompt only when no cached token is usable.
    #[default]
    Auto,
    /// Never prompt.
    Never,
}

impl LoginPrompt {
    /// All members in declaration order.
    pub const ALL: [Self; 3] = [Self::Always, Self::Auto, Self::Never];

    /// Canonical member name as written in connection strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::Auto => "Auto",
            Self::Never => "Never",
        }
    }

    /// Parse a member name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|member| member.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for LoginPrompt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn authentication_type_parses_any_case() {
        assert_eq!(AuthenticationType::parse("oauth"), Some(AuthenticationType::OAuth));
        assert_eq!(AuthenticationType::parse(" IFD "), Some(AuthenticationType::Ifd));
        assert_eq!(AuthenticationType::parse("ad"), Some(AuthenticationType::Ad));
        assert_eq!(
            AuthenticationType::parse("OFFICE365"),
            Some(AuthenticationType::Office365)
        );
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert_eq!(AuthenticationType::parse("Kerberos"), None);
        assert_eq!(AuthenticationType::parse(""), None);
        assert_eq!(LoginPrompt::parse("sometimes"), None);
    }

    #[test]
    fn login_prompt_defaults_to_auto() {
        assert_eq!(LoginPrompt::default(), LoginPrompt::Auto);
        assert_eq!(LoginPrompt::parse("NEVER"), Some(LoginPrompt::Never));
    }

    #[test]
    fn display_uses_canonical_spelling() {
        assert_eq!(AuthenticationType::OAuth.to_string(), "OAuth");
        assert_eq!(AuthenticationType::Ifd.to_string(), "IFD");
        assert_eq!(LoginPrompt::Always.to_string(), "Always");
    }

    #[test]
    fn serde_uses_member_names() -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string(&AuthenticationType::Ad)?;
        assert_eq!(json, "\"AD\"");
        let parsed: LoginPrompt = serde_json::from_str("\"Never\"")?;
        assert_eq!(parsed, LoginPrompt::Never);
        Ok(())
    }
}
