use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The local participant's identity, as established by the external
/// identity provider (or generated ad hoc for anonymous use).
#[derive(Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
    /// Optional auth JWT, forwarded to the REST backend.
    #[serde(skip)]
    pub access_token: Option<String>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl Identity {
    pub fn generate(display_name: &str) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            access_token: None,
        }
    }

    /// Create an identity from an authenticated session.
    pub fn from_auth(user_id: String, display_name: String, access_token: String) -> Self {
        Self {
            user_id,
            display_name,
            access_token: Some(access_token),
        }
    }

    /// REST client configuration carrying this identity's token.
    pub fn api_config(&self, base_url: &str) -> pairboard_api::ApiConfig {
        pairboard_api::ApiConfig {
            base_url: base_url.to_string(),
            access_token: self.access_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_assigns_uuid() {
        let id = Identity::generate("Ada");
        assert!(Uuid::parse_str(&id.user_id).is_ok());
        assert_eq!(id.display_name, "Ada");
        assert!(id.access_token.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let id = Identity::from_auth("u1".into(), "Ada".into(), "secret-jwt".into());
        let debug = format!("{id:?}");
        assert!(!debug.contains("secret-jwt"));
    }

    #[test]
    fn api_config_carries_the_token() {
        let id = Identity::from_auth("u1".into(), "Ada".into(), "secret-jwt".into());
        let config = id.api_config("http://localhost:8000");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.access_token.as_deref(), Some("secret-jwt"));

        let anon = Identity::generate("Ada").api_config("http://localhost:8000");
        assert!(anon.access_token.is_none());
    }
}
