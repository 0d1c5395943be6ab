//! GraphQL client for the deployment platform API.
//!
//! Sends authenticated queries against the platform's partner endpoint and
//! maps the response envelopes onto [`RemoteRegistration`]. Retry and
//! backoff are left to callers.

use anyhow::Context;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use super::{PlatformClient, RemoteRegistration};

const FETCH_REGISTRATIONS_QUERY: &str = r#"
query FetchExtensionRegistrations($apiKey: String!) {
  app(apiKey: $apiKey) {
    extensionRegistrations {
      id
      uuid
      title
      type
    }
  }
}
"#;

const CREATE_REGISTRATION_MUTATION: &str = r#"
mutation ExtensionCreate($apiKey: String!, $type: ExtensionType!, $title: String!) {
  extensionCreate(input: {apiKey: $apiKey, type: $type, title: $title}) {
    extensionRegistration {
      id
      uuid
      title
      type
    }
    userErrors {
      field
      message
    }
  }
}
"#;

/// Platform client speaking GraphQL over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpPlatformClient {
    endpoint: Url,
    token: String,
    http: reqwest::Client,
}

impl HttpPlatformClient {
    /// Build a client for the given GraphQL endpoint and session token.
    pub fn new(endpoint: &str, token: impl Into<String>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid platform endpoint: {endpoint}"))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("berth/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            endpoint,
            token: token.into(),
            http,
        })
    }

    async fn post_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> anyhow::Result<T> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .with_context(|| format!("Platform request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Platform request failed: HTTP {}", status);
        }

        let envelope: GraphqlEnvelope<T> = response
            .json()
            .await
            .context("Failed to parse platform response")?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            anyhow::bail!("Platform returned errors: {}", messages.join("; "));
        }

        envelope
            .data
            .ok_or_else(|| anyhow::anyhow!("Platform response carried no data"))
    }
}

impl PlatformClient for HttpPlatformClient {
    async fn fetch_registrations(&self, app_id: &str) -> anyhow::Result<Vec<RemoteRegistration>> {
        tracing::debug!(app_id, "fetching extension registrations");
        let data: FetchData = self
            .post_query(FETCH_REGISTRATIONS_QUERY, json!({ "apiKey": app_id }))
            .await?;
        let app = data
            .app
            .ok_or_else(|| anyhow::anyhow!("App not found: {app_id}"))?;
        Ok(app.extension_registrations)
    }

    async fn create_registration(
        &self,
        app_id: &str,
        extension_type: &str,
        title: &str,
    ) -> anyhow::Result<RemoteRegistration> {
        tracing::debug!(app_id, extension_type, title, "creating extension registration");
        let data: CreateData = self
            .post_query(
                CREATE_REGISTRATION_MUTATION,
                json!({ "apiKey": app_id, "type": extension_type, "title": title }),
            )
            .await?;

        let payload = data.extension_create;
        if !payload.user_errors.is_empty() {
            let messages: Vec<String> =
                payload.user_errors.into_iter().map(|e| e.message).collect();
            anyhow::bail!(
                "Could not register extension {}: {}",
                title,
                messages.join("; ")
            );
        }

        payload
            .extension_registration
            .ok_or_else(|| anyhow::anyhow!("Platform returned no registration for {title}"))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct FetchData {
    app: Option<FetchApp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FetchApp {
    extension_registrations: Vec<RemoteRegistration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    extension_create: ExtensionCreatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionCreatePayload {
    extension_registration: Option<RemoteRegistration>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
struct UserError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = HttpPlatformClient::new("not a url", "token");
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_envelope_deserializes() {
        let body = r#"{
            "data": {
                "app": {
                    "extensionRegistrations": [
                        {"id": "1", "uuid": "uuid-1", "title": "Checkout", "type": "checkout_post_purchase"}
                    ]
                }
            }
        }"#;

        let envelope: GraphqlEnvelope<FetchData> = serde_json::from_str(body).unwrap();
        assert!(envelope.errors.is_empty());
        let registrations = envelope.data.unwrap().app.unwrap().extension_registrations;
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].uuid, "uuid-1");
        assert_eq!(registrations[0].extension_type, "checkout_post_purchase");
    }

    #[test]
    fn test_create_envelope_surfaces_user_errors() {
        let body = r#"{
            "data": {
                "extensionCreate": {
                    "extensionRegistration": null,
                    "userErrors": [{"field": "title", "message": "Title taken"}]
                }
            }
        }"#;

        let envelope: GraphqlEnvelope<CreateData> = serde_json::from_str(body).unwrap();
        let payload = envelope.data.unwrap().extension_create;
        assert!(payload.extension_registration.is_none());
        assert_eq!(payload.user_errors[0].message, "Title taken");
    }

    #[test]
    fn test_graphql_errors_deserialize_without_data() {
        let body = r#"{"errors": [{"message": "Unauthorized"}]}"#;
        let envelope: GraphqlEnvelope<FetchData> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "Unauthorized");
    }
}
