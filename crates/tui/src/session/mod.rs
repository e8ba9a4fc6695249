pub mod token_file;

use serde_json::Value;
use tracing::{debug, warn};

use api_types::auth::{LoginRequest, ResetCodeRequest, ResetPasswordRequest};

use reqwest::Method;

use crate::{
    client::{ApiClient, RequestOptions, extract},
    config::Endpoints,
};

use token_file::TokenFile;

/// Authentication state for the running client.
///
/// The durable token slot is the source of truth across restarts; the user
/// record is ephemeral and may be absent even while authenticated (before
/// the profile fetch resolves). Methods return the failure message the UI
/// should display, never a raw error.
pub struct SessionStore {
    client: ApiClient,
    tokens: TokenFile,
    endpoints: Endpoints,
    current_user: Option<Value>,
}

impl SessionStore {
    pub fn new(client: ApiClient, tokens: TokenFile, endpoints: Endpoints) -> Self {
        Self {
            client,
            tokens,
            endpoints,
            current_user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.tokens.token().is_empty() || self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&Value> {
        self.current_user.as_ref()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), String> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let payload = self
            .client
            .post_json(&self.endpoints.login, &body)
            .await
            .map_err(|err| err.message())?;

        self.apply_identity(&payload)?;
        debug!(username, "login succeeded");
        Ok(())
    }

    /// Clears the session and the durable token entry. Always succeeds; a
    /// failing file removal is logged and the in-memory state still resets.
    pub fn logout(&mut self) {
        self.current_user = None;
        if let Err(err) = self.tokens.clear() {
            warn!(%err, "could not remove the session file");
        }
    }

    pub async fn request_reset_code(&self, username: &str) -> Result<(), String> {
        let body = ResetCodeRequest {
            username: username.to_string(),
        };
        self.client
            .post_json(&self.endpoints.reset_request, &body)
            .await
            .map(|_| ())
            .map_err(|err| err.message())
    }

    pub async fn reset_password(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), String> {
        let body = ResetPasswordRequest {
            username: username.to_string(),
            code: code.to_string(),
            password: new_password.to_string(),
        };
        self.client
            .post_json(&self.endpoints.reset_password, &body)
            .await
            .map(|_| ())
            .map_err(|err| err.message())
    }

    /// Refreshes the profile behind the held token. Any failure invalidates
    /// the whole session: the token may be expired or revoked, so the store
    /// logs out rather than keeping a token the server rejects.
    pub async fn fetch_current_user(&mut self) -> Option<Value> {
        let token = self.tokens.token();
        if token.is_empty() {
            return None;
        }

        let options = RequestOptions {
            method: Some(Method::GET),
            body: None,
            headers: vec![("Authorization".to_string(), format!("Bearer {token}"))],
        };
        match self.client.request(&self.endpoints.me, options).await {
            Ok(payload) => {
                // A refreshed token in the payload replaces the held one;
                // otherwise the existing token stays.
                if let Some(new_token) = extract::bearer_token(&payload) {
                    if let Err(err) = self.tokens.save(&new_token) {
                        warn!(%err, "could not persist the refreshed token");
                    }
                }
                if let Some(user) = extract::user_record(&payload) {
                    self.current_user = Some(user);
                }
                self.current_user.clone()
            }
            Err(err) => {
                warn!(message = %err.message(), "profile fetch failed, logging out");
                self.logout();
                None
            }
        }
    }

    /// Applies the token/user found in a login payload: the token is
    /// persisted when present and the durable entry removed when absent.
    fn apply_identity(&mut self, payload: &Value) -> Result<(), String> {
        let result = match extract::bearer_token(payload) {
            Some(token) => self.tokens.save(&token),
            None => self.tokens.clear(),
        };
        result.map_err(|err| err.to_string())?;
        self.current_user = extract::user_record(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> SessionStore {
        let root =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_tokens");
        std::fs::create_dir_all(&root).unwrap();
        let tokens =
            TokenFile::load(root.join(format!("session_{name}_{}.json", std::process::id())))
                .unwrap();
        let client = ApiClient::new("http://localhost:0".to_string(), tokens.clone(), None);
        SessionStore::new(client, tokens, Endpoints::default())
    }

    #[test]
    fn anonymous_until_token_or_user_present() {
        let mut session = store("anonymous");
        assert!(!session.is_authenticated());

        session.tokens.save("tok").unwrap();
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());

        session.current_user = Some(serde_json::json!({ "username": "admin" }));
        assert!(session.is_authenticated());
        session.logout();
    }

    #[test]
    fn apply_identity_clears_slot_when_payload_has_no_token() {
        let mut session = store("apply_identity");
        session.tokens.save("stale").unwrap();

        session
            .apply_identity(&serde_json::json!({ "user": { "username": "admin" } }))
            .unwrap();
        assert_eq!(session.tokens.token(), "");
        assert!(session.current_user().is_some());
        session.logout();
    }
}
