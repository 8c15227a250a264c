// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth 2.0 client for sign-in.
//!
//! Handles:
//! - Authorization URL construction
//! - Authorization-code exchange
//! - Userinfo fetch for the resolved identity

use crate::error::AppError;
use serde::Deserialize;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested at sign-in; userinfo needs email and profile.
const OAUTH_SCOPES: &str = "openid email profile";

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleAuthService {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    userinfo_url: String,
}

impl GoogleAuthService {
    /// Create a new client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }

    /// Create a client pointed at alternate endpoints, for tests.
    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        token_url: String,
        userinfo_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            token_url,
            userinfo_url,
        }
    }

    /// Build the Google authorization URL the user is redirected to.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            GOOGLE_AUTH_URL,
            self.client_id,
            urlencoding::encode(redirect_uri),
            urlencoding::encode(OAUTH_SCOPES),
            state
        )
    }

    /// Handle the OAuth callback: exchange the code and resolve the caller
    /// into a stable identity.
    pub async fn handle_oauth_callback(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleUserInfo, AppError> {
        let token_response = self.exchange_code(code, redirect_uri).await?;
        let user = self.fetch_userinfo(&token_response.access_token).await?;

        tracing::info!(
            user_id = %user.id,
            display_name = %user.display_name(),
            "OAuth callback handled, identity resolved"
        );

        Ok(user)
    }

    /// Exchange an authorization code for an access token.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleTokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Token exchange request failed: {}", e)))?;

        check_response_json(response, "Token exchange").await
    }

    /// Fetch the signed-in user's profile.
    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::GoogleApi(format!("Userinfo request failed: {}", e)))?;

        check_response_json(response, "Userinfo fetch").await
    }
}

/// Check status and deserialize a Google API response.
async fn check_response_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::GoogleApi(format!(
            "{} failed with status {}: {}",
            context, status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::GoogleApi(format!("{} returned invalid JSON: {}", context, e)))
}

/// Token endpoint response; only the access token is used.
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

/// Profile returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Stable Google user id
    pub id: String,
    /// Full display name; Google may omit it
    pub name: Option<String>,
    /// Email address; Google may omit it
    pub email: Option<String>,
}

impl GoogleUserInfo {
    /// Display name with the legacy fallback.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }

    /// Email with the legacy fallback.
    pub fn contact_email(&self) -> &str {
        self.email.as_deref().unwrap_or("No email provided")
    }
}
