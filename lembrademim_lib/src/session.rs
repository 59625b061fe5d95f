//! Session management: logging in and out, and the persisted token/profile.

use lembrademim_api::types::{
    AuthResponse, LoginRequest, ResetPasswordConfirmRequest, ResetPasswordRequest, SignupRequest,
    User, ValidateCodeRequest,
};
use lembrademim_api::{Client, Error, TOKEN_KEY, USER_KEY};
use serde::Serialize;

use crate::error::LibError;

/// A freshly established session.
#[derive(Serialize, Clone, Debug)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Login, signup and logout on top of a [`Client`] and its credential store.
///
/// The token is the only proof of authentication; it carries no expiry and
/// there is no refresh token.
#[derive(Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Logs in and persists the token and user profile.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthSession, LibError> {
        tracing::info!("Logging in as {}", credentials.email);
        let resp = self.client.login(credentials).await?;
        let session = self.persist(resp)?;
        tracing::info!("Logged in as user {}", session.user.id);
        Ok(session)
    }

    /// Creates an account and persists the resulting session.
    pub async fn signup(&self, data: &SignupRequest) -> Result<AuthSession, LibError> {
        tracing::info!("Creating account for {}", data.email);
        let resp = self.client.signup(data).await?;
        self.persist(resp)
    }

    fn persist(&self, resp: AuthResponse) -> Result<AuthSession, LibError> {
        let token = match resp.bearer() {
            Some(token) => token.to_string(),
            None => {
                tracing::error!("Token not found in auth response");
                return Err(LibError::MissingToken);
            }
        };
        let user = resp.user.ok_or_else(|| {
            tracing::error!("User not found in auth response");
            LibError::MissingUser
        })?;

        let store = self.client.credentials();
        store.set(TOKEN_KEY, &token)?;
        store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        tracing::debug!("Session saved");
        Ok(AuthSession { token, user })
    }

    /// Forgets the token and user profile.
    pub fn logout(&self) -> Result<(), LibError> {
        let store = self.client.credentials();
        store.remove(TOKEN_KEY)?;
        store.remove(USER_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The stored token. Read failures are logged and read as absent.
    pub fn token(&self) -> Option<String> {
        match self.client.credentials().get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read token: {}", e);
                None
            }
        }
    }

    /// The stored user profile. Unreadable or malformed data reads as absent.
    pub fn user(&self) -> Option<User> {
        let raw = match self.client.credentials().get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read user data: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Stored user data is malformed: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Asks the server whether the stored token is still accepted.
    ///
    /// A rejected token (401/403 or `valid: false`) clears the session.
    /// Deployments without the validation route answer 404, and some answer
    /// 2xx without a `valid` flag; the stored token is then trusted as-is.
    pub async fn validate_token(&self) -> Result<bool, LibError> {
        if !self.is_authenticated() {
            return Ok(false);
        }
        match self.client.validate_token().await {
            Ok(status) => {
                if !status.valid {
                    self.logout()?;
                }
                Ok(status.valid)
            }
            Err(e) if matches!(e.status(), Some(401) | Some(403)) => {
                tracing::info!("Stored token was rejected");
                self.logout()?;
                Ok(false)
            }
            Err(e) if e.status() == Some(404) => {
                tracing::debug!("Token validation route not available, trusting stored token");
                Ok(true)
            }
            Err(e @ (Error::Decode { .. } | Error::EmptyResponse { .. })) => {
                tracing::debug!(
                    "Token validation answered without a verdict, trusting stored token: {}",
                    e
                );
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Start-up check: the stored user when the session is still good.
    ///
    /// Unreachable servers keep the session so it survives offline starts;
    /// any other failure clears it.
    pub async fn check_authentication(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }
        match self.validate_token().await {
            Ok(true) => self.user(),
            Ok(false) => None,
            Err(LibError::Api(e)) if e.is_network() => {
                tracing::warn!("Could not validate token, keeping session: {}", e);
                self.user()
            }
            Err(e) => {
                tracing::warn!("Authentication check failed: {}", e);
                if let Err(e) = self.logout() {
                    tracing::warn!("Failed to clear session: {}", e);
                }
                None
            }
        }
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<(), LibError> {
        self.client
            .request_password_reset(&ResetPasswordRequest {
                email: email.to_string(),
            })
            .await?;
        Ok(())
    }

    /// True when the server accepts the code. Any failure reads as `false`.
    pub async fn validate_reset_code(&self, email: &str, code: &str) -> bool {
        let req = ValidateCodeRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        match self.client.validate_reset_code(&req).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Reset code rejected: {}", e);
                false
            }
        }
    }

    pub async fn confirm_password_reset(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), LibError> {
        self.client
            .confirm_password_reset(&ResetPasswordConfirmRequest {
                email: email.to_string(),
                code: code.to_string(),
                new_password: new_password.to_string(),
            })
            .await?;
        Ok(())
    }
}
