//! HTTP transport for the portal backend
//!
//! Every authenticated call carries `Authorization: Bearer <token>`. A 403
//! triggers one token refresh and one replay of the original request; if the
//! refresh itself fails the session is torn down.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{Result, SemproError, GENERIC_FAILURE_MESSAGE};
use crate::schemas::{Config, UserProfile};
use crate::session::Session;

use super::types::{ErrorBody, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};

/// Thin REST client; holds no auth state of its own
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| SemproError::ConfigError(format!("cannot build HTTP client: {}", e)))?;
        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path such as `/seminars`
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Log in and store the tokens and profile in the session
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<UserProfile> {
        tracing::debug!(username, "POST /auth/login");
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body: LoginResponse = decode(response).await?;
        session.establish(body.token, body.refresh_token, body.user.clone())?;
        tracing::info!(role = %body.user.role(), "logged in");
        Ok(body.user)
    }

    /// Exchange the refresh token for a new access token
    pub async fn refresh(&self, session: &mut Session) -> Result<String> {
        let refresh_token = session
            .refresh_token()
            .ok_or_else(|| SemproError::Unauthorized("no refresh token".to_string()))?
            .to_string();
        tracing::debug!("POST /auth/refresh");
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;
        let body: RefreshResponse = decode(response).await?;
        session.update_token(body.token.clone(), body.refresh_token)?;
        Ok(body.token)
    }

    /// Send an authenticated request, replaying it once after a 403.
    ///
    /// `build` is called once per attempt so bodies (including multipart
    /// forms) are rebuilt for the replay.
    pub async fn send_authorized<F>(&self, session: &mut Session, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = session
            .token()
            .ok_or_else(|| SemproError::Unauthorized("not logged in".to_string()))?
            .to_string();

        let response = build(&self.http).bearer_auth(&token).send().await?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        tracing::warn!("access token rejected, refreshing");
        let token = match self.refresh(session).await {
            Ok(token) => token,
            Err(e) => {
                session.teardown()?;
                return Err(SemproError::SessionExpired(e.to_string()));
            }
        };

        Ok(build(&self.http).bearer_auth(&token).send().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, session: &mut Session, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        let url = self.url(path);
        let response = self.send_authorized(session, |http| http.get(&url)).await?;
        decode(response).await
    }

    /// Like `get`, but a 404 means "no such record" rather than an error
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        session: &mut Session,
        path: &str,
    ) -> Result<Option<T>> {
        tracing::debug!("GET {}", path);
        let url = self.url(path);
        let response = self.send_authorized(session, |http| http.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    pub async fn get_with_query<T, Q>(&self, session: &mut Session, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("GET {}", path);
        let url = self.url(path);
        let response = self
            .send_authorized(session, |http| http.get(&url).query(query))
            .await?;
        decode(response).await
    }

    pub async fn send_json<B, T>(
        &self,
        session: &mut Session,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, path);
        let url = self.url(path);
        let response = self
            .send_authorized(session, |http| http.request(method.clone(), &url).json(body))
            .await?;
        decode(response).await
    }
}

/// Turn a response into `T` or into the matching error.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(error_from_status(status, &bytes));
    }
    unwrap_envelope(&bytes)
}

/// Accept both bare bodies and `{ "data": ... }` envelopes.
fn unwrap_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| SemproError::InvalidJson(format!("response is not JSON: {}", e)))?;
    if let Some(data) = value.get("data") {
        if let Ok(inner) = serde_json::from_value::<T>(data.clone()) {
            return Ok(inner);
        }
    }
    serde_json::from_value(value)
        .map_err(|e| SemproError::InvalidJson(format!("unexpected response shape: {}", e)))
}

/// Map a failed status to an error carrying the server's message.
pub fn error_from_status(status: StatusCode, body: &[u8]) -> SemproError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message);
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SemproError::Unauthorized(message.unwrap_or_else(|| "access denied".to_string()))
        }
        s if s.is_client_error() => SemproError::Rejected {
            status: code,
            message: message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        },
        _ => SemproError::Http {
            status: code,
            message: message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Page;

    #[test]
    fn test_url_joins_api_prefix() {
        let config = Config {
            api_base_url: "http://localhost:3000/".to_string(),
            ..Config::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/seminars/7"), "http://localhost:3000/api/seminars/7");
    }

    #[test]
    fn test_error_uses_server_message() {
        let err = error_from_status(
            StatusCode::CONFLICT,
            br#"{"message": "Assessment already recorded"}"#,
        );
        match err {
            SemproError::Rejected { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Assessment already recorded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_falls_back_to_generic_message() {
        let err = error_from_status(StatusCode::BAD_REQUEST, b"<html>oops</html>");
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);

        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert!(matches!(err, SemproError::Http { status: 500, .. }));

        let err = error_from_status(StatusCode::FORBIDDEN, b"{}");
        assert!(matches!(err, SemproError::Unauthorized(_)));
    }

    #[test]
    fn test_unwrap_envelope() {
        let wrapped: Vec<u32> = unwrap_envelope(br#"{"data": [1, 2]}"#).unwrap();
        assert_eq!(wrapped, vec![1, 2]);

        let bare: Vec<u32> = unwrap_envelope(b"[3]").unwrap();
        assert_eq!(bare, vec![3]);

        let page: Page<u32> = unwrap_envelope(
            br#"{"data": [1], "page": 1, "perPage": 10, "total": 1, "totalPages": 1}"#,
        )
        .unwrap();
        assert_eq!(page.data, vec![1]);

        assert!(matches!(
            unwrap_envelope::<Vec<u32>>(b"not json").unwrap_err(),
            SemproError::InvalidJson(_)
        ));
    }
}
