//! Authentication endpoints: email one-time codes and token refresh.
//!
//! None of these calls attach an Authorization header. Refresh in
//! particular must not send the (possibly stale) access token.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

const OTP_PATH: &str = "/api/auth/otp";
const VERIFY_PATH: &str = "/api/auth/verify";
const REFRESH_PATH: &str = "/api/auth/refresh";

/// Tokens issued by the verify and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl ApiClient {
    /// Ask the server to email a one-time code to `email`
    pub async fn send_otp(&self, email: &str) -> Result<(), ApiError> {
        self.request(Method::POST, OTP_PATH, &[], Some(&OtpRequest { email }), None)
            .await?;
        Ok(())
    }

    /// Exchange an emailed code for a token grant
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<TokenGrant, ApiError> {
        self.post_json(VERIFY_PATH, &VerifyRequest { email, code }, None)
            .await
    }

    /// Exchange a refresh token for a new token grant
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenGrant, ApiError> {
        self.post_json(REFRESH_PATH, &RefreshRequest { refresh_token }, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_value(VerifyRequest {
            email: "a@b.com",
            code: "000000",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "code": "000000"}));

        let body = serde_json::to_value(RefreshRequest { refresh_token: "r" }).unwrap();
        assert_eq!(body, serde_json::json!({"refresh_token": "r"}));
    }

    #[test]
    fn test_parse_token_grant() {
        let json = r#"{"access_token":"x","refresh_token":"y","expires_in":3600,"token_type":"bearer"}"#;
        let grant: TokenGrant = serde_json::from_str(json).expect("Failed to parse grant JSON");
        assert_eq!(grant.access_token, "x");
        assert_eq!(grant.refresh_token, "y");
        assert_eq!(grant.expires_in, 3600);
    }
}
