//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! Access and refresh tokens carry the user id as subject; email confirmation and
//! password reset tokens carry the email address.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
    EmailConfirmation,
    PasswordReset,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, or email for email tokens)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
    /// Unique token id, so two tokens issued in the same second differ
    pub jti: String,
}

impl Claims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric id
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    #[must_use]
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

/// Token pair returned on login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    email_token_expiry: i64,
    password_reset_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service. Email tokens default to one day, reset tokens to one hour.
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
            email_token_expiry: 86_400,
            password_reset_expiry: 3600,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
        .with_email_expiry(config.email_token_expiry, config.password_reset_expiry)
    }

    /// Override email confirmation and password reset lifetimes
    #[must_use]
    pub fn with_email_expiry(mut self, email_token_expiry: i64, password_reset_expiry: i64) -> Self {
        self.email_token_expiry = email_token_expiry;
        self.password_reset_expiry = password_reset_expiry;
        self
    }

    fn expiry_for(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
            TokenType::EmailConfirmation => self.email_token_expiry,
            TokenType::PasswordReset => self.password_reset_expiry,
        }
    }

    /// Generate a token pair for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_token_pair(&self, user_id: i64) -> Result<TokenPair, AppError> {
        let subject = user_id.to_string();
        let access_token = self.encode_token(&subject, TokenType::Access)?;
        let refresh_token = self.encode_token(&subject, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Token sent in the email confirmation link
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_email_confirmation_token(&self, email: &str) -> Result<String, AppError> {
        self.encode_token(email, TokenType::EmailConfirmation)
    }

    /// Token sent in the password reset link
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_password_reset_token(&self, email: &str) -> Result<String, AppError> {
        self.encode_token(email, TokenType::PasswordReset)
    }

    fn encode_token(&self, subject: &str, token_type: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_for(token_type))).timestamp(),
            token_type,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Validate a refresh token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    /// Validate an email confirmation token and return the email it was issued for
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or of another type
    pub fn validate_email_confirmation_token(&self, token: &str) -> Result<String, AppError> {
        self.decode_typed(token, TokenType::EmailConfirmation)
            .map(|claims| claims.sub)
    }

    /// Validate a password reset token and return the email it was issued for
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or of another type
    pub fn validate_password_reset_token(&self, token: &str) -> Result<String, AppError> {
        self.decode_typed(token, TokenType::PasswordReset)
            .map(|claims| claims.sub)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("email_token_expiry", &self.email_token_expiry)
            .field("password_reset_expiry", &self.password_reset_expiry)
            .finish_non_exhaustive()
    }
}
