//! Back-office session tokens (HS256 JWT)

use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::api::constants::ADMIN_SUBJECT;

static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// 全局 JwtService，首次使用时按当前配置初始化
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub kind: TokenKind,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, access_token_minutes: u64, refresh_token_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_token_minutes as i64),
            refresh_ttl: Duration::days(refresh_token_days as i64),
        }
    }

    /// 启动时已补全 jwt_secret；直接调用时若仍为空则生成随机值
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let secret = Some(config.api.jwt_secret.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("JWT secret not configured or empty, generating secure random token");
                crate::utils::generate_secure_token(32)
            });

        Self::new(
            &secret,
            config.api.access_token_minutes,
            config.api.refresh_token_days,
        )
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    pub fn issue(&self, kind: TokenKind) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl(kind)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            kind,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// 校验签名、过期时间和 token 类型
    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        if data.claims.kind != kind {
            return Err(JwtError::from(ErrorKind::InvalidToken));
        }
        Ok(data.claims)
    }

    pub fn generate_access_token(&self) -> Result<String, JwtError> {
        self.issue(TokenKind::Access)
    }

    pub fn generate_refresh_token(&self) -> Result<String, JwtError> {
        self.issue(TokenKind::Refresh)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(token, TokenKind::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate(token, TokenKind::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "handline-test-secret-0123456789ab";

    fn service() -> JwtService {
        JwtService::new(SECRET, 15, 7)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();

        let access = service.generate_access_token().unwrap();
        let claims = service.validate_access_token(&access).unwrap();
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);

        let refresh = service.generate_refresh_token().unwrap();
        let claims = service.validate_refresh_token(&refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let service = service();
        let access = service.generate_access_token().unwrap();
        let refresh = service.generate_refresh_token().unwrap();

        assert!(service.validate_refresh_token(&access).is_err());
        assert!(service.validate_access_token(&refresh).is_err());
    }

    #[test]
    fn test_garbage_and_foreign_tokens_rejected() {
        let service = service();
        assert!(service.validate_access_token("not.a.token").is_err());

        let other = JwtService::new("another-secret-another-secret-xx", 15, 7);
        let token = other.generate_access_token().unwrap();
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: "expired".to_string(),
            kind: TokenKind::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().validate_access_token(&token).is_err());
    }
}
