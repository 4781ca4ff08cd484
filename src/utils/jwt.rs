//! 身份令牌校验
//!
//! 令牌由外部身份服务以 HS256 签发，本服务只校验签名并读取其中的用户信息。

use crate::config::AppConfig;
use crate::errors::{AttendanceError, Result};
use crate::models::users::entities::{Actor, UserRole};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (user ID)
    pub name: String, // 显示名称
    pub role: String, // 用户角色
    pub exp: usize,   // Expiration time (时间戳)
    pub iat: usize,   // Issued at (签发时间)
}

impl Claims {
    /// 转换为业务层的操作者
    pub fn into_actor(self) -> Result<Actor> {
        if self.sub.is_empty() {
            return Err(AttendanceError::authentication("Token subject is empty"));
        }
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(AttendanceError::authentication)?;
        Ok(Actor {
            id: self.sub,
            display_name: self.name,
            role,
        })
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 使用全局配置验证 JWT token
    pub fn verify_token(token: &str) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::verify_token_with_secret(token, &Self::get_secret(), config.jwt.leeway)
    }

    // 使用指定密钥验证 JWT token
    pub fn verify_token_with_secret(
        token: &str,
        secret: &str,
        leeway: u64,
    ) -> std::result::Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway;

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 为指定操作者签发 token（开发调试与测试使用）
    pub fn generate_token_with_secret(
        actor: &Actor,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> std::result::Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: actor.id.clone(),
            name: actor.display_name.clone(),
            role: actor.role.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip_into_actor() {
        let actor = Actor::new("s-1", "Alice", UserRole::Student);
        let token =
            JwtUtils::generate_token_with_secret(&actor, SECRET, chrono::Duration::minutes(5))
                .unwrap();

        let claims = JwtUtils::verify_token_with_secret(&token, SECRET, 0).unwrap();
        assert_eq!(claims.into_actor().unwrap(), actor);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let actor = Actor::new("t-1", "Bob", UserRole::Teacher);
        let token =
            JwtUtils::generate_token_with_secret(&actor, SECRET, chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::verify_token_with_secret(&token, "other", 0).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let actor = Actor::new("t-1", "Bob", UserRole::Teacher);
        let token =
            JwtUtils::generate_token_with_secret(&actor, SECRET, chrono::Duration::minutes(-10))
                .unwrap();
        assert!(JwtUtils::verify_token_with_secret(&token, SECRET, 0).is_err());
    }

    #[test]
    fn test_unknown_role_is_authentication_error() {
        let claims = Claims {
            sub: "u-1".to_string(),
            name: "Eve".to_string(),
            role: "admin".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.into_actor().unwrap_err().code(), "E007");
    }
}
