use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::configuration::JWTSettings;

pub struct Tokenizer{
    pub secret: SecretString,
    pub access_expiry_hours: u64,
    pub refresh_expiry_hours: u64
}

/// Identity carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims{
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub exp: usize
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RefreshClaims{
    pub sub: String,
    pub exp: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair{
    pub token: String,
    pub refresh_token: String
}

/// Who a token pair is issued for.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a>{
    pub user_id: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str
}

impl Tokenizer {
    pub fn new(settings: &JWTSettings) -> Self {
        Self{
            secret: SecretString::from(settings.secret.expose_secret().to_string()),
            access_expiry_hours: settings.access_expiry_hours,
            refresh_expiry_hours: settings.refresh_expiry_hours
        }
    }

    fn expiry(hours: u64) -> usize {
        (Utc::now() + Duration::hours(hours as i64)).timestamp() as usize
    }

    fn encode<T: Serialize>(&self, claims: &T) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )
    }

    pub fn generate_pair(&self, subject: Subject<'_>) -> Result<TokenPair, jsonwebtoken::errors::Error>{
        let claims = Claims{
            sub: subject.user_id.to_string(),
            email: subject.email.to_string(),
            first_name: subject.first_name.to_string(),
            last_name: subject.last_name.to_string(),
            exp: Self::expiry(self.access_expiry_hours)
        };
        let refresh_claims = RefreshClaims{
            sub: subject.user_id.to_string(),
            exp: Self::expiry(self.refresh_expiry_hours)
        };

        Ok(TokenPair{
            token: self.encode(&claims)?,
            refresh_token: self.encode(&refresh_claims)?
        })
    }

    pub fn decode_key(&self, token: &str) -> Option<Claims>{
        match jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        ) {
            Ok(decoded_data) => Some(decoded_data.claims),
            Err(_) => None
        }
    }
}
