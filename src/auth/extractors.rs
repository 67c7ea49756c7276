use actix_web::{web, FromRequest};
use futures_util::future::{ready, Ready};

use crate::error::ApiError;

use super::jwt::{Claims, Tokenizer};

pub const TOKEN_HEADER: &str = "token";

// Extractor for any signed in user, reads the raw token from the `token` header
pub struct Authenticated(pub Claims);

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let tokenizer = match req.app_data::<web::Data<Tokenizer>>() {
            Some(tokenizer) => tokenizer,
            None => return ready(Err(ApiError::UnexpectedError(anyhow::anyhow!("Tokenizer is not registered"))))
        };

        let token = req
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match token {
            Some(token) => match tokenizer.decode_key(token) {
                Some(claims) => ready(Ok(Authenticated(claims))),
                None => ready(Err(ApiError::Unauthorized("Invalid token".to_string())))
            },
            None => ready(Err(ApiError::Unauthorized("No authorization header provided".to_string())))
        }
    }
}
