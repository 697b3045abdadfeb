use crate::core::tokener::{Payload, Tokener};
use crate::error::Error;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// HS256 tokens signed with a shared secret. Expiry is checked without leeway.
pub struct JWT {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JWT {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl<P> Tokener<P> for JWT
where
    P: Payload,
{
    fn gen_token(&self, payload: &P) -> Result<String, Error> {
        let token = encode(&Header::new(Algorithm::HS256), payload, &self.encoding)?;
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<P, Error> {
        let data = decode(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
