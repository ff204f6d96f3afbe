use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::signing_key::SigningKey;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. The algorithm is pinned to HS256: tokens
/// whose header names any other algorithm (including `none`) are rejected.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    pub fn new(signing_key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a compact JWS string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token after verifying its signature.
    ///
    /// `sub` and `exp` must be present, but `exp` is not compared with the
    /// clock here: signature validity and expiry are separate questions and
    /// the caller decides whether it needs the second one.
    ///
    /// # Errors
    /// * `DecodingFailed` - Malformed token, wrong algorithm, bad signature or
    ///   missing claims
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn key(secret: &[u8]) -> SigningKey {
        SigningKey::from_bytes(secret.to_vec()).unwrap()
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(&key(b"my_secret_key_at_least_32_bytes_long!"));

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: 4_000_000_000,
        };

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_does_not_check_expiry() {
        let handler = JwtHandler::new(&key(b"my_secret_key_at_least_32_bytes_long!"));

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: 1,
        };
        let token = handler.encode(&claims).unwrap();

        let decoded: TestClaims = handler.decode(&token).expect("Expired token should decode");
        assert_eq!(decoded.sub, "user123");
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(&key(b"my_secret_key_at_least_32_bytes_long!"));

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(&key(b"secret1_at_least_32_bytes_long_key!"));
        let handler2 = JwtHandler::new(&key(b"secret2_at_least_32_bytes_long_key!"));

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: 4_000_000_000,
        };
        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let secret = b"my_secret_key_at_least_32_bytes_long!";
        let handler = JwtHandler::new(&key(secret));

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: 4_000_000_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        assert!(handler.decode::<TestClaims>(&token).is_err());
    }

    #[test]
    fn test_decode_requires_exp_claim() {
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
        }

        let handler = JwtHandler::new(&key(b"my_secret_key_at_least_32_bytes_long!"));
        let token = handler
            .encode(&NoExpiry {
                sub: "user123".to_string(),
            })
            .unwrap();

        assert!(handler.decode::<TestClaims>(&token).is_err());
    }
}
