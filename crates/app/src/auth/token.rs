//! Bearer token format and verifier construction.
//!
//! Tokens look like `rg_v1_<token uuid, simple>.<64 hex secret>`. Only a
//! SHA-256 verifier of the secret material is stored.

use std::{fmt, fmt::Write as _, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{auth::TokenUuid, domain::users::records::UserUuid};

pub const API_TOKEN_PREFIX: &str = "rg";

pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Random secret half of a token. Zeroed on drop, redacted in `Debug`.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    fn to_hex(&self) -> String {
        self.0
            .iter()
            .fold(String::with_capacity(API_TOKEN_SECRET_BYTES * 2), |mut hex, byte| {
                let _ = write!(hex, "{byte:02x}");
                hex
            })
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != API_TOKEN_SECRET_BYTES * 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;
            *byte = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self(bytes))
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: TokenUuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn format_api_token(
    token_uuid: TokenUuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.into_uuid().simple(),
        secret.to_hex()
    )
}

pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (head, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut parts = head.splitn(3, '_');

    let (Some(prefix), Some(version), Some(token_uuid)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ApiTokenError::InvalidFormat);
    };

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = version.parse::<ApiTokenVersion>()?;

    let token_uuid = Uuid::try_parse(token_uuid)
        .ok()
        .ok_or(ApiTokenError::InvalidFormat)?;

    let secret =
        ApiTokenSecret::from_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid: TokenUuid::from_uuid(token_uuid),
        version,
        secret,
    })
}

/// SHA-256 verifier over `{token_uuid}:{version}:{user_uuid}:{secret_hex}`, hex encoded.
#[must_use]
pub fn compute_verifier(
    token_uuid: TokenUuid,
    version: ApiTokenVersion,
    user_uuid: UserUuid,
    secret: &ApiTokenSecret,
) -> String {
    let mut secret_hex = secret.to_hex();

    let input = format!(
        "{}:{}:{}:{secret_hex}",
        token_uuid.into_uuid().simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
    );

    secret_hex.zeroize();

    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Compare two verifiers without short-circuiting on the first mismatch.
#[must_use]
pub fn verifiers_match(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected
            .bytes()
            .zip(actual.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
