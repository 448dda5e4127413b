use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{AuthenticationError, AuthenticationErrorType};

/// URL-safe alphabet, no padding on output, padding optional on input.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode(data: impl AsRef<[u8]>) -> String {
    BASE64URL.encode(data)
}

pub fn decode(data: &str) -> Result<Vec<u8>, AuthenticationError> {
    match BASE64URL.decode(data) {
        Ok(decoded) => Ok(decoded),
        Err(error) => {
            tracing::warn!("base64url decoding error -> {:?}", error);

            Err(AuthenticationError {
                error: AuthenticationErrorType::EncodingError,
            })
        }
    }
}

pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&encode(data))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    BASE64URL.decode(text).map_err(serde::de::Error::custom)
}
