use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthenticatorAttestationResponse {
    #[serde(rename = "clientDataJSON", with = "crate::security::base64url")]
    pub client_data_json: Vec<u8>,
    #[serde(rename = "attestationObject", with = "crate::security::base64url")]
    pub attestation_object: Vec<u8>,
}
