use serde::{Deserialize, Serialize};

use crate::api::authenticator_responses::AuthenticatorAttestationResponse;
use crate::api::extensions_inputs_and_outputs::AuthenticationExtensionsClientOutputs;
use crate::api::supporting_data_structures::PublicKeyCredentialType;
use crate::security::base64url;

/// A freshly created credential as the browser resolves it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredential {
    pub id: String,
    #[serde(with = "crate::security::base64url")]
    pub raw_id: Vec<u8>,
    pub response: AuthenticatorAttestationResponse,
    #[serde(default)]
    pub client_extension_results: AuthenticationExtensionsClientOutputs,
    #[serde(default)]
    pub r#type: PublicKeyCredentialType,
}

impl PublicKeyCredential {
    pub fn generate(
        raw_id: Vec<u8>,
        response: AuthenticatorAttestationResponse,
        client_extension_results: AuthenticationExtensionsClientOutputs,
    ) -> PublicKeyCredential {
        PublicKeyCredential {
            id: base64url::encode(&raw_id),
            raw_id,
            response,
            client_extension_results,
            r#type: PublicKeyCredentialType::PublicKey,
        }
    }
}
