use serde::{Deserialize, Serialize};

use crate::api::supporting_data_structures::{COSEAlgorithmIdentifier, PublicKeyCredentialType};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PublicKeyCredentialParameters {
    pub r#type: PublicKeyCredentialType,
    pub alg: COSEAlgorithmIdentifier,
}

impl PublicKeyCredentialParameters {
    pub fn public_key(alg: COSEAlgorithmIdentifier) -> PublicKeyCredentialParameters {
        PublicKeyCredentialParameters {
            r#type: PublicKeyCredentialType::PublicKey,
            alg,
        }
    }
}
