use serde::{Deserialize, Serialize};

use crate::api::credential_generation_parameters::PublicKeyCredentialParameters;
use crate::api::extensions_inputs_and_outputs::AuthenticationExtensionsClientInputs;
use crate::api::supporting_data_structures::{
    COSEAlgorithmIdentifier, PublicKeyCredentialDescriptor, UserVerificationRequirement,
};

/// The `{ publicKey: ... }` wrapper handed to `navigator.credentials.create`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptions {
    pub public_key: PublicKeyCredentialCreationOptions,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptions {
    pub rp: PublicKeyCredentialRpEntity,
    pub user: PublicKeyCredentialUserEntity,
    #[serde(with = "crate::security::base64url")]
    pub challenge: Vec<u8>,
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation: Option<AttestationConveyancePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

impl PublicKeyCredentialCreationOptions {
    /// Options for a single-algorithm registration. Timeout, excluded
    /// credentials, authenticator selection and extensions stay unset.
    pub fn generate(
        rp: PublicKeyCredentialRpEntity,
        user: PublicKeyCredentialUserEntity,
        challenge: Vec<u8>,
        alg: COSEAlgorithmIdentifier,
        attestation: AttestationConveyancePreference,
    ) -> PublicKeyCredentialCreationOptions {
        PublicKeyCredentialCreationOptions {
            rp,
            user,
            challenge,
            pub_key_cred_params: vec![PublicKeyCredentialParameters::public_key(alg)],
            timeout: None,
            exclude_credentials: None,
            authenticator_selection: None,
            attestation: Some(attestation),
            extensions: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PublicKeyCredentialRpEntity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialUserEntity {
    #[serde(with = "crate::security::base64url")]
    pub id: Vec<u8>,
    pub name: String,
    pub display_name: String,
    pub icon: Option<String>,
}

impl PublicKeyCredentialUserEntity {
    /// Display name is first and last name joined by a single space, as the
    /// page shows it.
    pub fn generate(
        id: Vec<u8>,
        name: String,
        first_name: &str,
        last_name: &str,
    ) -> PublicKeyCredentialUserEntity {
        PublicKeyCredentialUserEntity {
            id,
            name,
            display_name: format!("{} {}", first_name, last_name),
            icon: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelectionCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_key: Option<ResidentKeyRequirement>,
    pub require_resident_key: bool,
    pub user_verification: UserVerificationRequirement,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AuthenticatorAttachment {
    #[serde(rename = "platform")]
    Platform,
    #[serde(rename = "cross-platform")]
    CrossPlatform,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResidentKeyRequirement {
    #[serde(rename = "discouraged")]
    Discouraged,
    #[serde(rename = "preferred")]
    Preferred,
    #[serde(rename = "required")]
    Required,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AttestationConveyancePreference {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "indirect")]
    Indirect,
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "enterprise")]
    Enterprise,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::supporting_data_structures::{PublicKeyCredentialType, ES256};

    #[tokio::test]
    async fn public_key_credential_creation_options() -> Result<(), Box<dyn std::error::Error>> {
        let test_rp_entity = PublicKeyCredentialRpEntity {
            name: String::from("spring-security-webauthn sample"),
            id: None,
        };
        let test_user_entity = PublicKeyCredentialUserEntity::generate(
            vec![1, 2, 3],
            String::from("john.doe@example.com"),
            "John",
            "Doe",
        );
        let test_creation_options = PublicKeyCredentialCreationOptions::generate(
            test_rp_entity,
            test_user_entity,
            vec![0, 0, 0],
            ES256,
            AttestationConveyancePreference::None,
        );

        assert_eq!(test_creation_options.pub_key_cred_params.len(), 1);
        assert_eq!(
            test_creation_options.pub_key_cred_params[0].r#type,
            PublicKeyCredentialType::PublicKey,
        );
        assert_eq!(test_creation_options.pub_key_cred_params[0].alg, -7);
        assert!(test_creation_options.timeout.is_none());
        assert!(test_creation_options.exclude_credentials.is_none());
        assert!(test_creation_options.authenticator_selection.is_none());
        assert_eq!(
            test_creation_options.attestation,
            Some(AttestationConveyancePreference::None),
        );
        assert!(test_creation_options.extensions.is_none());

        let test_options = CredentialCreationOptions {
            public_key: test_creation_options,
        };
        let test_options_json = r#"{"publicKey":{"rp":{"name":"spring-security-webauthn sample"},"user":{"id":"AQID","name":"john.doe@example.com","displayName":"John Doe","icon":null},"challenge":"AAAA","pubKeyCredParams":[{"type":"public-key","alg":-7}],"attestation":"none"}}"#;
        let test_assertion_json = serde_json::to_string(&test_options)?;

        assert_eq!(test_options_json, test_assertion_json);
        assert_eq!(
            serde_json::from_str::<CredentialCreationOptions>(test_options_json)?,
            test_options,
        );

        Ok(())
    }

    #[tokio::test]
    async fn public_key_credential_user_entity() -> Result<(), Box<dyn std::error::Error>> {
        let test_user_entity = PublicKeyCredentialUserEntity::generate(
            Vec::with_capacity(0),
            String::from("some_name"),
            "",
            "",
        );

        assert_eq!(test_user_entity.name, "some_name");
        assert_eq!(test_user_entity.display_name, " ");
        assert!(test_user_entity.icon.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn authenticator_selection_criteria() -> Result<(), Box<dyn std::error::Error>> {
        let test_criteria = AuthenticatorSelectionCriteria {
            authenticator_attachment: Some(AuthenticatorAttachment::CrossPlatform),
            resident_key: Some(ResidentKeyRequirement::Preferred),
            require_resident_key: false,
            user_verification: UserVerificationRequirement::Preferred,
        };

        assert_eq!(
            serde_json::to_string(&test_criteria)?,
            r#"{"authenticatorAttachment":"cross-platform","residentKey":"preferred","requireResidentKey":false,"userVerification":"preferred"}"#,
        );

        Ok(())
    }
}
