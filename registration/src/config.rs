//! Page wiring and registration constants.
//!
//! The relying party name, algorithm, attestation preference and storage
//! key are fixed. A host may only rename the elements the view-model looks
//! up, and every element id has a default.

use serde::{Deserialize, Serialize};

use crate::error::{AuthenticationError, AuthenticationErrorType};

pub const RELYING_PARTY_NAME: &str = "spring-security-webauthn sample";
pub const CREDENTIAL_ID_STORAGE_KEY: &str =
    "net.sharplab.springframework.security.webauthn.credentialId";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub elements: Elements,
}

/// Ids (and the challenge meta tag name) the view-model looks up on the page.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Elements {
    pub view: String,
    pub user_handle: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub challenge_meta: String,
    pub gesture_request_modal: String,
    pub add_credential_button: String,
    pub authenticator_list: String,
}

impl Default for Elements {
    fn default() -> Elements {
        Elements {
            view: String::from("user-update-view"),
            user_handle: String::from("userHandle"),
            email_address: String::from("emailAddress"),
            first_name: String::from("firstName"),
            last_name: String::from("lastName"),
            challenge_meta: String::from("_challenge"),
            gesture_request_modal: String::from("gesture-request-modal"),
            add_credential_button: String::from("add-credential-button"),
            authenticator_list: String::from("authenticator-list"),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, AuthenticationError> {
        match serde_json::from_str(json) {
            Ok(config) => Ok(config),
            Err(error) => {
                tracing::error!("config deserialization error -> {:?}", error);

                Err(AuthenticationError {
                    error: AuthenticationErrorType::ConstraintError,
                })
            }
        }
    }
}
