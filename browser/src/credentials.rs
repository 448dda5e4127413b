use async_trait::async_trait;
use js_sys::{Array, ArrayBuffer, Function, Reflect, Uint8Array, JSON};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use registration::api::authenticator_responses::AuthenticatorAttestationResponse;
use registration::api::credential_creation_options::CredentialCreationOptions;
use registration::api::extensions_inputs_and_outputs::AuthenticationExtensionsClientOutputs;
use registration::api::public_key_credential::PublicKeyCredential;
use registration::client::CredentialsContainer;
use registration::{AuthenticationError, AuthenticationErrorType};

use crate::exception::exception;

/// `navigator.credentials`.
pub struct BrowserCredentials {
    container: web_sys::CredentialsContainer,
}

impl BrowserCredentials {
    pub fn init() -> Result<BrowserCredentials, AuthenticationError> {
        match web_sys::window() {
            Some(window) => Ok(BrowserCredentials {
                container: window.navigator().credentials(),
            }),
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::NotSupportedError,
            }),
        }
    }
}

#[async_trait(?Send)]
impl CredentialsContainer for BrowserCredentials {
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PublicKeyCredential, AuthenticationError> {
        let js_options = to_js_options(options)?;
        let promise = self
            .container
            .create_with_options(js_options.unchecked_ref())
            .map_err(|error| exception(&error))?;
        let credential = JsFuture::from(promise)
            .await
            .map_err(|error| exception(&error))?;

        if credential.is_null() || credential.is_undefined() {
            return Err(AuthenticationError {
                error: AuthenticationErrorType::NotAllowedError,
            });
        }

        from_js_credential(&credential)
    }
}

fn to_js_options(options: &CredentialCreationOptions) -> Result<JsValue, AuthenticationError> {
    let json = serde_json::to_string(options).map_err(|error| {
        tracing::error!("json serialization error -> {:?}", error);

        AuthenticationError {
            error: AuthenticationErrorType::EncodingError,
        }
    })?;
    let js_options = JSON::parse(&json).map_err(|error| exception(&error))?;
    let public_key = get(&js_options, "publicKey")?;
    let user = get(&public_key, "user")?;

    set(&public_key, "challenge", &bytes(&options.public_key.challenge))?;
    set(&user, "id", &bytes(&options.public_key.user.id))?;

    if let Some(exclude_credentials) = &options.public_key.exclude_credentials {
        let descriptors = Array::from(&get(&public_key, "excludeCredentials")?);

        for (index, descriptor) in exclude_credentials.iter().enumerate() {
            set(&descriptors.get(index as u32), "id", &bytes(&descriptor.id))?;
        }
    }

    Ok(js_options)
}

fn from_js_credential(credential: &JsValue) -> Result<PublicKeyCredential, AuthenticationError> {
    let raw_id = buffer(&get(credential, "rawId")?);
    let response = get(credential, "response")?;
    let response = AuthenticatorAttestationResponse {
        client_data_json: buffer(&get(&response, "clientDataJSON")?),
        attestation_object: buffer(&get(&response, "attestationObject")?),
    };

    Ok(PublicKeyCredential::generate(
        raw_id,
        response,
        client_extension_results(credential)?,
    ))
}

fn client_extension_results(
    credential: &JsValue,
) -> Result<AuthenticationExtensionsClientOutputs, AuthenticationError> {
    let results = match get(credential, "getClientExtensionResults")?.dyn_into::<Function>() {
        Ok(function) => function.call0(credential).map_err(|error| exception(&error))?,
        Err(_) => return Ok(AuthenticationExtensionsClientOutputs::new()),
    };
    let json: String = JSON::stringify(&results)
        .map_err(|error| exception(&error))?
        .into();

    serde_json::from_str(&json).map_err(|error| {
        tracing::error!("json deserialization error -> {:?}", error);

        AuthenticationError {
            error: AuthenticationErrorType::EncodingError,
        }
    })
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, AuthenticationError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|error| exception(&error))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), AuthenticationError> {
    match Reflect::set(target, &JsValue::from_str(key), value) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthenticationError {
            error: AuthenticationErrorType::EncodingError,
        }),
        Err(error) => Err(exception(&error)),
    }
}

fn bytes(data: &[u8]) -> JsValue {
    Uint8Array::from(data).into()
}

fn buffer(value: &JsValue) -> Vec<u8> {
    match value.dyn_ref::<ArrayBuffer>() {
        Some(array_buffer) => Uint8Array::new(array_buffer).to_vec(),
        None => Uint8Array::new(value).to_vec(),
    }
}

