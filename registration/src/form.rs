//! Form rows staged for the server-side `newAuthenticators` binding.
//!
//! A row carries one visible name input, the three serialized parts of the
//! attestation as hidden inputs and a hidden `delete` flag. Field names take
//! the shape `newAuthenticators[<index>].<attribute>`.

use crate::api::extensions_inputs_and_outputs::AuthenticationExtensionsClientOutputs;
use crate::error::{AuthenticationError, AuthenticationErrorType};
use crate::security::base64url;

pub const ROW_CLASS: &str = "authenticator-item";
pub const DELETE_CLASS: &str = "delete";
pub const REMOVE_BUTTON_CLASS: &str = "btn btn-box-tool remove-button";
pub const NAME_PLACEHOLDER: &str = "Authenticator Name";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthenticatorAttribute {
    Name,
    ClientData,
    AttestationObject,
    ClientExtensionsJson,
    Delete,
}

impl AuthenticatorAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticatorAttribute::Name => "name",
            AuthenticatorAttribute::ClientData => "clientData",
            AuthenticatorAttribute::AttestationObject => "attestationObject",
            AuthenticatorAttribute::ClientExtensionsJson => "clientExtensionsJSON",
            AuthenticatorAttribute::Delete => "delete",
        }
    }
}

pub fn field_name(index: usize, attribute: AuthenticatorAttribute) -> String {
    format!("newAuthenticators[{}].{}", index, attribute.as_str())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputType {
    Text,
    Hidden,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Hidden => "hidden",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormField {
    pub input_type: InputType,
    pub name: String,
    pub value: String,
    pub class: Option<&'static str>,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    fn hidden(name: String, value: String) -> FormField {
        FormField {
            input_type: InputType::Hidden,
            name,
            value,
            class: None,
            placeholder: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .map(|classes| classes.split_whitespace().any(|candidate| candidate == class))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthenticatorRow {
    pub index: usize,
    pub fields: Vec<FormField>,
}

impl AuthenticatorRow {
    pub fn generate(
        index: usize,
        client_data: &[u8],
        attestation_object: &[u8],
        client_extensions: &AuthenticationExtensionsClientOutputs,
    ) -> Result<AuthenticatorRow, AuthenticationError> {
        let client_extensions_json = match serde_json::to_string(client_extensions) {
            Ok(json) => json,
            Err(error) => {
                tracing::error!("json serialization error -> {:?}", error);

                return Err(AuthenticationError {
                    error: AuthenticationErrorType::EncodingError,
                });
            }
        };

        let name = FormField {
            input_type: InputType::Text,
            name: field_name(index, AuthenticatorAttribute::Name),
            value: String::new(),
            class: Some("form-control input"),
            placeholder: Some(NAME_PLACEHOLDER),
        };
        let client_data = FormField::hidden(
            field_name(index, AuthenticatorAttribute::ClientData),
            base64url::encode(client_data),
        );
        let attestation_object = FormField::hidden(
            field_name(index, AuthenticatorAttribute::AttestationObject),
            base64url::encode(attestation_object),
        );
        let client_extensions = FormField::hidden(
            field_name(index, AuthenticatorAttribute::ClientExtensionsJson),
            client_extensions_json,
        );
        let delete = FormField {
            class: Some(DELETE_CLASS),
            ..FormField::hidden(
                field_name(index, AuthenticatorAttribute::Delete),
                String::from("false"),
            )
        };

        Ok(AuthenticatorRow {
            index,
            fields: vec![name, client_data, attestation_object, client_extensions, delete],
        })
    }

    pub fn field(&self, attribute: AuthenticatorAttribute) -> Option<&FormField> {
        let name = field_name(self.index, attribute);

        self.fields.iter().find(|field| field.name == name)
    }
}
