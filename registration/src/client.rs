use async_trait::async_trait;

use crate::api::credential_creation_options::CredentialCreationOptions;
use crate::api::public_key_credential::PublicKeyCredential;
use crate::error::AuthenticationError;

/// `navigator.credentials` as far as registration needs it.
#[async_trait(?Send)]
pub trait CredentialsContainer {
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PublicKeyCredential, AuthenticationError>;
}

#[async_trait(?Send)]
impl<T: CredentialsContainer + ?Sized> CredentialsContainer for &T {
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<PublicKeyCredential, AuthenticationError> {
        (**self).create(options).await
    }
}
