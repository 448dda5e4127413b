//! The controller behind the user update page.
//!
//! `UserUpdateViewModel` reads the registration parameters off the page,
//! asks the credentials container for a new credential and stages the
//! attestation as a `newAuthenticators[<index>]` row for the form submit.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::api::credential_creation_options::{
    AttestationConveyancePreference, CredentialCreationOptions, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity,
};
use crate::api::extensions_inputs_and_outputs::AuthenticationExtensionsClientOutputs;
use crate::client::CredentialsContainer;
use crate::config::{Config, CREDENTIAL_ID_STORAGE_KEY, RELYING_PARTY_NAME};
use crate::error::{AuthenticationError, AuthenticationErrorType};
use crate::form::{AuthenticatorRow, DELETE_CLASS};
use crate::page::{EventReceiver, Listener, Page, RowId};
use crate::api::supporting_data_structures::ES256;
use crate::security::base64url;
use crate::storage::LocalStorage;

pub struct UserUpdateViewModel<P, C, S> {
    config: Config,
    page: P,
    credentials: C,
    storage: S,
    authenticator_list_index: AtomicUsize,
    in_flight: AtomicBool,
}

/// Held for the duration of one ceremony; released on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<InFlight<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P, C, S> UserUpdateViewModel<P, C, S>
where
    P: Page,
    C: CredentialsContainer,
    S: LocalStorage,
{
    pub fn new(config: Config, page: P, credentials: C, storage: S) -> UserUpdateViewModel<P, C, S> {
        UserUpdateViewModel {
            config,
            page,
            credentials,
            storage,
            authenticator_list_index: AtomicUsize::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn authenticator_list_index(&self) -> usize {
        self.authenticator_list_index.load(Ordering::Acquire)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// DOM-ready callback. Pages without the user update view are left alone.
    pub fn ready(&self) -> bool {
        if !self.page.has_element(&self.config.elements.view) {
            tracing::debug!(
                "#{} not on this page, nothing to bind",
                self.config.elements.view,
            );

            return false;
        }

        if let Err(error) = self.setup_event_listeners() {
            tracing::error!("user update view | setup event listeners -> {}", error);
        }

        true
    }

    pub fn setup_event_listeners(&self) -> Result<(), AuthenticationError> {
        let elements = &self.config.elements;

        self.page
            .bind_click(&elements.add_credential_button, Listener::AddCredential)?;

        for row in self.page.rows(&elements.authenticator_list) {
            self.page.bind_remove(&elements.authenticator_list, row)?;
        }

        Ok(())
    }

    /// Options built from what the page currently shows.
    pub fn creation_options(&self) -> Result<CredentialCreationOptions, AuthenticationError> {
        let elements = &self.config.elements;

        let challenge = match self.page.meta_content(&elements.challenge_meta) {
            Some(challenge) => base64url::decode(&challenge)?,
            None => {
                tracing::error!("meta[name='{}'] is missing", elements.challenge_meta);

                return Err(AuthenticationError {
                    error: AuthenticationErrorType::NotFoundError,
                });
            }
        };
        let user_handle = base64url::decode(&self.input_value(&elements.user_handle)?)?;
        let email_address = self.input_value(&elements.email_address)?;
        let first_name = self.input_value(&elements.first_name)?;
        let last_name = self.input_value(&elements.last_name)?;

        let rp = PublicKeyCredentialRpEntity {
            name: String::from(RELYING_PARTY_NAME),
            id: None,
        };
        let user = PublicKeyCredentialUserEntity::generate(
            user_handle,
            email_address,
            &first_name,
            &last_name,
        );

        Ok(CredentialCreationOptions {
            public_key: PublicKeyCredentialCreationOptions::generate(
                rp,
                user,
                challenge,
                ES256,
                AttestationConveyancePreference::None,
            ),
        })
    }

    /// Runs one registration gesture and stages its result as a new row.
    pub async fn add_credential(&self) -> Result<RowId, AuthenticationError> {
        let _in_flight = match InFlight::acquire(&self.in_flight) {
            Some(in_flight) => in_flight,
            None => {
                tracing::warn!("add credential | a registration gesture is already in progress");

                return Err(AuthenticationError {
                    error: AuthenticationErrorType::InvalidStateError,
                });
            }
        };

        let options = self.creation_options()?;
        let modal = &self.config.elements.gesture_request_modal;

        self.page.show_modal(modal);

        let credential = self.credentials.create(&options).await;

        self.page.hide_modal(modal);

        match credential {
            Ok(credential) => {
                tracing::debug!("created credential {}", credential.id);

                if let Err(error) = self.save_credential_id(&credential.raw_id) {
                    tracing::error!("add credential | save credential id -> {}", error);

                    return Err(error);
                }

                self.add_credential_form(
                    &credential.response.client_data_json,
                    &credential.response.attestation_object,
                    &credential.client_extension_results,
                )
            }
            Err(error) => {
                tracing::error!("add credential | credentials create -> {}", error);

                Err(error)
            }
        }
    }

    /// Overwrites whatever id was stored before; only the latest is kept.
    pub fn save_credential_id(&self, credential_id: &[u8]) -> Result<(), AuthenticationError> {
        let encoded_id = base64url::encode(credential_id);

        self.storage
            .set_item(CREDENTIAL_ID_STORAGE_KEY, &encoded_id)
    }

    pub fn add_credential_form(
        &self,
        client_data: &[u8],
        attestation_object: &[u8],
        client_extensions: &AuthenticationExtensionsClientOutputs,
    ) -> Result<RowId, AuthenticationError> {
        let index = self.authenticator_list_index.fetch_add(1, Ordering::AcqRel);
        let list = &self.config.elements.authenticator_list;

        let row =
            AuthenticatorRow::generate(index, client_data, attestation_object, client_extensions)?;
        let row_id = self.page.append_row(list, &row)?;

        self.page.bind_remove(list, row_id)?;

        tracing::info!("staged newAuthenticators[{}] in row {}", index, row_id);

        Ok(row_id)
    }

    /// Hides the row and flags it for deletion on submit. The row itself
    /// stays in the list.
    pub fn remove_authenticator(&self, row: RowId) -> Result<(), AuthenticationError> {
        let list = &self.config.elements.authenticator_list;

        self.page.fade_out(list, row);
        self.page.set_row_value(list, row, DELETE_CLASS, "true")
    }

    /// Handles clicks until the page goes away. Gestures run alongside
    /// removals, so a pending gesture never holds up a remove click.
    pub async fn run(&self, mut events: EventReceiver) {
        let mut ceremonies = FuturesUnordered::new();

        loop {
            tokio::select! {
                biased;

                event = events.recv() => match event {
                    Some(Listener::AddCredential) => ceremonies.push(self.add_credential()),
                    Some(Listener::RemoveAuthenticator(row)) => {
                        if let Err(error) = self.remove_authenticator(row) {
                            tracing::warn!("remove authenticator {} -> {}", row, error);
                        }
                    }
                    None => break,
                },
                Some(outcome) = ceremonies.next(), if !ceremonies.is_empty() => {
                    tracing::debug!("add credential settled -> {:?}", outcome);
                }
            }
        }

        while let Some(outcome) = ceremonies.next().await {
            tracing::debug!("add credential settled -> {:?}", outcome);
        }
    }

    fn input_value(&self, id: &str) -> Result<String, AuthenticationError> {
        match self.page.input_value(id) {
            Some(value) => Ok(value),
            None => {
                tracing::error!("#{} is missing", id);

                Err(AuthenticationError {
                    error: AuthenticationErrorType::NotFoundError,
                })
            }
        }
    }
}
