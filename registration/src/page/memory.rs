use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::error::{AuthenticationError, AuthenticationErrorType};
use crate::form::{AuthenticatorRow, FormField, InputType, DELETE_CLASS};
use crate::page::{EventSender, Listener, Page, RowId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemoryRow {
    pub fields: Vec<FormField>,
    pub visible: bool,
    remove_listeners: Vec<Listener>,
}

impl MemoryRow {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Default)]
struct Document {
    elements: HashSet<String>,
    inputs: HashMap<String, String>,
    meta: HashMap<String, String>,
    modals: HashMap<String, Vec<bool>>,
    listeners: HashMap<String, Vec<Listener>>,
    lists: HashMap<String, Vec<MemoryRow>>,
}

/// An in-process page. `click` and `click_remove` stand in for the user and
/// deliver whatever listeners are bound, exactly like the browser would.
#[derive(Debug)]
pub struct MemoryPage {
    document: Mutex<Document>,
    events: Mutex<Option<EventSender>>,
}

impl MemoryPage {
    pub fn new(events: EventSender) -> MemoryPage {
        MemoryPage {
            document: Mutex::new(Document::default()),
            events: Mutex::new(Some(events)),
        }
    }

    pub fn with_element(mut self, id: &str) -> MemoryPage {
        self.document_mut().elements.insert(id.to_owned());
        self
    }

    pub fn with_input(mut self, id: &str, value: &str) -> MemoryPage {
        let document = self.document_mut();

        document.elements.insert(id.to_owned());
        document.inputs.insert(id.to_owned(), value.to_owned());
        self
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> MemoryPage {
        self.document_mut()
            .meta
            .insert(name.to_owned(), content.to_owned());
        self
    }

    pub fn with_list(mut self, id: &str) -> MemoryPage {
        let document = self.document_mut();

        document.elements.insert(id.to_owned());
        document.lists.entry(id.to_owned()).or_default();
        self
    }

    /// A server-rendered row: its name field plus a `delete` flag.
    pub fn with_row(mut self, list: &str, name_field: &str, delete_field: &str) -> MemoryPage {
        let fields = vec![
            FormField {
                input_type: InputType::Text,
                name: name_field.to_owned(),
                value: String::new(),
                class: Some("form-control input"),
                placeholder: None,
            },
            FormField {
                input_type: InputType::Hidden,
                name: delete_field.to_owned(),
                value: String::from("false"),
                class: Some(DELETE_CLASS),
                placeholder: None,
            },
        ];

        let document = self.document_mut();

        document.elements.insert(list.to_owned());
        document
            .lists
            .entry(list.to_owned())
            .or_default()
            .push(MemoryRow {
                fields,
                visible: true,
                remove_listeners: Vec::with_capacity(1),
            });
        self
    }

    pub fn click(&self, id: &str) -> usize {
        let listeners = self
            .document()
            .listeners
            .get(id)
            .cloned()
            .unwrap_or_default();

        self.dispatch(listeners)
    }

    pub fn click_remove(&self, list: &str, row: RowId) -> usize {
        let listeners = self
            .document()
            .lists
            .get(list)
            .and_then(|rows| rows.get(row))
            .map(|row| row.remove_listeners.to_owned())
            .unwrap_or_default();

        self.dispatch(listeners)
    }

    pub fn listener_count(&self) -> usize {
        let document = self.document();
        let element_listeners: usize = document.listeners.values().map(Vec::len).sum();
        let row_listeners: usize = document
            .lists
            .values()
            .flatten()
            .map(|row| row.remove_listeners.len())
            .sum();

        element_listeners + row_listeners
    }

    pub fn is_modal_visible(&self, id: &str) -> bool {
        self.document()
            .modals
            .get(id)
            .and_then(|history| history.last().copied())
            .unwrap_or(false)
    }

    /// Every show (`true`) and hide (`false`) of modal `id`, oldest first.
    pub fn modal_history(&self, id: &str) -> Vec<bool> {
        self.document().modals.get(id).cloned().unwrap_or_default()
    }

    pub fn row(&self, list: &str, row: RowId) -> Option<MemoryRow> {
        self.document()
            .lists
            .get(list)
            .and_then(|rows| rows.get(row))
            .cloned()
    }

    pub fn row_count(&self, list: &str) -> usize {
        self.document().lists.get(list).map(Vec::len).unwrap_or(0)
    }

    /// Drops the page's end of the event channel, as leaving the page would.
    pub fn unload(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    fn dispatch(&self, listeners: Vec<Listener>) -> usize {
        let events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut delivered = 0;

        if let Some(events) = events.as_ref() {
            for listener in listeners {
                match events.send(listener) {
                    Ok(()) => delivered += 1,
                    Err(error) => tracing::warn!("memory page dispatch -> {:?}", error),
                }
            }
        }

        delivered
    }

    fn document(&self) -> MutexGuard<'_, Document> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn document_mut(&mut self) -> &mut Document {
        self.document
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.document().elements.contains(id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.document().inputs.get(id).cloned()
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.document().meta.get(name).cloned()
    }

    fn show_modal(&self, id: &str) {
        self.document()
            .modals
            .entry(id.to_owned())
            .or_default()
            .push(true);
    }

    fn hide_modal(&self, id: &str) {
        self.document()
            .modals
            .entry(id.to_owned())
            .or_default()
            .push(false);
    }

    fn bind_click(&self, id: &str, listener: Listener) -> Result<(), AuthenticationError> {
        let mut document = self.document();

        match document.elements.contains(id) {
            true => {
                document
                    .listeners
                    .entry(id.to_owned())
                    .or_default()
                    .push(listener);

                Ok(())
            }
            false => Err(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }),
        }
    }

    fn rows(&self, list: &str) -> Vec<RowId> {
        (0..self.row_count(list)).collect()
    }

    fn bind_remove(&self, list: &str, row: RowId) -> Result<(), AuthenticationError> {
        match self
            .document()
            .lists
            .get_mut(list)
            .and_then(|rows| rows.get_mut(row))
        {
            Some(row_element) => {
                row_element
                    .remove_listeners
                    .push(Listener::RemoveAuthenticator(row));

                Ok(())
            }
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }),
        }
    }

    fn append_row(&self, list: &str, row: &AuthenticatorRow) -> Result<RowId, AuthenticationError> {
        match self.document().lists.get_mut(list) {
            Some(rows) => {
                rows.push(MemoryRow {
                    fields: row.fields.to_owned(),
                    visible: true,
                    remove_listeners: Vec::with_capacity(1),
                });

                Ok(rows.len() - 1)
            }
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }),
        }
    }

    fn fade_out(&self, list: &str, row: RowId) {
        if let Some(row_element) = self
            .document()
            .lists
            .get_mut(list)
            .and_then(|rows| rows.get_mut(row))
        {
            row_element.visible = false;
        }
    }

    fn set_row_value(
        &self,
        list: &str,
        row: RowId,
        class: &str,
        value: &str,
    ) -> Result<(), AuthenticationError> {
        let mut document = self.document();
        let field = document
            .lists
            .get_mut(list)
            .and_then(|rows| rows.get_mut(row))
            .and_then(|row_element| {
                row_element
                    .fields
                    .iter_mut()
                    .find(|field| field.has_class(class))
            });

        match field {
            Some(field) => {
                field.value = value.to_owned();

                Ok(())
            }
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::event_channel;

    #[tokio::test]
    async fn inputs_and_meta() -> Result<(), Box<dyn std::error::Error>> {
        let (test_events, _test_receiver) = event_channel();
        let test_page = MemoryPage::new(test_events)
            .with_input("emailAddress", "john.doe@example.com")
            .with_meta("_challenge", "AAAA");

        assert!(test_page.has_element("emailAddress"));
        assert!(!test_page.has_element("firstName"));
        assert_eq!(
            test_page.input_value("emailAddress").as_deref(),
            Some("john.doe@example.com"),
        );
        assert_eq!(test_page.meta_content("_challenge").as_deref(), Some("AAAA"));
        assert!(test_page.meta_content("_csrf").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn click_delivers_bound_listeners() -> Result<(), Box<dyn std::error::Error>> {
        let (test_events, mut test_receiver) = event_channel();
        let test_page = MemoryPage::new(test_events)
            .with_element("add-credential-button")
            .with_row("authenticator-list", "authenticators[0].name", "authenticators[0].delete");

        assert_eq!(test_page.click("add-credential-button"), 0);

        test_page.bind_click("add-credential-button", Listener::AddCredential)?;
        test_page.bind_remove("authenticator-list", 0)?;

        assert_eq!(test_page.listener_count(), 2);
        assert_eq!(test_page.click("add-credential-button"), 1);
        assert_eq!(test_page.click_remove("authenticator-list", 0), 1);
        assert_eq!(test_receiver.recv().await, Some(Listener::AddCredential));
        assert_eq!(
            test_receiver.recv().await,
            Some(Listener::RemoveAuthenticator(0)),
        );
        assert!(test_page.bind_click("missing", Listener::AddCredential).is_err());
        assert!(test_page.bind_remove("authenticator-list", 1).is_err());

        test_page.unload();

        assert_eq!(test_page.click("add-credential-button"), 0);
        assert_eq!(test_receiver.recv().await, None);

        Ok(())
    }

    #[tokio::test]
    async fn rows() -> Result<(), Box<dyn std::error::Error>> {
        let (test_events, _test_receiver) = event_channel();
        let test_page = MemoryPage::new(test_events)
            .with_row("authenticator-list", "authenticators[0].name", "authenticators[0].delete");
        let test_row = AuthenticatorRow::generate(0, &[1], &[2], &Default::default())?;

        assert_eq!(test_page.append_row("authenticator-list", &test_row)?, 1);
        assert_eq!(test_page.rows("authenticator-list"), vec![0, 1]);
        assert!(test_page.append_row("missing-list", &test_row).is_err());

        test_page.fade_out("authenticator-list", 0);
        test_page.set_row_value("authenticator-list", 0, "delete", "true")?;

        let test_faded = test_page.row("authenticator-list", 0).unwrap();
        let test_appended = test_page.row("authenticator-list", 1).unwrap();

        assert!(!test_faded.visible);
        assert_eq!(test_faded.value("authenticators[0].delete"), Some("true"));
        assert!(test_appended.visible);
        assert_eq!(test_appended.value("newAuthenticators[0].delete"), Some("false"));

        Ok(())
    }

    #[tokio::test]
    async fn modal_history() -> Result<(), Box<dyn std::error::Error>> {
        let (test_events, _test_receiver) = event_channel();
        let test_page = MemoryPage::new(test_events);

        assert!(!test_page.is_modal_visible("gesture-request-modal"));

        test_page.show_modal("gesture-request-modal");

        assert!(test_page.is_modal_visible("gesture-request-modal"));

        test_page.hide_modal("gesture-request-modal");

        assert!(!test_page.is_modal_visible("gesture-request-modal"));
        assert_eq!(test_page.modal_history("gesture-request-modal"), vec![true, false]);

        Ok(())
    }
}
