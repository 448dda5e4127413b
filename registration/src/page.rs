use tokio::sync::mpsc;

use crate::error::AuthenticationError;
use crate::form::AuthenticatorRow;

pub mod memory;

/// Position of a row inside its list container. Rows are hidden, never
/// detached, so a position stays valid for the life of the page.
pub type RowId = usize;

/// What a bound click delivers to the view-model.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Listener {
    AddCredential,
    RemoveAuthenticator(RowId),
}

pub type EventSender = mpsc::UnboundedSender<Listener>;
pub type EventReceiver = mpsc::UnboundedReceiver<Listener>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// The slice of the DOM the user update view touches.
pub trait Page {
    fn has_element(&self, id: &str) -> bool;

    fn input_value(&self, id: &str) -> Option<String>;

    fn meta_content(&self, name: &str) -> Option<String>;

    fn show_modal(&self, id: &str);

    fn hide_modal(&self, id: &str);

    /// Clicks on element `id` deliver `listener` from now on.
    fn bind_click(&self, id: &str, listener: Listener) -> Result<(), AuthenticationError>;

    /// Rows currently inside `list`, server-rendered ones included.
    fn rows(&self, list: &str) -> Vec<RowId>;

    /// Clicks on the remove button of `row` deliver
    /// `Listener::RemoveAuthenticator(row)` from now on.
    fn bind_remove(&self, list: &str, row: RowId) -> Result<(), AuthenticationError>;

    fn append_row(&self, list: &str, row: &AuthenticatorRow) -> Result<RowId, AuthenticationError>;

    fn fade_out(&self, list: &str, row: RowId);

    /// Sets the value of the input carrying `class` inside `row`.
    fn set_row_value(
        &self,
        list: &str,
        row: RowId,
        class: &str,
        value: &str,
    ) -> Result<(), AuthenticationError>;
}

impl<T: Page + ?Sized> Page for &T {
    fn has_element(&self, id: &str) -> bool {
        (**self).has_element(id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        (**self).input_value(id)
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        (**self).meta_content(name)
    }

    fn show_modal(&self, id: &str) {
        (**self).show_modal(id)
    }

    fn hide_modal(&self, id: &str) {
        (**self).hide_modal(id)
    }

    fn bind_click(&self, id: &str, listener: Listener) -> Result<(), AuthenticationError> {
        (**self).bind_click(id, listener)
    }

    fn rows(&self, list: &str) -> Vec<RowId> {
        (**self).rows(list)
    }

    fn bind_remove(&self, list: &str, row: RowId) -> Result<(), AuthenticationError> {
        (**self).bind_remove(list, row)
    }

    fn append_row(&self, list: &str, row: &AuthenticatorRow) -> Result<RowId, AuthenticationError> {
        (**self).append_row(list, row)
    }

    fn fade_out(&self, list: &str, row: RowId) {
        (**self).fade_out(list, row)
    }

    fn set_row_value(
        &self,
        list: &str,
        row: RowId,
        class: &str,
        value: &str,
    ) -> Result<(), AuthenticationError> {
        (**self).set_row_value(list, row, class, value)
    }
}
