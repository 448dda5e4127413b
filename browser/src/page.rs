use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use registration::form::{AuthenticatorRow, REMOVE_BUTTON_CLASS, ROW_CLASS};
use registration::page::{EventSender, Listener, Page, RowId};
use registration::{AuthenticationError, AuthenticationErrorType};

use crate::exception::exception;

const MODAL_VISIBLE_CLASS: &str = "show";

/// The live document. Bound clicks are forwarded into the view-model's
/// event channel; the closures live as long as the page.
pub struct BrowserPage {
    document: Document,
    events: EventSender,
}

impl BrowserPage {
    pub fn init(document: Document, events: EventSender) -> BrowserPage {
        BrowserPage { document, events }
    }

    fn element(&self, id: &str) -> Result<Element, AuthenticationError> {
        self.document.get_element_by_id(id).ok_or_else(|| {
            tracing::warn!("missing element -> #{}", id);

            AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }
        })
    }

    fn row_elements(&self, list: &str) -> Vec<Element> {
        let rows = match self
            .element(list)
            .ok()
            .map(|list| list.query_selector_all(&format!("tr.{}", ROW_CLASS)))
        {
            Some(Ok(rows)) => rows,
            _ => return Vec::new(),
        };

        (0..rows.length())
            .filter_map(|index| rows.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn row_element(&self, list: &str, row: RowId) -> Result<Element, AuthenticationError> {
        self.row_elements(list)
            .into_iter()
            .nth(row)
            .ok_or(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            })
    }

    fn listen(&self, target: &Element, listener: Listener) -> Result<(), AuthenticationError> {
        let events = self.events.to_owned();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Err(error) = events.send(listener) {
                tracing::warn!("view model is gone -> {:?}", error);
            }
        });

        target
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|error| exception(&error))?;

        callback.forget();

        Ok(())
    }

    fn create(&self, tag: &str) -> Result<Element, AuthenticationError> {
        self.document
            .create_element(tag)
            .map_err(|error| exception(&error))
    }

    fn set_display(element: &Element, display: &str) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            if let Err(error) = element.style().set_property("display", display) {
                tracing::warn!("display -> {}", exception(&error));
            }
        }
    }
}

impl Page for BrowserPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.document
            .query_selector(&format!("meta[name='{}']", name))
            .ok()??
            .get_attribute("content")
    }

    fn show_modal(&self, id: &str) {
        if let Ok(modal) = self.element(id) {
            if let Err(error) = modal.class_list().add_1(MODAL_VISIBLE_CLASS) {
                tracing::warn!("show modal -> {}", exception(&error));
            }

            BrowserPage::set_display(&modal, "block");
        }
    }

    fn hide_modal(&self, id: &str) {
        if let Ok(modal) = self.element(id) {
            if let Err(error) = modal.class_list().remove_1(MODAL_VISIBLE_CLASS) {
                tracing::warn!("hide modal -> {}", exception(&error));
            }

            BrowserPage::set_display(&modal, "none");
        }
    }

    fn bind_click(&self, id: &str, listener: Listener) -> Result<(), AuthenticationError> {
        let element = self.element(id)?;

        self.listen(&element, listener)
    }

    fn rows(&self, list: &str) -> Vec<RowId> {
        (0..self.row_elements(list).len()).collect()
    }

    fn bind_remove(&self, list: &str, row: RowId) -> Result<(), AuthenticationError> {
        let button = self
            .row_element(list, row)?
            .query_selector(".remove-button")
            .map_err(|error| exception(&error))?;

        match button {
            Some(button) => self.listen(&button, Listener::RemoveAuthenticator(row)),
            None => Ok(()),
        }
    }

    fn append_row(&self, list: &str, row: &AuthenticatorRow) -> Result<RowId, AuthenticationError> {
        let container = self.element(list)?;
        let position = self.row_elements(list).len();

        let tr = self.create("tr")?;
        tr.set_class_name(ROW_CLASS);

        let inputs = self.create("td")?;

        for field in &row.fields {
            let input = self.create("input")?;
            let attributes = [
                Some(("type", field.input_type.as_str())),
                Some(("name", field.name.as_str())),
                Some(("value", field.value.as_str())),
                field.class.map(|class| ("class", class)),
                field.placeholder.map(|placeholder| ("placeholder", placeholder)),
            ];

            for (name, value) in attributes.iter().flatten() {
                input
                    .set_attribute(name, value)
                    .map_err(|error| exception(&error))?;
            }

            inputs.append_child(&input).map_err(|error| exception(&error))?;
        }

        let actions = self.create("td")?;
        let button = self.create("button")?;

        button
            .set_attribute("type", "button")
            .map_err(|error| exception(&error))?;
        button.set_class_name(REMOVE_BUTTON_CLASS);
        button.set_inner_html(r#"<i class="fa fa-remove"></i>"#);

        actions.append_child(&button).map_err(|error| exception(&error))?;
        tr.append_child(&inputs).map_err(|error| exception(&error))?;
        tr.append_child(&actions).map_err(|error| exception(&error))?;
        container.append_child(&tr).map_err(|error| exception(&error))?;

        Ok(position)
    }

    fn fade_out(&self, list: &str, row: RowId) {
        match self.row_element(list, row) {
            Ok(row) => BrowserPage::set_display(&row, "none"),
            Err(error) => tracing::warn!("fade out row {} -> {}", row, error),
        }
    }

    fn set_row_value(
        &self,
        list: &str,
        row: RowId,
        class: &str,
        value: &str,
    ) -> Result<(), AuthenticationError> {
        let input = self
            .row_element(list, row)?
            .query_selector(&format!("input.{}", class))
            .map_err(|error| exception(&error))?
            .and_then(|input| input.dyn_into::<HtmlInputElement>().ok());

        match input {
            Some(input) => {
                input.set_value(value);

                Ok(())
            }
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::NotFoundError,
            }),
        }
    }
}
