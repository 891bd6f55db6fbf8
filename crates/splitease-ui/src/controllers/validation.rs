//! Required-field validation

use splitease_utils::is_blank;

use crate::dom::NodeId;
use crate::events::{Action, EventKind, ListenerTarget};
use crate::page::Page;

const ERROR_BORDER: &str = "var(--danger)";

impl Page {
    /// Flag every blank field; true only if none were blank.
    ///
    /// A flagged field is cleared by its next `input` event.
    pub fn validate_fields(&mut self, fields: &[NodeId]) -> bool {
        let mut valid = true;

        for &field in fields {
            let Some(element) = self.doc.get_mut(field) else {
                log::warn!("skipping stale field {}", field);
                continue;
            };
            if !is_blank(element.value()) {
                continue;
            }
            valid = false;
            element.add_class("error");
            element.set_style("border-color", ERROR_BORDER);

            let target = ListenerTarget::Node(field);
            if !self.listeners.contains(target, EventKind::Input, &Action::ClearFieldError) {
                self.listeners.once(target, EventKind::Input, Action::ClearFieldError);
            }
        }

        if !valid {
            self.error("Validation Error", "Please fill in all required fields");
        }
        valid
    }

    /// Validate the fields of `form` that carry a `required` attribute
    pub fn validate_form(&mut self, form: NodeId) -> bool {
        let required = self.doc.query_within(form, |e| e.has_attr("required"));
        self.validate_fields(&required)
    }

    pub fn has_field_error(&self, field: NodeId) -> bool {
        self.doc.get(field).map(|e| e.has_class("error")).unwrap_or(false)
    }

    pub(crate) fn clear_field_error(&mut self, field: NodeId) {
        if let Some(element) = self.doc.get_mut(field) {
            element.remove_class("error");
            element.set_style("border-color", "");
        }
    }
}

#[cfg(test)]
mod tests {
    use splitease_config::Config;

    use crate::dom::{Document, Element};
    use crate::page::Page;

    #[test]
    fn test_blank_required_field_is_flagged_then_cleared() {
        let mut doc = Document::new();
        let form = doc.append(doc.body(), Element::new("form"));
        let description = doc.append(
            form,
            Element::new("input").with_attr("required", "").with_value("Dinner"),
        );
        let amount = doc.append(form, Element::new("input").with_attr("required", "").with_value("   "));
        let notes = doc.append(form, Element::new("textarea"));
        let mut page = Page::new(doc, Config::default()).unwrap();

        assert!(!page.validate_form(form));
        assert!(page.has_field_error(amount));
        assert!(!page.has_field_error(description));
        assert!(!page.has_field_error(notes));
        assert_eq!(
            page.document().get(amount).unwrap().style("border-color"),
            Some("var(--danger)")
        );

        let toast = page.visible_toasts()[0];
        assert!(page.document().get(toast).unwrap().has_class("toast-error"));
        assert!(page.document().text_content(toast).contains("Validation Error"));

        page.input(amount, "120").unwrap();
        assert!(!page.has_field_error(amount));
        assert!(page.document().get(amount).unwrap().style("border-color").is_none());

        assert!(page.validate_form(form));
        assert_eq!(page.visible_toasts().len(), 1);
    }

    #[test]
    fn test_clear_listener_is_one_shot() {
        let mut doc = Document::new();
        let field = doc.append(doc.body(), Element::new("input"));
        let mut page = Page::new(doc, Config::default()).unwrap();

        assert!(!page.validate_fields(&[field]));
        assert!(!page.validate_fields(&[field]));
        page.input(field, "x").unwrap();
        assert!(!page.has_field_error(field));

        // A later failure must flag the field again and stay flagged until input.
        page.document_mut().get_mut(field).unwrap().set_value("");
        assert!(!page.validate_fields(&[field]));
        assert!(page.has_field_error(field));
    }

    #[test]
    fn test_empty_field_list_is_valid() {
        let mut page = Page::new(Document::new(), Config::default()).unwrap();
        assert!(page.validate_fields(&[]));
        assert!(page.visible_toasts().is_empty());
    }
}
