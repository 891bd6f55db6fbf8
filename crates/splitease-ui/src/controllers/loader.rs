//! Page loader overlay and button busy state

use crate::dom::{Element, NodeId};
use crate::error::UiResult;
use crate::events::{Action, EventKind};
use crate::page::Page;
use crate::scheduler::Task;

const ORIGINAL_TEXT: &str = "original-text";

impl Page {
    /// Show the page overlay with `text` (or the configured default)
    pub fn show_loader(&mut self, text: Option<&str>) -> NodeId {
        let loader = self.ensure_page_loader();
        let text = text.unwrap_or(&self.config.loader.default_text).to_string();
        if let Some(label) = self.doc.find_within(loader, |e| e.has_class("loader-text")) {
            if let Some(element) = self.doc.get_mut(label) {
                element.set_text(&text);
            }
        }
        if let Some(element) = self.doc.get_mut(loader) {
            element.add_class("active");
        }
        loader
    }

    pub fn hide_loader(&mut self) {
        if let Some(element) = self.page_loader.and_then(|l| self.doc.get_mut(l)) {
            element.remove_class("active");
        }
    }

    pub fn is_loader_active(&self) -> bool {
        self.page_loader
            .and_then(|l| self.doc.get(l))
            .map(|e| e.has_class("active"))
            .unwrap_or(false)
    }

    pub fn page_loader(&self) -> Option<NodeId> {
        self.page_loader
    }

    fn ensure_page_loader(&mut self) -> NodeId {
        if let Some(loader) = self.page_loader {
            return loader;
        }
        let body = self.doc.body();
        let loader = self.doc.append(body, Element::new("div").with_class("page-loader"));
        let content = self.doc.append(loader, Element::new("div").with_class("loader-content"));
        self.doc.append(content, Element::new("div").with_class("spinner spinner-lg"));
        let text = self.config.loader.default_text.clone();
        self.doc
            .append(content, Element::new("div").with_class("loader-text").with_text(&text));
        self.page_loader = Some(loader);
        loader
    }

    /// Toggle a button's busy state.
    ///
    /// The original label is stored once and restored when the button is released.
    pub fn set_button_loading(&mut self, button: NodeId, loading: bool) -> UiResult<()> {
        let busy_label = self.config.loader.busy_label.clone();
        let element = self.doc.element_mut(button)?;

        if loading {
            element.add_class("loading");
            element.set_disabled(true);
            if element.data(ORIGINAL_TEXT).is_none() {
                let original = element.text().to_string();
                element.set_data(ORIGINAL_TEXT, &original);
            }
            element.set_text(&busy_label);
        } else {
            element.remove_class("loading");
            element.set_disabled(false);
            if let Some(original) = element.data(ORIGINAL_TEXT).map(str::to_string) {
                element.set_text(&original);
                element.remove_data(ORIGINAL_TEXT);
            }
        }
        Ok(())
    }

    pub(crate) fn hide_ready_loaders(&mut self) {
        if let Some(loader) = self.doc.get_element_by_id("pageLoader") {
            self.scheduler
                .schedule(self.config.loader.page_loader_hide_delay_ms, Task::HidePageLoader(loader));
        }
        if let Some(progress) = self.doc.get_element_by_id("progressLoader") {
            self.scheduler
                .schedule(self.config.loader.progress_hide_delay_ms, Task::HideProgressLoader(progress));
        }
    }

    pub(crate) fn bind_form_submissions(&mut self) {
        for form in self.doc.query(|e| e.tag() == "form") {
            self.listen(form, EventKind::Submit, Action::MarkSubmitting);
        }
    }

    pub(crate) fn mark_submitting(&mut self, form: NodeId) {
        let submit = self
            .doc
            .find_within(form, |e| e.tag() == "button" && e.attr("type") == Some("submit"));
        let Some(button) = submit else {
            return;
        };
        if self.doc.get(button).map(|e| e.has_class("btn-ghost")).unwrap_or(true) {
            return;
        }
        if let Err(e) = self.set_button_loading(button, true) {
            log::warn!("submit button not marked busy: {}", e);
        }
        if let Some(progress) = self.doc.get_element_by_id("progressLoader") {
            if let Some(element) = self.doc.get_mut(progress) {
                element.set_style("display", "block");
            }
        }
    }
}
