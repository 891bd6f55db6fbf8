//! Modal overlays
//!
//! A modal is open while its `.modal-overlay` carries `active`. There is no
//! stacking: Escape closes every open overlay at once.

use crate::dom::NodeId;
use crate::error::UiResult;
use crate::events::{Action, EventKind, ListenerTarget};
use crate::page::Page;

impl Page {
    pub(crate) fn bind_modals(&mut self) {
        let triggers: Vec<(NodeId, String)> = self
            .doc
            .query(|e| e.has_attr("data-modal"))
            .into_iter()
            .filter_map(|n| self.doc.get(n).and_then(|e| e.data("modal")).map(|id| (n, id.to_string())))
            .collect();
        for (trigger, modal_id) in triggers {
            self.listen(trigger, EventKind::Click, Action::OpenModal { modal_id });
        }

        for close in self
            .doc
            .query(|e| e.has_class("modal-close") || e.data("dismiss") == Some("modal"))
        {
            self.listen(close, EventKind::Click, Action::CloseEnclosingModal);
        }

        for overlay in self.doc.query_class("modal-overlay") {
            self.listen(overlay, EventKind::Click, Action::CloseOnBackdrop);
        }

        self.listeners
            .on(ListenerTarget::Document, EventKind::KeyDown, Action::CloseModalsOnEscape);
    }

    /// Open the modal with element id `modal_id`
    pub fn open_modal(&mut self, modal_id: &str) -> UiResult<NodeId> {
        let modal = self.require_id(modal_id)?;
        self.doc.element_mut(modal)?.add_class("active");
        log::debug!("modal #{} opened", modal_id);
        Ok(modal)
    }

    pub(crate) fn open_modal_from_trigger(&mut self, modal_id: &str) {
        match self.open_modal(modal_id) {
            Ok(_) => {
                self.info("Modal Opened", "Fill in the details to continue");
            }
            Err(e) => log::debug!("modal trigger ignored: {}", e),
        }
    }

    pub fn close_modal(&mut self, overlay: NodeId) {
        if let Some(element) = self.doc.get_mut(overlay) {
            element.remove_class("active");
        }
    }

    /// Close every open overlay; returns how many were open
    pub fn close_all_modals(&mut self) -> usize {
        let open = self.open_modals();
        for overlay in &open {
            self.close_modal(*overlay);
        }
        open.len()
    }

    pub fn open_modals(&self) -> Vec<NodeId> {
        self.doc
            .query(|e| e.has_class("modal-overlay") && e.has_class("active"))
    }

    pub fn is_modal_open(&self, overlay: NodeId) -> bool {
        self.doc.get(overlay).map(|e| e.has_class("active")).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use splitease_config::Config;

    use crate::builder::PageBuilder;
    use crate::error::UiError;

    #[test]
    fn test_trigger_opens_modal_with_toast() {
        let built = PageBuilder::new().modal("addExpenseModal").build_with_handles().unwrap();
        let mut page = built.page;
        let modal = &built.modals[0];
        page.load();

        page.click(modal.trigger);
        assert!(page.is_modal_open(modal.overlay));

        let toasts = page.visible_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(
            page.document().text_content(toasts[0]),
            "Modal OpenedFill in the details to continue×"
        );
    }

    #[test]
    fn test_explicit_close_controls() {
        let built = PageBuilder::new().modal("settle").build_with_handles().unwrap();
        let mut page = built.page;
        let modal = &built.modals[0];
        page.load();

        page.open_modal("settle").unwrap();
        page.click(modal.close);
        assert!(!page.is_modal_open(modal.overlay));

        page.open_modal("settle").unwrap();
        page.click(modal.dismiss);
        assert!(!page.is_modal_open(modal.overlay));
    }

    #[test]
    fn test_backdrop_click_closes_only_on_overlay_itself() {
        let built = PageBuilder::new().modal("invite").build_with_handles().unwrap();
        let mut page = built.page;
        let modal = &built.modals[0];
        page.load();
        page.open_modal("invite").unwrap();

        page.click(modal.body);
        assert!(page.is_modal_open(modal.overlay));

        page.click(modal.overlay);
        assert!(!page.is_modal_open(modal.overlay));
    }

    #[test]
    fn test_escape_closes_all_open_modals() {
        let built = PageBuilder::new()
            .modal("first")
            .modal("second")
            .build_with_handles()
            .unwrap();
        let mut page = built.page;
        page.load();

        page.open_modal("first").unwrap();
        page.open_modal("second").unwrap();
        assert_eq!(page.open_modals().len(), 2);

        page.key_down("Enter");
        assert_eq!(page.open_modals().len(), 2);

        page.key_down("Escape");
        assert!(page.open_modals().is_empty());
        assert!(built.modals.iter().all(|m| !page.is_modal_open(m.overlay)));
    }

    #[test]
    fn test_missing_modal_is_reported() {
        let mut page = PageBuilder::new().config(Config::default()).build().unwrap();
        assert!(matches!(page.open_modal("nope"), Err(UiError::ElementNotFound { .. })));
        assert_eq!(page.close_all_modals(), 0);
    }
}
