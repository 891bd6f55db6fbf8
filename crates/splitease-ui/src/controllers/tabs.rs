//! Split type tabs

use splitease_core::{split_type_name, SplitMode};

use crate::dom::NodeId;
use crate::error::{UiError, UiResult};
use crate::events::{Action, EventKind};
use crate::page::Page;

impl Page {
    pub(crate) fn bind_split_tabs(&mut self) {
        for tab in self.doc.query_class("split-tab") {
            self.listen(tab, EventKind::Click, Action::SelectSplitTab);
        }
    }

    /// Activate `tab`, show its panel and recalculate every preview
    pub fn select_split_tab(&mut self, tab: NodeId) -> UiResult<()> {
        let split_type = self.doc.element(tab)?.data("type").unwrap_or_default().to_string();

        for other in self.doc.query_class("split-tab") {
            if let Some(element) = self.doc.get_mut(other) {
                element.remove_class("active");
            }
        }
        self.doc.element_mut(tab)?.add_class("active");

        if let Some(hidden) = self.doc.get_element_by_id("splitType") {
            if let Some(element) = self.doc.get_mut(hidden) {
                element.set_value(&split_type);
            }
        }

        for panel in self.doc.query_class("split-panel") {
            if let Some(element) = self.doc.get_mut(panel) {
                element.remove_class("active");
            }
        }
        if let Some(panel) = self.doc.get_element_by_id(&format!("panel-{}", split_type)) {
            if let Some(element) = self.doc.get_mut(panel) {
                element.add_class("active");
            }
        }

        self.update_split_calculations();

        let message = format!("Now using {} split", split_type_name(&split_type));
        self.info("Split Type Changed", &message);
        Ok(())
    }

    /// Select the tab whose `data-type` is `mode`
    pub fn select_split_mode(&mut self, mode: SplitMode) -> UiResult<()> {
        let wanted = mode.to_string();
        let tab = self
            .doc
            .query(|e| e.has_class("split-tab") && e.data("type") == Some(wanted.as_str()))
            .into_iter()
            .next()
            .ok_or_else(|| UiError::ElementNotFound {
                selector: format!(".split-tab[data-type={}]", wanted),
            })?;
        self.select_split_tab(tab)
    }

    /// Value of the hidden `#splitType` input
    pub fn active_split_type(&self) -> Option<String> {
        self.doc
            .get_element_by_id("splitType")
            .and_then(|n| self.doc.get(n))
            .map(|e| e.value().to_string())
    }

    pub fn active_split_panel(&self) -> Option<NodeId> {
        self.doc
            .query(|e| e.has_class("split-panel") && e.has_class("active"))
            .into_iter()
            .next()
    }
}
