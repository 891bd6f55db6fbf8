//! Server-rendered alert banners

use crate::dom::NodeId;
use crate::page::Page;
use crate::scheduler::Task;

impl Page {
    /// Echo each `.alert` as a toast and schedule its auto-dismissal
    pub(crate) fn present_alerts(&mut self) {
        for alert in self.doc.query_class("alert") {
            self.scheduler
                .schedule(self.config.alerts.auto_dismiss_ms, Task::FadeAlert(alert));

            let message = self.doc.text_content(alert).trim().to_string();
            let Some(element) = self.doc.get(alert) else {
                continue;
            };
            if element.has_class("alert-success") {
                self.success("Success", &message);
            } else if element.has_class("alert-error") {
                self.error("Error", &message);
            }
        }
    }

    pub(crate) fn fade_alert(&mut self, alert: NodeId) {
        if !self.doc.is_connected(alert) {
            return;
        }
        if let Some(element) = self.doc.get_mut(alert) {
            element.set_style("opacity", "0");
            element.set_style("transform", "translateY(-10px)");
        }
        self.scheduler
            .schedule(self.config.alerts.fade_out_ms, Task::RemoveAlert(alert));
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::PageBuilder;

    #[test]
    fn test_alerts_become_toasts_and_dismiss() {
        let built = PageBuilder::new()
            .alert("alert-success", "Expense added successfully")
            .alert("alert-error", "Group not found")
            .alert("alert-info", "Heads up")
            .build_with_handles()
            .unwrap();
        let mut page = built.page;
        page.load();

        let toasts = page.visible_toasts();
        assert_eq!(toasts.len(), 2);
        let doc = page.document();
        assert!(doc.get(toasts[0]).unwrap().has_class("toast-success"));
        assert!(doc.text_content(toasts[0]).starts_with("SuccessExpense added successfully"));
        assert!(doc.get(toasts[1]).unwrap().has_class("toast-error"));

        page.advance(5000);
        let alert = page.document().get(built.alerts[0]).unwrap();
        assert_eq!(alert.style("opacity"), Some("0"));
        assert_eq!(alert.style("transform"), Some("translateY(-10px)"));
        assert!(built.alerts.iter().all(|&a| page.document().is_connected(a)));

        page.advance(300);
        assert!(built.alerts.iter().all(|&a| !page.document().is_connected(a)));
    }

    #[test]
    fn test_alert_closed_early_is_left_alone() {
        let built = PageBuilder::new()
            .alert("alert-success", "Saved")
            .build_with_handles()
            .unwrap();
        let mut page = built.page;
        page.load();

        let alert = built.alerts[0];
        page.document_mut().remove(alert);
        page.advance(6000);
        assert!(page.document().get(alert).unwrap().style("opacity").is_none());
    }
}
