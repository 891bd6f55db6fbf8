//! Toast notifications
//!
//! Each toast goes `Created -> Visible -> Fading -> Removed`. Toasts stack in
//! creation order inside a single `.toast-container` that is appended to the
//! body the first time a toast is shown.

use crate::dom::{Element, NodeId};
use crate::events::{Action, EventKind};
use crate::page::Page;
use crate::scheduler::Task;

/// Toast severity; only the icon differs between kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    /// Icon name rendered in front of the title
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "x-circle",
            ToastKind::Warning => "alert-triangle",
            ToastKind::Info => "info",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Created,
    Visible,
    Fading,
    Removed,
}

impl Page {
    /// Show a toast; an empty `message` renders the title only.
    ///
    /// `duration_ms` defaults to the configured toast duration.
    pub fn show_toast(&mut self, kind: ToastKind, title: &str, message: &str, duration_ms: Option<u64>) -> NodeId {
        let container = self.ensure_toast_container();
        let duration = duration_ms.unwrap_or(self.config.notifications.default_duration_ms);

        let toast = self
            .doc
            .create(Element::new("div").with_class(&format!("toast toast-{}", kind)));
        self.toasts.insert(toast, NotificationPhase::Created);

        self.doc.append(
            toast,
            Element::new("span").with_class("toast-icon").with_attr("data-icon", kind.icon()),
        );
        let content = self.doc.append(toast, Element::new("div").with_class("toast-content"));
        self.doc
            .append(content, Element::new("div").with_class("toast-title").with_text(title));
        if !message.is_empty() {
            self.doc
                .append(content, Element::new("div").with_class("toast-message").with_text(message));
        }
        let close = self.doc.append(
            toast,
            Element::new("button").with_class("toast-close").with_text("×"),
        );
        self.listen(close, EventKind::Click, Action::DismissToast { toast });

        // Container and toast are both fresh arena nodes.
        if self.doc.append_child(container, toast).is_ok() {
            self.toasts.insert(toast, NotificationPhase::Visible);
        }
        self.scheduler.schedule(duration, Task::FadeToast(toast));

        log::debug!("toast {} shown: [{}] {}", toast, kind, title);
        toast
    }

    pub fn success(&mut self, title: &str, message: &str) -> NodeId {
        self.show_toast(ToastKind::Success, title, message, None)
    }

    pub fn error(&mut self, title: &str, message: &str) -> NodeId {
        self.show_toast(ToastKind::Error, title, message, None)
    }

    pub fn warning(&mut self, title: &str, message: &str) -> NodeId {
        self.show_toast(ToastKind::Warning, title, message, None)
    }

    pub fn info(&mut self, title: &str, message: &str) -> NodeId {
        self.show_toast(ToastKind::Info, title, message, None)
    }

    /// Remove a toast right away. Returns false if it was already gone.
    ///
    /// The close button's listener and the toast's lifecycle entry are
    /// dropped with it.
    pub fn dismiss_toast(&mut self, toast: NodeId) -> bool {
        if self.toasts.remove(&toast).is_some() {
            if let Some(close) = self.doc.find_within(toast, |e| e.has_class("toast-close")) {
                self.listeners.forget(close);
            }
        }
        self.doc.remove(toast)
    }

    /// Lifecycle phase of a toast; `None` if `toast` never was one
    pub fn notification_phase(&self, toast: NodeId) -> Option<NotificationPhase> {
        if let Some(phase) = self.toasts.get(&toast) {
            return Some(*phase);
        }
        self.doc
            .get(toast)
            .filter(|e| e.has_class("toast"))
            .map(|_| NotificationPhase::Removed)
    }

    /// Toasts currently in the container, oldest first
    pub fn visible_toasts(&self) -> Vec<NodeId> {
        match self.toast_container {
            Some(container) => self
                .doc
                .get(container)
                .map(|e| e.children().to_vec())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn toast_container(&self) -> Option<NodeId> {
        self.toast_container
    }

    fn ensure_toast_container(&mut self) -> NodeId {
        if let Some(container) = self.toast_container {
            return container;
        }
        let body = self.doc.body();
        let container = self
            .doc
            .append(body, Element::new("div").with_class("toast-container"));
        self.toast_container = Some(container);
        container
    }

    pub(crate) fn fade_toast(&mut self, toast: NodeId) {
        if self.notification_phase(toast) != Some(NotificationPhase::Visible) || !self.doc.is_connected(toast) {
            return;
        }
        if let Some(element) = self.doc.get_mut(toast) {
            element.set_style("opacity", "0");
            element.set_style("transform", "translateX(100%)");
        }
        self.toasts.insert(toast, NotificationPhase::Fading);
        self.scheduler
            .schedule(self.config.notifications.fade_out_ms, Task::RemoveToast(toast));
    }

    pub(crate) fn remove_toast(&mut self, toast: NodeId) {
        if self.notification_phase(toast) == Some(NotificationPhase::Removed) {
            return;
        }
        self.dismiss_toast(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitease_config::Config;

    use crate::dom::Document;

    fn page() -> Page {
        Page::new(Document::new(), Config::default()).unwrap()
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut page = page();
        let toast = page.show_toast(ToastKind::Error, "X", "Y", Some(100));

        assert!(page.document().is_connected(toast));
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Visible));

        page.advance(90);
        assert!(page.document().is_connected(toast));

        page.advance(10);
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Fading));
        let element = page.document().get(toast).unwrap();
        assert_eq!(element.style("opacity"), Some("0"));
        assert_eq!(element.style("transform"), Some("translateX(100%)"));

        page.advance(400);
        assert!(!page.document().is_connected(toast));
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Removed));
    }

    #[test]
    fn test_toast_structure() {
        let mut page = page();
        let toast = page.success("Member Added", "a@x.com added to the list");
        let doc = page.document();

        let element = doc.get(toast).unwrap();
        assert!(element.has_class("toast") && element.has_class("toast-success"));
        let title = doc.find_within(toast, |e| e.has_class("toast-title")).unwrap();
        assert_eq!(doc.text_content(title), "Member Added");
        assert!(doc.find_within(toast, |e| e.has_class("toast-message")).is_some());
        let icon = doc.find_within(toast, |e| e.has_class("toast-icon")).unwrap();
        assert_eq!(doc.get(icon).unwrap().attr("data-icon"), Some("check-circle"));
    }

    #[test]
    fn test_empty_message_is_omitted() {
        let mut page = page();
        let toast = page.info("Saved", "");
        assert!(page
            .document()
            .find_within(toast, |e| e.has_class("toast-message"))
            .is_none());
    }

    #[test]
    fn test_kinds_have_distinct_icons() {
        let kinds = [ToastKind::Success, ToastKind::Error, ToastKind::Warning, ToastKind::Info];
        let icons: std::collections::HashSet<_> = kinds.iter().map(|k| k.icon()).collect();
        assert_eq!(icons.len(), 4);
    }

    #[test]
    fn test_single_container_in_creation_order() {
        let mut page = page();
        let first = page.info("One", "");
        let second = page.warning("Two", "");
        let third = page.error("Three", "");

        assert_eq!(page.document().query_class("toast-container").len(), 1);
        assert_eq!(page.visible_toasts(), vec![first, second, third]);
    }

    #[test]
    fn test_close_button_removes_toast_and_timers_become_noops() {
        let mut page = page();
        let toast = page.info("Hello", "world");
        let close = page
            .document()
            .find_within(toast, |e| e.has_class("toast-close"))
            .unwrap();

        page.click(close);
        assert!(!page.document().is_connected(toast));
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Removed));

        page.advance(10_000);
        assert!(!page.document().is_connected(toast));
        assert!(page.document().get(toast).unwrap().style("opacity").is_none());
        assert_eq!(page.pending_tasks(), 0);
    }

    #[test]
    fn test_close_while_fading() {
        let mut page = page();
        let toast = page.show_toast(ToastKind::Warning, "Deleting", "Removing item...", Some(50));
        page.advance(60);
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Fading));
        assert!(page.dismiss_toast(toast));
        page.advance(1000);
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Removed));
        assert!(!page.dismiss_toast(toast));
    }

    #[test]
    fn test_expired_toasts_release_their_bookkeeping() {
        let mut page = page();
        let baseline = page.listeners.len();
        let toasts: Vec<NodeId> = (0..1000).map(|i| page.info("Saved", &i.to_string())).collect();
        assert_eq!(page.listeners.len(), baseline + 1000);

        page.advance(5000);
        assert!(page.visible_toasts().is_empty());
        assert_eq!(page.listeners.len(), baseline);
        assert!(page.toasts.is_empty());
        assert_eq!(page.notification_phase(toasts[999]), Some(NotificationPhase::Removed));
        assert_eq!(page.pending_tasks(), 0);
    }

    #[test]
    fn test_closed_toast_releases_its_listener() {
        let mut page = page();
        let baseline = page.listeners.len();
        let toast = page.info("Hello", "");
        let close = page
            .document()
            .find_within(toast, |e| e.has_class("toast-close"))
            .unwrap();

        page.click(close);
        assert_eq!(page.listeners.len(), baseline);
        assert!(page.toasts.is_empty());
        page.click(close);
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Removed));
    }

    #[test]
    fn test_non_toast_has_no_phase() {
        let page = page();
        assert_eq!(page.notification_phase(page.document().body()), None);
    }

    #[test]
    fn test_default_duration_from_config() {
        let mut config = Config::default();
        config.notifications.default_duration_ms = 1000;
        let mut page = Page::new(Document::new(), config).unwrap();
        let toast = page.info("Quick", "");
        page.advance(999);
        assert_eq!(page.notification_phase(toast), Some(NotificationPhase::Visible));
        page.advance(301);
        assert!(!page.document().is_connected(toast));
    }
}
