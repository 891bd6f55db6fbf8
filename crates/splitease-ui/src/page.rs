//! Page service handle
//!
//! [`Page`] owns the document, the listener table and the scheduler, and is
//! the only place shared registries (toast container, page loader) live. The
//! host drives it with discrete events and by advancing the virtual clock;
//! each event runs to completion before the next one is handled.

use std::collections::{BTreeMap, HashMap};

use splitease_config::Config;
use splitease_core::{CounterAnimation, CurrencyFormat, SplitEngine};

use crate::controllers::notifications::NotificationPhase;
use crate::debounce::Debouncer;
use crate::dom::{Document, NodeId};
use crate::error::{UiError, UiResult};
use crate::events::{Action, Event, EventKind, Fired, ListenerTarget, Listeners};
use crate::scheduler::{Scheduler, Task};

#[derive(Debug)]
pub struct Page {
    pub(crate) doc: Document,
    pub(crate) scheduler: Scheduler,
    pub(crate) listeners: Listeners,
    pub(crate) config: Config,
    pub(crate) currency: CurrencyFormat,
    pub(crate) engine: SplitEngine,
    pub(crate) location: String,
    pub(crate) initialized: bool,
    pub(crate) toast_container: Option<NodeId>,
    pub(crate) toasts: BTreeMap<NodeId, NotificationPhase>,
    pub(crate) page_loader: Option<NodeId>,
    pub(crate) counters: HashMap<NodeId, CounterAnimation>,
    pub(crate) recalculation: Debouncer<()>,
}

impl Page {
    /// Wrap a rendered document; fails if the configuration does not validate
    pub fn new(doc: Document, config: Config) -> UiResult<Self> {
        config.validate()?;
        let engine = SplitEngine::from_config(&config.split)?;
        let currency = CurrencyFormat::from_config(&config.currency);
        let recalculation = Debouncer::new(config.split.recalc_debounce_ms);

        Ok(Self {
            doc,
            scheduler: Scheduler::new(),
            listeners: Listeners::new(),
            config,
            currency,
            engine,
            location: "/".to_string(),
            initialized: false,
            toast_container: None,
            toasts: BTreeMap::new(),
            page_loader: None,
            counters: HashMap::new(),
            recalculation,
        })
    }

    /// Set the current path used for navigation highlighting
    pub fn with_location(mut self, path: &str) -> Self {
        self.location = path.to_string();
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_loaded(&self) -> bool {
        self.initialized
    }

    /// Run every document-ready hook. Calling it again does nothing.
    pub fn load(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.hide_ready_loaders();
        self.present_alerts();
        self.bind_form_submissions();
        self.bind_split_tabs();
        self.bind_modals();
        self.bind_expense_form();
        self.start_counters();
        self.highlight_navigation();

        log::info!(
            "page ready at {}: {} listeners, {} pending tasks",
            self.location,
            self.listeners.len(),
            self.scheduler.pending()
        );
    }

    // ==================== Host Events ====================

    /// Deliver an event, running matching listeners from the target outwards
    pub fn dispatch(&mut self, event: Event) {
        let fired = match event.target {
            Some(target) => {
                if self.doc.get(target).is_none() {
                    log::warn!("dropping {:?} event for stale {}", event.kind, target);
                    return;
                }
                let path = self.doc.path_to_root(target);
                let connected = self.doc.is_connected(target);
                self.listeners.take_matching(&path, event.kind, connected)
            }
            None => self.listeners.take_matching(&[], event.kind, true),
        };

        for Fired { current_target, action } in fired {
            self.run_action(action, current_target, &event);
        }
    }

    pub fn click(&mut self, node: NodeId) {
        self.dispatch(Event::click(node));
    }

    /// Type into a field, replacing its value, then fire `input`
    pub fn input(&mut self, node: NodeId, value: &str) -> UiResult<()> {
        self.doc.element_mut(node)?.set_value(value);
        self.dispatch(Event::input(node));
        Ok(())
    }

    /// Toggle a checkbox, then fire `change`
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> UiResult<()> {
        self.doc.element_mut(node)?.set_checked(checked);
        self.dispatch(Event::change(node));
        Ok(())
    }

    pub fn key_down(&mut self, key: &str) {
        self.dispatch(Event::key_down(key));
    }

    pub fn submit(&mut self, form: NodeId) {
        self.dispatch(Event::submit(form));
    }

    /// Advance the virtual clock, running every task that falls due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
    }

    // ==================== Dispatch ====================

    fn run_action(&mut self, action: Action, current: ListenerTarget, event: &Event) {
        let node = match current {
            ListenerTarget::Node(node) => Some(node),
            ListenerTarget::Document => None,
        };

        match action {
            Action::OpenModal { modal_id } => self.open_modal_from_trigger(&modal_id),
            Action::CloseEnclosingModal => {
                let overlay = node.and_then(|n| self.doc.closest(n, |e| e.has_class("modal-overlay")));
                if let Some(overlay) = overlay {
                    self.close_modal(overlay);
                }
            }
            Action::CloseOnBackdrop => {
                if let Some(overlay) = node.filter(|&n| event.target == Some(n)) {
                    self.close_modal(overlay);
                }
            }
            Action::CloseModalsOnEscape => {
                if event.key.as_deref() == Some("Escape") {
                    self.close_all_modals();
                }
            }
            Action::SelectSplitTab => {
                if let Some(tab) = node {
                    if let Err(e) = self.select_split_tab(tab) {
                        log::warn!("split tab not selected: {}", e);
                    }
                }
            }
            Action::AmountEdited => self.schedule_recalculation(),
            Action::RecalculateSplits => self.update_split_calculations(),
            Action::RecalculateExact => self.update_exact_total(),
            Action::RecalculatePercentage => self.update_percentage_total(),
            Action::ClearFieldError => {
                if let Some(field) = node {
                    self.clear_field_error(field);
                }
            }
            Action::DismissToast { toast } => {
                self.dismiss_toast(toast);
            }
            Action::MarkSubmitting => {
                if let Some(form) = node {
                    self.mark_submitting(form);
                }
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        log::debug!("t={} running {:?}", self.scheduler.now(), task);
        match task {
            Task::FadeToast(toast) => self.fade_toast(toast),
            Task::RemoveToast(toast) => self.remove_toast(toast),
            Task::FadeAlert(alert) => self.fade_alert(alert),
            Task::RemoveAlert(alert) => {
                self.doc.remove(alert);
            }
            Task::HidePageLoader(loader) => {
                if let Some(element) = self.doc.get_mut(loader) {
                    element.add_class("hidden");
                }
            }
            Task::HideProgressLoader(loader) => {
                if let Some(element) = self.doc.get_mut(loader) {
                    element.set_style("display", "none");
                }
            }
            Task::CounterFrame(node) => self.counter_frame(node),
            Task::FlushRecalculation => {
                if self.recalculation.poll(self.scheduler.now()).is_some() {
                    self.update_split_calculations();
                }
            }
        }
    }

    fn schedule_recalculation(&mut self) {
        if self.recalculation.wait_ms() == 0 {
            self.update_split_calculations();
            return;
        }
        self.recalculation.call(self.scheduler.now(), ());
        self.scheduler
            .schedule(self.recalculation.wait_ms(), Task::FlushRecalculation);
    }

    // ==================== Lookup Helpers ====================

    pub(crate) fn require_id(&self, id: &str) -> UiResult<NodeId> {
        self.doc.get_element_by_id(id).ok_or_else(|| UiError::ElementNotFound {
            selector: format!("#{}", id),
        })
    }

    pub(crate) fn listen(&mut self, node: NodeId, kind: EventKind, action: Action) {
        self.listeners.on(ListenerTarget::Node(node), kind, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PageBuilder;
    use crate::dom::Element;

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.split.exact_tolerance = "tiny".to_string();
        assert!(matches!(Page::new(Document::new(), config), Err(UiError::Config { .. })));
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut page = PageBuilder::new().nav_links(&["/dashboard", "/groups"]).build().unwrap();
        page.load();
        let listeners = page.listeners.len();
        let pending = page.pending_tasks();
        page.load();
        assert!(page.is_loaded());
        assert_eq!(page.listeners.len(), listeners);
        assert_eq!(page.pending_tasks(), pending);
    }

    #[test]
    fn test_advance_moves_clock_even_when_idle() {
        let mut page = Page::new(Document::new(), Config::default()).unwrap();
        page.advance(250);
        page.advance(250);
        assert_eq!(page.now(), 500);
    }

    #[test]
    fn test_stale_handles_are_reported() {
        let mut page = Page::new(Document::new(), Config::default()).unwrap();
        let mut other = Document::new();
        for _ in 0..5 {
            other.append(other.body(), Element::new("div"));
        }
        let foreign = other.query(|_| true)[4];
        assert!(matches!(page.input(foreign, "1"), Err(UiError::StaleNode { .. })));
        page.click(foreign);
    }

    #[test]
    fn test_debounced_amount_edits_recalculate_once() {
        let mut config = Config::default();
        config.split.recalc_debounce_ms = 200;
        let handles = PageBuilder::new()
            .config(config)
            .expense_form(&splitease_core::SplitForm::new(
                "",
                splitease_core::SplitMode::Equal,
                vec![splitease_core::Member::new("alice"), splitease_core::Member::new("bob")],
            ))
            .build_with_handles()
            .unwrap();
        let (mut page, form) = (handles.page, handles.expense.unwrap());
        page.load();

        page.input(form.amount, "1").unwrap();
        page.advance(100);
        page.input(form.amount, "10").unwrap();
        page.advance(150);
        assert_eq!(page.doc.text_content(form.equal_preview), "₹0.00");
        page.advance(50);
        assert_eq!(page.doc.text_content(form.equal_preview), "₹5.00");
    }
}
