//! Event subscription table
//!
//! Controllers do not hold closures. They register a typed [`Action`] against
//! a node (or the whole document) for one [`EventKind`]; the page resolves
//! an incoming event into the actions to run, bubbling from the target up to
//! the document like browser listeners do.

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    KeyDown,
    Submit,
}

/// An event delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Element the event happened on; `None` for document-level key events
    pub target: Option<NodeId>,
    /// Key name for `KeyDown`, e.g. `"Escape"`
    pub key: Option<String>,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self::on(EventKind::Click, target)
    }

    pub fn input(target: NodeId) -> Self {
        Self::on(EventKind::Input, target)
    }

    pub fn change(target: NodeId) -> Self {
        Self::on(EventKind::Change, target)
    }

    pub fn submit(form: NodeId) -> Self {
        Self::on(EventKind::Submit, form)
    }

    pub fn key_down(key: &str) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target: None,
            key: Some(key.to_string()),
        }
    }

    fn on(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target: Some(target),
            key: None,
        }
    }
}

/// What a listener does when it fires
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OpenModal { modal_id: String },
    /// Close the `.modal-overlay` enclosing the listening control
    CloseEnclosingModal,
    /// Close the listening overlay if it was clicked directly
    CloseOnBackdrop,
    CloseModalsOnEscape,
    SelectSplitTab,
    AmountEdited,
    RecalculateSplits,
    RecalculateExact,
    RecalculatePercentage,
    ClearFieldError,
    DismissToast { toast: NodeId },
    MarkSubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    Document,
    Node(NodeId),
}

#[derive(Debug, Clone)]
struct Listener {
    target: ListenerTarget,
    kind: EventKind,
    action: Action,
    once: bool,
}

/// A listener that matched an event
#[derive(Debug, Clone, PartialEq)]
pub struct Fired {
    pub current_target: ListenerTarget,
    pub action: Action,
}

#[derive(Debug, Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, target: ListenerTarget, kind: EventKind, action: Action) {
        self.push(target, kind, action, false);
    }

    /// Register a listener that is dropped after it fires once
    pub fn once(&mut self, target: ListenerTarget, kind: EventKind, action: Action) {
        self.push(target, kind, action, true);
    }

    fn push(&mut self, target: ListenerTarget, kind: EventKind, action: Action, once: bool) {
        self.entries.push(Listener {
            target,
            kind,
            action,
            once,
        });
    }

    pub fn contains(&self, target: ListenerTarget, kind: EventKind, action: &Action) -> bool {
        self.entries
            .iter()
            .any(|l| l.target == target && l.kind == kind && &l.action == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every listener registered on `node`
    pub fn forget(&mut self, node: NodeId) {
        self.entries.retain(|l| l.target != ListenerTarget::Node(node));
    }

    /// Resolve the listeners fired by an event travelling along `path`
    ///
    /// `path` is the target followed by its ancestors. Document listeners
    /// come last and only when `reaches_document` is set. One-shot listeners
    /// are removed from the table.
    pub fn take_matching(&mut self, path: &[NodeId], kind: EventKind, reaches_document: bool) -> Vec<Fired> {
        let mut stops: Vec<ListenerTarget> = path.iter().map(|&n| ListenerTarget::Node(n)).collect();
        if reaches_document {
            stops.push(ListenerTarget::Document);
        }

        let mut fired = Vec::new();
        let mut spent = Vec::new();
        for stop in stops {
            for (index, listener) in self.entries.iter().enumerate() {
                if listener.target == stop && listener.kind == kind {
                    fired.push(Fired {
                        current_target: stop,
                        action: listener.action.clone(),
                    });
                    if listener.once {
                        spent.push(index);
                    }
                }
            }
        }

        spent.sort_unstable();
        for index in spent.into_iter().rev() {
            self.entries.remove(index);
        }
        fired
    }
}
