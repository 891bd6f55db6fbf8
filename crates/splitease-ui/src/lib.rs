//! Page glue for SplitEase
//!
//! An in-memory document with typed event listeners and a virtual clock,
//! plus the controllers that bring the server-rendered pages to life:
//! toasts, loaders, modals, split tabs, live split previews, validation
//! and a few smaller helpers.

pub mod builder;
pub mod controllers;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod events;
pub mod page;
pub mod scheduler;

pub use builder::{BuiltPage, ExpenseFormHandles, ModalHandles, PageBuilder};
pub use controllers::confirm::{ConfirmPrompt, DEFAULT_DELETE_MESSAGE};
pub use controllers::expense_form::{RenderedRow, RenderedSplit, RenderedStatus};
pub use controllers::members::EmailAppend;
pub use controllers::nav::nav_link_matches;
pub use controllers::notifications::{NotificationPhase, ToastKind};
pub use debounce::Debouncer;
pub use dom::{Document, Element, NodeId};
pub use error::{UiError, UiResult};
pub use events::{Action, Event, EventKind, ListenerTarget, Listeners};
pub use page::Page;
pub use scheduler::{Scheduler, Task};
