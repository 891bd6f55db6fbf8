//! Page fixtures
//!
//! Builds documents with the markup the server renders for SplitEase pages,
//! returning handles to the interesting elements. Used by the preview command
//! and by tests.

use splitease_config::Config;
use splitease_core::{SplitForm, SplitMode};

use crate::dom::{Document, Element, NodeId};
use crate::error::UiResult;
use crate::page::Page;

/// Elements of a generated expense form
#[derive(Debug, Clone)]
pub struct ExpenseFormHandles {
    pub form: NodeId,
    pub amount: NodeId,
    pub split_type: NodeId,
    /// `.split-tab` buttons in `SplitMode::ALL` order
    pub tabs: Vec<NodeId>,
    /// `.split-panel`s in `SplitMode::ALL` order
    pub panels: Vec<NodeId>,
    pub equal_preview: NodeId,
    pub checkboxes: Vec<NodeId>,
    pub split_amounts: Vec<NodeId>,
    pub exact_inputs: Vec<NodeId>,
    pub exact_remaining: NodeId,
    pub percentage_inputs: Vec<NodeId>,
    pub calculated_amounts: Vec<NodeId>,
    pub percentage_total: NodeId,
    pub submit: NodeId,
}

/// Elements of a generated modal
#[derive(Debug, Clone, Copy)]
pub struct ModalHandles {
    pub trigger: NodeId,
    pub overlay: NodeId,
    pub body: NodeId,
    pub close: NodeId,
    pub dismiss: NodeId,
}

/// A built page together with its element handles
#[derive(Debug)]
pub struct BuiltPage {
    pub page: Page,
    pub expense: Option<ExpenseFormHandles>,
    pub modals: Vec<ModalHandles>,
    pub alerts: Vec<NodeId>,
    pub balances: Vec<NodeId>,
    pub nav_links: Vec<NodeId>,
    pub page_loader: Option<NodeId>,
    pub progress_loader: Option<NodeId>,
    pub member_emails: Option<NodeId>,
}

#[derive(Debug)]
pub struct PageBuilder {
    doc: Document,
    config: Config,
    location: String,
    expense: Option<ExpenseFormHandles>,
    modals: Vec<ModalHandles>,
    alerts: Vec<NodeId>,
    balances: Vec<NodeId>,
    nav: Option<NodeId>,
    nav_links: Vec<NodeId>,
    page_loader: Option<NodeId>,
    progress_loader: Option<NodeId>,
    member_emails: Option<NodeId>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            config: Config::default(),
            location: "/".to_string(),
            expense: None,
            modals: Vec::new(),
            alerts: Vec::new(),
            balances: Vec::new(),
            nav: None,
            nav_links: Vec::new(),
            page_loader: None,
            progress_loader: None,
            member_emails: None,
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn location(mut self, path: &str) -> Self {
        self.location = path.to_string();
        self
    }

    /// Render the add-expense form prefilled from a snapshot
    pub fn expense_form(mut self, snapshot: &SplitForm) -> Self {
        let doc = &mut self.doc;
        let body = doc.body();
        let form = doc.append(body, Element::new("form").with_class("expense-form"));

        let amount = doc.append(
            form,
            Element::new("input")
                .with_id("expenseAmount")
                .with_attr("type", "number")
                .with_attr("required", "")
                .with_value(&snapshot.amount),
        );
        let split_type = doc.append(
            form,
            Element::new("input")
                .with_id("splitType")
                .with_attr("type", "hidden")
                .with_value(&snapshot.mode.to_string()),
        );

        let tab_bar = doc.append(form, Element::new("div").with_class("split-tabs"));
        let mut tabs = Vec::new();
        let mut panels = Vec::new();
        for mode in SplitMode::ALL {
            let active = if mode == snapshot.mode { " active" } else { "" };
            tabs.push(
                doc.append(
                    tab_bar,
                    Element::new("button")
                        .with_class(&format!("split-tab{}", active))
                        .with_attr("type", "button")
                        .with_attr("data-type", &mode.to_string())
                        .with_text(mode.display_name()),
                ),
            );
            panels.push(doc.append(
                form,
                Element::new("div")
                    .with_id(&format!("panel-{}", mode))
                    .with_class(&format!("split-panel{}", active)),
            ));
        }

        let equal_preview = doc.append(panels[0], Element::new("div").with_id("equal-split-preview"));
        let mut checkboxes = Vec::new();
        let mut split_amounts = Vec::new();
        let mut exact_inputs = Vec::new();
        let mut percentage_inputs = Vec::new();
        let mut calculated_amounts = Vec::new();

        for member in &snapshot.members {
            let row = member_row(doc, panels[0], &member.id, member.display_name());
            checkboxes.push(doc.append(
                row,
                Element::new("input")
                    .with_class("member-checkbox")
                    .with_attr("type", "checkbox")
                    .with_attr("name", "participants")
                    .with_value(&member.id)
                    .with_checked(member.included),
            ));
            split_amounts.push(doc.append(row, Element::new("span").with_class("split-amount")));
        }

        for member in &snapshot.members {
            let row = member_row(doc, panels[1], &member.id, member.display_name());
            exact_inputs.push(doc.append(
                row,
                Element::new("input")
                    .with_class("exact-amount-input")
                    .with_attr("type", "number")
                    .with_attr("name", &format!("exact_{}", member.id))
                    .with_value(member.exact_amount.as_deref().unwrap_or("")),
            ));
        }
        let exact_remaining = doc.append(panels[1], Element::new("div").with_id("exact-remaining"));

        for member in &snapshot.members {
            let row = member_row(doc, panels[2], &member.id, member.display_name());
            percentage_inputs.push(doc.append(
                row,
                Element::new("input")
                    .with_class("percentage-input")
                    .with_attr("type", "number")
                    .with_attr("name", &format!("percent_{}", member.id))
                    .with_value(member.percentage.as_deref().unwrap_or("")),
            ));
            calculated_amounts.push(doc.append(row, Element::new("span").with_class("calculated-amount")));
        }
        let percentage_total = doc.append(panels[2], Element::new("div").with_id("percentage-total"));

        let submit = doc.append(
            form,
            Element::new("button")
                .with_class("btn btn-primary")
                .with_attr("type", "submit")
                .with_text("Add Expense"),
        );

        self.expense = Some(ExpenseFormHandles {
            form,
            amount,
            split_type,
            tabs,
            panels,
            equal_preview,
            checkboxes,
            split_amounts,
            exact_inputs,
            exact_remaining,
            percentage_inputs,
            calculated_amounts,
            percentage_total,
            submit,
        });
        self
    }

    /// Add a modal overlay with id `id` and a button that opens it
    pub fn modal(mut self, id: &str) -> Self {
        let doc = &mut self.doc;
        let body = doc.body();
        let trigger = doc.append(
            body,
            Element::new("button")
                .with_class("btn")
                .with_attr("data-modal", id)
                .with_text("Open"),
        );
        let overlay = doc.append(body, Element::new("div").with_id(id).with_class("modal-overlay"));
        let modal = doc.append(overlay, Element::new("div").with_class("modal"));
        let close = doc.append(modal, Element::new("button").with_class("modal-close").with_text("×"));
        let dismiss = doc.append(
            modal,
            Element::new("button")
                .with_class("btn btn-ghost")
                .with_attr("data-dismiss", "modal")
                .with_text("Cancel"),
        );
        self.modals.push(ModalHandles {
            trigger,
            overlay,
            body: modal,
            close,
            dismiss,
        });
        self
    }

    /// Add a flash alert banner, e.g. `alert("alert-success", "Saved")`
    pub fn alert(mut self, class: &str, text: &str) -> Self {
        let body = self.doc.body();
        let alert = self.doc.append(
            body,
            Element::new("div").with_class(&format!("alert {}", class)).with_text(text),
        );
        self.alerts.push(alert);
        self
    }

    pub fn balance(mut self, text: &str) -> Self {
        let body = self.doc.body();
        let balance = self
            .doc
            .append(body, Element::new("div").with_class("balance-amount").with_text(text));
        self.balances.push(balance);
        self
    }

    pub fn nav_links(mut self, hrefs: &[&str]) -> Self {
        let body = self.doc.body();
        let nav = match self.nav {
            Some(nav) => nav,
            None => {
                let nav = self.doc.append(body, Element::new("ul").with_class("navbar-nav"));
                self.nav = Some(nav);
                nav
            }
        };
        for href in hrefs {
            let item = self.doc.append(nav, Element::new("li"));
            let link = self
                .doc
                .append(item, Element::new("a").with_attr("href", href).with_text(href));
            self.nav_links.push(link);
        }
        self
    }

    /// Add the server-rendered `#pageLoader` and `#progressLoader`
    pub fn ready_loaders(mut self) -> Self {
        let body = self.doc.body();
        self.page_loader = Some(self.doc.append(
            body,
            Element::new("div").with_id("pageLoader").with_class("page-loader active"),
        ));
        self.progress_loader = Some(
            self.doc
                .append(body, Element::new("div").with_id("progressLoader").with_class("progress-loader")),
        );
        self
    }

    pub fn member_emails(mut self, value: &str) -> Self {
        let body = self.doc.body();
        self.member_emails = Some(self.doc.append(
            body,
            Element::new("input").with_id("memberEmails").with_value(value),
        ));
        self
    }

    pub fn build(self) -> UiResult<Page> {
        Ok(self.build_with_handles()?.page)
    }

    pub fn build_with_handles(self) -> UiResult<BuiltPage> {
        let page = Page::new(self.doc, self.config)?.with_location(&self.location);
        Ok(BuiltPage {
            page,
            expense: self.expense,
            modals: self.modals,
            alerts: self.alerts,
            balances: self.balances,
            nav_links: self.nav_links,
            page_loader: self.page_loader,
            progress_loader: self.progress_loader,
            member_emails: self.member_emails,
        })
    }
}

fn member_row(doc: &mut Document, panel: NodeId, id: &str, name: &str) -> NodeId {
    let row = doc.append(
        panel,
        Element::new("div").with_class("member-row").with_attr("data-member-id", id),
    );
    doc.append(row, Element::new("span").with_class("member-name").with_text(name));
    row
}
