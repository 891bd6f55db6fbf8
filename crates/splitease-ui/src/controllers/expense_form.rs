//! Live split previews on the expense form
//!
//! Reads the form's inputs into plain values, hands them to the split engine
//! and writes the derived text back. Missing preview elements are skipped.

use splitease_core::{format_percent, parse_amount, Decimal};

use crate::dom::NodeId;
use crate::events::{Action, EventKind};
use crate::page::Page;

/// A reconciliation line as rendered on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStatus {
    pub text: String,
    pub reconciled: bool,
}

/// One `.member-row` as rendered on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub member_id: Option<String>,
    pub name: String,
    pub split_amount: Option<String>,
    pub calculated_amount: Option<String>,
}

/// Every preview field currently shown on the expense form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSplit {
    pub split_type: Option<String>,
    pub equal_preview: Option<String>,
    pub rows: Vec<RenderedRow>,
    pub exact_remaining: Option<RenderedStatus>,
    pub percentage_total: Option<RenderedStatus>,
}

fn status_class(reconciled: bool) -> &'static str {
    if reconciled {
        "text-success"
    } else {
        "text-danger"
    }
}

impl Page {
    pub(crate) fn bind_expense_form(&mut self) {
        let Some(amount) = self.doc.get_element_by_id("expenseAmount") else {
            return;
        };
        self.listen(amount, EventKind::Input, Action::AmountEdited);

        for checkbox in self.doc.query_class("member-checkbox") {
            self.listen(checkbox, EventKind::Change, Action::RecalculateSplits);
        }
        for input in self.doc.query_class("exact-amount-input") {
            self.listen(input, EventKind::Input, Action::RecalculateExact);
        }
        for input in self.doc.query_class("percentage-input") {
            self.listen(input, EventKind::Input, Action::RecalculatePercentage);
        }

        self.update_split_calculations();
    }

    /// Parsed `#expenseAmount` value (missing or malformed is zero)
    pub fn expense_amount(&self) -> Decimal {
        self.doc
            .get_element_by_id("expenseAmount")
            .and_then(|n| self.doc.get(n))
            .map(|e| parse_amount(e.value()))
            .unwrap_or(Decimal::ZERO)
    }

    fn row_checkbox(&self, node: NodeId) -> Option<NodeId> {
        let row = self.doc.closest(node, |e| e.has_class("member-row"))?;
        self.doc.find_within(row, |e| e.has_class("member-checkbox"))
    }

    fn set_text_of(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.doc.get_mut(node) {
            element.set_text(text);
        }
    }

    /// Recompute the equal split, then the percentage and exact previews
    pub fn update_split_calculations(&mut self) {
        let amount = self.expense_amount();
        let included: Vec<bool> = self
            .doc
            .query_class("member-checkbox")
            .into_iter()
            .filter_map(|n| self.doc.get(n).map(|e| e.is_checked()))
            .collect();
        let split = self.engine.equal(amount, &included);
        let per_person = self.currency.format_truncated(split.per_person);

        if let Some(preview) = self.doc.get_element_by_id("equal-split-preview") {
            self.set_text_of(preview, &per_person);
        }

        let nothing = self.currency.format(Decimal::ZERO);
        for cell in self.doc.query_class("split-amount") {
            let checked = self
                .row_checkbox(cell)
                .and_then(|cb| self.doc.get(cb))
                .map(|e| e.is_checked())
                .unwrap_or(false);
            let text = if checked { &per_person } else { &nothing };
            self.set_text_of(cell, text);
        }

        log::debug!(
            "equal split: amount={} members={} per_person={}",
            amount,
            split.checked_count,
            split.per_person
        );

        self.update_percentage_total();
        self.update_exact_total();
    }

    /// Compare the exact entries with the expense amount
    pub fn update_exact_total(&mut self) {
        let amount = self.expense_amount();
        let values: Vec<Decimal> = self
            .doc
            .query_class("exact-amount-input")
            .into_iter()
            .filter_map(|n| self.doc.get(n).map(|e| parse_amount(e.value())))
            .collect();
        let result = self.engine.exact(amount, &values);

        if let Some(remaining) = self.doc.get_element_by_id("exact-remaining") {
            let text = format!("{} / {}", self.currency.format(result.sum), self.currency.format(result.amount));
            if let Some(element) = self.doc.get_mut(remaining) {
                element.set_text(&text);
                element.set_class_name(status_class(result.reconciled));
            }
        }
        log::debug!("exact split: sum={} amount={} reconciled={}", result.sum, amount, result.reconciled);
    }

    /// Convert every percentage entry to an amount and total them
    pub fn update_percentage_total(&mut self) {
        let amount = self.expense_amount();
        let inputs = self.doc.query_class("percentage-input");
        let percents: Vec<Decimal> = inputs
            .iter()
            .map(|&n| self.doc.get(n).map(|e| parse_amount(e.value())).unwrap_or(Decimal::ZERO))
            .collect();
        let result = self.engine.percentage(amount, &percents);

        for (input, share) in inputs.iter().zip(&result.per_member_amounts) {
            let display = self
                .doc
                .closest(*input, |e| e.has_class("member-row"))
                .and_then(|row| self.doc.find_within(row, |e| e.has_class("calculated-amount")));
            if let Some(display) = display {
                let text = self.currency.format(*share);
                self.set_text_of(display, &text);
            }
        }

        if let Some(total) = self.doc.get_element_by_id("percentage-total") {
            if let Some(element) = self.doc.get_mut(total) {
                element.set_text(&format_percent(result.total_percent));
                element.set_class_name(status_class(result.reconciled));
            }
        }
        log::debug!(
            "percentage split: total={} reconciled={}",
            result.total_percent,
            result.reconciled
        );
    }

    /// Read back every preview field as currently rendered
    pub fn rendered_split(&self) -> RenderedSplit {
        let status = |id: &str| {
            self.doc.get_element_by_id(id).and_then(|n| self.doc.get(n)).map(|e| RenderedStatus {
                text: e.text().to_string(),
                reconciled: e.has_class("text-success"),
            })
        };
        let text_in = |row: NodeId, class: &str| {
            self.doc
                .find_within(row, |e| e.has_class(class))
                .map(|n| self.doc.text_content(n))
        };

        // Each split panel renders its own row per member; merge them by member id.
        let mut rows: Vec<RenderedRow> = Vec::new();
        for row in self.doc.query_class("member-row") {
            let rendered = RenderedRow {
                member_id: self
                    .doc
                    .get(row)
                    .and_then(|e| e.data("member-id"))
                    .map(str::to_string),
                name: text_in(row, "member-name").unwrap_or_default(),
                split_amount: text_in(row, "split-amount"),
                calculated_amount: text_in(row, "calculated-amount"),
            };
            let existing = rows
                .iter_mut()
                .find(|r| r.member_id.is_some() && r.member_id == rendered.member_id);
            match existing {
                Some(merged) => {
                    merged.split_amount = merged.split_amount.take().or(rendered.split_amount);
                    merged.calculated_amount = merged.calculated_amount.take().or(rendered.calculated_amount);
                    if merged.name.is_empty() {
                        merged.name = rendered.name;
                    }
                }
                None => rows.push(rendered),
            }
        }

        RenderedSplit {
            split_type: self.active_split_type(),
            equal_preview: self
                .doc
                .get_element_by_id("equal-split-preview")
                .map(|n| self.doc.text_content(n)),
            rows,
            exact_remaining: status("exact-remaining"),
            percentage_total: status("percentage-total"),
        }
    }
}
