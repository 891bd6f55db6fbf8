//! Member email list helper

use splitease_utils::split_list;

use crate::page::Page;

const MEMBER_EMAILS: &str = "memberEmails";

/// Outcome of [`Page::add_email_to_input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailAppend {
    Added,
    AlreadyPresent,
    /// The page has no `#memberEmails` input
    InputMissing,
}

impl Page {
    /// Append `email` to the comma separated `#memberEmails` list.
    ///
    /// An address already present as a whole entry is not added twice.
    pub fn add_email_to_input(&mut self, email: &str) -> EmailAppend {
        let Some(element) = self
            .doc
            .get_element_by_id(MEMBER_EMAILS)
            .and_then(|n| self.doc.get_mut(n))
        else {
            log::debug!("no #{} input on this page", MEMBER_EMAILS);
            return EmailAppend::InputMissing;
        };

        let current = element.value().trim().to_string();
        if current.is_empty() {
            element.set_value(email);
        } else if split_list(&current, ',').contains(&email) {
            self.warning("Already Added", &format!("{} is already in the list", email));
            return EmailAppend::AlreadyPresent;
        } else {
            element.set_value(&format!("{}, {}", current, email));
        }

        self.success("Member Added", &format!("{} added to the list", email));
        EmailAppend::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitease_config::Config;

    use crate::dom::{Document, Element, NodeId};

    fn page() -> (Page, NodeId) {
        let mut doc = Document::new();
        let input = doc.append(doc.body(), Element::new("input").with_id(MEMBER_EMAILS));
        (Page::new(doc, Config::default()).unwrap(), input)
    }

    fn value(page: &Page, node: NodeId) -> String {
        page.document().get(node).unwrap().value().to_string()
    }

    #[test]
    fn test_emails_are_appended_with_comma() {
        let (mut page, input) = page();
        assert_eq!(page.add_email_to_input("a@x.com"), EmailAppend::Added);
        assert_eq!(page.add_email_to_input("b@x.com"), EmailAppend::Added);
        assert_eq!(value(&page, input), "a@x.com, b@x.com");

        let toasts = page.visible_toasts();
        assert!(page.document().text_content(toasts[1]).contains("b@x.com added to the list"));
    }

    #[test]
    fn test_duplicate_email_warns() {
        let (mut page, input) = page();
        page.add_email_to_input("a@x.com");
        assert_eq!(page.add_email_to_input("a@x.com"), EmailAppend::AlreadyPresent);
        assert_eq!(value(&page, input), "a@x.com");

        let last = *page.visible_toasts().last().unwrap();
        let toast = page.document().get(last).unwrap();
        assert!(toast.has_class("toast-warning"));
        assert!(page.document().text_content(last).contains("Already Added"));
    }

    #[test]
    fn test_substring_of_existing_entry_is_still_added() {
        let (mut page, input) = page();
        page.add_email_to_input("anna@x.com");
        assert_eq!(page.add_email_to_input("na@x.com"), EmailAppend::Added);
        assert_eq!(value(&page, input), "anna@x.com, na@x.com");
    }

    #[test]
    fn test_missing_input() {
        let mut page = Page::new(Document::new(), Config::default()).unwrap();
        assert_eq!(page.add_email_to_input("a@x.com"), EmailAppend::InputMissing);
        assert!(page.visible_toasts().is_empty());
    }
}
