//! Navigation highlighting

use crate::page::Page;

/// Whether a nav link should be marked active for `path`.
///
/// Exact matches always count. Prefix matches count for every link except
/// the dashboard, which would otherwise be active everywhere below it.
pub fn nav_link_matches(href: &str, path: &str, dashboard_path: &str) -> bool {
    href == path || (path.starts_with(href) && href != dashboard_path)
}

impl Page {
    pub(crate) fn highlight_navigation(&mut self) {
        let dashboard = self.config.navigation.dashboard_path.clone();
        let links = self
            .doc
            .query_class("navbar-nav")
            .into_iter()
            .flat_map(|nav| self.doc.query_within(nav, |e| e.tag() == "a"))
            .collect::<Vec<_>>();

        for link in links {
            let Some(element) = self.doc.get_mut(link) else {
                continue;
            };
            let Some(href) = element.attr("href").map(str::to_string) else {
                continue;
            };
            if nav_link_matches(&href, &self.location, &dashboard) {
                element.add_class("active");
            }
        }
    }
}
