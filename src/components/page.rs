use crate::actors::QueryState;
use crate::components::{StatsView, UserForm};
use std::time::Duration;

/// The whole widget: form on top, stats below
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub user: &'a str,
    pub state: &'a QueryState,
    pub stats_view: &'a StatsView,
    /// Re-request interval while the query has not settled
    pub refresh: Duration,
}

impl Page<'_> {
    pub fn render(&self) -> String {
        let form = UserForm::new(self.user);

        // Pending pages poll themselves until the fetch settles
        let refresh = if self.state.is_pending() {
            format!(
                r#"<meta http-equiv="refresh" content="{}">"#,
                self.refresh.as_secs().max(1)
            )
        } else {
            String::new()
        };

        format!(
            concat!(
                "<!DOCTYPE html>",
                "<html><head>",
                r#"<meta charset="utf-8">"#,
                "{refresh}",
                "<title>GitHub Stats</title>",
                "</head><body>",
                "{form}",
                "{stats}",
                "</body></html>"
            ),
            refresh = refresh,
            form = form.render(),
            stats = self.stats_view.render(self.user, self.state),
        )
    }
}
