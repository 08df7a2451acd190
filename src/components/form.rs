use crate::components::html::escape;
use crate::error::{RepoStatsError, Result};

pub const PLACEHOLDER: &str = "For example: danielkvist";

/// Single-field username form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    value: String,
}

impl UserForm {
    pub fn new(default_user: impl Into<String>) -> Self {
        Self {
            value: default_user.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Hand the current text to `on_submit`. Empty text never reaches the callback.
    pub fn submit<F>(&self, on_submit: F) -> Result<()>
    where
        F: FnOnce(String),
    {
        if self.value.is_empty() {
            return Err(RepoStatsError::EmptySubmission);
        }

        on_submit(self.value.clone());
        Ok(())
    }

    pub fn render(&self) -> String {
        format!(
            concat!(
                r#"<form method="post" action="/">"#,
                r#"<input required type="text" name="user" placeholder="{placeholder}" value="{value}">"#,
                r#"<button type="submit">Search</button>"#,
                "</form>"
            ),
            placeholder = PLACEHOLDER,
            value = escape(&self.value),
        )
    }
}
