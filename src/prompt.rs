use colored::Colorize;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};

/// The session prompt: `> ` normally, `<key> >>> ` while a command waits
/// for its value.
#[derive(Clone, Default)]
pub struct ReplPrompt {
    pending: Option<String>,
}

impl ReplPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending(&mut self, key: Option<String>) {
        self.pending = key;
    }
}

impl Prompt for ReplPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        match &self.pending {
            Some(key) => std::borrow::Cow::Owned(format!("{key} >>> ")),
            None => std::borrow::Cow::Owned("> ".bright_green().bold().to_string()),
        }
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("… ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}
