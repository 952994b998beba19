//! Transport-neutral replies produced by the conversation engine.

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
    Prompt,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
            FeedbackType::Prompt => "✏️",
        }
    }
}

/// Reply-keyboard hint attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever keyboard the client currently shows.
    #[default]
    Keep,
    Suggest(Vec<Vec<String>>),
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// `text` is MarkdownV2 and already escaped.
    pub markdown: bool,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
            keyboard: Keyboard::Keep,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            markdown: true,
            ..Self::plain(text)
        }
    }

    pub fn feedback(feedback_type: FeedbackType, message: impl AsRef<str>) -> Self {
        Self::plain(format!("{} {}", feedback_type.emoji(), message.as_ref()))
    }

    pub fn success(message: impl AsRef<str>) -> Self {
        Self::feedback(FeedbackType::Success, message)
    }

    pub fn warning(message: impl AsRef<str>) -> Self {
        Self::feedback(FeedbackType::Warning, message)
    }

    pub fn error(message: impl AsRef<str>) -> Self {
        Self::feedback(FeedbackType::Error, message)
    }

    pub fn info(message: impl AsRef<str>) -> Self {
        Self::feedback(FeedbackType::Info, message)
    }

    pub fn prompt(message: impl AsRef<str>) -> Self {
        Self::feedback(FeedbackType::Prompt, message)
    }

    pub fn with_keyboard<R, S>(mut self, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.keyboard = Keyboard::Suggest(rows);
        self
    }

    pub fn remove_keyboard(mut self) -> Self {
        self.keyboard = Keyboard::Remove;
        self
    }
}
