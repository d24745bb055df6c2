/// Source of the yes/no decision for destructive actions.
///
/// Only used through generics, so the `async fn` needs no boxing.
#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to every prompt (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Fixed answer, recording every prompt it was asked.
#[derive(Debug, Default)]
pub struct FixedAnswer {
    answer: bool,
    asked: std::sync::Mutex<Vec<String>>,
}

impl FixedAnswer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.asked
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl Confirm for FixedAnswer {
    async fn confirm(&self, prompt: &str) -> bool {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt.to_string());
        }
        self.answer
    }
}
