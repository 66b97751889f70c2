//! Console - The interactive boundary the workflows talk through
//!
//! Every prompt is a blocking suspension point. A cancelled prompt is
//! indistinguishable from an empty or declined answer at every call site.

/// Interactive prompt service
pub trait Prompter: Send + Sync {
    /// Pick one option; `None` on cancel
    fn select_one(&self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Pick any number of options; empty on cancel
    fn select_many(&self, prompt: &str, options: &[String]) -> Vec<usize>;

    /// Free text; `None` on cancel
    fn text(&self, prompt: &str) -> Option<String>;

    /// Yes/no; `false` on cancel
    fn confirm(&self, prompt: &str) -> bool;
}

/// Console reporter for user-facing status messages
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Present a fixed menu and return the chosen entry.
///
/// Cancellation yields `None`.
pub fn choose_from<T: Copy>(
    prompter: &dyn Prompter,
    prompt: &str,
    entries: &[(T, &str)],
) -> Option<T> {
    let labels: Vec<String> = entries.iter().map(|(_, label)| label.to_string()).collect();
    prompter
        .select_one(prompt, &labels)
        .and_then(|index| entries.get(index))
        .map(|(value, _)| *value)
}

/// Free text trimmed of surrounding whitespace
pub fn trimmed_text(prompter: &dyn Prompter, prompt: &str) -> Option<String> {
    prompter.text(prompt).map(|s| s.trim().to_string())
}

/// Optional free text: `None` when cancelled or left blank
pub fn optional_text(prompter: &dyn Prompter, prompt: &str) -> Option<String> {
    trimmed_text(prompter, prompt).filter(|s| !s.is_empty())
}
