//! Model selection
//!
//! The model list always comes from Ollama at render time; this module only
//! decides which entry is selected by default.

/// Models preferred for Japanese answers, in priority order
pub const PREFERRED_MODELS: &[&str] = &["qwen2.5:7b", "qwen2.5-coder:7b"];

/// Pick the default model from a fetched list
///
/// Returns the first preferred model that is installed, else the first
/// installed model, else `None` when the list is empty.
///
/// # Examples
///
/// ```
/// use qiime_assistant::models::select_default_model;
///
/// let models = vec!["llama3".to_string(), "qwen2.5:7b".to_string()];
/// assert_eq!(select_default_model(&models, &["qwen2.5:7b"]), Some("qwen2.5:7b"));
/// ```
pub fn select_default_model<'a, P>(models: &'a [String], preferred: &[P]) -> Option<&'a str>
where
    P: AsRef<str>,
{
    preferred
        .iter()
        .find_map(|p| models.iter().find(|m| m.as_str() == p.as_ref()))
        .or_else(|| models.first())
        .map(String::as_str)
}

/// Resolve the model for a session
///
/// An explicitly requested model wins when it is installed; otherwise the
/// default selection applies.
pub fn resolve_model<'a, P>(
    models: &'a [String],
    requested: Option<&str>,
    preferred: &[P],
) -> Option<&'a str>
where
    P: AsRef<str>,
{
    if let Some(requested) = requested {
        if let Some(found) = models.iter().find(|m| m.as_str() == requested) {
            return Some(found.as_str());
        }
        tracing::warn!("Requested model '{}' is not installed, using default", requested);
    }
    select_default_model(models, preferred)
}

/// Whether `model` appears in the fetched list
pub fn is_installed(models: &[String], model: &str) -> bool {
    models.iter().any(|m| m == model)
}
