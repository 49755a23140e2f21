use crate::ai::client::Provider;
use crate::ai::prompts::PEG_COMPACT_SYSTEM;
use crate::core::schema::PromptSchema;
use crate::error::PegError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The compiled prompt.
    Natural,
    /// The fixed PEG generator system prompt.
    Compact,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Natural => "natural",
            ViewMode::Compact => "compact",
        }
    }

    /// Text shown (and copied or downloaded) for this view.
    pub fn text<'a>(self, compiled_prompt: &'a str) -> &'a str {
        match self {
            ViewMode::Natural => compiled_prompt,
            ViewMode::Compact => PEG_COMPACT_SYSTEM,
        }
    }
}

pub fn download_file_name(view: ViewMode, provider: Provider, millis: u128) -> String {
    format!("prompt-{}-{}-{}.txt", view.as_str(), provider.as_str(), millis)
}

/// Writes the text for `view` into `dir` and returns the file path.
pub fn write_prompt(
    dir: &Path,
    view: ViewMode,
    provider: Provider,
    compiled_prompt: &str,
) -> Result<PathBuf, PegError> {
    let text = view.text(compiled_prompt);
    if text.is_empty() {
        return Err(PegError::EmptyPrompt);
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let path = dir.join(download_file_name(view, provider, millis));

    fs::write(&path, text)?;
    log::info!("Prompt saved to '{}'", path.display());
    Ok(path)
}

pub fn export_schema(schema: &PromptSchema) -> Result<String, PegError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

/// Parses a schema document. Every field must be present.
pub fn import_schema(json: &str) -> Result<PromptSchema, PegError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Tone;

    #[test]
    fn file_name_follows_pattern() {
        assert_eq!(
            download_file_name(ViewMode::Natural, Provider::Gemini, 1700000000123),
            "prompt-natural-gemini-1700000000123.txt"
        );
        assert_eq!(
            download_file_name(ViewMode::Compact, Provider::OpenAi, 7),
            "prompt-compact-openai-7.txt"
        );
    }

    #[test]
    fn writes_natural_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_prompt(dir.path(), ViewMode::Natural, Provider::OpenAi, "Act as X.").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Act as X.");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("prompt-natural-openai-"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn compact_view_ignores_empty_compiled_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_prompt(dir.path(), ViewMode::Compact, Provider::Gemini, "").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), PEG_COMPACT_SYSTEM);
    }

    #[test]
    fn empty_natural_prompt_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_prompt(dir.path(), ViewMode::Natural, Provider::Gemini, "").unwrap_err();
        assert!(matches!(err, PegError::EmptyPrompt));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn schema_json_round_trip_keeps_nulls() {
        let mut schema = PromptSchema::default();
        schema.style.tone = Tone::Formal;
        let text = export_schema(&schema).unwrap();
        assert!(text.contains("\"citation_style\": null"));
        assert_eq!(import_schema(&text).unwrap(), schema);
    }

    #[test]
    fn import_rejects_partial_documents() {
        let err = import_schema(r#"{ "role": "Teacher" }"#).unwrap_err();
        assert!(matches!(err, PegError::Json(_)));
    }
}
