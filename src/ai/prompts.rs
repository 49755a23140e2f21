use super::schema_utils;
use crate::core::schema::PromptSchema;
use schemars::schema_for;

pub const PEG_SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps users write effective, well-structured prompts for any AI task.";

pub const PEG_COMPACT_SYSTEM: &str = r#"You are PROMPT ENGINE GENERATOR (PEG). Interview the user with at most 8 concise questions to fill: role, context (user/audience/situation), objective, instructions, output (type/length/extras), style (tone/voice), constraints, meta (reasoning depth/verification/assumptions). Then output:
(A) PROMPT_NL: a polished natural-language prompt merging all fields.
(B) PROMPT_JSON: valid JSON strictly matching the shared schema.
Always return both (A) and (B). If information is missing, choose sensible defaults and state them in (A). No chain-of-thought; only final results."#;

/// The compact generator prompt with the shared schema appended, so a
/// model can emit PROMPT_JSON that imports cleanly.
pub fn compact_system_prompt() -> serde_json::Result<String> {
    let schema = schema_utils::clean_schema(schema_for!(PromptSchema))?;
    Ok(format!(
        "{}\n\nSHARED SCHEMA:\n{}",
        PEG_COMPACT_SYSTEM,
        serde_json::to_string_pretty(&schema)?
    ))
}
