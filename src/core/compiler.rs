use super::schema::PromptSchema;
use super::validator::validate;

const PLACEHOLDER: &str = "-";
const CLOSING: &str = "Please provide a coherent, consistent, and in-depth answer.";

/// Renders a schema into the natural-language prompt, one section per line.
///
/// Callers are expected to gate on [`validate`] first; unset fields render
/// as empty text rather than failing.
pub fn compile(p: &PromptSchema) -> String {
    let mut lines = Vec::with_capacity(9 + p.instructions.len());

    lines.push(format!("Act as {}.", p.role));
    lines.push(format!(
        "Context: user={}; audience={}; situation={}.",
        p.context.user, p.context.audience, p.context.situation
    ));
    lines.push(format!("Objective: {}.", p.objective));

    lines.push("Instructions:".to_string());
    lines.extend(
        p.instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step)),
    );

    let extras = if p.output.extras.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        p.output.extras.join(", ")
    };
    lines.push(format!(
        "Output format: {}; length: {}; extras: {}.",
        p.output.kind, p.output.length, extras
    ));

    lines.push(format!("Style: tone={}; voice={}.", p.style.tone, p.style.voice));

    let c = &p.constraints;
    lines.push(format!(
        "Constraints: no_repetition={}; latest_sources_only={}; citation_style={}; timeframe={}.",
        c.no_repetition,
        c.latest_sources_only,
        c.citation_style.map_or(PLACEHOLDER, |s| s.as_str()),
        c.timeframe.as_deref().unwrap_or(PLACEHOLDER),
    ));

    let m = &p.meta;
    lines.push(format!(
        "Meta: reasoning_depth={}; show_work={}; verify_calculations={}; ask_before_assuming={}.",
        m.reasoning_depth, m.show_work, m.verify_calculations, m.ask_before_assuming
    ));

    lines.push(CLOSING.to_string());
    lines.join("\n")
}

/// Compiles only when the schema passes validation.
pub fn compile_if_valid(schema: &PromptSchema) -> Option<String> {
    validate(schema).ok.then(|| compile(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{
        CitationStyle, OutputLength, OutputType, ReasoningDepth, Tone, Voice,
    };
    use pretty_assertions::assert_eq;

    fn classroom() -> PromptSchema {
        let mut p = PromptSchema::default();
        p.role = "Teacher".into();
        p.context.user = "Student".into();
        p.context.audience = "Kids".into();
        p.context.situation = "Classroom".into();
        p.objective = "Explain photosynthesis".into();
        p.instructions = vec!["Define terms".into(), "Give example".into()];
        p.output.kind = OutputType::Paragraph;
        p.output.length = OutputLength::Brief;
        p.style.tone = Tone::Friendly;
        p.style.voice = Voice::Teacher;
        p.constraints.no_repetition = true;
        p
    }

    #[test]
    fn renders_full_prompt() {
        let expected = "\
Act as Teacher.
Context: user=Student; audience=Kids; situation=Classroom.
Objective: Explain photosynthesis.
Instructions:
1. Define terms
2. Give example
Output format: paragraph; length: brief; extras: -.
Style: tone=friendly; voice=teacher.
Constraints: no_repetition=true; latest_sources_only=false; citation_style=-; timeframe=-.
Meta: reasoning_depth=standard; show_work=false; verify_calculations=false; ask_before_assuming=false.
Please provide a coherent, consistent, and in-depth answer.";
        assert_eq!(compile(&classroom()), expected);
    }

    #[test]
    fn is_deterministic() {
        let a = classroom();
        let b = a.clone();
        assert_eq!(compile(&a), compile(&b));
    }

    #[test]
    fn numbers_instructions_in_order() {
        let mut p = classroom();
        p.instructions = vec!["A".into(), "B".into(), "C".into()];
        let out = compile(&p);
        let one = out.find("1. A").unwrap();
        let two = out.find("2. B").unwrap();
        let three = out.find("3. C").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn empty_instruction_list_keeps_header() {
        let mut p = classroom();
        p.instructions.clear();
        let out = compile(&p);
        assert!(out.contains("Instructions:\nOutput format:"));
    }

    #[test]
    fn extras_join_with_comma() {
        let mut p = classroom();
        p.output.extras = vec!["x".into(), "y".into()];
        assert!(compile(&p).contains("extras: x, y."));
    }

    #[test]
    fn optional_constraints_render_verbatim_when_set() {
        let mut p = classroom();
        p.constraints.citation_style = Some(CitationStyle::Apa);
        p.constraints.timeframe = Some("2020-2024".into());
        p.meta.reasoning_depth = ReasoningDepth::Deep;
        p.meta.show_work = true;
        let out = compile(&p);
        assert!(out.contains("citation_style=apa; timeframe=2020-2024."));
        assert!(out.contains("reasoning_depth=deep; show_work=true;"));
    }

    #[test]
    fn invalid_schema_is_not_compiled() {
        assert_eq!(compile_if_valid(&PromptSchema::default()), None);
        assert!(compile_if_valid(&classroom()).is_some());
    }
}
