use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declares a closed set of form choices together with their wire text.
///
/// The wire text is what serde reads and writes and what the compiler
/// prints. An `Unset => ""` variant keeps the empty-string marker typed.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        $(#[$meta])*
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    #[derive(Default)]
    #[schemars(description = "Shape of the answer. Empty string means not chosen yet.")]
    pub enum OutputType {
        #[default]
        Unset => "",
        Paragraph => "paragraph",
        List => "list",
        Table => "table",
        Json => "json",
        Markdown => "markdown",
        Code => "code",
    }
}

choice_enum! {
    #[derive(Default)]
    pub enum OutputLength {
        #[default]
        Unset => "",
        Brief => "brief",
        Medium => "medium",
        Detailed => "detailed",
        Comprehensive => "comprehensive",
    }
}

choice_enum! {
    #[derive(Default)]
    pub enum Tone {
        #[default]
        Unset => "",
        Formal => "formal",
        Informal => "informal",
        Professional => "professional",
        Friendly => "friendly",
        Authoritative => "authoritative",
        Conversational => "conversational",
    }
}

choice_enum! {
    #[derive(Default)]
    pub enum Voice {
        #[default]
        Unset => "",
        Expert => "expert",
        Teacher => "teacher",
        Consultant => "consultant",
        Assistant => "assistant",
        Mentor => "mentor",
        Analyst => "analyst",
    }
}

choice_enum! {
    pub enum CitationStyle {
        Apa => "apa",
        Mla => "mla",
        Chicago => "chicago",
        Ieee => "ieee",
    }
}

choice_enum! {
    #[derive(Default)]
    pub enum ReasoningDepth {
        Brief => "brief",
        #[default]
        Standard => "standard",
        Deep => "deep",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Context {
    #[schemars(description = "Who is asking.")]
    pub user: String,
    #[schemars(description = "Who the answer is for.")]
    pub audience: String,
    pub situation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutputSpec {
    #[serde(rename = "type")]
    pub kind: OutputType,
    pub length: OutputLength,
    #[schemars(description = "Extra elements to include, rendered in order.")]
    pub extras: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Style {
    pub tone: Tone,
    pub voice: Voice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Constraints {
    pub no_repetition: bool,
    pub latest_sources_only: bool,
    #[schemars(description = "null when no citation style is required.")]
    pub citation_style: Option<CitationStyle>,
    #[schemars(description = "null when no timeframe applies.")]
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    pub reasoning_depth: ReasoningDepth,
    pub show_work: bool,
    pub verify_calculations: bool,
    pub ask_before_assuming: bool,
}

/// The structured prompt specification a user fills in.
///
/// Every field is always present. Required text that has not been filled
/// in is `""`; optional constraint values that are not set are `None`
/// (`null` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PromptSchema {
    #[schemars(description = "Persona the model should act as.")]
    pub role: String,
    pub context: Context,
    pub objective: String,
    #[schemars(description = "Ordered steps, numbered in the rendered prompt.")]
    pub instructions: Vec<String>,
    pub output: OutputSpec,
    pub style: Style,
    pub constraints: Constraints,
    pub meta: Meta,
}

impl Default for PromptSchema {
    fn default() -> Self {
        Self {
            role: String::new(),
            context: Context::default(),
            objective: String::new(),
            instructions: vec![String::new()],
            output: OutputSpec::default(),
            style: Style::default(),
            constraints: Constraints::default(),
            meta: Meta::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_schema_matches_initial_form() {
        let schema = PromptSchema::default();
        assert_eq!(schema.instructions, vec![String::new()]);
        assert!(schema.output.extras.is_empty());
        assert_eq!(schema.meta.reasoning_depth, ReasoningDepth::Standard);
        assert_eq!(schema.constraints.citation_style, None);
        assert_eq!(schema.constraints.timeframe, None);
    }

    #[test]
    fn default_schema_serializes_with_empty_strings_and_nulls() {
        let value = serde_json::to_value(PromptSchema::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "",
                "context": { "user": "", "audience": "", "situation": "" },
                "objective": "",
                "instructions": [""],
                "output": { "type": "", "length": "", "extras": [] },
                "style": { "tone": "", "voice": "" },
                "constraints": {
                    "no_repetition": false,
                    "latest_sources_only": false,
                    "citation_style": null,
                    "timeframe": null
                },
                "meta": {
                    "reasoning_depth": "standard",
                    "show_work": false,
                    "verify_calculations": false,
                    "ask_before_assuming": false
                }
            })
        );
    }

    #[test]
    fn choices_parse_from_wire_text() {
        let kind: OutputType = serde_json::from_value(json!("markdown")).unwrap();
        assert_eq!(kind, OutputType::Markdown);
        let unset: Tone = serde_json::from_value(json!("")).unwrap();
        assert_eq!(unset, Tone::Unset);
        assert!(serde_json::from_value::<Voice>(json!("pirate")).is_err());
    }

    #[test]
    fn choice_lists_include_unset_marker_first() {
        assert_eq!(OutputType::ALL[0].as_str(), "");
        assert_eq!(OutputType::ALL.len(), 7);
        assert_eq!(CitationStyle::ALL.len(), 4);
        assert_eq!(ReasoningDepth::Deep.to_string(), "deep");
    }
}
