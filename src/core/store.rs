use super::compiler::compile;
use super::schema::{
    CitationStyle, Constraints, Context, Meta, OutputLength, OutputSpec, OutputType,
    PromptSchema, ReasoningDepth, Style, Tone, Voice,
};
use super::validator::{validate, Validation};
use crate::error::PegError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Replacement for one top-level schema field.
#[derive(Debug, Clone)]
pub enum Field {
    Role(String),
    Context(Context),
    Objective(String),
    Instructions(Vec<String>),
    Output(OutputSpec),
    Style(Style),
    Constraints(Constraints),
    Meta(Meta),
}

#[derive(Debug, Clone)]
pub enum ContextField {
    User(String),
    Audience(String),
    Situation(String),
}

#[derive(Debug, Clone)]
pub enum OutputField {
    Type(OutputType),
    Length(OutputLength),
    Extras(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum StyleField {
    Tone(Tone),
    Voice(Voice),
}

#[derive(Debug, Clone)]
pub enum ConstraintField {
    NoRepetition(bool),
    LatestSourcesOnly(bool),
    CitationStyle(Option<CitationStyle>),
    /// `Some("")` is stored as `None`.
    Timeframe(Option<String>),
}

#[derive(Debug, Clone)]
pub enum MetaField {
    ReasoningDepth(ReasoningDepth),
    ShowWork(bool),
    VerifyCalculations(bool),
    AskBeforeAssuming(bool),
}

/// Replacement for one field inside a nested schema object.
#[derive(Debug, Clone)]
pub enum NestedField {
    Context(ContextField),
    Output(OutputField),
    Style(StyleField),
    Constraints(ConstraintField),
    Meta(MetaField),
}

/// The two editable string lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Instructions,
    Extras,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Role,
    Context,
    Objective,
    Instructions,
    Output,
    Style,
    Constraints,
    Meta,
}

/// Which form sections are expanded. Presentational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFlags {
    pub role: bool,
    pub context: bool,
    pub objective: bool,
    pub instructions: bool,
    pub output: bool,
    pub style: bool,
    pub constraints: bool,
    pub meta: bool,
}

impl Default for SectionFlags {
    fn default() -> Self {
        Self {
            role: true,
            context: true,
            objective: true,
            instructions: true,
            output: false,
            style: false,
            constraints: false,
            meta: false,
        }
    }
}

impl SectionFlags {
    fn flag_mut(&mut self, section: Section) -> &mut bool {
        match section {
            Section::Role => &mut self.role,
            Section::Context => &mut self.context,
            Section::Objective => &mut self.objective,
            Section::Instructions => &mut self.instructions,
            Section::Output => &mut self.output,
            Section::Style => &mut self.style,
            Section::Constraints => &mut self.constraints,
            Section::Meta => &mut self.meta,
        }
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        match section {
            Section::Role => self.role,
            Section::Context => self.context,
            Section::Objective => self.objective,
            Section::Instructions => self.instructions,
            Section::Output => self.output,
            Section::Style => self.style,
            Section::Constraints => self.constraints,
            Section::Meta => self.meta,
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn normalized(mut schema: PromptSchema) -> PromptSchema {
    schema.constraints.timeframe = blank_to_none(schema.constraints.timeframe);
    schema
}

/// Pure update: returns `prev` with one top-level field replaced.
pub fn with_field(prev: &PromptSchema, field: Field) -> PromptSchema {
    let mut next = prev.clone();
    match field {
        Field::Role(v) => next.role = v,
        Field::Context(v) => next.context = v,
        Field::Objective(v) => next.objective = v,
        Field::Instructions(v) => next.instructions = v,
        Field::Output(v) => next.output = v,
        Field::Style(v) => next.style = v,
        Field::Constraints(v) => {
            next.constraints = Constraints {
                timeframe: blank_to_none(v.timeframe),
                ..v
            }
        }
        Field::Meta(v) => next.meta = v,
    }
    next
}

/// Pure update: returns `prev` with one nested field replaced.
pub fn with_nested_field(prev: &PromptSchema, field: NestedField) -> PromptSchema {
    let mut next = prev.clone();
    match field {
        NestedField::Context(f) => match f {
            ContextField::User(v) => next.context.user = v,
            ContextField::Audience(v) => next.context.audience = v,
            ContextField::Situation(v) => next.context.situation = v,
        },
        NestedField::Output(f) => match f {
            OutputField::Type(v) => next.output.kind = v,
            OutputField::Length(v) => next.output.length = v,
            OutputField::Extras(v) => next.output.extras = v,
        },
        NestedField::Style(f) => match f {
            StyleField::Tone(v) => next.style.tone = v,
            StyleField::Voice(v) => next.style.voice = v,
        },
        NestedField::Constraints(f) => match f {
            ConstraintField::NoRepetition(v) => next.constraints.no_repetition = v,
            ConstraintField::LatestSourcesOnly(v) => next.constraints.latest_sources_only = v,
            ConstraintField::CitationStyle(v) => next.constraints.citation_style = v,
            ConstraintField::Timeframe(v) => next.constraints.timeframe = blank_to_none(v),
        },
        NestedField::Meta(f) => match f {
            MetaField::ReasoningDepth(v) => next.meta.reasoning_depth = v,
            MetaField::ShowWork(v) => next.meta.show_work = v,
            MetaField::VerifyCalculations(v) => next.meta.verify_calculations = v,
            MetaField::AskBeforeAssuming(v) => next.meta.ask_before_assuming = v,
        },
    }
    next
}

/// Owns the live schema and keeps the derived readiness flag and prompt
/// text in step with it. Every mutation replaces the schema and re-derives
/// before returning, so reads never see a stale prompt.
#[derive(Debug, Clone)]
pub struct FormStore {
    schema: PromptSchema,
    sections: SectionFlags,
    validation: Validation,
    prompt: String,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_schema(PromptSchema::default())
    }

    pub fn with_schema(schema: PromptSchema) -> Self {
        let mut store = Self {
            schema: PromptSchema::default(),
            sections: SectionFlags::default(),
            validation: Validation {
                ok: false,
                errors: Vec::new(),
            },
            prompt: String::new(),
        };
        store.load(schema);
        store
    }

    pub fn schema(&self) -> &PromptSchema {
        &self.schema
    }

    pub fn sections(&self) -> &SectionFlags {
        &self.sections
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.ok
    }

    /// The compiled prompt, or `""` while the schema is not ready.
    pub fn generated_prompt(&self) -> &str {
        &self.prompt
    }

    pub fn update_field(&mut self, field: Field) {
        let next = with_field(&self.schema, field);
        self.commit(next);
    }

    pub fn update_nested_field(&mut self, field: NestedField) {
        let next = with_nested_field(&self.schema, field);
        self.commit(next);
    }

    pub fn toggle_section(&mut self, section: Section) {
        let flag = self.sections.flag_mut(section);
        *flag = !*flag;
        log::debug!("Section {section:?} expanded={flag}");
    }

    pub fn reset(&mut self) {
        self.sections = SectionFlags::default();
        self.commit(PromptSchema::default());
    }

    /// Replaces the whole schema, e.g. after an import.
    pub fn load(&mut self, schema: PromptSchema) {
        self.commit(normalized(schema));
    }

    /// Sets the value at a JSON pointer such as `/context/user` or
    /// `/meta/reasoning_depth`. The schema is left untouched when the
    /// pointer does not exist or the value has the wrong shape.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<(), PegError> {
        let mut doc = serde_json::to_value(&self.schema)?;
        let target = doc
            .pointer_mut(path)
            .ok_or_else(|| PegError::InvalidUpdate(format!("Unknown field: '{path}'")))?;
        *target = value;

        // An empty citation choice clears it, like a blank timeframe.
        if let Some(style) = doc.pointer_mut("/constraints/citation_style") {
            if style.as_str() == Some("") {
                *style = Value::Null;
            }
        }

        let next: PromptSchema = serde_json::from_value(doc)
            .map_err(|e| PegError::InvalidUpdate(format!("Rejected value for '{path}': {e}")))?;
        self.load(next);
        Ok(())
    }

    pub fn push_item(&mut self, list: ListField) {
        let mut items = self.list(list).to_vec();
        items.push(String::new());
        self.replace_list(list, items);
    }

    pub fn set_item(
        &mut self,
        list: ListField,
        index: usize,
        text: String,
    ) -> Result<(), PegError> {
        let mut items = self.list(list).to_vec();
        let slot = items
            .get_mut(index)
            .ok_or_else(|| PegError::InvalidUpdate(format!("{list:?} has no item {index}")))?;
        *slot = text;
        self.replace_list(list, items);
        Ok(())
    }

    pub fn remove_item(&mut self, list: ListField, index: usize) -> Result<(), PegError> {
        let mut items = self.list(list).to_vec();
        if index >= items.len() {
            return Err(PegError::InvalidUpdate(format!("{list:?} has no item {index}")));
        }
        items.remove(index);
        self.replace_list(list, items);
        Ok(())
    }

    fn list(&self, list: ListField) -> &[String] {
        match list {
            ListField::Instructions => &self.schema.instructions,
            ListField::Extras => &self.schema.output.extras,
        }
    }

    fn replace_list(&mut self, list: ListField, items: Vec<String>) {
        match list {
            ListField::Instructions => self.update_field(Field::Instructions(items)),
            ListField::Extras => {
                self.update_nested_field(NestedField::Output(OutputField::Extras(items)))
            }
        }
    }

    fn commit(&mut self, next: PromptSchema) {
        let validation = validate(&next);
        self.prompt = if validation.ok { compile(&next) } else { String::new() };
        log::debug!(
            "Schema updated: ready={} errors={:?}",
            validation.ok,
            validation.errors
        );
        self.validation = validation;
        self.schema = next;
    }
}
