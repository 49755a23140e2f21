use super::schema::PromptSchema;
use serde::Serialize;
use serde_json::Value;

/// Outcome of checking a schema for readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

struct Checks(Vec<String>);

impl Checks {
    fn require(&mut self, cond: bool, msg: &str) {
        if !cond {
            self.0.push(msg.to_string());
        }
    }
}

pub fn validate(schema: &PromptSchema) -> Validation {
    let mut checks = Checks(Vec::new());
    checks.require(!schema.role.is_empty(), "role missing");
    checks.require(!schema.context.user.is_empty(), "context.user missing");
    checks.require(!schema.objective.is_empty(), "objective missing");
    // `instructions` is a Vec by construction; its length is not checked.
    checks.require(!schema.output.kind.as_str().is_empty(), "output.type missing");
    checks.require(!schema.style.tone.as_str().is_empty(), "style.tone missing");
    Validation::from_errors(checks.0)
}

/// Runs the same checks as [`validate`] over untyped JSON, e.g. an imported
/// document that has not been deserialized yet. Missing objects or wrongly
/// typed values fail the check instead of panicking.
pub fn validate_value(obj: &Value) -> Validation {
    let non_empty = |path: &str| {
        obj.pointer(path)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty())
    };

    let mut checks = Checks(Vec::new());
    checks.require(non_empty("/role"), "role missing");
    checks.require(non_empty("/context/user"), "context.user missing");
    checks.require(non_empty("/objective"), "objective missing");
    checks.require(
        obj.get("instructions").is_some_and(Value::is_array),
        "instructions must be a list",
    );
    checks.require(non_empty("/output/type"), "output.type missing");
    checks.require(non_empty("/style/tone"), "style.tone missing");
    Validation::from_errors(checks.0)
}
