use prompt_engine::ai::client::{AiClient, Provider};
use prompt_engine::config::AiConfig;
use prompt_engine::core::schema::{OutputLength, OutputType, Tone, Voice};
use prompt_engine::core::store::{
    ConstraintField, ContextField, Field, NestedField, OutputField, StyleField,
};
use prompt_engine::playground::{Playground, TestRequest};
use prompt_engine::FormStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();
    let config = AiConfig::from_env();

    let mut store = FormStore::new();
    store.update_field(Field::Role("Teacher".into()));
    store.update_nested_field(NestedField::Context(ContextField::User("Student".into())));
    store.update_nested_field(NestedField::Context(ContextField::Audience("Kids".into())));
    store.update_nested_field(NestedField::Context(ContextField::Situation("Classroom".into())));
    store.update_field(Field::Objective("Explain photosynthesis".into()));
    store.update_field(Field::Instructions(vec!["Define terms".into(), "Give example".into()]));
    store.update_nested_field(NestedField::Output(OutputField::Type(OutputType::Paragraph)));
    store.update_nested_field(NestedField::Output(OutputField::Length(OutputLength::Brief)));
    store.update_nested_field(NestedField::Style(StyleField::Tone(Tone::Friendly)));
    store.update_nested_field(NestedField::Style(StyleField::Voice(Voice::Teacher)));
    store.update_nested_field(NestedField::Constraints(ConstraintField::NoRepetition(true)));

    if !store.is_valid() {
        eprintln!("Form not ready: {:?}", store.validation().errors);
        return Ok(());
    }

    println!("{}\n", store.generated_prompt());

    let playground = Playground::new(AiClient::new(config));
    let Some(provider) = [Provider::Gemini, Provider::OpenAi]
        .into_iter()
        .find(|p| playground.has_api_key(*p))
    else {
        log::info!("No API key configured; skipping the test call");
        return Ok(());
    };

    match playground.run_test(&store, &TestRequest::new(provider)).await {
        Ok(text) => println!("--- {provider} ---\n{text}"),
        Err(e) => eprintln!("{}", e.user_message()),
    }

    Ok(())
}
