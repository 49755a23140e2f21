use super::client::Call;
use serde_json::{json, Value};

pub(super) fn build_request(http: &reqwest::Client, call: &Call<'_>) -> reqwest::RequestBuilder {
    let url = format!("{}/models/{}:generateContent", call.base_url, call.model);

    let payload = json!({
        "systemInstruction": {
            "parts": [{ "text": call.system_prompt }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": call.message }]
        }],
        "generationConfig": {
            "temperature": call.temperature,
            "maxOutputTokens": call.max_tokens
        }
    });

    http.post(url).query(&[("key", call.api_key)]).json(&payload)
}

/// Joins the text parts of the first candidate.
pub(super) fn extract_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() {
        None
    } else {
        Some(text.concat())
    }
}
