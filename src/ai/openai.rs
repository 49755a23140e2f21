use super::client::Call;
use serde_json::{json, Value};

pub(super) fn build_request(http: &reqwest::Client, call: &Call<'_>) -> reqwest::RequestBuilder {
    let url = format!("{}/chat/completions", call.base_url);

    let payload = json!({
        "model": call.model,
        "messages": [
            { "role": "system", "content": call.system_prompt },
            { "role": "user", "content": call.message }
        ],
        "max_tokens": call.max_tokens,
        "temperature": call.temperature
    });

    http.post(url).bearer_auth(call.api_key).json(&payload)
}

pub(super) fn extract_text(body: &Value) -> Option<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hi there" } }]
        });
        assert_eq!(extract_text(&body).as_deref(), Some("Hi there"));
        assert_eq!(extract_text(&json!({ "choices": [] })), None);
    }
}
