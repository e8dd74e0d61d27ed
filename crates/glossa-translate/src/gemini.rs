use async_trait::async_trait;
use serde_json::json;

use crate::{
    ProviderMetadata, TranslateError, TranslateRequest, TranslationRecord, Translator,
    parse_model_output,
};

/// Gemini `generateContent` client. The one provider we ship; the
/// [`Translator`] trait is the seam if that ever changes.
#[derive(Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    source_lang: String,
    target_lang: String,
}

impl GeminiTranslator {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            // Transport defaults only: translation requests carry no
            // explicit timeout and are never retried.
            client: reqwest::Client::new(),
            api_key,
            api_url,
            model,
            source_lang,
            target_lang,
        }
    }

    fn build_prompt(&self, request: &TranslateRequest) -> String {
        let mut prompt = format!(
            "You are a language learning assistant. Translate the following word from {} to {}.\n\nWord: \"{}\"\n",
            self.source_lang, self.target_lang, request.word
        );

        if let Some(sentence) = &request.context_sentence {
            prompt.push_str(&format!("Context sentence: \"{}\"\n", sentence));
        }

        prompt.push_str(&format!(
            "\nProvide the response in the following JSON format:\n\
             {{\n\
             \x20 \"wordTranslation\": \"{target} translation of the word\",\n\
             \x20 \"sentenceTranslation\": \"{target} translation of the full sentence (if context provided)\",\n\
             \x20 \"pronunciation\": \"Transliteration/pronunciation guide in Latin script\",\n\
             \x20 \"partOfSpeech\": \"noun/verb/adjective/etc\",\n\
             \x20 \"notes\": \"Any relevant usage notes or context\"\n\
             }}\n\n\
             Important: Return ONLY valid JSON, no additional text or markdown.",
            target = self.target_lang
        ));

        prompt
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslationRecord, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::Auth);
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [
                { "parts": [ { "text": self.build_prompt(request) } ] }
            ],
            "generationConfig": {
                "temperature": 0.3,
                "maxOutputTokens": 1024,
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status == 429 {
            return Err(TranslateError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Api(format!("Failed to parse response: {}", e)))?;

        let text = json["candidates"]
            .get(0)
            .and_then(|candidate| candidate["content"]["parts"].get(0))
            .and_then(|part| part["text"].as_str())
            .ok_or(TranslateError::EmptyResponse)?;

        // Never an error past this point; malformed output falls back
        Ok(parse_model_output(text))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            requires_api_key: true,
        }
    }
}

/// Map a non-success Gemini reply onto the error taxonomy. Quota and
/// permission problems ride in the body's `{error: {status, message}}`.
fn classify_api_error(status: u16, body: &str) -> TranslateError {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
    let api_status = parsed["error"]["status"].as_str().unwrap_or("");
    let message = parsed["error"]["message"].as_str().unwrap_or("");

    if status == 402 || api_status == "RESOURCE_EXHAUSTED" {
        return TranslateError::QuotaExhausted;
    }

    if api_status == "PERMISSION_DENIED" || message.contains("API key") {
        return TranslateError::Auth;
    }

    if message.is_empty() {
        TranslateError::Api(format!("HTTP {}", status))
    } else {
        TranslateError::Api(message.to_string())
    }
}
