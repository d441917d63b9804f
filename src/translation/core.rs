/*!
 * Core translation service.
 *
 * Builds the translation prompt for one chunk of member XML and sends it to
 * the chat provider. The raw response text is returned as-is; fence handling
 * happens in the dispatcher via the response extractor.
 */

use log::debug;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::language_utils::Locale;
use crate::providers::Provider;
use crate::providers::chat::ChatClient;

/// Generation temperature: translations should be as deterministic as the
/// service allows
const TRANSLATION_TEMPERATURE: f32 = 0.01;

/// Translation service bridging chunks of documentation XML to the chat API
pub struct TranslationService {
    /// Chat completions client
    client: ChatClient,
}

impl TranslationService {
    /// Create a translation service from the application configuration
    pub fn new(config: &Config) -> Self {
        let client = ChatClient::new(
            config.token.clone(),
            config.chat_endpoint_url.clone(),
            config.model_id.clone(),
        );
        Self { client }
    }

    /// Create a translation service around an existing client
    pub fn with_client(client: ChatClient) -> Self {
        Self { client }
    }

    /// Build the prompt for one chunk.
    ///
    /// When no source locale is configured the source-language sentence is
    /// omitted and the model is only told the target language.
    pub fn build_prompt(source_locale: Option<&Locale>, target_locale: &Locale) -> String {
        let mut prompt = String::from(
            "You are a professional .NET library developer.\n\
             The following XML document is part of the IntelliSense XML documentation that is included in the NuGet package.\n\
             It represents class and method descriptions, parameters, return values, and exception descriptions.\n",
        );
        if let Some(source) = source_locale {
            prompt.push_str(&format!(
                "This XML document is written in {}.\n",
                source.english_name()
            ));
        }
        prompt.push_str(&format!(
            "Please translate this XML document into {}.\n\
             Please return only the translated XML document.",
            target_locale.english_name()
        ));
        prompt
    }

    /// Translate one chunk of member XML, returning the raw response text
    pub async fn translate_chunk(
        &self,
        xml: &str,
        source_locale: Option<&Locale>,
        target_locale: &Locale,
    ) -> Result<String, ProviderError> {
        let prompt = Self::build_prompt(source_locale, target_locale);
        let request = self
            .client
            .request()
            .add_message("system", prompt)
            .add_message("user", xml)
            .temperature(TRANSLATION_TEMPERATURE);

        let response = self.client.complete(request).await?;
        if response.choices.is_empty() {
            return Err(ProviderError::ParseError(
                "chat provider returned no choices".to_string(),
            ));
        }
        if let Some(usage) = &response.usage {
            debug!(
                "Chunk translated to {} ({} prompt / {} completion tokens)",
                target_locale, usage.prompt_tokens, usage.completion_tokens
            );
        }
        Ok(ChatClient::extract_text(&response))
    }
}
