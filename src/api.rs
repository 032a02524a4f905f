//! Analysis collaborator: serialize scraped coverage into a prompt and
//! request a comparative editorial analysis from an OpenAI-compatible
//! chat-completion API.
//!
//! The call is a single synchronous request with no retry, chunking, or
//! token budgeting — an oversized prompt fails the call and the error
//! propagates to the caller. The response payload is taken from the first
//! choice's message content; an absent payload is substituted with a fixed
//! placeholder instead of surfacing the provider's internal structure.

use crate::config::AnalysisSettings;
use crate::models::CoverageMap;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Substituted when the provider's response carries no usable text payload.
pub const ANALYSIS_PLACEHOLDER: &str = "Analysis not available in the expected format.";

const SYSTEM_INSTRUCTION: &str = "You are a professional media expert tasked with comparing and \
    contrasting news articles about the same event from different news outlets. Your goal is to \
    provide a well-structured and analyzed report that highlights key similarities and \
    differences between the two texts. Your report should revolve mainly around 1. Area of \
    focus, 2. Tone of coverage, 3. Depth of coverage, 4. Potential biases, 5. Humanitarian \
    effect. You are not restricted with these topics. Add or remove topics based on your \
    expertise. Format your output with numerated topics and bullet points to improve \
    readability. Make a section for Key Differences.";

const PROMPT_PREAMBLE: &str = "I have scraped content from two different news outlets on a \
    specific topic. Please analyze and compare the coverage from these outlets. Here's the \
    data:\n\n";

const PROMPT_INSTRUCTIONS: &str = "\nBased only on this data given to you, please provide an in \
    depth analysis that compares and contrasts the coverage of this specific topic from these \
    different news outlets. Consider factors such as tone, focus, depth of coverage, potential \
    biases, and any other relevant aspects you notice. Please structure your response as \
    follows:\n\nOutlet 1:\n[Analysis for the first outlet]\n\nOutlet 2:\n[Analysis for the \
    second outlet]";

/// Client for the external analysis service.
pub struct AnalysisClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl AnalysisClient {
    pub fn new(settings: &AnalysisSettings, api_key: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = &settings.api_base {
            config = config.with_api_base(api_base);
        }
        Self {
            client: Client::with_config(config),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    /// Send the scraped coverage for comparative analysis and return the
    /// unwrapped analysis text.
    ///
    /// # Errors
    ///
    /// Any transport or API failure is propagated to the caller unretried;
    /// this is the one stage whose failure fails the whole request.
    #[instrument(level = "info", skip_all)]
    pub async fn analyze_coverage(&self, coverage: &CoverageMap) -> Result<String, Box<dyn Error>> {
        let prompt = build_analysis_prompt(coverage);
        debug!(chars = prompt.len(), "Built analysis prompt");

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_tokens(self.max_tokens)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTION)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        info!(model = %self.model, "Analysis call completed");

        let payload = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        Ok(unwrap_analysis(payload))
    }
}

/// Serialize the coverage map into the analysis prompt.
///
/// Per outlet, in scrape order: a header line, then one `Article:` block
/// per stored content string in discovery order. An outlet with no
/// articles still emits its header, so a thin scrape still produces a
/// well-formed (if sparse) document. Fetch-error placeholder strings flow
/// through as-is.
pub fn build_analysis_prompt(coverage: &CoverageMap) -> String {
    let mut prompt = String::from(PROMPT_PREAMBLE);
    for (outlet, articles) in coverage.iter() {
        prompt.push_str(&format!("Outlet: {outlet}\n"));
        for (_, content) in articles.iter() {
            prompt.push_str(&format!("Article: {content}\n"));
        }
    }
    prompt.push_str(PROMPT_INSTRUCTIONS);
    prompt
}

/// Extract the analysis text from the provider's response payload.
///
/// A missing first choice or empty content yields the fixed
/// [`ANALYSIS_PLACEHOLDER`] rather than an error.
pub fn unwrap_analysis(payload: Option<String>) -> String {
    match payload {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("Analysis response carried no text payload; substituting placeholder");
            ANALYSIS_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_coverage() -> CoverageMap {
        let mut coverage = CoverageMap::default();
        let first = coverage.outlet_mut("https://a.test/news");
        first.insert(
            "https://a.test/world/1".to_string(),
            "Flood coverage from outlet A.".to_string(),
        );
        first.insert(
            "https://a.test/world/2".to_string(),
            "Follow-up from outlet A.".to_string(),
        );
        coverage.outlet_mut("https://b.test");
        coverage
    }

    #[test]
    fn test_prompt_contains_headers_and_articles_in_order() {
        let prompt = build_analysis_prompt(&sample_coverage());
        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.ends_with(PROMPT_INSTRUCTIONS));

        let outlet_a = prompt.find("Outlet: https://a.test/news\n").unwrap();
        let article_1 = prompt.find("Article: Flood coverage from outlet A.\n").unwrap();
        let article_2 = prompt.find("Article: Follow-up from outlet A.\n").unwrap();
        let outlet_b = prompt.find("Outlet: https://b.test\n").unwrap();
        assert!(outlet_a < article_1);
        assert!(article_1 < article_2);
        assert!(article_2 < outlet_b);
    }

    #[test]
    fn test_empty_outlet_still_emits_header() {
        let mut coverage = CoverageMap::default();
        coverage.outlet_mut("https://empty.test");
        let prompt = build_analysis_prompt(&coverage);
        assert!(prompt.contains("Outlet: https://empty.test\n"));
        assert!(!prompt.contains("Article:"));
    }

    #[test]
    fn test_empty_coverage_prompt_is_still_well_formed() {
        let prompt = build_analysis_prompt(&CoverageMap::default());
        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.ends_with(PROMPT_INSTRUCTIONS));
    }

    #[test]
    fn test_fetch_error_placeholder_flows_into_prompt() {
        let mut coverage = CoverageMap::default();
        coverage.outlet_mut("https://a.test").insert(
            "https://a.test/dead".to_string(),
            "Failed to retrieve content. Status code: 404 Not Found".to_string(),
        );
        let prompt = build_analysis_prompt(&coverage);
        assert!(prompt.contains("Article: Failed to retrieve content. Status code: 404"));
    }

    #[test]
    fn test_unwrap_analysis_passes_payload_through() {
        assert_eq!(
            unwrap_analysis(Some("Outlet 1: ...".to_string())),
            "Outlet 1: ..."
        );
    }

    #[test]
    fn test_unwrap_analysis_substitutes_placeholder() {
        assert_eq!(unwrap_analysis(None), ANALYSIS_PLACEHOLDER);
        assert_eq!(unwrap_analysis(Some(String::new())), ANALYSIS_PLACEHOLDER);
        assert_eq!(unwrap_analysis(Some("   \n".to_string())), ANALYSIS_PLACEHOLDER);
    }
}
