use serde::Deserialize;

use crate::models::{Intent, Role, Urgency};
use crate::services::ai::prompts::INTENT_ANALYSIS_PROMPT;
use crate::services::ai::{LlmProvider, Message};
use crate::services::classifier::{classify_appointment_type, extract_time_preference};

/// Fields read back from the model's analysis. Type and time of day come from the
/// keyword classifier, so only urgency is taken from here.
#[derive(Debug, Deserialize)]
struct IntentAnalysis {
    #[serde(default)]
    urgency: Option<String>,
}

/// Returns `None` when the analysis call fails; the caller greets in that case.
pub async fn extract_intent(llm: &dyn LlmProvider, user_message: &str) -> Option<Intent> {
    let messages = [Message {
        role: Role::User,
        content: user_message.to_string(),
    }];

    let response = match llm.chat(INTENT_ANALYSIS_PROMPT, &messages).await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "intent analysis failed");
            return None;
        }
    };

    Some(Intent {
        appointment_type: Some(classify_appointment_type(user_message)),
        time_preference: extract_time_preference(user_message),
        urgency: parse_urgency(&response),
        reason: user_message.to_string(),
    })
}

fn parse_urgency(response: &str) -> Option<Urgency> {
    let analysis = parse_analysis(response)?;
    match analysis.urgency?.trim().to_lowercase().as_str() {
        "urgent" | "high" | "emergency" => Some(Urgency::Urgent),
        "routine" | "normal" | "low" => Some(Urgency::Routine),
        _ => None,
    }
}

/// Tries the reply as-is, then without a markdown fence, then the outermost `{...}` span.
fn parse_analysis(response: &str) -> Option<IntentAnalysis> {
    let trimmed = response.trim();
    let unfenced = trimmed
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    let braced = match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(open), Some(close)) if open < close => Some(&unfenced[open..=close]),
        _ => None,
    };

    let parsed = [Some(trimmed), Some(unfenced), braced]
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_str::<IntentAnalysis>(candidate).ok());

    if parsed.is_none() {
        tracing::debug!("intent analysis reply was not JSON, urgency unknown");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentType, TimeOfDay};
    use async_trait::async_trait;

    struct FixedLlm(anyhow::Result<String>);

    #[async_trait]
    impl LlmProvider for FixedLlm {
        async fn chat(&self, _system: &str, _messages: &[Message]) -> anyhow::Result<String> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let json = r#"{"appointment_type":"Follow-up","urgency":"urgent","reason":"x"}"#;
        assert_eq!(parse_urgency(json), Some(Urgency::Urgent));
    }

    #[test]
    fn test_parse_markdown_fenced_json() {
        let json = "```json\n{\"urgency\":\"Routine\"}\n```";
        assert_eq!(parse_urgency(json), Some(Urgency::Routine));
    }

    #[test]
    fn test_parse_bare_fence() {
        let json = "```\n{\"urgency\":\"emergency\"}\n```";
        assert_eq!(parse_urgency(json), Some(Urgency::Urgent));
    }

    #[test]
    fn test_parse_embedded_json() {
        let text = "Here you go: {\"urgency\": \"urgent\"} hope that helps";
        assert_eq!(parse_urgency(text), Some(Urgency::Urgent));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_urgency("no structure here"), None);
        assert_eq!(parse_urgency("} backwards {"), None);
    }

    #[tokio::test]
    async fn test_extract_intent_uses_keyword_classification() {
        let llm = FixedLlm(Ok(r#"{"urgency":"routine"}"#.to_string()));
        let intent = extract_intent(&llm, "routine check in the afternoon")
            .await
            .unwrap();
        assert_eq!(intent.appointment_type, Some(AppointmentType::FollowUp));
        assert_eq!(intent.time_preference, Some(TimeOfDay::Afternoon));
        assert_eq!(intent.urgency, Some(Urgency::Routine));
        assert_eq!(intent.reason, "routine check in the afternoon");
    }

    #[tokio::test]
    async fn test_extract_intent_failure_yields_none() {
        let llm = FixedLlm(Err(anyhow::anyhow!("quota exceeded")));
        assert!(extract_intent(&llm, "headache").await.is_none());
    }
}
