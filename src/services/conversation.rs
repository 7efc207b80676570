use std::fmt::Write;
use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::models::{ConversationTurn, Intent, NextStep, Role, SlotQuery, TimeOfDay, TimeSlot};
use crate::services::ai::intent::extract_intent;
use crate::services::ai::prompts::{
    APOLOGY_MESSAGE, CONFIRMATION_PROMPT, SCHEDULING_AGENT_PROMPT, SLOT_SUGGESTION_PROMPT,
};
use crate::services::ai::{LlmProvider, Message};
use crate::services::classifier::DEFAULT_APPOINTMENT_TYPE;
use crate::services::slots::filter_slots;
use crate::state::AppState;

/// Maximum number of slots returned with a chat reply.
pub const SLOTS_PER_REPLY: usize = 3;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Holds the running transcript. The transcript only grows; prompts see its tail.
pub struct ConversationAgent {
    history: Mutex<Vec<ConversationTurn>>,
    history_window: usize,
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub intent: Option<Intent>,
    pub available_slots: Vec<TimeSlot>,
    pub next_step: NextStep,
}

impl ConversationAgent {
    pub fn new(history_window: usize) -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            history_window,
        }
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    fn record(&self, role: Role, content: &str) {
        if let Ok(mut history) = self.history.lock() {
            history.push(ConversationTurn::new(role, content));
        }
    }

    fn recent_messages(&self) -> Vec<Message> {
        let Ok(history) = self.history.lock() else {
            return Vec::new();
        };
        let skip = history.len().saturating_sub(self.history_window);
        history[skip..].iter().map(Message::from).collect()
    }

    /// Asks the model to phrase the reply. Never fails: a model error becomes an apology.
    pub async fn generate_response(
        &self,
        llm: &dyn LlmProvider,
        user_message: &str,
        slots: &[TimeSlot],
        intent: Option<&Intent>,
        next_step: NextStep,
    ) -> String {
        self.record(Role::User, user_message);

        let system = build_system_prompt(slots, intent, next_step);
        let messages = self.recent_messages();

        let reply = match llm.chat(&system, &messages).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "response generation failed");
                APOLOGY_MESSAGE.to_string()
            }
        };

        self.record(Role::Assistant, &reply);
        reply
    }
}

fn build_system_prompt(slots: &[TimeSlot], intent: Option<&Intent>, next_step: NextStep) -> String {
    let mut context = String::new();
    if !slots.is_empty() {
        context.push_str("Available time slots:\n");
        for slot in slots {
            let _ = writeln!(
                context,
                "- {} to {}",
                slot.start_time.to_rfc3339(),
                slot.end_time.to_rfc3339()
            );
        }
    }
    if let Some(intent) = intent {
        let kind = intent
            .appointment_type
            .map(|t| t.name())
            .unwrap_or("undetermined");
        let when = intent
            .time_preference
            .map(|t| t.as_str())
            .unwrap_or("none given");
        let _ = writeln!(
            context,
            "Patient context: appointment type {kind}, time preference {when}, reason: {}",
            intent.reason
        );
    }

    let mut prompt = format!(
        "{SCHEDULING_AGENT_PROMPT}\n\nCurrent conversation context:\n{context}\nNext step: {}",
        next_step.as_str()
    );
    if !slots.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(SLOT_SUGGESTION_PROMPT);
    }
    if next_step == NextStep::CollectPatientInfo {
        prompt.push_str("\n\n");
        prompt.push_str(CONFIRMATION_PROMPT);
    }
    prompt
}

/// Runs one chat turn: classify, look up slots when a time of day was given,
/// pick the next step, then phrase the reply.
pub async fn process_chat(state: &AppState, content: &str) -> ChatOutcome {
    let intent = extract_intent(state.llm.as_ref(), content).await;

    let slots = match intent.as_ref() {
        Some(i) => match i.time_preference {
            Some(pref) => lookup_slots(state, i, pref).await,
            None => Vec::new(),
        },
        None => Vec::new(),
    };

    let next_step = NextStep::determine(intent.as_ref(), slots.len());

    tracing::info!(
        appointment_type = ?intent.as_ref().and_then(|i| i.appointment_type),
        time_preference = ?intent.as_ref().and_then(|i| i.time_preference),
        slots = slots.len(),
        next_step = next_step.as_str(),
        "processing chat message"
    );

    let response = state
        .agent
        .generate_response(state.llm.as_ref(), content, &slots, intent.as_ref(), next_step)
        .await;

    ChatOutcome {
        response,
        intent,
        available_slots: slots.into_iter().take(SLOTS_PER_REPLY).collect(),
        next_step,
    }
}

async fn lookup_slots(state: &AppState, intent: &Intent, preference: TimeOfDay) -> Vec<TimeSlot> {
    let appointment_type = intent.appointment_type.unwrap_or(DEFAULT_APPOINTMENT_TYPE);
    let today = Utc::now().date_naive();
    let end = today + Duration::days(i64::from(state.config.availability_window_days));
    let query = SlotQuery {
        start: today.format(DATE_FORMAT).to_string(),
        end: end.format(DATE_FORMAT).to_string(),
        event_type: state.config.event_types.for_type(appointment_type).to_string(),
    };

    match state.availability.available_slots(&query).await {
        Ok(slots) => {
            let open: Vec<TimeSlot> = slots.into_iter().filter(|s| s.is_available).collect();
            filter_slots(&open, Some(preference))
        }
        Err(e) => {
            tracing::warn!(error = %e, event_type = %query.event_type, "availability lookup failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Arc;

    /// Records every message list it is handed and echoes a fixed reply.
    struct RecordingLlm {
        seen: Arc<Mutex<Vec<Vec<Message>>>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn chat(&self, _system: &str, messages: &[Message]) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            if self.fail {
                anyhow::bail!("model offline");
            }
            Ok("reply".to_string())
        }
    }

    #[tokio::test]
    async fn test_prompt_sees_only_history_window() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let llm = RecordingLlm {
            seen: Arc::clone(&seen),
            fail: false,
        };
        let agent = ConversationAgent::new(5);

        for i in 0..4 {
            agent
                .generate_response(&llm, &format!("msg {i}"), &[], None, NextStep::Greet)
                .await;
        }

        assert_eq!(agent.history().len(), 8);
        let calls = seen.lock().unwrap();
        let last = calls.last().unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last.last().unwrap().content, "msg 3");
        assert_eq!(last.last().unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_model_failure_becomes_apology() {
        let llm = RecordingLlm {
            seen: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        };
        let agent = ConversationAgent::new(5);
        let reply = agent
            .generate_response(&llm, "hello", &[], None, NextStep::Greet)
            .await;
        assert_eq!(reply, APOLOGY_MESSAGE);

        let history = agent.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, APOLOGY_MESSAGE);
    }

    #[test]
    fn test_system_prompt_adds_step_guidance() {
        let intent = Intent {
            appointment_type: Some(AppointmentType::PhysicalExam),
            time_preference: Some(TimeOfDay::Morning),
            urgency: None,
            reason: "annual physical".to_string(),
        };
        let start: DateTime<Utc> = "2025-06-16T09:00:00Z".parse().unwrap();
        let slots = vec![TimeSlot {
            start_time: start,
            end_time: start + Duration::minutes(45),
            is_available: true,
        }];

        let prompt = build_system_prompt(&slots, Some(&intent), NextStep::CollectPatientInfo);
        assert!(prompt.contains("2025-06-16T09:00:00+00:00"));
        assert!(prompt.contains("appointment type Physical Exam"));
        assert!(prompt.contains(SLOT_SUGGESTION_PROMPT));
        assert!(prompt.contains(CONFIRMATION_PROMPT));

        let bare = build_system_prompt(&[], None, NextStep::Greet);
        assert!(!bare.contains(SLOT_SUGGESTION_PROMPT));
        assert!(!bare.contains(CONFIRMATION_PROMPT));
        assert!(bare.contains("Next step: greet"));
    }
}
