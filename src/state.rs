use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::calendly::{AvailabilityProvider, BookingProvider};
use crate::services::conversation::ConversationAgent;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
    pub availability: Box<dyn AvailabilityProvider>,
    pub booking: Box<dyn BookingProvider>,
    pub agent: ConversationAgent,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        llm: Box<dyn LlmProvider>,
        availability: Box<dyn AvailabilityProvider>,
        booking: Box<dyn BookingProvider>,
    ) -> Self {
        let agent = ConversationAgent::new(config.history_window);
        Self {
            config,
            llm,
            availability,
            booking,
            agent,
        }
    }
}
