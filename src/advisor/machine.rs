//! The conversation state machine: one user message in, next state out.
//!
//! `advance` is a pure function of `(message, state)`. It never fails; a
//! message with nothing useful in it leaves the state where it was.

use tracing::debug;

use super::eligibility::evaluate;
use super::extract::{PatternExtractor, ProfileExtractor};
use super::loans;
use super::state::{ConversationStage, ConversationState};

/// Words that show the user wants to talk about borrowing.
const LOAN_INTEREST_KEYWORDS: &[&str] = &["loan", "borrow", "finance", "credit"];

/// Drives the stage progression, using `E` to read profile fields.
#[derive(Debug, Clone, Default)]
pub struct ConversationMachine<E = PatternExtractor> {
    extractor: E,
}

impl ConversationMachine {
    pub fn new() -> Self {
        Self {
            extractor: PatternExtractor::new(),
        }
    }
}

impl<E: ProfileExtractor> ConversationMachine<E> {
    /// Use a different extractor for the `user_info` stage.
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    /// Apply one user message to `state` and return the next state.
    pub fn advance(&self, message: &str, state: &ConversationState) -> ConversationState {
        let next = match state.stage {
            ConversationStage::Greeting => self.on_greeting(message, state),
            ConversationStage::LoanType => self.on_loan_type(message, state),
            ConversationStage::UserInfo => self.on_user_info(message, state),
            ConversationStage::EligibilityCheck => self.run_eligibility_check(state),
            ConversationStage::FinancialTips => state.with_stage(ConversationStage::General),
            ConversationStage::General => state.clone(),
        };

        if next.stage != state.stage {
            debug!(from = %state.stage, to = %next.stage, "Conversation stage advanced");
        }
        next
    }

    fn on_greeting(&self, message: &str, state: &ConversationState) -> ConversationState {
        let lower = message.to_lowercase();
        if LOAN_INTEREST_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            state.with_stage(ConversationStage::LoanType)
        } else {
            state.clone()
        }
    }

    fn on_loan_type(&self, message: &str, state: &ConversationState) -> ConversationState {
        match loans::detect(message) {
            Some(product) => ConversationState {
                loan_type: Some(product.name.to_string()),
                ..state.with_stage(ConversationStage::UserInfo)
            },
            None => state.clone(),
        }
    }

    fn on_user_info(&self, message: &str, state: &ConversationState) -> ConversationState {
        let extracted = self.extractor.extract(message);
        if extracted.is_empty() {
            debug!("No profile fields found in message");
        }
        let merged = state
            .user_info
            .clone()
            .unwrap_or_default()
            .merged_with(&extracted);

        if !merged.has_required_fields() {
            return ConversationState {
                user_info: Some(merged),
                ..state.clone()
            };
        }

        let checking = ConversationState {
            user_info: Some(merged.with_defaults()),
            ..state.with_stage(ConversationStage::EligibilityCheck)
        };
        // The check stage is transient: evaluate in the same turn.
        self.run_eligibility_check(&checking)
    }

    fn run_eligibility_check(&self, state: &ConversationState) -> ConversationState {
        let result = evaluate(state.loan_type.as_deref(), state.user_info.as_ref());
        debug!(
            loan_type = ?state.loan_type,
            eligible = result.eligible,
            max_amount = ?result.max_amount,
            "Eligibility evaluated"
        );
        ConversationState {
            eligibility_result: Some(result),
            ..state.with_stage(ConversationStage::FinancialTips)
        }
    }
}

/// Advance `state` by one message using the default pattern extractor.
pub fn advance(message: &str, state: &ConversationState) -> ConversationState {
    ConversationMachine::new().advance(message, state)
}
