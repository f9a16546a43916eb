//! User-facing prompts for each stage and the system prompt handed to the
//! downstream chat model.

use serde::Serialize;

use super::loans;
use super::state::{ConversationStage, ConversationState};
use super::tips::tips;

pub const GREETING_PROMPT: &str = "Hey, what can I help you with today?";
pub const CHECKING_PROMPT: &str =
    "Thanks for providing your information. Let me check your eligibility...";
pub const GENERAL_PROMPT: &str = "How else can I assist you today?";
pub const TIPS_HEADER: &str = "\n\nHere are some financial tips that might help:\n\n";

/// The message to show the user for the state's current stage.
///
/// For `financial_tips` this includes the verdict and the numbered tips.
pub fn prompt_for(state: &ConversationState) -> String {
    match state.stage {
        ConversationStage::Greeting => GREETING_PROMPT.to_string(),
        ConversationStage::LoanType => {
            let names: Vec<&str> = loans::names().collect();
            format!(
                "What type of loan are you interested in? For example: {}, or {}?",
                names[..names.len() - 1].join(", "),
                names[names.len() - 1]
            )
        }
        ConversationStage::UserInfo => format!(
            "I'll help you check eligibility for a {}. To provide an accurate assessment, I need some information:\n\
             1. What's your monthly income?\n\
             2. What's your age?\n\
             3. What's your occupation?\n\
             4. Do you know your credit score? (Approximate is fine)\n\
             5. Do you have any existing loans?",
            loan_label(state)
        ),
        ConversationStage::EligibilityCheck => CHECKING_PROMPT.to_string(),
        ConversationStage::FinancialTips => {
            let mut prompt = verdict_message(state);
            let tips = tips(
                state.loan_type.as_deref(),
                state.user_info.as_ref(),
                state.eligibility_result.as_ref(),
            );
            prompt.push_str(TIPS_HEADER);
            let numbered: Vec<String> = tips
                .iter()
                .enumerate()
                .map(|(i, tip)| format!("{}. {}", i + 1, tip))
                .collect();
            prompt.push_str(&numbered.join("\n"));
            prompt
        }
        ConversationStage::General => GENERAL_PROMPT.to_string(),
    }
}

fn loan_label(state: &ConversationState) -> &str {
    state.loan_type.as_deref().unwrap_or("loan")
}

fn verdict_message(state: &ConversationState) -> String {
    let loan = loan_label(state);
    match &state.eligibility_result {
        Some(result) if result.eligible => format!(
            "Congratulations! Based on the information provided, you are eligible for a {loan} up to ₹{}. \
             The approximate interest rate would be {}%. \
             Would you like some financial tips to improve your loan terms?",
            format_rupees(result.max_amount.unwrap_or(0)),
            result
                .interest_rate
                .map(|r| r.normalize().to_string())
                .unwrap_or_default(),
        ),
        other => format!(
            "Based on the information provided, you may not be eligible for a {loan} at this time. {} \
             Would you like some financial tips to improve your eligibility?",
            other.as_ref().and_then(|r| r.reason.as_deref()).unwrap_or(""),
        ),
    }
}

/// Format an amount with comma thousands separators: 1200000 → "1,200,000".
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── System prompt ───────────────────────────────────────────────────────

/// How the user seems to feel, as judged by sentiment analysis.
///
/// Only ever changes the wording of the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// User seems frustrated or concerned.
    Supportive,
    #[default]
    Neutral,
    /// User seems positive and engaged.
    Enthusiastic,
}

impl Tone {
    /// Map a sentiment score in [-1, 1] to a tone.
    pub fn from_score(score: f64) -> Self {
        if score < -0.5 {
            Self::Supportive
        } else if score > 0.5 {
            Self::Enthusiastic
        } else {
            Self::Neutral
        }
    }

    fn instruction(&self) -> Option<&'static str> {
        match self {
            Self::Supportive => Some(
                "The user seems frustrated or concerned. Be extra supportive and reassuring in your response.",
            ),
            Self::Enthusiastic => {
                Some("The user seems positive and engaged. Match their enthusiasm in your response.")
            }
            Self::Neutral => None,
        }
    }
}

/// Build the system prompt for the chat model.
///
/// Embeds the state as JSON and the scripted next prompt so the model can
/// steer the conversation. `language` is the display name ("hindi"); English
/// adds no instruction.
pub fn system_prompt(
    state: &ConversationState,
    next_prompt: &str,
    language: &str,
    tone: Tone,
) -> String {
    let mut prompt = String::from("You are a helpful, friendly loan advisor assistant. ");

    if !language.eq_ignore_ascii_case("english") {
        prompt.push_str(&format!("Respond in {language}. "));
    }

    let state_json = serde_json::to_string(state).unwrap_or_else(|e| {
        tracing::warn!("Failed to serialize conversation state: {}", e);
        "{}".to_string()
    });

    prompt.push_str(&format!(
        "\n\
You specialize in:
1. Loan eligibility assessment - asking relevant questions about income, credit score, and financial situation
2. Loan application guidance - explaining required documents and steps
3. Financial literacy tips - providing simple advice to improve financial health

Keep your responses concise, friendly, and easy to understand. Avoid using complex financial jargon.
If asked about specific loan products or rates, clarify that you provide general guidance only and recommend speaking with an actual loan officer for specific products.

Current conversation state: {state_json}

Next prompt to guide the conversation: {next_prompt}"
    ));

    if let Some(instruction) = tone.instruction() {
        prompt.push(' ');
        prompt.push_str(instruction);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::state::{EligibilityResult, UserInfo};
    use rust_decimal_macros::dec;

    fn state_at(stage: ConversationStage) -> ConversationState {
        ConversationState {
            stage,
            loan_type: Some("home loan".into()),
            ..Default::default()
        }
    }

    fn tips_state(result: EligibilityResult, credit_score: u32) -> ConversationState {
        ConversationState {
            stage: ConversationStage::FinancialTips,
            loan_type: Some("personal loan".into()),
            user_info: Some(UserInfo {
                income: Some(50000),
                age: Some(30),
                occupation: Some("clerk".into()),
                credit_score: Some(credit_score),
                existing_loans: Some(false),
            }),
            eligibility_result: Some(result),
        }
    }

    #[test]
    fn fixed_stage_prompts() {
        assert_eq!(prompt_for(&ConversationState::new()), GREETING_PROMPT);
        assert_eq!(
            prompt_for(&state_at(ConversationStage::EligibilityCheck)),
            CHECKING_PROMPT
        );
        assert_eq!(prompt_for(&state_at(ConversationStage::General)), GENERAL_PROMPT);
    }

    #[test]
    fn loan_type_prompt_lists_products() {
        let prompt = prompt_for(&state_at(ConversationStage::LoanType));
        assert_eq!(
            prompt,
            "What type of loan are you interested in? For example: home loan, personal loan, \
             student loan, auto loan, or business loan?"
        );
    }

    #[test]
    fn user_info_prompt_names_loan_and_asks_five_questions() {
        let prompt = prompt_for(&state_at(ConversationStage::UserInfo));
        assert!(prompt.starts_with("I'll help you check eligibility for a home loan."));
        for n in 1..=5 {
            assert!(prompt.contains(&format!("\n{n}. ")), "missing question {n}");
        }
    }

    #[test]
    fn approved_prompt_includes_amount_rate_and_tips() {
        let state = tips_state(EligibilityResult::approved(1_200_000, dec!(14)), 650);
        let prompt = prompt_for(&state);
        assert!(prompt.starts_with("Congratulations!"));
        assert!(prompt.contains("eligible for a personal loan up to ₹1,200,000."));
        assert!(prompt.contains("interest rate would be 14%."));
        assert!(prompt.contains(TIPS_HEADER));
        assert!(prompt.contains("\n1. Pay your EMIs"));
        assert!(prompt.contains("\n5. Avoid taking multiple personal loans"));
        assert!(!prompt.contains("\n6. "));
    }

    #[test]
    fn fractional_rate_keeps_decimals() {
        let state = tips_state(EligibilityResult::approved(100, dec!(7.5)), 760);
        assert!(prompt_for(&state).contains("would be 7.5%."));
    }

    #[test]
    fn rejected_prompt_includes_reason() {
        let state = tips_state(EligibilityResult::rejected("Too young."), 700);
        let prompt = prompt_for(&state);
        assert!(prompt.starts_with(
            "Based on the information provided, you may not be eligible for a personal loan at this time. Too young."
        ));
        assert!(prompt.contains("improve your eligibility?"));
    }

    #[test]
    fn rupee_grouping() {
        assert_eq!(format_rupees(0), "0");
        assert_eq!(format_rupees(999), "999");
        assert_eq!(format_rupees(15000), "15,000");
        assert_eq!(format_rupees(7_200_000), "7,200,000");
    }

    #[test]
    fn tone_thresholds() {
        assert_eq!(Tone::from_score(-0.9), Tone::Supportive);
        assert_eq!(Tone::from_score(-0.5), Tone::Neutral);
        assert_eq!(Tone::from_score(0.0), Tone::Neutral);
        assert_eq!(Tone::from_score(0.5), Tone::Neutral);
        assert_eq!(Tone::from_score(0.51), Tone::Enthusiastic);
    }

    #[test]
    fn system_prompt_english_neutral() {
        let state = ConversationState::new();
        let prompt = system_prompt(&state, GREETING_PROMPT, "english", Tone::Neutral);
        assert!(prompt.starts_with("You are a helpful, friendly loan advisor assistant."));
        assert!(!prompt.contains("Respond in"));
        assert!(prompt.contains(r#"Current conversation state: {"stage":"greeting"}"#));
        assert!(prompt.ends_with(&format!("Next prompt to guide the conversation: {GREETING_PROMPT}")));
    }

    #[test]
    fn system_prompt_language_and_tone() {
        let state = state_at(ConversationStage::LoanType);
        let prompt = system_prompt(&state, "next", "hindi", Tone::Supportive);
        assert!(prompt.contains("Respond in hindi."));
        assert!(prompt.contains(r#""loanType":"home loan""#));
        assert!(prompt.ends_with("Be extra supportive and reassuring in your response."));

        let prompt = system_prompt(&state, "next", "English", Tone::Enthusiastic);
        assert!(!prompt.contains("Respond in"));
        assert!(prompt.contains("Match their enthusiasm"));
    }
}
