//! Conversation state machine types: which stage the chat is in and what the
//! user has told us so far.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The stages of the advisory conversation.
///
/// Progresses linearly: Greeting → LoanType → UserInfo → EligibilityCheck →
/// FinancialTips → General.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    Greeting,
    LoanType,
    UserInfo,
    EligibilityCheck,
    FinancialTips,
    General,
}

impl ConversationStage {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// `General` may transition to itself since it absorbs every message.
    pub fn can_transition_to(&self, target: ConversationStage) -> bool {
        use ConversationStage::*;
        matches!(
            (self, target),
            (Greeting, LoanType)
                | (LoanType, UserInfo)
                | (UserInfo, EligibilityCheck)
                | (EligibilityCheck, FinancialTips)
                | (FinancialTips, General)
                | (General, General)
        )
    }

    /// Whether a state in this stage carries an eligibility verdict.
    pub fn has_verdict(&self) -> bool {
        *self >= Self::FinancialTips
    }
}

impl Default for ConversationStage {
    fn default() -> Self {
        Self::Greeting
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::LoanType => "loan_type",
            Self::UserInfo => "user_info",
            Self::EligibilityCheck => "eligibility_check",
            Self::FinancialTips => "financial_tips",
            Self::General => "general",
        };
        write!(f, "{s}")
    }
}

/// Profile fields accumulated across turns.
///
/// Every field is optional; the extractor fills in what it finds and
/// [`UserInfo::merged_with`] layers newer answers over older ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Monthly income in rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_loans: Option<bool>,
}

impl UserInfo {
    /// Overlay `newer` on top of `self`. Fields present in `newer` win;
    /// fields it lacks keep their previous value.
    pub fn merged_with(&self, newer: &UserInfo) -> UserInfo {
        UserInfo {
            income: newer.income.or(self.income),
            age: newer.age.or(self.age),
            occupation: newer.occupation.clone().or_else(|| self.occupation.clone()),
            credit_score: newer.credit_score.or(self.credit_score),
            existing_loans: newer.existing_loans.or(self.existing_loans),
        }
    }

    /// Income, age and occupation are all known. Zero counts as unknown.
    pub fn has_required_fields(&self) -> bool {
        self.income.is_some_and(|v| v > 0)
            && self.age.is_some_and(|v| v > 0)
            && self.occupation.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Fill in the fields the user never mentioned with their assumed values:
    /// a moderate credit score of 700 and no existing loans.
    pub fn with_defaults(mut self) -> UserInfo {
        if self.credit_score.is_none_or(|v| v == 0) {
            self.credit_score = Some(DEFAULT_CREDIT_SCORE);
        }
        if self.existing_loans.is_none() {
            self.existing_loans = Some(false);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == UserInfo::default()
    }
}

/// Credit score assumed when the user does not give one.
pub const DEFAULT_CREDIT_SCORE: u32 = 700;

/// Outcome of the eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Maximum loan amount in rupees (eligible only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<u64>,
    /// Annual interest rate in percent, two decimals (eligible only).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub interest_rate: Option<Decimal>,
    /// Why the user is not eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EligibilityResult {
    pub fn approved(max_amount: u64, interest_rate: Decimal) -> Self {
        Self {
            eligible: true,
            max_amount: Some(max_amount),
            interest_rate: Some(interest_rate.round_dp(2)),
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            max_amount: None,
            interest_rate: None,
            reason: Some(reason.into()),
        }
    }
}

/// The whole conversation state, echoed between client and server each turn.
///
/// Field names follow the widget's JSON (`loanType`, `userInfo`,
/// `eligibilityResult`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub stage: ConversationStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_result: Option<EligibilityResult>,
}

impl ConversationState {
    /// Fresh state for a new chat session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of `self` moved to `stage`.
    ///
    /// Logs a warning if the move is not a legal transition; the move is
    /// still applied so callers stay total.
    pub fn with_stage(&self, stage: ConversationStage) -> Self {
        if !self.stage.can_transition_to(stage) {
            tracing::warn!(from = %self.stage, to = %stage, "Unexpected stage transition");
        }
        Self {
            stage,
            ..self.clone()
        }
    }
}
