//! Loan eligibility rules.
//!
//! Checks run in a fixed order and the first failure decides the verdict:
//! age, then credit score, then income. Only an applicant who passes all
//! three gets an amount and a rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::loans::{self, FALLBACK_MULTIPLIER, FALLBACK_RATE};
use super::state::{EligibilityResult, UserInfo};

pub const MIN_AGE: u32 = 21;
pub const MAX_AGE: u32 = 65;
pub const MIN_CREDIT_SCORE: u32 = 650;
/// Minimum monthly income, rupees.
pub const MIN_MONTHLY_INCOME: u64 = 15_000;
/// Scores below this pay the low-score surcharge.
pub const SURCHARGE_SCORE_THRESHOLD: u32 = 700;

/// Occupations treated as stable income.
const STABLE_OCCUPATIONS: &[&str] = &[
    "government",
    "doctor",
    "engineer",
    "teacher",
    "professor",
    "banker",
];
const STABLE_MULTIPLIER_BONUS: u64 = 12;
const STABLE_RATE_DISCOUNT: Decimal = dec!(0.5);

pub const INSUFFICIENT_INFO: &str = "Insufficient information provided.";
pub const AGE_REASON: &str =
    "Age requirements not met. Most loans require applicants to be between 21 and 65 years old.";
pub const CREDIT_REASON: &str =
    "Credit score is below the minimum requirement. Most lenders require a score of at least 650.";

/// Whether an occupation string names a stable job.
pub fn is_stable_occupation(occupation: &str) -> bool {
    let lower = occupation.to_lowercase();
    STABLE_OCCUPATIONS.iter().any(|o| lower.contains(o))
}

/// Decide whether the applicant qualifies for `loan_type` and on what terms.
///
/// Total: missing inputs produce a rejection, never a panic. Missing
/// profile fields read as zero, so an evaluation without an age fails the
/// age check.
pub fn evaluate(loan_type: Option<&str>, user_info: Option<&UserInfo>) -> EligibilityResult {
    let (Some(loan_type), Some(info)) = (loan_type, user_info) else {
        return EligibilityResult::rejected(INSUFFICIENT_INFO);
    };

    let income = info.income.unwrap_or(0);
    let age = info.age.unwrap_or(0);
    let credit_score = info.credit_score.unwrap_or(0);
    let existing_loans = info.existing_loans.unwrap_or(false);
    let occupation = info.occupation.as_deref().unwrap_or("");

    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return EligibilityResult::rejected(AGE_REASON);
    }

    if credit_score < MIN_CREDIT_SCORE {
        return EligibilityResult::rejected(CREDIT_REASON);
    }

    let (mut multiplier, mut rate) = match loans::find(loan_type) {
        Some(product) => {
            let mut rate = product.base_rate;
            if existing_loans {
                rate += product.existing_loans_surcharge;
            }
            if credit_score < SURCHARGE_SCORE_THRESHOLD {
                rate += product.low_score_surcharge;
            }
            (product.multiplier, rate)
        }
        None => (FALLBACK_MULTIPLIER, FALLBACK_RATE),
    };

    if is_stable_occupation(occupation) {
        multiplier += STABLE_MULTIPLIER_BONUS;
        rate -= STABLE_RATE_DISCOUNT;
    }

    if income < MIN_MONTHLY_INCOME {
        return EligibilityResult::rejected(format!(
            "Your income is below the minimum requirement of ₹{} per month for this loan type.",
            super::prompts::format_rupees(MIN_MONTHLY_INCOME)
        ));
    }

    EligibilityResult::approved(income.saturating_mul(multiplier), rate)
}
