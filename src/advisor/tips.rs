//! Financial tips shown after the eligibility verdict.

use super::loans;
use super::state::{EligibilityResult, UserInfo};

/// Maximum number of tips returned.
pub const MAX_TIPS: usize = 5;

/// Returned when we know nothing about the user yet.
pub const FALLBACK_TIPS: [&str; 4] = [
    "Maintain a good credit score by paying bills on time.",
    "Save at least 20-30% of your income regularly.",
    "Avoid taking multiple loans simultaneously.",
    "Create an emergency fund covering 3-6 months of expenses.",
];

pub const GENERAL_TIPS: [&str; 4] = [
    "Pay your EMIs and credit card bills on time to maintain a good credit score.",
    "Try to save at least 20-30% of your income regularly.",
    "Compare offers from multiple lenders before finalizing a loan.",
    "Read all terms and conditions carefully before signing loan documents.",
];

pub const IMPROVE_CREDIT_TIP: &str =
    "Work on improving your credit score by paying bills on time and reducing existing debt.";
pub const INCREASE_INCOME_TIP: &str =
    "Consider ways to increase your income through additional skills or side gigs.";
pub const CLEAR_LOANS_TIP: &str =
    "Try to clear some of your existing loans before applying for a new one.";
pub const IMPROVE_CREDIT_FURTHER_TIP: &str =
    "Improving your credit score further could help you get better interest rates.";
pub const LOAN_INSURANCE_TIP: &str =
    "Consider opting for loan insurance to protect your repayment in case of emergencies.";

/// Build the ordered tip list: general tips, then the loan type's own tips,
/// then tips that depend on the verdict. Truncated to [`MAX_TIPS`].
pub fn tips(
    loan_type: Option<&str>,
    user_info: Option<&UserInfo>,
    eligibility: Option<&EligibilityResult>,
) -> Vec<&'static str> {
    let (Some(loan_type), Some(info)) = (loan_type, user_info) else {
        return FALLBACK_TIPS.to_vec();
    };

    let specific = loans::find(loan_type).map(|p| p.tips).unwrap_or_default();

    GENERAL_TIPS
        .iter()
        .chain(specific)
        .copied()
        .chain(verdict_tips(info, eligibility))
        .take(MAX_TIPS)
        .collect()
}

/// Tips that depend on the verdict. A missing verdict counts as not eligible.
fn verdict_tips(info: &UserInfo, eligibility: Option<&EligibilityResult>) -> Vec<&'static str> {
    // Zero reads as "not provided" for the numeric fields.
    let credit = info.credit_score.filter(|&v| v > 0);
    let income = info.income.filter(|&v| v > 0);
    let mut out = Vec::with_capacity(3);

    if eligibility.is_some_and(|e| e.eligible) {
        if credit.is_some_and(|v| v < 750) {
            out.push(IMPROVE_CREDIT_FURTHER_TIP);
        }
        out.push(LOAN_INSURANCE_TIP);
    } else {
        if credit.is_some_and(|v| v < 700) {
            out.push(IMPROVE_CREDIT_TIP);
        }
        if income.is_some_and(|v| v < 30_000) {
            out.push(INCREASE_INCOME_TIP);
        }
        if info.existing_loans == Some(true) {
            out.push(CLEAR_LOANS_TIP);
        }
    }
    out
}
