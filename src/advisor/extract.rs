//! Best-effort profile extraction from free-form user text.
//!
//! This is a heuristic, not a parser. Each field is matched by a short list
//! of permissive regexes tried in order; the first that matches supplies the
//! value. Phrasing it does not anticipate simply leaves the field unset, and
//! the conversation asks again.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::state::UserInfo;

/// Pulls whatever profile fields it can find out of one message.
pub trait ProfileExtractor: Send + Sync {
    fn extract(&self, message: &str) -> UserInfo;
}

/// Which profile field a pattern fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Income,
    Age,
    Occupation,
    CreditScore,
    ExistingLoans,
}

/// A single extraction pattern. Capture group 1 holds the value.
struct FieldPattern {
    field: Field,
    regex: Regex,
}

fn pattern(field: Field, re: &str) -> FieldPattern {
    FieldPattern {
        field,
        regex: Regex::new(re).unwrap(),
    }
}

static PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        pattern(Field::Income, r"(?i)income.*?([0-9][[0-9],]*)"),
        pattern(Field::Income, r"(?i)([0-9][[0-9],]*).*?income"),
        pattern(Field::Income, r"(?i)([0-9][[0-9],]*).*?month"),
        pattern(Field::Age, r"(?i)age.*?([0-9]+)"),
        pattern(Field::Age, r"(?i)([0-9]+).*?years? old"),
        pattern(Field::Occupation, r"(?i)occupation.*?:?\s*([a-zA-Z ]+)"),
        pattern(Field::Occupation, r"(?i)(?:i am|i'm) (?:an?|the) ([a-zA-Z ]+)"),
        pattern(Field::CreditScore, r"(?i)credit score.*?([0-9]+)"),
        pattern(Field::CreditScore, r"(?i)([0-9]+).*?credit score"),
        pattern(Field::ExistingLoans, r"(?i)existing loans?.*?(yes|no)"),
        pattern(Field::ExistingLoans, r"(?i)(yes|no).*?existing loans?"),
    ]
});

/// Regex-driven [`ProfileExtractor`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// First capture for `field`, trying its patterns in order.
    fn capture<'m>(&self, field: Field, message: &'m str) -> Option<&'m str> {
        PATTERNS
            .iter()
            .filter(|p| p.field == field)
            .find_map(|p| p.regex.captures(message))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl ProfileExtractor for PatternExtractor {
    fn extract(&self, message: &str) -> UserInfo {
        let info = UserInfo {
            income: self
                .capture(Field::Income, message)
                .and_then(|raw| raw.replace(',', "").parse().ok()),
            age: self
                .capture(Field::Age, message)
                .and_then(|raw| raw.parse().ok()),
            occupation: self
                .capture(Field::Occupation, message)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            credit_score: self
                .capture(Field::CreditScore, message)
                .and_then(|raw| raw.parse().ok()),
            existing_loans: self
                .capture(Field::ExistingLoans, message)
                .map(|raw| raw.eq_ignore_ascii_case("yes")),
        };
        debug!(
            income = ?info.income,
            age = ?info.age,
            occupation = ?info.occupation,
            credit_score = ?info.credit_score,
            existing_loans = ?info.existing_loans,
            "Extracted profile fields"
        );
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(message: &str) -> UserInfo {
        PatternExtractor::new().extract(message)
    }

    #[test]
    fn all_patterns_compile() {
        assert_eq!(PATTERNS.len(), 11);
    }

    #[test]
    fn extracts_full_labelled_answer() {
        let info = extract(
            "Income 50,000, age 30, occupation: engineer, credit score 750, existing loans: no",
        );
        assert_eq!(info.income, Some(50000));
        assert_eq!(info.age, Some(30));
        assert_eq!(info.occupation.as_deref(), Some("engineer"));
        assert_eq!(info.credit_score, Some(750));
        assert_eq!(info.existing_loans, Some(false));
    }

    #[test]
    fn income_from_per_month_phrase() {
        let info = extract("I make 45000 per month");
        assert_eq!(info.income, Some(45000));
    }

    #[test]
    fn income_number_before_keyword() {
        let info = extract("80,000 is my income");
        assert_eq!(info.income, Some(80000));
    }

    #[test]
    fn age_from_years_old() {
        let info = extract("I'm 34 years old");
        assert_eq!(info.age, Some(34));
    }

    #[test]
    fn occupation_from_i_am_a() {
        assert_eq!(
            extract("I am a software engineer").occupation.as_deref(),
            Some("software engineer")
        );
        assert_eq!(extract("i'm an architect").occupation.as_deref(), Some("architect"));
    }

    #[test]
    fn credit_score_number_before_keyword() {
        let info = extract("about 680 is my credit score");
        assert_eq!(info.credit_score, Some(680));
    }

    #[test]
    fn existing_loans_yes() {
        assert_eq!(extract("existing loans? yes, one").existing_loans, Some(true));
        assert_eq!(extract("Yes I have an existing loan").existing_loans, Some(true));
    }

    #[test]
    fn nothing_found_leaves_fields_unset() {
        let info = extract("hello there");
        assert_eq!(info, UserInfo::default());
    }

    #[test]
    fn overflowing_number_is_ignored() {
        let info = extract("income 99999999999999999999999");
        assert_eq!(info.income, None);
    }

    #[test]
    fn only_ascii_digits_are_read() {
        let info = extract("age (उम्र) ३० - I am 30 years old");
        assert_eq!(info.age, Some(30));

        let info = extract("income ५०,००० i.e. 50000 per month, credit score ७२० or 720");
        assert_eq!(info.income, Some(50000));
        assert_eq!(info.credit_score, Some(720));
    }

    #[test]
    fn first_pattern_takes_priority() {
        // The "income" pattern wins over the "month" pattern.
        let info = extract("12 month history, income 60000");
        assert_eq!(info.income, Some(60000));
    }
}
