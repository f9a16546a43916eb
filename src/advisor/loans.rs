//! Loan product table: keywords that select each product, its pricing, and
//! the product-specific advice shown after the eligibility check.
//!
//! Order matters. `PRODUCTS` is scanned front to back and the first product
//! whose keywords appear in the message wins.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Static description of one loan product.
#[derive(Debug)]
pub struct LoanProduct {
    /// Canonical name stored in `ConversationState::loan_type`.
    pub name: &'static str,
    /// Lowercase substrings that select this product.
    pub keywords: &'static [&'static str],
    /// Maximum amount as a multiple of monthly income.
    pub multiplier: u64,
    /// Base annual interest rate, percent.
    pub base_rate: Decimal,
    /// Added when the applicant already has loans.
    pub existing_loans_surcharge: Decimal,
    /// Added when the credit score is below 700.
    pub low_score_surcharge: Decimal,
    pub tips: &'static [&'static str],
}

pub static PRODUCTS: [LoanProduct; 5] = [
    LoanProduct {
        name: "home loan",
        keywords: &["home", "house", "mortgage"],
        multiplier: 60,
        base_rate: dec!(7.5),
        existing_loans_surcharge: dec!(0.5),
        low_score_surcharge: dec!(1),
        tips: &[
            "Save for a larger down payment to reduce your loan amount and EMI.",
            "Consider a joint home loan with a family member to increase eligibility.",
            "Check for PMAY or other government subsidies you might be eligible for.",
            "Opt for a longer tenure to reduce EMI burden, but be aware it increases total interest paid.",
        ],
    },
    LoanProduct {
        name: "personal loan",
        keywords: &["personal"],
        multiplier: 24,
        base_rate: dec!(12),
        existing_loans_surcharge: dec!(1),
        low_score_surcharge: dec!(2),
        tips: &[
            "Avoid taking multiple personal loans as they carry higher interest rates.",
            "Consider debt consolidation if you have multiple high-interest loans.",
            "Prepay the loan whenever you have surplus funds to save on interest.",
            "Maintain a credit utilization ratio below 30% to improve your credit score.",
        ],
    },
    LoanProduct {
        name: "student loan",
        keywords: &["student", "education"],
        multiplier: 36,
        base_rate: dec!(8),
        existing_loans_surcharge: dec!(0.5),
        low_score_surcharge: dec!(1),
        tips: &[
            "Look for education loans with moratorium periods until you complete your education.",
            "Check for government subsidies on education loans for certain courses.",
            "Start repaying interest during your study period if possible to reduce overall burden.",
            "Research scholarship opportunities to reduce your loan requirement.",
        ],
    },
    LoanProduct {
        name: "auto loan",
        keywords: &["auto", "car", "vehicle"],
        multiplier: 18,
        base_rate: dec!(9),
        existing_loans_surcharge: dec!(0.5),
        low_score_surcharge: dec!(1),
        tips: &[
            "Make a larger down payment to reduce the loan amount and interest paid.",
            "Choose a loan tenure that balances affordable EMIs with total interest paid.",
            "Consider pre-owned certified vehicles to reduce your loan requirement.",
            "Check if your employer offers any vehicle loan schemes at preferential rates.",
        ],
    },
    LoanProduct {
        name: "business loan",
        keywords: &["business"],
        multiplier: 36,
        base_rate: dec!(11),
        existing_loans_surcharge: dec!(1),
        low_score_surcharge: dec!(2),
        tips: &[
            "Prepare a detailed business plan to improve your loan approval chances.",
            "Consider government schemes like MUDRA loans for small businesses.",
            "Maintain separate business and personal accounts for better financial management.",
            "Explore secured business loans for lower interest rates if you have collateral.",
        ],
    },
];

/// Pricing used for a loan type that is not in the table. No surcharges.
pub const FALLBACK_MULTIPLIER: u64 = 24;
pub const FALLBACK_RATE: Decimal = dec!(10);

/// Look up a product by its canonical name.
pub fn find(name: &str) -> Option<&'static LoanProduct> {
    PRODUCTS.iter().find(|p| p.name == name)
}

/// Pick the product a message asks for. First match in table order wins.
pub fn detect(message: &str) -> Option<&'static LoanProduct> {
    let lower = message.to_lowercase();
    PRODUCTS
        .iter()
        .find(|p| p.keywords.iter().any(|kw| lower.contains(kw)))
}

/// Names of all products, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRODUCTS.iter().map(|p| p.name)
}
