//! Loan advisory conversation: the chat widget's scripted flow.
//!
//! The advisor walks a new visitor through a fixed sequence of stages,
//! picking up the loan they want and the profile fields needed to judge
//! eligibility. Everything here except `routes` is pure: state goes in,
//! new state comes out, and the caller keeps it between turns.

pub mod eligibility;
pub mod extract;
pub mod loans;
pub mod machine;
pub mod prompts;
pub mod routes;
pub mod state;
pub mod tips;

pub use eligibility::evaluate;
pub use extract::{PatternExtractor, ProfileExtractor};
pub use machine::{ConversationMachine, advance};
pub use prompts::{Tone, prompt_for, system_prompt};
pub use routes::{AdvisorRouteState, advisor_routes};
pub use state::{ConversationStage, ConversationState, EligibilityResult, UserInfo};
pub use tips::tips;
