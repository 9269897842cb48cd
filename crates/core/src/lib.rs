pub mod catalog;
pub mod models;
pub mod scoring;

pub use catalog::{PublicOption, PublicQuestion, QuizCatalog, QuizOption, QuizQuestion, WeightEntry};
pub use models::{BudgetLevel, ChatContext, Persona, PersonaAnalysis, TravelPace};
pub use scoring::{fallback_analysis, score_responses, ScoreBreakdown, ScoreError};
