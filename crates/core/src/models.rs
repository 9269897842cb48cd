use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five travel archetypes, in fixed ranking declaration order.
/// Ties between equal scores resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Foodie,
    Adventurer,
    Cultural,
    Relaxer,
    Shopaholic,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::Foodie,
        Persona::Adventurer,
        Persona::Cultural,
        Persona::Relaxer,
        Persona::Shopaholic,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Foodie => "foodie",
            Self::Adventurer => "adventurer",
            Self::Cultural => "cultural",
            Self::Relaxer => "relaxer",
            Self::Shopaholic => "shopaholic",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Self::Foodie => "Foodie",
            Self::Adventurer => "Adventurer",
            Self::Cultural => "Cultural Explorer",
            Self::Relaxer => "Relaxer",
            Self::Shopaholic => "Shopaholic",
        }
    }

    pub fn default_interests(self) -> [&'static str; 3] {
        match self {
            Self::Foodie => ["local cuisine", "food markets", "cooking classes"],
            Self::Adventurer => ["outdoor activities", "hiking", "water sports"],
            Self::Cultural => ["museums", "historical sites", "local traditions"],
            Self::Relaxer => ["beaches", "spas", "scenic views"],
            Self::Shopaholic => ["markets", "malls", "local crafts"],
        }
    }

    pub fn default_activities(self) -> [&'static str; 3] {
        match self {
            Self::Foodie => ["trying local restaurants", "food tours", "visiting markets"],
            Self::Adventurer => ["hiking", "kayaking", "zip-lining"],
            Self::Cultural => ["visiting museums", "guided tours", "cultural performances"],
            Self::Relaxer => ["beach time", "spa treatments", "scenic drives"],
            Self::Shopaholic => ["shopping at markets", "visiting malls", "buying souvenirs"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    /// Modal-vote tie-break order: first maximum in this order wins.
    pub const ALL: [BudgetLevel; 3] = [BudgetLevel::Low, BudgetLevel::Medium, BudgetLevel::High];

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelPace {
    Fast,
    Moderate,
    Slow,
}

impl TravelPace {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Moderate => "moderate",
            Self::Slow => "slow",
        }
    }
}

/// Final classification for one quiz respondent. Either parsed out of the
/// external model's reply or synthesized deterministically from local scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAnalysis {
    pub primary_persona: String,
    #[serde(default)]
    pub secondary_persona: Option<String>,
    pub budget_sensitivity: BudgetLevel,
    pub interests: Vec<String>,
    pub preferred_activities: Vec<String>,
    pub travel_pace: TravelPace,
}

/// Optional per-request context for the chatbot. Nothing here persists
/// across requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub itinerary: Option<Value>,
    #[serde(default)]
    pub user_preferences: Option<Value>,
}

impl ChatContext {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.itinerary.is_none() && self.user_preferences.is_none()
    }
}
