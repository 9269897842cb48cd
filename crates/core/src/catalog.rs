use serde::Serialize;

use crate::models::{BudgetLevel, Persona, TravelPace};

use BudgetLevel::{High, Low, Medium};
use Persona::{Adventurer, Cultural, Foodie, Relaxer, Shopaholic};
use TravelPace::{Fast, Moderate, Slow};
use WeightEntry::{BudgetVote, PaceVote, PersonaDelta};

/// One weight carried by a quiz option. The variant decides how a selection
/// is applied: persona counter delta, budget vote, or pace vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightEntry {
    PersonaDelta(Persona, i32),
    BudgetVote(BudgetLevel),
    PaceVote(TravelPace),
}

#[derive(Debug, Clone, Copy)]
pub struct QuizOption {
    pub id: &'static str,
    pub text: &'static str,
    pub weights: &'static [WeightEntry],
}

#[derive(Debug, Clone, Copy)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [QuizOption],
    pub allow_multiple: bool,
}

impl QuizQuestion {
    pub fn find_option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Weight-stripped projection of a question, safe to hand to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: Vec<PublicOption>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicOption {
    pub id: &'static str,
    pub text: &'static str,
}

const QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: "preferred_activities",
        text: "What activities do you enjoy most while traveling?",
        options: &[
            QuizOption {
                id: "food_tasting",
                text: "Food tasting and cooking classes",
                weights: &[PersonaDelta(Foodie, 10), PersonaDelta(Cultural, 5)],
            },
            QuizOption {
                id: "outdoor_adventure",
                text: "Outdoor adventures and sports",
                weights: &[PersonaDelta(Adventurer, 10), PersonaDelta(Relaxer, -5)],
            },
            QuizOption {
                id: "museums_history",
                text: "Museums and historical sites",
                weights: &[PersonaDelta(Cultural, 10), PersonaDelta(Adventurer, 2)],
            },
            QuizOption {
                id: "shopping_markets",
                text: "Shopping and local markets",
                weights: &[PersonaDelta(Shopaholic, 10), PersonaDelta(Foodie, 3)],
            },
            QuizOption {
                id: "beaches_relaxation",
                text: "Beaches and relaxation",
                weights: &[PersonaDelta(Relaxer, 10), PersonaDelta(Adventurer, -3)],
            },
        ],
        allow_multiple: true,
    },
    QuizQuestion {
        id: "budget_preference",
        text: "What's your budget preference?",
        options: &[
            QuizOption {
                id: "budget",
                text: "Budget-friendly (hostels, street food)",
                weights: &[BudgetVote(Low)],
            },
            QuizOption {
                id: "mid_range",
                text: "Mid-range (3-star hotels, casual restaurants)",
                weights: &[BudgetVote(Medium)],
            },
            QuizOption {
                id: "luxury",
                text: "Luxury (5-star hotels, fine dining)",
                weights: &[BudgetVote(High)],
            },
        ],
        allow_multiple: false,
    },
    QuizQuestion {
        id: "travel_pace",
        text: "How do you prefer to travel?",
        options: &[
            QuizOption {
                id: "fast_paced",
                text: "Fast-paced with many activities",
                weights: &[PaceVote(Fast), PersonaDelta(Adventurer, 5)],
            },
            QuizOption {
                id: "balanced",
                text: "Balanced mix of activities and relaxation",
                weights: &[PaceVote(Moderate)],
            },
            QuizOption {
                id: "slow_relaxed",
                text: "Slow and relaxed, taking my time",
                weights: &[PaceVote(Slow), PersonaDelta(Relaxer, 5)],
            },
        ],
        allow_multiple: false,
    },
    QuizQuestion {
        id: "accommodation",
        text: "What type of accommodation do you prefer?",
        options: &[
            QuizOption {
                id: "hostel",
                text: "Hostels or budget stays",
                weights: &[BudgetVote(Low)],
            },
            QuizOption {
                id: "mid_hotel",
                text: "Mid-range hotels",
                weights: &[BudgetVote(Medium)],
            },
            QuizOption {
                id: "luxury_hotel",
                text: "Luxury hotels and resorts",
                weights: &[BudgetVote(High), PersonaDelta(Relaxer, 5)],
            },
            QuizOption {
                id: "local_stay",
                text: "Local homestays",
                weights: &[PersonaDelta(Cultural, 5), PersonaDelta(Foodie, 3)],
            },
        ],
        allow_multiple: false,
    },
    QuizQuestion {
        id: "food_preference",
        text: "What's your approach to food while traveling?",
        options: &[
            QuizOption {
                id: "local_cuisine",
                text: "Trying all local specialties",
                weights: &[PersonaDelta(Foodie, 10), PersonaDelta(Cultural, 3)],
            },
            QuizOption {
                id: "street_food",
                text: "Street food and markets",
                weights: &[PersonaDelta(Foodie, 8), BudgetVote(Low)],
            },
            QuizOption {
                id: "fine_dining",
                text: "Fine dining experiences",
                weights: &[PersonaDelta(Foodie, 6), BudgetVote(High)],
            },
            QuizOption {
                id: "familiar_food",
                text: "Sticking to familiar foods",
                weights: &[PersonaDelta(Foodie, -5)],
            },
        ],
        allow_multiple: true,
    },
];

/// Immutable question catalog, the single source of truth for weight
/// semantics. Built once at startup and shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct QuizCatalog {
    questions: &'static [QuizQuestion],
}

impl QuizCatalog {
    pub fn builtin() -> Self {
        Self {
            questions: QUESTIONS,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        self.questions
    }

    pub fn find_question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// Catalog as served to clients: identifiers and display text only,
    /// never the weight mappings.
    pub fn public_view(&self) -> Vec<PublicQuestion> {
        self.questions
            .iter()
            .map(|question| PublicQuestion {
                id: question.id,
                text: question.text,
                options: question
                    .options
                    .iter()
                    .map(|option| PublicOption {
                        id: option.id,
                        text: option.text,
                    })
                    .collect(),
                allow_multiple: question.allow_multiple,
            })
            .collect()
    }
}
