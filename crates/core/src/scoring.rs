use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{QuizCatalog, WeightEntry};
use crate::models::{BudgetLevel, Persona, PersonaAnalysis, TravelPace};

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("No responses provided")]
    EmptyResponses,
}

/// Deterministic result of one scoring pass: persona ranking plus the
/// budget and pace votes collected along the way.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub primary: Persona,
    pub secondary: Option<Persona>,
    pub budget: BudgetLevel,
    pub pace: Option<TravelPace>,
    /// All five personas, ranked descending by score.
    pub ranked: Vec<(Persona, i32)>,
}

/// Aggregates a response set against the catalog weights.
///
/// Unknown question ids, unknown option ids, and non-string selection values
/// are skipped silently. A scalar selection is treated as a one-element list.
/// When several answers carry a pace vote, the last one in input order wins.
pub fn score_responses(
    catalog: &QuizCatalog,
    responses: &Map<String, Value>,
) -> Result<ScoreBreakdown, ScoreError> {
    if responses.is_empty() {
        return Err(ScoreError::EmptyResponses);
    }

    let mut counters = [0i32; 5];
    let mut budget_votes = Vec::new();
    let mut pace = None;

    for (question_id, selections) in responses {
        let Some(question) = catalog.find_question(question_id) else {
            continue;
        };

        for option_id in normalize_selections(selections) {
            let Some(option) = question.find_option(option_id) else {
                continue;
            };

            for weight in option.weights {
                match *weight {
                    WeightEntry::PersonaDelta(persona, delta) => {
                        counters[persona as usize] += delta;
                    }
                    WeightEntry::BudgetVote(level) => budget_votes.push(level),
                    WeightEntry::PaceVote(value) => pace = Some(value),
                }
            }
        }
    }

    let mut ranked: Vec<(Persona, i32)> = Persona::ALL
        .iter()
        .map(|&persona| (persona, counters[persona as usize]))
        .collect();
    // Stable sort keeps declaration order on equal scores.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let primary = if ranked[0].1 > 0 {
        ranked[0].0
    } else {
        Persona::Cultural
    };
    let secondary = (ranked[1].1 > 0).then_some(ranked[1].0);
    let budget = modal_budget(&budget_votes);

    Ok(ScoreBreakdown {
        primary,
        secondary,
        budget,
        pace,
        ranked,
    })
}

/// Builds the deterministic analysis used whenever the external model call
/// fails or returns something unusable.
pub fn fallback_analysis(breakdown: &ScoreBreakdown) -> PersonaAnalysis {
    PersonaAnalysis {
        primary_persona: breakdown.primary.display_label().to_string(),
        secondary_persona: breakdown
            .secondary
            .map(|persona| persona.display_label().to_string()),
        budget_sensitivity: breakdown.budget,
        interests: breakdown
            .primary
            .default_interests()
            .iter()
            .map(|interest| interest.to_string())
            .collect(),
        preferred_activities: breakdown
            .primary
            .default_activities()
            .iter()
            .map(|activity| activity.to_string())
            .collect(),
        travel_pace: breakdown.pace.unwrap_or(TravelPace::Moderate),
    }
}

fn normalize_selections(value: &Value) -> Vec<&str> {
    match value {
        Value::String(single) => vec![single.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn modal_budget(votes: &[BudgetLevel]) -> BudgetLevel {
    if votes.is_empty() {
        return BudgetLevel::Medium;
    }

    let mut best = BudgetLevel::Low;
    let mut best_count = 0;
    for level in BudgetLevel::ALL {
        let count = votes.iter().filter(|&&vote| vote == level).count();
        if count > best_count {
            best = level;
            best_count = count;
        }
    }

    best
}
