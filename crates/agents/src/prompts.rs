use ghoomo_core::ChatContext;
use serde_json::{Map, Value};

/// Framing for the richer quiz analysis: persona taxonomy, the raw response
/// set, and the six fields the reply must carry.
pub fn quiz_analysis_prompt(responses: &Map<String, Value>) -> String {
    let serialized = serde_json::to_string_pretty(responses).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Based on the following travel quiz responses, determine the user's travel persona.\n\
         Analyze their preferences and categorize them into one of these personas:\n\
         1. Foodie - Prioritizes culinary experiences\n\
         2. Adventurer - Seeks thrilling and outdoor activities\n\
         3. Cultural Explorer - Interested in history, art, and local traditions\n\
         4. Relaxer - Prefers leisurely, stress-free experiences\n\
         5. Shopaholic - Enjoys shopping and markets\n\
         \n\
         Quiz Responses:\n\
         {serialized}\n\
         \n\
         Provide a detailed analysis with:\n\
         1. Primary travel persona\n\
         2. Secondary travel persona (if applicable)\n\
         3. Key interests\n\
         4. Budget sensitivity (high, medium, low)\n\
         5. Preferred activities\n\
         6. Travel pace preference (fast, moderate, slow)\n\
         \n\
         Format the response as a JSON object with the keys primaryPersona, \
         secondaryPersona, interests, budgetSensitivity, preferredActivities, travelPace."
    )
}

const ASSISTANT_FRAMING: &str = "You are Ghoomo, an AI travel assistant for India and \
    international destinations.\nBe helpful, friendly, and use a conversational tone with \
    occasional Hindi phrases.";

const ASSISTANT_GUIDANCE: &str = "Provide a helpful, accurate response. If suggesting places, \
    include brief descriptions.\nFor food recommendations, mention local specialties. For safety \
    tips, be honest but reassuring.\nIf you don't know something specific, suggest general advice \
    instead of making up facts.";

/// Primary chatbot prompt. Context fields are injected verbatim when
/// present; an absent itinerary becomes the literal "No itinerary available".
pub fn chatbot_prompt(query: &str, context: Option<&ChatContext>) -> String {
    match context.filter(|ctx| !ctx.is_empty()) {
        Some(ctx) => {
            let location = ctx.location.as_deref().unwrap_or("");
            let preferences = ctx
                .user_preferences
                .as_ref()
                .and_then(|value| serde_json::to_string_pretty(value).ok())
                .unwrap_or_else(|| "{}".to_string());
            let itinerary = ctx
                .itinerary
                .as_ref()
                .and_then(|value| serde_json::to_string_pretty(value).ok())
                .unwrap_or_else(|| "No itinerary available".to_string());

            format!(
                "{ASSISTANT_FRAMING}\n\
                 \n\
                 User's current location/interest: {location}\n\
                 User's preferences: {preferences}\n\
                 \n\
                 If itinerary information is available, refer to it in your answers:\n\
                 {itinerary}\n\
                 \n\
                 User's question: {query}\n\
                 \n\
                 {ASSISTANT_GUIDANCE}"
            )
        }
        None => format!(
            "{ASSISTANT_FRAMING}\n\
             \n\
             User's question: {query}\n\
             \n\
             {ASSISTANT_GUIDANCE}"
        ),
    }
}

/// Second call: exactly three short follow-up questions as a JSON array.
pub fn follow_up_prompt(query: &str) -> String {
    format!(
        "Based on the user's question \"{query}\" and your response, suggest 3 short follow-up \
         questions the user might want to ask.\n\
         Format as a JSON array of strings. Keep each question under 60 characters."
    )
}
