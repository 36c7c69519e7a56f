use crate::error::{AppError, AppResult};
use crate::models::{Candidate, RawCandidate, RecommendRequest};
use crate::services::providers::RecommendationProvider;

/// How many suggestions the model is asked for. The response is relayed as
/// received; nothing enforces the count server-side.
const RECOMMENDATION_COUNT: usize = 12;

/// Builds the curation prompt from the submitted preferences.
///
/// A raw free-text message takes precedence over the structured fields.
pub fn build_prompt(request: &RecommendRequest) -> String {
    let context = match &request.message {
        Some(message) => format!("User Request: \"{}\"", message),
        None => {
            let field = |value: &Option<String>, fallback: &str| -> String {
                match value {
                    Some(v) if !v.is_empty() => v.clone(),
                    _ => fallback.to_string(),
                }
            };
            format!(
                "Genre: {}\nMood: {}\nSpecific Preferences: {}\nBooks they already like: {}",
                field(&request.genre, "Any"),
                field(&request.mood, "Any"),
                field(&request.preferences, "None"),
                field(&request.existing_books, "None"),
            )
        }
    };

    format!(
        "Act as an elite literary curator. I need EXACTLY {count} book recommendations based on the following context:\n\
         {context}\n\n\
         CRITICAL INSTRUCTIONS:\n\
         1. Return the response STRICTLY as a valid JSON array of objects.\n\
         2. SELECTION CRITERIA: Prioritize modern classics, award winners, and bestsellers.\n\
         3. QUALITY OVER OBSCURITY: Unless asked for \"niche\", avoid obscure books.\n\
         4. STRICTLY REAL ISBNs: You MUST provide a real, verifiable ISBN-13 for the specific book. Do NOT guess.\n\n\
         Each object in the array MUST have these fields:\n\
         - \"title\": (String) Book title\n\
         - \"author\": (String) Author name\n\
         - \"description\": (String) A compelling, unique hook (not a generic summary).\n\
         - \"genre\": (String) Primary genre\n\
         - \"isbn\": (String) Valid ISBN-13.\n\n\
         Example:\n\
         [{{ \"title\": \"The Seven Husbands of Evelyn Hugo\", \"author\": \"Taylor Jenkins Reid\", \"description\": \"...\", \"genre\": \"Historical Fiction\", \"isbn\": \"9781501161933\" }}]",
        count = RECOMMENDATION_COUNT,
        context = context,
    )
}

/// Requests recommendations from the provider and normalizes the result.
///
/// The model's output is parsed as a JSON array; a parse failure is a
/// provider error (500 at the route layer). Normalization fills placeholder
/// values for missing fields but performs no further validation: the ISBNs
/// are relayed as claimed.
pub async fn get_recommendations(
    provider: &dyn RecommendationProvider,
    request: &RecommendRequest,
) -> AppResult<Vec<Candidate>> {
    let prompt = build_prompt(request);
    let text = provider.generate(&prompt).await?;

    let raw: Vec<RawCandidate> = serde_json::from_str(&text).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse AI response as JSON");
        AppError::Provider("Failed to parse AI response".to_string())
    })?;

    let candidates: Vec<Candidate> = raw.into_iter().map(Candidate::from).collect();

    tracing::info!(count = candidates.len(), "Recommendations generated");

    Ok(candidates)
}
