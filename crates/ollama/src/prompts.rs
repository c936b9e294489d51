//! Prompt templates for guide generation and translation.

use golfplex_core::work::WorkDestination;

/// System prompt for fresh English guide generation.
pub const GUIDE_SYSTEM_PROMPT: &str = "You are a professional golf travel writer \
creating destination guides for golfers worldwide. Write engaging, comprehensive \
guides that help golfers plan their trips.";

/// System prompt for translating an existing English guide.
pub fn translation_system_prompt(language_name: &str) -> String {
    format!(
        "You are a professional translator specializing in golf and travel \
         content for {language_name}-speaking audiences. Translate naturally \
         with cultural adaptation."
    )
}

/// Prompt for a comprehensive English destination guide.
pub fn guide_prompt(destination: &WorkDestination) -> String {
    format!(
        "Write a comprehensive golf destination guide for {city}, {country}.\n\
         \n\
         REQUIREMENTS:\n\
         - Minimum 2500 words\n\
         - Include seasonal information and best times to visit\n\
         - Cover multiple golf courses and facilities in the area\n\
         - Include accommodation recommendations\n\
         - Mention local attractions beyond golf\n\
         - Include practical travel information\n\
         - Use engaging, travel-guide style writing\n\
         \n\
         DESTINATION INFO:\n\
         - Name: {name}\n\
         - Location: {city}, {region}, {country}\n\
         - Description: {description}\n\
         - Coordinates: {latitude}, {longitude}",
        city = destination.city,
        country = destination.country,
        name = destination.name,
        region = destination.region_or_state,
        description = destination.description,
        latitude = destination.latitude,
        longitude = destination.longitude,
    )
}

/// Prompt for translating an English guide with cultural adaptation.
pub fn translation_prompt(
    english_content: &str,
    language_name: &str,
    destination: &WorkDestination,
) -> String {
    format!(
        "Translate the following golf destination guide to {language_name}, \
         adapting it culturally for {language_name}-speaking golf tourists.\n\
         \n\
         IMPORTANT INSTRUCTIONS:\n\
         - Translate naturally, not word-for-word\n\
         - Adapt cultural references appropriately\n\
         - Keep golf terminology accurate\n\
         - Maintain the engaging travel guide tone\n\
         - Ensure minimum 2000 words in the translation\n\
         - Keep all factual information accurate\n\
         - Adapt currency mentions if relevant\n\
         - Consider travel patterns of {language_name}-speaking tourists\n\
         \n\
         DESTINATION: {city}, {country}\n\
         \n\
         ORIGINAL ENGLISH GUIDE:\n\
         {english_content}\n\
         \n\
         Provide the complete translated guide in {language_name}:",
        city = destination.city,
        country = destination.country,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination() -> WorkDestination {
        WorkDestination {
            id: 1,
            name: "Old Course".into(),
            city: "St Andrews".into(),
            region_or_state: "Fife".into(),
            country: "Scotland".into(),
            description: "The home of golf".into(),
            latitude: 56.34,
            longitude: -2.8,
            slug: "golf-course-st-andrews-fife-scotland".into(),
        }
    }

    #[test]
    fn guide_prompt_embeds_destination_fields() {
        let prompt = guide_prompt(&destination());
        assert!(prompt.contains("St Andrews, Fife, Scotland"));
        assert!(prompt.contains("The home of golf"));
        assert!(prompt.contains("Minimum 2500 words"));
    }

    #[test]
    fn translation_prompt_carries_source_and_language() {
        let prompt = translation_prompt("GUIDE BODY", "Japanese", &destination());
        assert!(prompt.contains("to Japanese"));
        assert!(prompt.contains("GUIDE BODY"));
        assert!(prompt.contains("minimum 2000 words"));
    }
}
