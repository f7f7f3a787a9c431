use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::assistant::Recommendation;
use crate::models::Property;

pub fn chat_system_instruction(context: Option<&str>) -> String {
    format!(
        "You are a professional real estate assistant for Elite Realty Pro. \
         Help users with property questions, market trends, and buying/selling advice. \
         Keep answers concise, professional, and helpful. \
         Current context: {}",
        context
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("General real estate assistance")
    )
}

/// Only the fields the model needs to rank listings
#[derive(Serialize)]
struct ListingDigest<'a> {
    id: &'a str,
    title: &'a str,
    price: f64,
    location: &'a str,
    #[serde(rename = "type")]
    property_type: &'static str,
}

pub fn recommendation_prompt(preferences: &str, properties: &[Property]) -> Result<String> {
    let digest: Vec<ListingDigest> = properties
        .iter()
        .map(|p| ListingDigest {
            id: &p.id,
            title: &p.title,
            price: p.price,
            location: &p.location,
            property_type: p.property_type().as_str(),
        })
        .collect();

    Ok(format!(
        "Based on the following user preferences: \"{}\", analyze the provided property list \
         and recommend the top 2 best matches.\n\
         Return the IDs of the recommended properties and a brief reason why.\n\n\
         Properties: {}",
        preferences,
        serde_json::to_string(&digest).context("Failed to encode listings for prompt")?
    ))
}

/// JSON schema the model must answer recommendations in
pub fn recommendation_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["id", "reason"]
                }
            }
        }
    })
}

#[derive(Deserialize)]
struct RecommendationEnvelope {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

/// Parse the model's JSON answer, keeping only ids that exist in
/// `properties`
pub fn parse_recommendations(text: &str, properties: &[Property]) -> Result<Vec<Recommendation>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let envelope: RecommendationEnvelope =
        serde_json::from_str(text).context("Assistant returned malformed recommendations")?;

    Ok(envelope
        .recommendations
        .into_iter()
        .filter(|r| properties.iter().any(|p| p.id == r.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::seed;

    #[test]
    fn prompt_lists_every_property() {
        let catalog = seed::properties();
        let prompt = recommendation_prompt("family home near the beach", &catalog).unwrap();
        assert!(prompt.contains("family home near the beach"));
        assert!(prompt.contains("\"type\":\"Under Construction\""));
        for property in &catalog {
            assert!(prompt.contains(&property.title));
        }
    }

    #[test]
    fn system_instruction_defaults_context() {
        assert!(chat_system_instruction(None).ends_with("General real estate assistance"));
        assert!(chat_system_instruction(Some("Viewing listing 3")).ends_with("Viewing listing 3"));
    }

    #[test]
    fn drops_unknown_ids() {
        let catalog = seed::properties();
        let text = r#"{"recommendations":[
            {"id":"1","reason":"Pool and views"},
            {"id":"999","reason":"Made up"}
        ]}"#;
        let picks = parse_recommendations(text, &catalog).unwrap();
        assert_eq!(
            picks,
            vec![Recommendation {
                id: "1".to_string(),
                reason: "Pool and views".to_string()
            }]
        );
    }

    #[test]
    fn empty_answers_mean_no_picks() {
        let catalog = seed::properties();
        assert!(parse_recommendations("", &catalog).unwrap().is_empty());
        assert!(parse_recommendations("{}", &catalog).unwrap().is_empty());
        assert!(parse_recommendations("not json", &catalog).is_err());
    }
}
