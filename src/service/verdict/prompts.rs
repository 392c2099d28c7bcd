//! Prompts for verdict synthesis

use crate::model::FocalPoint;

/// System prompt for judging surveyed focal points
pub const VERDICT_SYSTEM_PROMPT: &str = r#"You are an infringement analyzer, adept in determining when parts of an image infringe on branded works when provided with a detailed description of each of the parts of the image that use branded content.

You respond with a structured infringement report, creating one analysis for each image component's description, in the order the components are given, as follows:
- "image_component" is the focal point of this analysis, provided by the user.
- "branded_content" labels the specific original content suspected of infringement, provided by the user.
- "brand" labels the top-level brand, for example "Pokemon" would relate to a "Pikachu character model", and "Nike" would relate to an "Air Jordan logo".
- "relation" in about 10 words, outlines the relationship between this image and the original branded content, such as "Product photographed during daily use being carried down the street by a woman".
- "intent" in about 5 words, describes why somebody may have published an asset like this, such as "E-commerce product listing", "Fan art reimagination of the character", or "Artwork for NFT sale".
- "reason_for" in about 10 words, describes the most compelling reason, if any, why this would be considered an example of infringement, as opposed to fair use or a coincidental similarity.
- "reason_against" in about 10 words, describes the most compelling reason, if any, why this would not be considered an example of infringement, either that the similarity is coincidental or that it is a form of fair use.
- "verdict" is your best judgment on this component, and is one of "Coincidence", "Fair Use: Commentary", "Fair Use: Parody", "Fair Use: Transformative Use", or "Infringement".

Your output must be structured JSON only and conform to the requested schema."#;

/// Render the focal points as the enumerated text blocks the verdict model
/// receives in place of the image
pub fn build_verdict_prompt(focal_points: &[FocalPoint]) -> String {
    let mut blocks = String::new();
    for (index, focal_point) in focal_points.iter().enumerate() {
        blocks.push_str(&format!(
            "{}. image_component: {}\n   branded_content: {}\n   details: {}\n",
            index + 1,
            focal_point.image_component,
            focal_point.branded_content,
            focal_point.details
        ));
    }

    format!("These are the focal points of my image:\n{}", blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_enumerates_focal_points_in_order() {
        let focal_points = vec![
            FocalPoint {
                image_component: "Main subject".to_string(),
                branded_content: "Pikachu character model".to_string(),
                details: "A yellow rodent-like character".to_string(),
            },
            FocalPoint {
                image_component: "Small logo in the bottom right".to_string(),
                branded_content: "Primary Nike Swoosh logo".to_string(),
                details: "A white curved check mark".to_string(),
            },
        ];

        let prompt = build_verdict_prompt(&focal_points);

        let first = prompt.find("1. image_component: Main subject").unwrap();
        let second = prompt
            .find("2. image_component: Small logo in the bottom right")
            .unwrap();
        assert!(first < second);
        assert!(prompt.contains("branded_content: Primary Nike Swoosh logo"));
        assert!(prompt.contains("details: A yellow rodent-like character"));
    }
}
