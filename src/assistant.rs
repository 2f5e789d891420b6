//! Canned allergy-assistant replies, chosen by topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enrichment::AI_DISCLAIMER;
use crate::profile::UserAllergyProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatTopic {
    Specialist,
    Emergency,
    FoodSafety,
    Allergy,
    General,
}

// Checked in order; the first topic with a matching cue wins.
const TOPIC_CUES: [(ChatTopic, &[&str]); 4] = [
    (ChatTopic::Specialist, &["doctor", "specialist", "allergist", "find"]),
    (ChatTopic::Emergency, &["emergency", "severe", "anaphyla", "reaction"]),
    (ChatTopic::FoodSafety, &["food", "eat", "safe", "label"]),
    (ChatTopic::Allergy, &["allerg", "symptom", "react"]),
];

pub fn classify_message(message: &str) -> ChatTopic {
    let lowered = message.to_lowercase();
    TOPIC_CUES
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lowered.contains(cue)))
        .map(|(topic, _)| *topic)
        .unwrap_or(ChatTopic::General)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub topic: ChatTopic,
    pub response: String,
    pub ai_powered: bool,
    pub timestamp: DateTime<Utc>,
}

impl AssistantReply {
    pub fn new(topic: ChatTopic, response: String) -> Self {
        Self {
            topic,
            response,
            ai_powered: false,
            timestamp: Utc::now(),
        }
    }

    /// Appends generated text under its own labelled heading.
    pub fn with_ai_insight(mut self, insight: &str) -> Self {
        self.response = format!("{}\n\n**{}:**\n{}", self.response, AI_DISCLAIMER, insight);
        self.ai_powered = true;
        self
    }
}

pub fn topic_response(topic: ChatTopic, profile: &UserAllergyProfile, name: Option<&str>) -> String {
    let allergies = profile.joined();
    match topic {
        ChatTopic::Specialist => "To find an allergy specialist:

- Ask your primary care doctor for a referral to a board-certified allergist or immunologist
- Check your health insurer's provider directory for allergists near you
- Bring a list of your reactions and suspected triggers to the first appointment

An allergist can confirm your allergies with skin-prick or blood tests and prescribe emergency medication if needed."
            .to_string(),
        ChatTopic::Emergency => "**EMERGENCY ALLERGY REACTION PROTOCOL:**

**SEVERE REACTIONS (Anaphylaxis):**
1. Call emergency services IMMEDIATELY
2. Use your epinephrine auto-injector if available (outer thigh)
3. Go to the emergency room even if symptoms improve
4. Contact your doctor

**MILD TO MODERATE REACTIONS:**
1. Take antihistamines as directed
2. Remove or wash off the allergen
3. Apply a cool compress for skin reactions
4. Monitor symptoms closely

If you are experiencing symptoms NOW, please seek immediate medical attention!"
            .to_string(),
        ChatTopic::FoodSafety => {
            let mut text = "**Food Safety for Allergy Management:**

**Reading Labels:**
- Check \"Contains\" statements
- Look for \"may contain\" warnings
- Be aware of hidden allergens

**Cross-Contamination Prevention:**
- Use separate cutting boards and utensils
- Clean surfaces thoroughly
- Store allergen-free foods separately

**Dining Out Safely:**
- Call ahead to discuss allergies
- Speak directly with the chef
- Consider carrying allergy cards"
                .to_string();
            if !profile.is_empty() {
                text.push_str(&format!(
                    "\n\nWould you like specific guidance for your known allergies: {}?",
                    allergies
                ));
            }
            text
        }
        ChatTopic::Allergy => {
            let intro = if profile.is_empty() {
                "Here are my recommendations:".to_string()
            } else {
                format!(
                    "Based on your profile showing allergies to: **{}**, here are my recommendations:",
                    allergies
                )
            };
            format!(
                "{}

**Immediate Steps:**
- Always read ingredient labels carefully
- Carry emergency medication (EpiPen) if prescribed
- Inform restaurants about your allergies when dining out

**Safe Food Alternatives:**
- Scan packaged products before eating them
- Consider allergen-free brands and certified products
- Keep a food diary to track reactions

**Medical Advice:**
Consult an allergist for personalized treatment.",
                intro
            )
        }
        ChatTopic::General => {
            let greeting = match name.map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => format!("Hello {}!", name),
                None => "Hello!".to_string(),
            };
            let mut text = format!(
                "{}

I'm your allergy assistant, here to help with:

- **Allergen Detection**: check food ingredients
- **Finding Specialists**: locate allergists
- **Dietary Guidance**: safe food recommendations
- **Emergency Help**: reaction protocols",
                greeting
            );
            if !profile.is_empty() {
                text.push_str(&format!(
                    "\n\nI see you have allergies to: **{}**. I'll tailor my advice to your profile.",
                    allergies
                ));
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message() {
        assert_eq!(classify_message("Can you find a doctor?"), ChatTopic::Specialist);
        assert_eq!(classify_message("Severe swelling!"), ChatTopic::Emergency);
        assert_eq!(classify_message("Is this bread safe to eat"), ChatTopic::FoodSafety);
        assert_eq!(classify_message("my allergies are acting up"), ChatTopic::Allergy);
        assert_eq!(classify_message("hi there"), ChatTopic::General);
    }

    #[test]
    fn test_topic_response_personalised() {
        let profile = UserAllergyProfile::from_symptoms("milk, peanuts");
        let greeting = topic_response(ChatTopic::General, &profile, Some("Ada"));
        assert!(greeting.starts_with("Hello Ada!"));
        assert!(greeting.contains("**milk, peanuts**"));

        let anonymous = topic_response(ChatTopic::General, &UserAllergyProfile::default(), None);
        assert!(anonymous.starts_with("Hello!"));
        assert!(!anonymous.contains("I see you have allergies"));
    }

    #[test]
    fn test_ai_insight_appended_with_label() {
        let reply = AssistantReply::new(ChatTopic::General, "Base".to_string()).with_ai_insight("Extra");
        assert!(reply.ai_powered);
        assert!(reply.response.starts_with("Base"));
        assert!(reply.response.contains(AI_DISCLAIMER));
        assert!(reply.response.ends_with("Extra"));
    }
}
