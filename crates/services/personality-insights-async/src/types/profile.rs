//! Types returned by `POST /v3/profile`

use serde::{Deserialize, Serialize};

/// Category of a personality characteristic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    /// Big Five personality characteristics
    Personality,
    /// Needs
    Needs,
    /// Values
    Values,
    /// A category this client does not know about
    #[serde(other)]
    Other,
}

/// A personality characteristic with its normalized score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Trait {
    /// Unique identifier, e.g. `big5_openness`
    pub trait_id: String,
    /// User-visible, localized name
    pub name: String,
    /// Category of the characteristic
    pub category: TraitCategory,
    /// Normalized percentile score in `[0, 1]`
    pub percentile: f64,
    /// Raw score, present when `raw_scores` was requested
    #[serde(default)]
    pub raw_score: Option<f64>,
    /// Whether the characteristic is meaningful for the input language
    #[serde(default)]
    pub significant: Option<bool>,
    /// Facets of a Big Five dimension
    #[serde(default)]
    pub children: Vec<Trait>,
}

/// Temporal behavior derived from item timestamps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Behavior {
    /// Unique identifier, e.g. `behavior_sunday`
    pub trait_id: String,
    /// User-visible, localized name
    pub name: String,
    /// Category, always `behavior`
    pub category: String,
    /// Share of content items created at this time, in `[0, 1]`
    pub percentage: f64,
}

/// A single consumption preference with its score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConsumptionPreferences {
    /// Unique identifier
    pub consumption_preference_id: String,
    /// User-visible name
    pub name: String,
    /// `0.0` unlikely, `0.5` neutral, `1.0` likely
    pub score: f64,
}

/// A group of related consumption preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConsumptionPreferencesCategory {
    /// Unique identifier
    pub consumption_preference_category_id: String,
    /// User-visible name
    pub name: String,
    /// Preferences in this category
    #[serde(default)]
    pub consumption_preferences: Vec<ConsumptionPreferences>,
}

/// Identifier of a warning raised while processing input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningId {
    /// Fewer words than recommended for a precise profile
    WordCountMessage,
    /// JSON input was analyzed as plain text
    JsonAsText,
    /// Input exceeded the size limit and was truncated
    ContentTruncated,
    /// Only part of the input was used
    PartialTextUsed,
    /// A warning this client does not know about
    #[serde(other)]
    Other,
}

/// A warning raised while processing input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Warning {
    /// Warning identifier
    pub warning_id: WarningId,
    /// Human-readable message
    pub message: String,
}

/// Personality profile computed from the submitted content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Profile {
    /// Language model used to process the input
    pub processed_language: String,
    /// Number of words found in the input
    pub word_count: i64,
    /// Message about the precision implied by `word_count`
    #[serde(default)]
    pub word_count_message: Option<String>,
    /// Big Five dimensions with their facets
    #[serde(default)]
    pub personality: Vec<Trait>,
    /// Needs
    #[serde(default)]
    pub needs: Vec<Trait>,
    /// Values
    #[serde(default)]
    pub values: Vec<Trait>,
    /// Temporal behavior, present when items carry timestamps
    #[serde(default)]
    pub behavior: Vec<Behavior>,
    /// Consumption preferences, present when requested
    #[serde(default)]
    pub consumption_preferences: Vec<ConsumptionPreferencesCategory>,
    /// Warnings raised while processing input
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl Profile {
    /// Finds a trait by id across personality, needs, values and facets
    #[must_use]
    pub fn find_trait(&self, trait_id: &str) -> Option<&Trait> {
        fn walk<'a>(traits: &'a [Trait], id: &str) -> Option<&'a Trait> {
            traits.iter().find_map(|t| {
                if t.trait_id == id {
                    Some(t)
                } else {
                    walk(&t.children, id)
                }
            })
        }

        walk(&self.personality, trait_id)
            .or_else(|| walk(&self.needs, trait_id))
            .or_else(|| walk(&self.values, trait_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_minimal_profile() {
        let v = json!({
            "processed_language": "fake_ProcessedLanguage",
            "word_count": 9,
            "personality": [],
            "needs": [],
            "values": [],
            "warnings": []
        });
        let profile: Profile = serde_json::from_value(v).unwrap();
        assert_eq!(profile.processed_language, "fake_ProcessedLanguage");
        assert_eq!(profile.word_count, 9);
        assert!(profile.behavior.is_empty());
        assert!(profile.consumption_preferences.is_empty());
    }

    #[test]
    fn deserializes_full_profile() {
        let v = json!({
            "word_count": 15128,
            "processed_language": "en",
            "personality": [{
                "trait_id": "big5_openness",
                "name": "Openness",
                "category": "personality",
                "percentile": 0.8011,
                "raw_score": 0.7772,
                "significant": true,
                "children": [{
                    "trait_id": "facet_adventurousness",
                    "name": "Adventurousness",
                    "category": "personality",
                    "percentile": 0.8931,
                    "significant": true
                }]
            }],
            "needs": [{
                "trait_id": "need_challenge",
                "name": "Challenge",
                "category": "needs",
                "percentile": 0.6732,
                "significant": true
            }],
            "values": [{
                "trait_id": "value_conservation",
                "name": "Conservation",
                "category": "values",
                "percentile": 0.8933,
                "significant": true
            }],
            "behavior": [{
                "trait_id": "behavior_sunday",
                "name": "Sunday",
                "category": "behavior",
                "percentage": 0.2107
            }],
            "consumption_preferences": [{
                "consumption_preference_category_id": "consumption_preferences_shopping",
                "name": "Purchasing Preferences",
                "consumption_preferences": [{
                    "consumption_preference_id": "consumption_preferences_automobile_ownership_cost",
                    "name": "Likely to be sensitive to ownership cost when buying automobiles",
                    "score": 0.0
                }]
            }],
            "warnings": [{
                "warning_id": "PARTIAL_TEXT_USED",
                "message": "The text provided is large; only part was used."
            }, {
                "warning_id": "SOMETHING_NEW",
                "message": "future warning"
            }],
            "some_future_field": true
        });

        let profile: Profile = serde_json::from_value(v).unwrap();
        assert_eq!(profile.word_count, 15128);

        let openness = &profile.personality[0];
        assert_eq!(openness.category, TraitCategory::Personality);
        assert!((openness.raw_score.unwrap() - 0.7772).abs() < 1e-12);
        assert_eq!(openness.children.len(), 1);
        assert!(openness.children[0].raw_score.is_none());

        assert_eq!(profile.needs[0].category, TraitCategory::Needs);
        assert!((profile.behavior[0].percentage - 0.2107).abs() < 1e-12);
        assert_eq!(
            profile.consumption_preferences[0].consumption_preferences.len(),
            1
        );
        assert_eq!(profile.warnings[0].warning_id, WarningId::PartialTextUsed);
        assert_eq!(profile.warnings[1].warning_id, WarningId::Other);
    }

    #[test]
    fn find_trait_searches_facets() {
        let v = json!({
            "processed_language": "en",
            "word_count": 120,
            "personality": [{
                "trait_id": "big5_neuroticism",
                "name": "Emotional range",
                "category": "personality",
                "percentile": 0.4,
                "children": [{
                    "trait_id": "facet_anger",
                    "name": "Fiery",
                    "category": "personality",
                    "percentile": 0.2
                }]
            }],
            "values": [{
                "trait_id": "value_hedonism",
                "name": "Hedonism",
                "category": "values",
                "percentile": 0.1
            }]
        });
        let profile: Profile = serde_json::from_value(v).unwrap();

        assert_eq!(profile.find_trait("facet_anger").unwrap().name, "Fiery");
        assert_eq!(
            profile.find_trait("value_hedonism").unwrap().category,
            TraitCategory::Values
        );
        assert!(profile.find_trait("need_love").is_none());
    }
}
