//! Blockstate definition parsing.
//!
//! Blockstates define how block properties map to model variants.
//! There are two formats: "variants" and "multipart".

use super::ordered::OrderedMap;
use crate::types::DEFAULT_NAMESPACE;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A blockstate definition from blockstates/*.json.
#[derive(Debug, Clone)]
pub enum BlockstateDefinition {
    /// Simple variants: property conditions map to models, in declaration order.
    Variants(OrderedMap<Vec<ModelVariant>>),
    /// Multipart: conditional model application.
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBlockstate {
            variants: Option<OrderedMap<VariantValue>>,
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawBlockstate::deserialize(deserializer)?;

        if let Some(variants) = raw.variants {
            let parsed = variants
                .0
                .into_iter()
                .map(|(k, v)| (k, v.into_vec()))
                .collect();
            Ok(BlockstateDefinition::Variants(parsed))
        } else if let Some(multipart) = raw.multipart {
            Ok(BlockstateDefinition::Multipart(multipart))
        } else {
            // Neither format present; callers treat this as "no models"
            Ok(BlockstateDefinition::Variants(OrderedMap::new()))
        }
    }
}

impl BlockstateDefinition {
    /// True if the definition names no model at all.
    pub fn is_empty(&self) -> bool {
        match self {
            BlockstateDefinition::Variants(variants) => variants.is_empty(),
            BlockstateDefinition::Multipart(cases) => cases.is_empty(),
        }
    }

    /// The (condition, model) pairs used for color generation.
    ///
    /// Weighted variant lists contribute their first model. A multipart
    /// definition is reduced to a single unconditional variant built from
    /// the first case without a `when` clause (or the first case if every
    /// case is conditional).
    pub fn representative_models(&self) -> Vec<(String, &ModelVariant)> {
        match self {
            BlockstateDefinition::Variants(variants) => variants
                .iter()
                .filter_map(|(condition, models)| {
                    models.first().map(|model| (condition.to_string(), model))
                })
                .collect(),
            BlockstateDefinition::Multipart(cases) => cases
                .iter()
                .find(|case| case.when.is_none())
                .or_else(|| cases.first())
                .and_then(|case| case.apply.variants().into_iter().next())
                .map(|model| vec![(String::new(), model)])
                .unwrap_or_default(),
        }
    }
}

/// A variant value can be a single model or an array of weighted models.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariantValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl VariantValue {
    fn into_vec(self) -> Vec<ModelVariant> {
        match self {
            VariantValue::Single(v) => vec![v],
            VariantValue::Multiple(v) => v,
        }
    }
}

/// A model variant reference. Rotation and weight are irrelevant for
/// colors and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelVariant {
    /// Model resource location (e.g., "block/stone" or "minecraft:block/stone").
    pub model: String,
}

impl ModelVariant {
    /// Get the full resource location for the model.
    pub fn model_location(&self) -> String {
        if self.model.contains(':') {
            self.model.clone()
        } else {
            format!("{}:{}", DEFAULT_NAMESPACE, self.model)
        }
    }
}

/// A multipart case with optional condition.
#[derive(Debug, Clone, Deserialize)]
pub struct MultipartCase {
    /// Condition for when this case applies; only its presence matters here.
    #[serde(default)]
    pub when: Option<serde_json::Value>,
    /// Model(s) to apply when condition is met.
    pub apply: ApplyValue,
}

/// The apply value can be a single model or array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApplyValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl ApplyValue {
    pub fn variants(&self) -> Vec<&ModelVariant> {
        match self {
            ApplyValue::Single(v) => vec![v],
            ApplyValue::Multiple(v) => v.iter().collect(),
        }
    }
}

/// A parsed variant key such as `"facing=north,half=top"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantCondition {
    pairs: Vec<(String, String)>,
}

impl VariantCondition {
    /// Parse a variant key. Fragments without `=` are ignored, so the empty
    /// key parses to a condition that matches everything.
    pub fn parse(key: &str) -> Self {
        let pairs = key
            .split(',')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
            .collect();
        Self { pairs }
    }

    /// Check the condition against a block state's properties.
    ///
    /// Every condition key the state has must carry the same value; keys the
    /// state does not have are ignored.
    pub fn matches(&self, properties: &BTreeMap<String, String>) -> bool {
        self.pairs.iter().all(|(key, expected)| {
            properties
                .get(key)
                .map(|value| value == expected)
                .unwrap_or(true)
        })
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Build a property string from a properties map, e.g.
/// {"facing": "north", "half": "bottom"} -> "facing=north,half=bottom".
/// Used for error messages and logs.
pub fn build_property_string(properties: &BTreeMap<String, String>) -> String {
    properties
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
