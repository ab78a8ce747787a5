//! # Feature Weights
//!
//! The configurable per-feature coefficients used to combine normalized
//! shipment attribute contributions into one priority score.
//!
//! - The recognized feature set is closed: `value`, `weight`, `volume`,
//!   `shelf_life_days`, `days_to_delivery`.
//! - A full [`FeatureWeights`] value is validated into `[0.0, 1.0]` per field
//!   before it may be persisted.
//! - The store keeps one entry per feature name; [`FeatureWeights::resolve`]
//!   turns a stored entry list back into an applied configuration, falling
//!   back to the balanced default (0.2 each) when nothing was ever set.

use serde::{Deserialize, Serialize};

/// The closed set of scoring features, in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Value,
    Weight,
    Volume,
    ShelfLifeDays,
    DaysToDelivery,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Value,
        Feature::Weight,
        Feature::Volume,
        Feature::ShelfLifeDays,
        Feature::DaysToDelivery,
    ];

    /// Canonical feature name as persisted by the weight store.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Value => "value",
            Feature::Weight => "weight",
            Feature::Volume => "volume",
            Feature::ShelfLifeDays => "shelf_life_days",
            Feature::DaysToDelivery => "days_to_delivery",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// One stored row of the weight configuration: feature name → weight value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub feature_name: String,
    pub weight_value: f64,
}

/// A complete weight configuration, one coefficient per recognized feature.
///
/// Updates are full replacements: the caller always supplies all five fields,
/// never a patch. There is no invariant that the weights sum to 1 — the score
/// range is bounded by the sum of applied weights instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub value: f64,
    pub weight: f64,
    pub volume: f64,
    pub shelf_life_days: f64,
    pub days_to_delivery: f64,
}

/// Rejected weight configurations. Raised before any store mutation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WeightsError {
    #[error("weight for '{feature}' must be within [0.0, 1.0], got {value}")]
    OutOfRange { feature: &'static str, value: f64 },
}

impl FeatureWeights {
    /// The documented default: equal weight (0.2) across all five features.
    /// Applied whenever no configuration has ever been stored.
    pub fn balanced() -> Self {
        Self {
            value: 0.2,
            weight: 0.2,
            volume: 0.2,
            shelf_life_days: 0.2,
            days_to_delivery: 0.2,
        }
    }

    /// Coefficient for a single feature.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Value => self.value,
            Feature::Weight => self.weight,
            Feature::Volume => self.volume,
            Feature::ShelfLifeDays => self.shelf_life_days,
            Feature::DaysToDelivery => self.days_to_delivery,
        }
    }

    /// Validate every field into `[0.0, 1.0]`. NaN fails the range check.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for f in Feature::ALL {
            let v = self.get(f);
            if !(0.0..=1.0).contains(&v) {
                return Err(WeightsError::OutOfRange {
                    feature: f.name(),
                    value: v,
                });
            }
        }
        Ok(())
    }

    /// Expand into the stored row shape, one entry per feature in canonical
    /// order.
    pub fn entries(&self) -> Vec<WeightEntry> {
        Feature::ALL
            .into_iter()
            .map(|f| WeightEntry {
                feature_name: f.name().to_string(),
                weight_value: self.get(f),
            })
            .collect()
    }

    /// Rebuild an applied configuration from stored entries.
    ///
    /// - Empty entry list (never configured) → [`FeatureWeights::balanced`].
    /// - Features missing from a non-empty list contribute with weight 0.
    /// - Entries with unrecognized names are ignored.
    pub fn resolve(entries: &[WeightEntry]) -> Self {
        if entries.is_empty() {
            return Self::balanced();
        }
        let mut w = Self {
            value: 0.0,
            weight: 0.0,
            volume: 0.0,
            shelf_life_days: 0.0,
            days_to_delivery: 0.0,
        };
        for e in entries {
            match Feature::from_name(&e.feature_name) {
                Some(Feature::Value) => w.value = e.weight_value,
                Some(Feature::Weight) => w.weight = e.weight_value,
                Some(Feature::Volume) => w.volume = e.weight_value,
                Some(Feature::ShelfLifeDays) => w.shelf_life_days = e.weight_value,
                Some(Feature::DaysToDelivery) => w.days_to_delivery = e.weight_value,
                None => {}
            }
        }
        w
    }
}
