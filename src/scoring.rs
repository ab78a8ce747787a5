//! # Priority Scorer
//!
//! Pure, testable logic that maps a batch of shipment attribute tuples plus a
//! weight configuration to one priority score per shipment. No I/O, no shared
//! state; safe to call concurrently with independent batches.
//!
//! Each feature is min-max normalized into `[0, 1]` against the current batch
//! so heterogeneous units become comparable, then combined linearly with the
//! configured weights:
//!
//! - `value` counts *directly*: higher declared value, higher priority.
//! - `weight` and `volume` count *inversely*: heavier and bulkier shipments
//!   cost more to handle, so smaller raw values rank higher.
//! - `shelf_life_days` counts inversely: less remaining shelf life is more
//!   urgent.
//! - `days_to_delivery` counts inversely, computed against an explicit
//!   `today` so callers (and tests) control the clock. Overdue shipments are
//!   clamped to zero days — exactly as urgent as delivering today.
//!
//! A degenerate normalization basis (single-element batch, or an all-equal
//! column) yields the neutral contribution 1.0 for every shipment instead of
//! a division error. The composite score is bounded by the sum of applied
//! weights; it is not forced into `[0, 1]`.

use chrono::NaiveDate;

use crate::weights::FeatureWeights;

/// Scoring input for one shipment. Owned by the caller for the duration of a
/// batch call; the scorer keeps nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipmentFeatures {
    /// Declared value in currency units.
    pub value: f64,
    /// Mass in kilograms.
    pub weight: f64,
    /// Volume in cubic meters.
    pub volume: f64,
    /// Days until the goods spoil.
    pub shelf_life_days: u32,
    /// Promised delivery date; urgency is derived relative to `today`.
    pub delivery_date: NaiveDate,
}

/// Batch-level validation failure. No scores are produced for any entry of a
/// rejected batch, so a malformed shipment can never silently corrupt a
/// sibling's score.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScoreError {
    #[error("shipment {index}: '{field}' must be a non-negative finite number, got {value}")]
    InvalidAttribute {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Whether larger raw values raise or lower the priority contribution.
#[derive(Clone, Copy)]
enum Sense {
    Direct,
    Inverse,
}

/// Score a batch of shipments under the given weight configuration.
///
/// Returns exactly `shipments.len()` scores, positionally aligned with the
/// input: `scores[i]` belongs to `shipments[i]`. An empty batch returns an
/// empty vector without error.
pub fn score_batch(
    shipments: &[ShipmentFeatures],
    weights: &FeatureWeights,
    today: NaiveDate,
) -> Result<Vec<f64>, ScoreError> {
    if shipments.is_empty() {
        return Ok(Vec::new());
    }

    // 1) Reject malformed numerics up front, batch-level.
    for (index, s) in shipments.iter().enumerate() {
        for (field, v) in [("value", s.value), ("weight", s.weight), ("volume", s.volume)] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScoreError::InvalidAttribute {
                    index,
                    field,
                    value: v,
                });
            }
        }
    }

    // 2) Extract one column per feature. Overdue deliveries clamp to zero
    //    days before normalization, so they contribute like delivering today.
    let values: Vec<f64> = shipments.iter().map(|s| s.value).collect();
    let masses: Vec<f64> = shipments.iter().map(|s| s.weight).collect();
    let volumes: Vec<f64> = shipments.iter().map(|s| s.volume).collect();
    let shelf_lives: Vec<f64> = shipments.iter().map(|s| s.shelf_life_days as f64).collect();
    let deliveries: Vec<f64> = shipments
        .iter()
        .map(|s| (s.delivery_date - today).num_days().max(0) as f64)
        .collect();

    // 3) Normalize each column into [0, 1] against the batch.
    let c_value = normalize_column(&values, Sense::Direct);
    let c_weight = normalize_column(&masses, Sense::Inverse);
    let c_volume = normalize_column(&volumes, Sense::Inverse);
    let c_shelf = normalize_column(&shelf_lives, Sense::Inverse);
    let c_delivery = normalize_column(&deliveries, Sense::Inverse);

    // 4) Weighted linear combination per shipment.
    let scores = (0..shipments.len())
        .map(|i| {
            weights.value * c_value[i]
                + weights.weight * c_weight[i]
                + weights.volume * c_volume[i]
                + weights.shelf_life_days * c_shelf[i]
                + weights.days_to_delivery * c_delivery[i]
        })
        .collect();

    Ok(scores)
}

/// Min-max normalize one feature column into `[0, 1]`.
///
/// `Direct` maps the batch maximum to 1, `Inverse` maps the batch minimum
/// to 1. A collapsed basis (`max == min`, which covers single-element
/// batches) yields the neutral contribution 1.0 for every entry.
fn normalize_column(xs: &[f64], sense: Sense) -> Vec<f64> {
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    if span <= 0.0 {
        return vec![1.0; xs.len()];
    }

    xs.iter()
        .map(|&x| match sense {
            Sense::Direct => (x - min) / span,
            Sense::Inverse => (max - x) / span,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(offset: i64) -> NaiveDate {
        today() + chrono::Duration::days(offset)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn shipment(value: f64, weight: f64, volume: f64, shelf: u32, delivery: NaiveDate) -> ShipmentFeatures {
        ShipmentFeatures {
            value,
            weight,
            volume,
            shelf_life_days: shelf,
            delivery_date: delivery,
        }
    }

    #[test]
    fn empty_batch_yields_empty_scores() {
        let scores = score_batch(&[], &FeatureWeights::balanced(), today()).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn output_is_positionally_aligned() {
        let batch = vec![
            shipment(100.0, 10.0, 1.0, 2, day(1)),
            shipment(50.0, 5.0, 1.0, 10, day(10)),
            shipment(75.0, 7.0, 2.0, 5, day(5)),
        ];
        let scores = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap();
        assert_eq!(scores.len(), batch.len());

        // Reversing the batch reverses the scores; each shipment keeps its
        // own score regardless of position.
        let reversed: Vec<_> = batch.iter().rev().copied().collect();
        let rev_scores = score_batch(&reversed, &FeatureWeights::balanced(), today()).unwrap();
        for (a, b) in scores.iter().zip(rev_scores.iter().rev()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn example_scenario_high_value_urgent_shipment_wins() {
        let batch = vec![
            shipment(100.0, 10.0, 1.0, 2, day(1)),
            shipment(50.0, 5.0, 1.0, 10, day(10)),
        ];
        let scores = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap();
        assert!(
            scores[0] > scores[1],
            "higher value, shorter shelf life and closer delivery must outrank: {scores:?}"
        );
        // With balanced weights the exact contributions are known: the first
        // shipment wins value, shelf life and delivery, loses mass, ties volume.
        assert!((scores[0] - 0.8).abs() < 1e-12);
        assert!((scores[1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn single_shipment_batch_is_finite_and_neutral() {
        let batch = vec![shipment(42.0, 3.0, 0.5, 7, day(3))];
        let scores = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores[0].is_finite());
        // Every contribution collapses to the neutral 1.0, so the score is
        // the sum of applied weights.
        assert!((scores[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_equal_values_do_not_divide_by_zero() {
        let batch = vec![
            shipment(60.0, 4.0, 1.0, 5, day(2)),
            shipment(60.0, 8.0, 2.0, 9, day(6)),
        ];
        let scores = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap();
        assert!(scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn raising_value_never_lowers_the_score() {
        let weights = FeatureWeights::balanced();
        // Third shipment pins the batch minimum so the change is interior.
        let mut batch = vec![
            shipment(50.0, 4.0, 1.0, 5, day(2)),
            shipment(80.0, 8.0, 2.0, 9, day(6)),
            shipment(20.0, 6.0, 1.5, 7, day(4)),
        ];
        let before = score_batch(&batch, &weights, today()).unwrap()[0];

        batch[0].value = 70.0;
        let after = score_batch(&batch, &weights, today()).unwrap()[0];
        assert!(after > before);

        // Past the batch maximum the contribution saturates at 1.0.
        batch[0].value = 500.0;
        let capped = score_batch(&batch, &weights, today()).unwrap()[0];
        assert!(capped >= after);
    }

    #[test]
    fn shrinking_shelf_life_never_lowers_the_score() {
        let weights = FeatureWeights::balanced();
        // Third shipment pins the batch minimum so the change is interior.
        let mut batch = vec![
            shipment(50.0, 4.0, 1.0, 8, day(2)),
            shipment(80.0, 8.0, 2.0, 12, day(6)),
            shipment(20.0, 6.0, 1.5, 2, day(4)),
        ];
        let before = score_batch(&batch, &weights, today()).unwrap()[0];

        batch[0].shelf_life_days = 3;
        let after = score_batch(&batch, &weights, today()).unwrap()[0];
        assert!(after > before);
    }

    #[test]
    fn overdue_delivery_matches_delivering_today() {
        let weights = FeatureWeights::balanced();
        let far = shipment(50.0, 4.0, 1.0, 5, day(14));

        let overdue = vec![shipment(50.0, 4.0, 1.0, 5, day(-6)), far];
        let due_today = vec![shipment(50.0, 4.0, 1.0, 5, day(0)), far];

        let a = score_batch(&overdue, &weights, today()).unwrap();
        let b = score_batch(&due_today, &weights, today()).unwrap();
        assert!((a[0] - b[0]).abs() < 1e-12);
        // Both get the maximal urgency contribution in their batch.
        assert!(a[0] > a[1]);
    }

    #[test]
    fn missing_feature_weight_contributes_nothing() {
        let only_value = FeatureWeights {
            value: 1.0,
            weight: 0.0,
            volume: 0.0,
            shelf_life_days: 0.0,
            days_to_delivery: 0.0,
        };
        let batch = vec![
            shipment(100.0, 1.0, 1.0, 1, day(1)),
            shipment(20.0, 90.0, 9.0, 90, day(90)),
        ];
        let scores = score_batch(&batch, &only_value, today()).unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!((scores[1] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn score_is_bounded_by_sum_of_weights() {
        let weights = FeatureWeights {
            value: 0.9,
            weight: 0.8,
            volume: 0.7,
            shelf_life_days: 0.6,
            days_to_delivery: 0.5,
        };
        let bound: f64 = 0.9 + 0.8 + 0.7 + 0.6 + 0.5;
        let batch = vec![
            shipment(10.0, 1.0, 0.1, 1, day(0)),
            shipment(99.0, 50.0, 9.0, 30, day(30)),
            shipment(55.0, 20.0, 3.0, 10, day(7)),
        ];
        let scores = score_batch(&batch, &weights, today()).unwrap();
        for s in scores {
            assert!((0.0..=bound + 1e-12).contains(&s));
        }
    }

    #[test]
    fn non_finite_attribute_rejects_the_batch() {
        let batch = vec![
            shipment(50.0, 4.0, 1.0, 5, day(2)),
            shipment(f64::NAN, 8.0, 2.0, 9, day(6)),
        ];
        let err = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::InvalidAttribute {
                index: 1,
                field: "value",
                ..
            }
        ));
    }

    #[test]
    fn negative_attribute_rejects_the_batch() {
        let batch = vec![shipment(50.0, -4.0, 1.0, 5, day(2))];
        let err = score_batch(&batch, &FeatureWeights::balanced(), today()).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::InvalidAttribute {
                index: 0,
                field: "weight",
                ..
            }
        ));
    }
}
