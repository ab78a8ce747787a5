//! In-memory shipment record store. Append-only (no delete API), so record
//! positions are stable and a positionally-aligned score vector can be
//! written back against a previously taken snapshot.

use std::sync::Mutex;

use chrono::Utc;

use crate::shipment::{NewShipment, Shipment};

#[derive(Debug, Default)]
pub struct RecordStore {
    inner: Mutex<Vec<Shipment>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of new records, returning how many were added.
    pub fn insert_bulk(&self, items: Vec<NewShipment>) -> usize {
        let now = Utc::now();
        let mut v = self.inner.lock().expect("record store mutex poisoned");
        let added = items.len();
        v.extend(items.into_iter().map(|n| Shipment::from_new(n, now)));
        added
    }

    /// A point-in-time copy of every record, in insertion order.
    pub fn snapshot_all(&self) -> Vec<Shipment> {
        self.inner
            .lock()
            .expect("record store mutex poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("record store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write scores back positionally: `scores[i]` lands on the i-th record.
    ///
    /// Records appended after the scored snapshot sit past `scores.len()` and
    /// keep their unscored state. Returns how many records were updated.
    pub fn apply_scores(&self, scores: &[f64]) -> usize {
        let now = Utc::now();
        let mut v = self.inner.lock().expect("record store mutex poisoned");
        let n = v.len().min(scores.len());
        for (record, score) in v.iter_mut().zip(scores.iter()) {
            record.priority_score = Some(*score);
            record.updated_at = now;
        }
        n
    }
}
