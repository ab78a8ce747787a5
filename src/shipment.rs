//! Shipment record types: the commercial and logistics attributes tracked for
//! each unit of cargo, plus the create payload accepted over the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::ShipmentFeatures;

/// Lifecycle status of a shipment. New records start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

/// Cold-chain handling class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentType {
    Frozen,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

/// Create payload for one shipment, as submitted by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShipment {
    pub order_id: String,
    pub customer_id: String,
    pub origin_address: Address,
    pub destination_address: Address,

    pub value: f64,
    pub weight: f64,
    pub volume: f64,
    pub shelf_life_days: u32,
    pub delivery_date: NaiveDate,

    pub shipment_type: ShipmentType,
    #[serde(default)]
    pub regulatory_flags: Vec<String>,

    pub carrier_id: String,
    pub vehicle_id: Option<String>,

    pub pickup_time: Option<DateTime<Utc>>,
    pub delivery_time: Option<DateTime<Utc>>,
}

/// A stored shipment record. The priority score is attached by the scoring
/// endpoint after a batch call returns; it is `None` until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub shipment_id: String,
    pub order_id: String,
    pub customer_id: String,
    pub origin_address: Address,
    pub destination_address: Address,

    pub value: f64,
    pub weight: f64,
    pub volume: f64,
    pub shelf_life_days: u32,
    pub delivery_date: NaiveDate,

    pub shipment_status: ShipmentStatus,
    pub shipment_type: ShipmentType,
    pub regulatory_flags: Vec<String>,

    pub carrier_id: String,
    pub vehicle_id: Option<String>,

    pub priority_score: Option<f64>,

    pub pickup_time: Option<DateTime<Utc>>,
    pub delivery_time: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Materialize a record from a create payload, stamping id and timestamps.
    pub fn from_new(new: NewShipment, now: DateTime<Utc>) -> Self {
        Self {
            shipment_id: Uuid::new_v4().to_string(),
            order_id: new.order_id,
            customer_id: new.customer_id,
            origin_address: new.origin_address,
            destination_address: new.destination_address,
            value: new.value,
            weight: new.weight,
            volume: new.volume,
            shelf_life_days: new.shelf_life_days,
            delivery_date: new.delivery_date,
            shipment_status: ShipmentStatus::Pending,
            shipment_type: new.shipment_type,
            regulatory_flags: new.regulatory_flags,
            carrier_id: new.carrier_id,
            vehicle_id: new.vehicle_id,
            priority_score: None,
            pickup_time: new.pickup_time,
            delivery_time: new.delivery_time,
            created_at: now,
            updated_at: now,
        }
    }

    /// The scoring view of this record: just the five ranked attributes.
    pub fn features(&self) -> ShipmentFeatures {
        ShipmentFeatures {
            value: self.value,
            weight: self.weight,
            volume: self.volume,
            shelf_life_days: self.shelf_life_days,
            delivery_date: self.delivery_date,
        }
    }
}
