//! Records exchanged with the delivery service.
//!
//! These are owned by the remote service. The client never derives
//! delivery state (status, returned counts) on its own.

use serde::{Deserialize, Deserializer, Serialize};

/// Role tag carried by driver accounts
pub const DRIVER_ROLE: &str = "driver";

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// An authenticated session, returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Role reported by the service, if any
    pub role: Option<String>,
}

/// A driver account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl Driver {
    pub fn is_driver(&self) -> bool {
        self.role.as_deref() == Some(DRIVER_ROLE)
    }
}

/// A truck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub plate_number: Option<String>,
}

impl Truck {
    /// Plate number, or `Truck <id prefix>` when the plate is unknown
    pub fn label(&self) -> String {
        match self.plate_number.as_deref() {
            Some(plate) if !plate.is_empty() => plate.to_string(),
            _ => format!("Truck {}", prefix(&self.id, 6)),
        }
    }
}

/// A reference to another record: either populated by the service or a bare id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Populated(T),
    Id(String),
}

/// A delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub driver: Option<Reference<Driver>>,
    #[serde(default)]
    pub truck: Option<Reference<Truck>>,
    #[serde(default)]
    pub full_bottles_sent: Option<u32>,
    #[serde(default)]
    pub empty_bottles_sent: Option<u32>,
    #[serde(default)]
    pub full_bottles_returned: Option<u32>,
    #[serde(default)]
    pub empty_bottles_returned: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Delivery {
    /// First 10 characters of the identifier followed by `...`
    pub fn short_id(&self) -> String {
        format!("{}...", prefix(&self.id, 10))
    }

    pub fn driver_label(&self) -> String {
        match &self.driver {
            Some(Reference::Populated(driver)) if !driver.name.is_empty() => driver.name.clone(),
            Some(Reference::Populated(driver)) if !driver.id.is_empty() => driver.id.clone(),
            Some(Reference::Id(id)) if !id.is_empty() => id.clone(),
            _ => "N/A".to_string(),
        }
    }

    pub fn truck_label(&self) -> String {
        match &self.truck {
            Some(Reference::Populated(truck)) => match truck.plate_number.as_deref() {
                Some(plate) if !plate.is_empty() => plate.to_string(),
                _ if !truck.id.is_empty() => truck.id.clone(),
                _ => "N/A".to_string(),
            },
            Some(Reference::Id(id)) if !id.is_empty() => id.clone(),
            _ => "N/A".to_string(),
        }
    }

    pub fn status_label(&self) -> &str {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => "N/A",
        }
    }
}

/// Body of `POST /api/deliveries`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub driver: String,
    pub truck: String,
    pub full_bottles_sent: u32,
    pub empty_bottles_sent: u32,
}

/// Body of `PATCH /api/deliveries/:id`. Only the sent counts are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryUpdate {
    pub full_bottles_sent: u32,
    pub empty_bottles_sent: u32,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delivery_with_populated_references() {
        let delivery: Delivery = serde_json::from_value(json!({
            "_id": "60d5ec49f7e5b10015f8a2c1",
            "driver": { "_id": "d1", "name": "Karim", "role": "driver" },
            "truck": { "_id": "t1", "plateNumber": "AB-123-CD" },
            "fullBottlesSent": 12,
            "emptyBottlesSent": 3,
            "fullBottlesReturned": 1,
            "emptyBottlesReturned": null,
            "status": "in_progress"
        }))
        .unwrap();

        assert_eq!(delivery.driver_label(), "Karim");
        assert_eq!(delivery.truck_label(), "AB-123-CD");
        assert_eq!(delivery.short_id(), "60d5ec49f7...");
        assert_eq!(delivery.full_bottles_sent, Some(12));
        assert_eq!(delivery.empty_bottles_returned, None);
        assert_eq!(delivery.status_label(), "in_progress");
    }

    #[test]
    fn test_delivery_with_bare_references_and_missing_fields() {
        let delivery: Delivery = serde_json::from_value(json!({
            "_id": "abc",
            "driver": "d1",
            "truck": "t1"
        }))
        .unwrap();

        assert_eq!(delivery.driver_label(), "d1");
        assert_eq!(delivery.truck_label(), "t1");
        assert_eq!(delivery.short_id(), "abc...");
        assert_eq!(delivery.status_label(), "N/A");

        let empty: Delivery = serde_json::from_value(json!({ "_id": "x" })).unwrap();
        assert_eq!(empty.driver_label(), "N/A");
        assert_eq!(empty.truck_label(), "N/A");
    }

    #[test]
    fn test_truck_label_falls_back_to_id_prefix() {
        let truck = Truck {
            id: "64f1a2b3c4d5".to_string(),
            plate_number: None,
        };
        assert_eq!(truck.label(), "Truck 64f1a2");
    }

    #[test]
    fn test_new_delivery_wire_format() {
        let body = serde_json::to_value(NewDelivery {
            driver: "d1".to_string(),
            truck: "t1".to_string(),
            full_bottles_sent: 10,
            empty_bottles_sent: 4,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "driver": "d1", "truck": "t1", "fullBottlesSent": 10, "emptyBottlesSent": 4 })
        );
    }

    #[test]
    fn test_null_and_missing_fields_are_tolerated() {
        let driver: Driver =
            serde_json::from_value(json!({ "_id": "d1", "name": null, "role": "driver" })).unwrap();
        assert_eq!(driver.name, "");
        assert!(driver.is_driver());

        let delivery: Delivery = serde_json::from_value(json!({
            "_id": "a2",
            "driver": { "name": "NoId" },
            "truck": { "plateNumber": null }
        }))
        .unwrap();
        assert_eq!(delivery.driver_label(), "NoId");
        assert_eq!(delivery.truck_label(), "N/A");

        let delivery: Delivery = serde_json::from_value(json!({
            "_id": "a3",
            "driver": { "name": null }
        }))
        .unwrap();
        assert_eq!(delivery.driver_label(), "N/A");
    }
}
