use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents a bookable salon service in the database
///
/// The duration drives slot-window sizing when listing available
/// appointment times; inactive services cannot be booked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Men's Haircut")]
    pub name: String,
    /// Service duration in minutes
    #[schema(example = 30)]
    pub duration_minutes: i32,
    #[schema(value_type = f64, example = 68.0)]
    pub price: Decimal,
    #[schema(example = true)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents the data needed to create a new service
///
/// Used for POST /api/services requests. Id and timestamps are
/// auto-generated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Hair Coloring")]
    pub name: String,
    /// Service duration in minutes
    #[validate(custom = "crate::validation::validate_positive_duration")]
    #[schema(example = 90)]
    pub duration_minutes: i32,
    #[schema(value_type = f64, example = 288.0)]
    pub price: Decimal,
    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Represents the data for updating an existing service
///
/// Used for PUT /api/services/{id} requests.
/// All fields are optional to support partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateService {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Updated Name")]
    pub name: Option<String>,
    #[schema(example = 45)]
    pub duration_minutes: Option<i32>,
    #[schema(value_type = f64, example = 98.0)]
    pub price: Option<Decimal>,
    #[schema(example = false)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_serialization() {
        let service = Service {
            id: 1,
            name: "Men's Haircut".to_string(),
            duration_minutes: 30,
            price: dec!(68.00),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&service).expect("Failed to serialize Service");

        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"name\":\"Men's Haircut\""));
        assert!(json.contains("\"duration_minutes\":30"));
        assert!(json.contains("\"is_active\":true"));
    }

    #[test]
    fn test_create_service_deserialization() {
        let json = r#"{
            "name": "Hair Coloring",
            "duration_minutes": 90,
            "price": "288.00"
        }"#;

        let create: CreateService =
            serde_json::from_str(json).expect("Failed to deserialize CreateService");

        assert_eq!(create.name, "Hair Coloring");
        assert_eq!(create.duration_minutes, 90);
        assert_eq!(create.price, dec!(288.00));
        // is_active defaults to true when omitted
        assert!(create.is_active);
    }

    #[test]
    fn test_create_service_validation() {
        let valid = CreateService {
            name: "Perm".to_string(),
            duration_minutes: 120,
            price: dec!(388.00),
            is_active: true,
        };
        assert!(valid.validate().is_ok());

        let bad_duration = CreateService {
            duration_minutes: 0,
            ..valid.clone()
        };
        assert!(bad_duration.validate().is_err());

        let bad_name = CreateService {
            name: String::new(),
            ..valid
        };
        assert!(bad_name.validate().is_err());
    }

    #[test]
    fn test_update_service_partial_fields() {
        let json = r#"{ "price": "78.00" }"#;

        let update: UpdateService =
            serde_json::from_str(json).expect("Failed to deserialize UpdateService");

        assert_eq!(update.price, Some(dec!(78.00)));
        assert_eq!(update.name, None);
        assert_eq!(update.duration_minutes, None);
        assert_eq!(update.is_active, None);
    }
}
