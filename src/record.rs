use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `customers` table, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub sno: i32,
    pub customer_name: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A customer as the table view sees it: the creation timestamp is already
/// moved into the display time zone, so the derived date and time columns
/// are plain wall-clock values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub sno: i32,
    pub customer_name: Option<String>,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Row {
    pub fn localize<Tz: TimeZone>(customer: Customer, tz: &Tz) -> Self {
        Row {
            sno: customer.sno,
            customer_name: customer.customer_name,
            age: customer.age,
            phone: customer.phone,
            location: customer.location,
            created_at: customer
                .created_at
                .map(|ts| ts.with_timezone(tz).naive_local()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn customer_json_uses_column_names() {
        let json = r#"{
            "sno": 7,
            "customer_name": "Asha",
            "age": 31,
            "phone": "555-0101",
            "location": "Pune",
            "created_at": "2023-08-01T10:15:00Z"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.sno, 7);
        assert_eq!(customer.customer_name.as_deref(), Some("Asha"));
        assert_eq!(customer.age, Some(31));
    }

    #[test]
    fn null_fields_are_accepted() {
        let json = r#"{"sno": 1, "customer_name": null, "age": null,
            "phone": null, "location": null, "created_at": null}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.customer_name, None);
        assert_eq!(customer.created_at, None);
    }

    #[test]
    fn localize_shifts_timestamp_into_zone() {
        let customer = Customer {
            sno: 1,
            customer_name: None,
            age: None,
            phone: None,
            location: None,
            created_at: Some(Utc.with_ymd_and_hms(2023, 8, 1, 23, 30, 0).unwrap()),
        };
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let row = Row::localize(customer, &ist);
        let ts = row.created_at.unwrap();
        assert_eq!(ts.to_string(), "2023-08-02 05:00:00");
    }
}
