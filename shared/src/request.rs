//! Request types sent to the order API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GuestId;

/// Query parameters for `GET /orders`
///
/// Both bounds are optional; the server returns today's orders when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrdersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime<Utc>>,
}

impl GetOrdersQuery {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from_date: Some(from),
            to_date: Some(to),
        }
    }

    /// Whether `at` falls inside the (inclusive) window
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from_date.is_none_or(|from| at >= from) && self.to_date.is_none_or(|to| at <= to)
    }
}

/// Body for `POST /orders/pay`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayGuestOrdersBody {
    pub guest_id: GuestId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_contains_inclusive_bounds() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let query = GetOrdersQuery::between(from, to);

        assert!(query.contains(from));
        assert!(query.contains(to));
        assert!(!query.contains(to + chrono::Duration::seconds(1)));
        assert!(!query.contains(from - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_open_query_contains_everything() {
        let query = GetOrdersQuery::default();
        assert!(query.contains(Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_pay_body_wire_shape() {
        let json = serde_json::to_value(PayGuestOrdersBody { guest_id: 12 }).unwrap();
        assert_eq!(json, serde_json::json!({ "guestId": 12 }));
    }
}
