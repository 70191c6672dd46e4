use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod expense {
    use chrono::{DateTime, NaiveDate, Utc};
    use uuid::Uuid;

    use super::*;

    /// Body of `POST /expenses`.
    ///
    /// `occurred_at` is epoch milliseconds in JSON.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(default)]
        pub description: String,
        pub amount_minor: i64,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        pub occurred_at: DateTime<Utc>,
        pub category: String,
    }

    /// Body of `PUT /expenses/{id}`: the revision being replaced plus every
    /// field of the new version.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub revision: String,
        #[serde(default)]
        pub description: String,
        pub amount_minor: i64,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        pub occurred_at: DateTime<Utc>,
        pub category: String,
    }

    /// Query of `DELETE /expenses/{id}`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ExpenseDelete {
        pub revision: String,
    }

    /// Optional filters of `GET /expenses`.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ExpenseQuery {
        /// Exact category name.
        pub category: Option<String>,
        /// UTC calendar day, `YYYY-MM-DD`.
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub revision: String,
        pub description: String,
        pub amount_minor: i64,
        #[serde(with = "chrono::serde::ts_milliseconds")]
        pub occurred_at: DateTime<Utc>,
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    /// Identity returned by create and update.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseWritten {
        pub id: Uuid,
        pub revision: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub id: Uuid,
        pub deleted: bool,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total_minor: i64,
    }

    /// Body of `GET /expenses/summary`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseSummary {
        pub count: usize,
        pub total_minor: i64,
        pub ceiling_minor: i64,
        /// `true` once the total reaches 90% of the ceiling.
        pub warning: bool,
        pub categories: Vec<CategoryTotal>,
    }
}

#[cfg(test)]
mod tests {
    use super::expense::*;

    #[test]
    fn expense_new_reads_epoch_millis() {
        let payload: ExpenseNew = serde_json::from_str(
            r#"{"amount_minor":350,"occurred_at":1700000000000,"category":"Food"}"#,
        )
        .unwrap();

        assert_eq!(payload.description, "");
        assert_eq!(payload.occurred_at.timestamp_millis(), 1_700_000_000_000);
    }
}
