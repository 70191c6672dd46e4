//! Stored expense documents.

use chrono::{DateTime, Utc};
use ledger::{Amount, Category, Expense, ExpenseFields, ExpenseId};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{GatewayError, Revision};

/// An expense together with the revision it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredExpense {
    pub expense: Expense,
    pub revision: Revision,
}

/// Identity of a written document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: ExpenseId,
    pub revision: Revision,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub revision: String,
    pub description: String,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
    pub category: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_document(
        id: ExpenseId,
        revision: &Revision,
        fields: ExpenseFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActiveValue::Set(id.to_string()),
            revision: ActiveValue::Set(revision.to_string()),
            description: ActiveValue::Set(fields.description),
            amount_minor: ActiveValue::Set(fields.amount.minor()),
            occurred_at: ActiveValue::Set(fields.occurred_at),
            category: ActiveValue::Set(fields.category.to_string()),
            created_at: ActiveValue::Set(created_at),
        }
    }
}

impl TryFrom<Model> for StoredExpense {
    type Error = GatewayError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model
            .id
            .parse::<ExpenseId>()
            .map_err(|_| GatewayError::Corrupted(model.id.clone()))?;
        let fields = ExpenseFields {
            description: model.description,
            amount: Amount::new(model.amount_minor),
            occurred_at: model.occurred_at,
            category: Category::new(model.category),
        };
        Ok(Self {
            expense: Expense::with_id(id, fields),
            revision: Revision::from(model.revision),
        })
    }
}
