//! Durable expense storage with optimistic concurrency.
//!
//! [`Gateway`] exposes list/get/create/update/delete over the `expenses`
//! table. Every write returns a new [`Revision`]; update and delete only
//! apply when the caller echoes the current one, otherwise they fail with
//! [`GatewayError::RevisionConflict`] and leave the document untouched.
//!
//! The gateway owns no global state: it is built around an explicit
//! [`DatabaseConnection`] and [`Gateway::close`] releases it.

use chrono::Utc;
use ledger::{ExpenseFields, ExpenseId, ValidationPolicy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

pub use error::GatewayError;
pub use expenses::{DocumentRef, StoredExpense};
pub use revision::Revision;

mod error;
mod expenses;
mod revision;

pub type ResultGateway<T> = Result<T, GatewayError>;

#[derive(Debug)]
pub struct Gateway {
    database: DatabaseConnection,
    policy: ValidationPolicy,
}

impl Gateway {
    /// Return a builder for `Gateway`.
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Every stored expense with its current revision, oldest first.
    pub async fn list(&self) -> ResultGateway<Vec<StoredExpense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        tracing::debug!("listed {} expenses", models.len());

        models.into_iter().map(StoredExpense::try_from).collect()
    }

    pub async fn get(&self, id: ExpenseId) -> ResultGateway<StoredExpense> {
        expenses::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?
            .try_into()
    }

    /// Stores a new document. The store picks the id and the first revision.
    ///
    /// Not idempotent: retrying after a success creates a second document.
    pub async fn create(&self, fields: ExpenseFields) -> ResultGateway<DocumentRef> {
        self.policy.validate(&fields)?;

        let id = ExpenseId::new();
        let revision = Revision::initial();
        expenses::ActiveModel::new_document(id, &revision, fields, Utc::now())
            .insert(&self.database)
            .await?;
        tracing::info!("created expense {id} at revision {revision}");

        Ok(DocumentRef { id, revision })
    }

    /// Replaces every field of `id` if `revision` is still current.
    pub async fn update(
        &self,
        id: ExpenseId,
        revision: &Revision,
        fields: ExpenseFields,
    ) -> ResultGateway<Revision> {
        self.policy.validate(&fields)?;

        let next = revision.next();
        let result = expenses::Entity::update_many()
            .col_expr(expenses::Column::Revision, Expr::value(next.as_str()))
            .col_expr(expenses::Column::Description, Expr::value(fields.description))
            .col_expr(
                expenses::Column::AmountMinor,
                Expr::value(fields.amount.minor()),
            )
            .col_expr(expenses::Column::OccurredAt, Expr::value(fields.occurred_at))
            .col_expr(
                expenses::Column::Category,
                Expr::value(fields.category.to_string()),
            )
            .filter(expenses::Column::Id.eq(id.to_string()))
            .filter(expenses::Column::Revision.eq(revision.as_str()))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(self.rejected_write(id, revision).await);
        }
        tracing::info!("updated expense {id} to revision {next}");
        Ok(next)
    }

    /// Deletes `id` if `revision` is still current.
    pub async fn delete(&self, id: ExpenseId, revision: &Revision) -> ResultGateway<()> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::Id.eq(id.to_string()))
            .filter(expenses::Column::Revision.eq(revision.as_str()))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(self.rejected_write(id, revision).await);
        }
        tracing::info!("deleted expense {id} at revision {revision}");
        Ok(())
    }

    /// Releases the store handle.
    pub async fn close(&self) -> ResultGateway<()> {
        self.database.clone().close().await?;
        tracing::info!("expense store closed");
        Ok(())
    }

    /// Explains why a compare-and-swap write matched no row.
    async fn rejected_write(&self, id: ExpenseId, revision: &Revision) -> GatewayError {
        let current = match expenses::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await
        {
            Ok(current) => current,
            Err(err) => return err.into(),
        };

        match current {
            None => GatewayError::NotFound(id.to_string()),
            Some(model) => {
                tracing::warn!(
                    "rejected write on expense {id}: revision {revision} is stale, current is {}",
                    model.revision
                );
                GatewayError::RevisionConflict {
                    id: id.to_string(),
                    expected: revision.to_string(),
                    current: model.revision,
                }
            }
        }
    }
}

/// The builder for `Gateway`
#[derive(Default)]
pub struct GatewayBuilder {
    database: DatabaseConnection,
    policy: ValidationPolicy,
}

impl GatewayBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> GatewayBuilder {
        self.database = db;
        self
    }

    /// Checks applied to create and update. Defaults to accepting everything.
    pub fn policy(mut self, policy: ValidationPolicy) -> GatewayBuilder {
        self.policy = policy;
        self
    }

    /// Construct `Gateway`
    pub fn build(self) -> Gateway {
        Gateway {
            database: self.database,
            policy: self.policy,
        }
    }
}
