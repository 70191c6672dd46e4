//! Expenses API endpoints

use std::collections::HashMap;

use api_types::expense::{
    CategoryTotal, ExpenseDelete, ExpenseDeleted, ExpenseListResponse, ExpenseNew, ExpenseQuery,
    ExpenseSummary, ExpenseUpdate, ExpenseView, ExpenseWritten,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use gateway::{DocumentRef, GatewayError, Revision, StoredExpense};
use ledger::{Amount, Category, Expense, ExpenseFields, ExpenseFilter, ExpenseId};

use crate::{ServerError, server::ServerState};

fn parse_id(raw: &str) -> Result<ExpenseId, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::Gateway(GatewayError::NotFound(raw.to_string())))
}

fn map_view(doc: StoredExpense) -> ExpenseView {
    let StoredExpense { expense, revision } = doc;
    ExpenseView {
        id: expense.id.uuid(),
        revision: revision.into(),
        description: expense.description,
        amount_minor: expense.amount.minor(),
        occurred_at: expense.occurred_at,
        category: expense.category.to_string(),
    }
}

fn map_written(doc: DocumentRef) -> ExpenseWritten {
    ExpenseWritten {
        id: doc.id.uuid(),
        revision: doc.revision.into(),
    }
}

fn query_filters(query: &ExpenseQuery) -> Vec<ExpenseFilter> {
    let mut filters = Vec::new();
    if let Some(category) = &query.category {
        filters.push(ExpenseFilter::Category(Category::new(category.as_str())));
    }
    if let Some(date) = query.date {
        filters.push(ExpenseFilter::OccurredOn(date));
    }
    filters
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let mut revisions = HashMap::new();
    let records: Vec<Expense> = state
        .gateway
        .list()
        .await?
        .into_iter()
        .map(|doc| {
            revisions.insert(doc.expense.id, doc.revision);
            doc.expense
        })
        .collect();

    let filters = query_filters(&query);
    let expenses = ledger::filter_by(&records, |expense| {
        filters.iter().all(|filter| filter.matches(expense))
    })
    .into_iter()
    .filter_map(|expense| {
        let revision = revisions.remove(&expense.id)?;
        Some(map_view(StoredExpense {
            expense: expense.clone(),
            revision,
        }))
    })
    .collect();

    Ok(Json(ExpenseListResponse { expenses }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseView>, ServerError> {
    let id = parse_id(&id)?;
    let doc = state.gateway.get(id).await?;
    Ok(Json(map_view(doc)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseWritten>), ServerError> {
    let fields = ExpenseFields::new(
        payload.description,
        Amount::new(payload.amount_minor),
        payload.occurred_at,
        payload.category.as_str(),
    );
    let doc = state.gateway.create(fields).await?;
    Ok((StatusCode::CREATED, Json(map_written(doc))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseWritten>, ServerError> {
    let id = parse_id(&id)?;
    if payload.revision.trim().is_empty() {
        return Err(ServerError::Generic("revision is required".to_string()));
    }

    let revision = Revision::from(payload.revision);
    let fields = ExpenseFields::new(
        payload.description,
        Amount::new(payload.amount_minor),
        payload.occurred_at,
        payload.category.as_str(),
    );
    let revision = state.gateway.update(id, &revision, fields).await?;
    Ok(Json(map_written(DocumentRef { id, revision })))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ExpenseDelete>,
) -> Result<Json<ExpenseDeleted>, ServerError> {
    let id = parse_id(&id)?;
    if query.revision.trim().is_empty() {
        return Err(ServerError::Generic("revision is required".to_string()));
    }

    state
        .gateway
        .delete(id, &Revision::from(query.revision))
        .await?;
    Ok(Json(ExpenseDeleted {
        id: id.uuid(),
        deleted: true,
    }))
}

pub async fn summary(
    State(state): State<ServerState>,
) -> Result<Json<ExpenseSummary>, ServerError> {
    let records: Vec<Expense> = state
        .gateway
        .list()
        .await?
        .into_iter()
        .map(|doc| doc.expense)
        .collect();

    let total = ledger::total(&records)?;
    let warning = state.monitor.check_total(total);
    if let Some(warning) = warning {
        tracing::warn!(
            "expenses total {} reached 90% of ceiling {}",
            warning.total,
            warning.ceiling
        );
    }

    let categories = ledger::totals_by_category(&records)?
        .into_iter()
        .map(|entry| CategoryTotal {
            category: entry.category.to_string(),
            total_minor: entry.total.minor(),
        })
        .collect();

    Ok(Json(ExpenseSummary {
        count: records.len(),
        total_minor: total.minor(),
        ceiling_minor: state.monitor.ceiling().minor(),
        warning: warning.is_some(),
        categories,
    }))
}
