use api_types::ErrorResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use gateway::GatewayError;
use ledger::LedgerError;

pub use server::{ServerState, router, run_with_listener};

mod expenses;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{
            CategoryTotal, ExpenseDelete, ExpenseDeleted, ExpenseListResponse, ExpenseNew,
            ExpenseQuery, ExpenseSummary, ExpenseUpdate, ExpenseView, ExpenseWritten,
        };
    }
}

pub enum ServerError {
    Gateway(GatewayError),
    Generic(String),
}

fn status_for_gateway_error(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
        GatewayError::RevisionConflict { .. } => StatusCode::CONFLICT,
        GatewayError::ValidationFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::Corrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_gateway_error(err: GatewayError) -> String {
    match err {
        GatewayError::StoreUnavailable(db_err) => {
            tracing::error!("store error: {db_err}");
            "store unavailable".to_string()
        }
        GatewayError::Corrupted(id) => {
            tracing::error!("corrupted expense document {id}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Gateway(err) => {
                (status_for_gateway_error(&err), message_for_gateway_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<GatewayError> for ServerError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Gateway(value.into())
    }
}
