//! Transaction routes.
//!
//! Thin adapters over `TransactionService`: the caller id comes from the
//! bearer token, the rest from the path, query and body.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use payup_core::notification::Notifier;
use payup_core::store::Store;
use payup_core::transaction::{
    RelatedObject, RelatedObjectType, TransactionDraft, TransactionPatch, TransactionView,
    ValidationError,
};
use payup_core::user::User;
use payup_shared::AppError;
use payup_shared::types::{TransactionId, UserId, format_cents};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes<S: Store, N: Notifier>() -> Router<AppState<S, N>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions::<S, N>).post(create_transaction::<S, N>),
        )
        .route(
            "/transactions/{transaction_id}",
            patch(update_transaction::<S, N>).delete(delete_transaction::<S, N>),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Only transactions between the caller and this user.
    pub related_user_id: Option<i64>,
    /// `Group` or `Friendship`; requires `relatedObjectId`.
    pub related_object_type: Option<String>,
    /// Group or friendship id; requires `relatedObjectType`.
    pub related_object_id: Option<i64>,
}

impl ListTransactionsQuery {
    fn related_object(&self) -> Result<Option<RelatedObject>, AppError> {
        match (&self.related_object_type, self.related_object_id) {
            (None, None) => Ok(None),
            (Some(kind), Some(id)) if id != 0 => {
                let kind: RelatedObjectType = kind.parse().map_err(validation)?;
                Ok(Some(RelatedObject::new(kind, id)))
            }
            (Some(_), _) => Err(validation(ValidationError::InvalidRelatedObject)),
            (None, Some(_)) => Err(validation(ValidationError::InvalidRelatedObjectType)),
        }
    }
}

fn validation(err: ValidationError) -> AppError {
    AppError::Validation {
        field: err.field(),
        message: err.to_string(),
    }
}

/// A user embedded in a transaction response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: TransactionId,
    /// `Bill` or `Payback`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `Confirmed`, `Pending` or `Rejected`.
    pub status: &'static str,
    /// Amount in cents.
    pub amount: i64,
    /// Amount as dollars, e.g. `$5.00`.
    pub formatted_amount: String,
    /// Memo.
    pub memo: String,
    /// Whether the transaction has been settled.
    pub is_settled: bool,
    /// Sender user ID.
    pub sender_id: UserId,
    /// Recipient user ID.
    pub recipient_id: UserId,
    /// `Group` or `Friendship`.
    pub related_object_type: &'static str,
    /// Group or friendship ID.
    pub related_object_id: i64,
    /// Creator user ID.
    pub creator_id: UserId,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
    /// Resolved sender.
    pub sender: Option<UserSummary>,
    /// Resolved recipient.
    pub recipient: Option<UserSummary>,
    /// Resolved creator.
    pub creator: Option<UserSummary>,
}

impl From<TransactionView> for TransactionResponse {
    fn from(view: TransactionView) -> Self {
        let t = view.transaction;
        Self {
            id: t.id,
            kind: t.kind.as_str(),
            status: t.status.as_str(),
            amount: t.amount,
            formatted_amount: format_cents(t.amount),
            memo: t.memo,
            is_settled: t.is_settled,
            sender_id: t.sender_id,
            recipient_id: t.recipient_id,
            related_object_type: t.related_object.kind().as_str(),
            related_object_id: t.related_object.raw_id(),
            creator_id: t.creator_id,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
            sender: view.sender.map(UserSummary::from),
            recipient: view.recipient.map(UserSummary::from),
            creator: view.creator.map(UserSummary::from),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - Transactions involving the caller, newest first.
async fn list_transactions<S: Store, N: Notifier>(
    State(state): State<AppState<S, N>>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let related_object = query.related_object()?;
    let counterpart = query.related_user_id.map(UserId::new);

    let views = state
        .transactions
        .list(auth.user_id(), counterpart, related_object)
        .await?;
    let items: Vec<TransactionResponse> = views.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "transactions": items })))
}

/// POST `/transactions` - Create a transaction as the caller.
async fn create_transaction<S: Store, N: Notifier>(
    State(state): State<AppState<S, N>>,
    auth: AuthUser,
    Json(draft): Json<TransactionDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.transactions.create(auth.user_id(), &draft).await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(view))))
}

/// PATCH `/transactions/{transaction_id}` - Edit type, amount or memo.
async fn update_transaction<S: Store, N: Notifier>(
    State(state): State<AppState<S, N>>,
    auth: AuthUser,
    Path(transaction_id): Path<i64>,
    Json(patch): Json<TransactionPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .transactions
        .update(auth.user_id(), TransactionId::new(transaction_id), &patch)
        .await?;

    Ok(Json(TransactionResponse::from(view)))
}

/// DELETE `/transactions/{transaction_id}` - Delete a transaction the caller created.
async fn delete_transaction<S: Store, N: Notifier>(
    State(state): State<AppState<S, N>>,
    auth: AuthUser,
    Path(transaction_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .transactions
        .delete(auth.user_id(), TransactionId::new(transaction_id))
        .await?;

    Ok(Json(json!({ "meta": { "success": true } })))
}
