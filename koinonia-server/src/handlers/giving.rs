//! Donation bookkeeping endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Utc;
use koinonia_model::{
    ApiResponse, Donation, NewDonation, Page, PageQuery, User,
};
use uuid::Uuid;

use crate::infra::{AppResult, AppState};

/// Record a donation. Anonymous gifts carry no user id.
pub async fn create_donation(
    State(state): State<AppState>,
    user: Option<Extension<User>>,
    Json(new): Json<NewDonation>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    new.validate()?;

    let donation = Donation {
        id: Uuid::new_v4(),
        user_id: user.map(|Extension(u)| u.id),
        donor_name: new.donor_name,
        fund: new.fund.trim().to_string(),
        amount_cents: new.amount_cents,
        currency: new.currency,
        note: new.note,
        created_at: Utc::now(),
    };
    state.store.giving.create(&donation).await?;
    Ok(Json(ApiResponse::success(donation)))
}

pub async fn list_donations(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Donation>>>> {
    let result = state.store.giving.list(&page).await?;
    Ok(Json(ApiResponse::success(result)))
}

pub async fn list_my_donations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Page<Donation>>>> {
    let result = state.store.giving.list_for_user(user.id, &page).await?;
    Ok(Json(ApiResponse::success(result)))
}
