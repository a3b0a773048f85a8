//! Donation records. Bookkeeping only; payment processing happens upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Donation {
    pub id: Uuid,
    /// Present when the donor was logged in.
    pub user_id: Option<Uuid>,
    pub donor_name: Option<String>,
    /// Designated fund ("general", "missions", "building", ...).
    pub fund: String,
    pub amount_cents: i64,
    pub currency: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_name: Option<String>,
    pub fund: String,
    pub amount_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub note: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl NewDonation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount_cents <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        if self.fund.trim().is_empty() {
            return Err(ValidationError::Other(
                "fund must not be empty".to_string(),
            ));
        }
        if self.currency.len() != 3
            || !self.currency.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ValidationError::Other(
                "currency must be a 3-letter ISO code".to_string(),
            ));
        }
        Ok(())
    }
}
