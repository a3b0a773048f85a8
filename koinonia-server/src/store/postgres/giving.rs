use async_trait::async_trait;
use koinonia_model::{Donation, Page, PageQuery};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Result;
use crate::store::ports::GivingRepository;

const DONATION_COLUMNS: &str = "id, user_id, donor_name, fund, \
     amount_cents, currency, note, created_at";

#[derive(Clone, Debug)]
pub struct PostgresGivingRepository {
    pool: PgPool,
}

impl PostgresGivingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GivingRepository for PostgresGivingRepository {
    async fn create(&self, donation: &Donation) -> Result<()> {
        sqlx::query(
            "INSERT INTO donations (id, user_id, donor_name, fund, \
             amount_cents, currency, note, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(donation.id)
        .bind(donation.user_id)
        .bind(&donation.donor_name)
        .bind(&donation.fund)
        .bind(donation.amount_cents)
        .bind(&donation.currency)
        .bind(&donation.note)
        .bind(donation.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<Donation>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donations")
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {DONATION_COLUMNS} FROM donations \
             ORDER BY created_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Donation>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total.max(0) as u64))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageQuery,
    ) -> Result<Page<Donation>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM donations WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {DONATION_COLUMNS} FROM donations WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT {} OFFSET {}",
            page.limit(),
            page.offset()
        );
        let items = sqlx::query_as::<_, Donation>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(Page::new(items, page, total.max(0) as u64))
    }
}
