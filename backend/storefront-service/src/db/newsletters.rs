/// Newsletter subscription queries
use crate::db::NewsletterRepository;
use crate::error::Result;
use crate::models::Newsletter;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgNewsletterRepository {
    pool: PgPool,
}

impl PgNewsletterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsletterRepository for PgNewsletterRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<Newsletter>> {
        let newsletter =
            sqlx::query_as::<_, Newsletter>("SELECT * FROM newsletters WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(newsletter)
    }

    async fn insert(&self, newsletter: &Newsletter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO newsletters (id, full_name, email, created_at, created_by)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(newsletter.id)
        .bind(&newsletter.full_name)
        .bind(&newsletter.email)
        .bind(newsletter.created_at)
        .bind(&newsletter.created_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
