// crates/post/src/infrastructure/postgres/repositories/postgres_post_repository.rs

use async_trait::async_trait;
use sqlx::PgPool;
use shared_kernel::domain::Identifier;
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::domain::value_objects::PostId;
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::pagination::PageRequest;
use shared_kernel::infrastructure::postgres::mappers::SqlxErrorExt;

use crate::domain::entities::Post;
use crate::domain::repositories::{PostFilter, PostRepository};
use crate::infrastructure::postgres::rows::PostgresPostRow;

const SELECT_COLUMNS: &str = "id, owner_id, content, media, files, like_count, repost_count, comment_count, created_at, updated_at";

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> Result<()> {
        let row = PostgresPostRow::from(post);

        let sql = r#"
            INSERT INTO posts (
                id, owner_id, content, media, files,
                like_count, repost_count, comment_count, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#;

        sqlx::query(sql)
            .bind(row.id)
            .bind(row.owner_id)
            .bind(row.content)
            .bind(row.media)
            .bind(row.files)
            .bind(row.like_count)
            .bind(row.repost_count)
            .bind(row.comment_count)
            .bind(row.created_at)
            .bind(row.updated_at)
            .execute(&self.pool)
            .await
            .map_domain::<Post>()?;

        Ok(())
    }

    async fn fetch(&self, id: &PostId) -> Result<Option<Post>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM posts WHERE id = $1");

        let row = sqlx::query_as::<_, PostgresPostRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_domain::<Post>()?;

        row.map(Post::try_from).transpose()
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let row = PostgresPostRow::from(post);

        // L'auteur et les compteurs ne sont pas écrits ici
        let sql = r#"
            UPDATE posts SET
                content = $1, media = $2, files = $3, updated_at = $4
            WHERE id = $5
        "#;

        let result = sqlx::query(sql)
            .bind(row.content)
            .bind(row.media)
            .bind(row.files)
            .bind(row.updated_at)
            .bind(row.id)
            .execute(&self.pool)
            .await
            .map_domain::<Post>()?;

        if result.rows_affected() == 0 {
            return Err(Post::not_found(row.id));
        }
        Ok(())
    }

    async fn delete(&self, id: &PostId) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_domain::<Post>()?;

        if result.rows_affected() == 0 {
            return Err(Post::not_found(id));
        }
        Ok(())
    }

    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<(Vec<Post>, u64)> {
        let owner = filter.owner_id.map(|o| o.as_uuid());

        // `$1 IS NULL` : un seul plan pour la liste globale et la liste par auteur
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE ($1::uuid IS NULL OR owner_id = $1)",
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_domain::<Post>()?;

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM posts \
             WHERE ($1::uuid IS NULL OR owner_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, PostgresPostRow>(&sql)
            .bind(owner)
            .bind(i64::from(page.limit))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_domain::<Post>()?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((posts, u64::try_from(total).unwrap_or_default()))
    }
}
