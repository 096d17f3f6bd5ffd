mod postgres_post_row;

pub use postgres_post_row::PostgresPostRow;
