#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use inkpost_core::domain::{Post, User};
    use inkpost_core::error::RepoError;
    use inkpost_core::ports::{PostRepository, UserRepository};

    use crate::database::entity::{post, user};
    use crate::database::{SqlitePostRepository, SqliteUserRepository};

    fn post_model(id: i64, title: &str) -> post::Model {
        let now = Utc::now();
        post::Model {
            id,
            title: title.to_owned(),
            description: None,
            thumbnail: None,
            directory_name: format!("{id:04}"),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_to_domain() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![post_model(7, "Mapped post")]])
            .into_connection();

        let repo = SqlitePostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();
        let post = result.unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "Mapped post");
        assert_eq!(post.directory_name, "0007");
    }

    #[tokio::test]
    async fn list_preserves_row_order() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![
                post_model(1, "first"),
                post_model(2, "second"),
            ]])
            .into_connection();

        let repo = SqlitePostRepository::new(db);

        let posts = repo.list().await.unwrap();
        assert_eq!(
            posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn delete_with_no_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = SqlitePostRepository::new(db);

        let result = repo.delete(42).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn find_user_by_email_maps_to_domain() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![user::Model {
                id: 3,
                email: "writer@example.com".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();

        let repo = SqliteUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("writer@example.com").await.unwrap();
        let found = result.unwrap();
        assert_eq!(found.id, 3);
        assert_eq!(found.email, "writer@example.com");
    }
}
