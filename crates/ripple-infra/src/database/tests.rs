use chrono::{TimeDelta, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use ripple_core::domain::{Post, User};
use ripple_core::error::RepoError;
use ripple_core::ports::{BaseRepository, PostRepository, UserRepository};

use super::entity::{post, user};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(title: &str, minutes_ago: i64) -> post::Model {
    let created = Utc::now() - TimeDelta::minutes(minutes_ago);
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        content: "Some content".to_owned(),
        image_url: "images/pic.png".to_owned(),
        creator_id: Uuid::new_v4(),
        created_at: created.into(),
        updated_at: created.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_the_model() {
    let model = post_model("Test Post", 0);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.id, post_id);
}

#[tokio::test]
async fn find_page_maps_all_returned_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model("Newer", 1),
            post_model("Older", 2),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let page = repo.find_page(1).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "Newer");
    assert_eq!(page[1].title, "Older");
}

#[tokio::test]
async fn find_user_by_email_maps_the_model() {
    let now = Utc::now();
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "a@b.com".to_owned(),
            password_hash: "hash".to_owned(),
            name: "A".to_owned(),
            status: "I am new!".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result: Option<User> = repo.find_by_email("a@b.com").await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.name, "A");
}

#[tokio::test]
async fn find_by_creator_maps_the_returned_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("Mine", 1), post_model("Also mine", 2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_creator(Uuid::new_v4()).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Mine");
}

#[tokio::test]
async fn delete_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let repo: &dyn PostRepository = &repo;

    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}
