//! Tests for source controller endpoints.

mod audit;
mod links;
mod read;
mod write;

use axum::response::Response;
use chronicle::server::model::session::user::SessionActor;
use serde::de::DeserializeOwned;

use super::*;

const REQUESTER_ID: i32 = 1;
const MODERATOR_ID: i32 = 2;
const ADMIN_ID: i32 = 3;

/// Builder with source tables and one user per role, IDs 1 to 3
fn builder() -> TestBuilder {
    TestBuilder::new()
        .with_source_tables()
        .with_user("requester", role::REQUESTER)
        .with_user("moderator", role::MODERATOR)
        .with_user("admin", role::ADMIN)
}

async fn login(test: &TestContext, user_id: i32) {
    SessionActor::insert(&test.session, user_id).await.unwrap();
}

async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
