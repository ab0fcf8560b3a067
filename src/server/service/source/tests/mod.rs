mod audit;
mod create;
mod save;

use chronicle_test_utils::prelude::*;

use crate::server::model::source::SourceInput;

/// User IDs seeded by [`builder`], in insertion order.
const REQUESTER_ID: i32 = 1;
const MODERATOR_ID: i32 = 2;
const ADMIN_ID: i32 = 3;
/// Not present in the role store
const UNKNOWN_ID: i32 = 99;

/// Source tables with one user per role level.
fn builder() -> TestBuilder {
    TestBuilder::new()
        .with_source_tables()
        .with_user("requester", role::REQUESTER)
        .with_user("moderator", role::MODERATOR)
        .with_user("admin", role::ADMIN)
}

fn input(name: &str) -> SourceInput {
    SourceInput {
        name: Some(name.to_string()),
        ..Default::default()
    }
}
