//! Factory functions for generating mock database models.
//!
//! These are in-memory model instances that don't require database interaction. Combine them
//! with struct update syntax to set the fields a test cares about:
//!
//! ```ignore
//! let source = SourceModel {
//!     author: Some("Bede".to_string()),
//!     ..factory::source("Ecclesiastical History")
//! };
//! ```

use chrono::Utc;

use crate::model::{EventModel, SourceModel};

/// Create a source model with only a name set.
///
/// The `id` is 0, fixture inserts let the database assign one.
pub fn source(name: impl Into<String>) -> SourceModel {
    let now = Utc::now().naive_utc();
    SourceModel {
        id: 0,
        name: name.into(),
        author: None,
        source_type: None,
        publication_date: None,
        url: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create an event model without a date.
pub fn event(name: impl Into<String>) -> EventModel {
    EventModel {
        id: 0,
        name: name.into(),
        event_date: None,
        created_at: Utc::now().naive_utc(),
    }
}
