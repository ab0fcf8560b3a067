//! Audit log entries emitted by the source service.

/// Action kind recorded for each successful source operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditAction {
    SourceList,
    SourceView,
    SourceSearch,
    SourceTypesList,
    SourceAuthorsList,
    SourceCreateRequested,
    SourceCreated,
    SourceUpdateRequested,
    SourceUpdated,
    SourceDeleteRequested,
    SourceDeleted,
    SourceEventLinked,
    SourceEventUnlinked,
    SourceUrlCheck,
    SourceDuplicateScan,
}

impl AuditAction {
    /// Stable identifier stored in the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceList => "SOURCE_LIST",
            Self::SourceView => "SOURCE_VIEW",
            Self::SourceSearch => "SOURCE_SEARCH",
            Self::SourceTypesList => "SOURCE_TYPES_LIST",
            Self::SourceAuthorsList => "SOURCE_AUTHORS_LIST",
            Self::SourceCreateRequested => "SOURCE_CREATE_REQUESTED",
            Self::SourceCreated => "SOURCE_CREATED",
            Self::SourceUpdateRequested => "SOURCE_UPDATE_REQUESTED",
            Self::SourceUpdated => "SOURCE_UPDATED",
            Self::SourceDeleteRequested => "SOURCE_DELETE_REQUESTED",
            Self::SourceDeleted => "SOURCE_DELETED",
            Self::SourceEventLinked => "SOURCE_EVENT_LINKED",
            Self::SourceEventUnlinked => "SOURCE_EVENT_UNLINKED",
            Self::SourceUrlCheck => "SOURCE_URL_CHECK",
            Self::SourceDuplicateScan => "SOURCE_DUPLICATE_SCAN",
        }
    }
}

/// One audit log entry attributing an action to an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    pub actor_id: i32,
    pub action: AuditAction,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<i32>,
    pub description: String,
}

impl AuditEntry {
    pub fn new(actor_id: i32, action: AuditAction, description: impl Into<String>) -> Self {
        Self {
            actor_id,
            action,
            entity_type: None,
            entity_id: None,
            description: description.into(),
        }
    }

    /// Attributes the entry to a specific entity.
    pub fn on(mut self, entity_type: &'static str, entity_id: i32) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id);
        self
    }
}
