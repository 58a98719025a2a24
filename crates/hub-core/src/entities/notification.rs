//! Notification entity

use chrono::{DateTime, Utc};
use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

use crate::value_objects::NotificationType;

/// In-app notification addressed to one user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    /// Opaque key-value bag, always a JSON object
    pub metadata: JsonValue,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        body: Option<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            notification_type,
            title,
            body,
            reference_type: None,
            reference_id: None,
            metadata: JsonValue::Object(JsonMap::new()),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Point the notification at the record it is about
    pub fn with_reference(mut self, reference_type: impl Into<String>, reference_id: impl Into<String>) -> Self {
        self.reference_type = Some(reference_type.into());
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: JsonMap<String, JsonValue>) -> Self {
        self.metadata = JsonValue::Object(metadata);
        self
    }
}
