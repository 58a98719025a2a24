//! Notification function
//!
//! Validated insertion of in-app notifications. Delivery (push, email) is not
//! performed here.

use hub_core::entities::Notification;
use hub_core::error::DomainError;
use hub_core::value_objects::NotificationType;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::requests::required_text;
use crate::dto::{NotificationResponse, SendNotificationRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A notification that passed validation
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: Option<String>,
    pub reference: Option<(String, String)>,
    pub metadata: JsonMap<String, JsonValue>,
}

impl NotificationDraft {
    pub fn new(user_id: Uuid, notification_type: NotificationType, title: impl Into<String>) -> Self {
        Self {
            user_id,
            notification_type,
            title: title.into(),
            body: None,
            reference: None,
            metadata: JsonMap::new(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn reference(mut self, kind: impl Into<String>, id: impl Into<String>) -> Self {
        self.reference = Some((kind.into(), id.into()));
        self
    }

    pub fn metadata(mut self, metadata: JsonMap<String, JsonValue>) -> Self {
        self.metadata = metadata;
        self
    }
}

impl TryFrom<SendNotificationRequest> for NotificationDraft {
    type Error = DomainError;

    fn try_from(req: SendNotificationRequest) -> Result<Self, Self::Error> {
        let user_id = required_text("userId", req.user_id)?;
        let user_id = Uuid::parse_str(&user_id).map_err(|_| DomainError::InvalidValue {
            field: "userId",
            value: user_id,
        })?;
        let notification_type = required_text("type", req.notification_type)?;
        let notification_type =
            notification_type
                .parse()
                .map_err(|_| DomainError::InvalidValue {
                    field: "type",
                    value: notification_type,
                })?;
        let title = required_text("title", req.title)?;

        let reference = match (req.reference_type, req.reference_id) {
            (Some(kind), Some(id)) => Some((kind, id)),
            (None, None) => None,
            (Some(_), None) => return Err(DomainError::MissingField("referenceId")),
            (None, Some(_)) => return Err(DomainError::MissingField("referenceType")),
        };

        let metadata = match req.metadata {
            None | Some(JsonValue::Null) => JsonMap::new(),
            Some(JsonValue::Object(object)) => object,
            Some(other) => {
                return Err(DomainError::InvalidValue {
                    field: "metadata",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            user_id,
            notification_type,
            title,
            body: req.body,
            reference,
            metadata,
        })
    }
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a raw function payload
    #[instrument(skip(self, request))]
    pub async fn notify(&self, request: SendNotificationRequest) -> ServiceResult<NotificationResponse> {
        let draft = NotificationDraft::try_from(request)?;
        let notification = self.send(draft).await?;
        Ok(NotificationResponse::from(&notification))
    }

    /// Insert a notification for an existing profile
    #[instrument(skip(self, draft), fields(user_id = %draft.user_id, kind = %draft.notification_type))]
    pub async fn send(&self, draft: NotificationDraft) -> ServiceResult<Notification> {
        if self
            .ctx
            .profile_repo()
            .find_by_id(draft.user_id)
            .await?
            .is_none()
        {
            return Err(DomainError::ProfileNotFound(draft.user_id).into());
        }

        let mut notification = Notification::new(
            Uuid::new_v4(),
            draft.user_id,
            draft.notification_type,
            draft.title,
            draft.body,
        )
        .with_metadata(draft.metadata);
        if let Some((kind, id)) = draft.reference {
            notification = notification.with_reference(kind, id);
        }

        self.ctx.notification_repo().create(&notification).await?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = %notification.notification_type,
            "Notification created"
        );

        Ok(notification)
    }
}
