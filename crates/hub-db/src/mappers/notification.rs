//! Notification entity <-> model mapper

use hub_core::entities::Notification;
use hub_core::error::DomainError;

use super::corrupt_column;
use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: model.id,
            user_id: model.user_id,
            notification_type: model.notification_type.parse().map_err(corrupt_column)?,
            title: model.title,
            body: model.body,
            reference_type: model.reference_type,
            reference_id: model.reference_id,
            metadata: model.metadata,
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}
