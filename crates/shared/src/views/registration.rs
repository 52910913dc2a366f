use chrono::{DateTime, Utc};
use fitnessapp_domain::{EntityId, RegistrationRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecordView {
    pub id: EntityId,
    pub fitness_class_id: EntityId,
    pub user_id: EntityId,
    pub registered_at: DateTime<Utc>,
    /// Filled when the class relation was loaded.
    #[serde(default)]
    pub class_start_time: Option<DateTime<Utc>>,
    /// Filled when the user relation was loaded.
    #[serde(default)]
    pub user_display_name: Option<String>,
}

impl From<RegistrationRecord> for RegistrationRecordView {
    fn from(value: RegistrationRecord) -> Self {
        Self {
            id: value.id,
            fitness_class_id: value.fitness_class_id,
            user_id: value.user_id,
            registered_at: value.registered_at,
            class_start_time: value.fitness_class.as_ref().map(|class| class.start_time),
            user_display_name: value.user.map(|user| user.display_name),
        }
    }
}

impl From<RegistrationRecordView> for RegistrationRecord {
    fn from(value: RegistrationRecordView) -> Self {
        Self {
            id: value.id,
            fitness_class_id: value.fitness_class_id,
            user_id: value.user_id,
            registered_at: value.registered_at,
            fitness_class: None,
            user: None,
        }
    }
}
