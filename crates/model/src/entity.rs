//! Common identity and metadata shared by every entity kind.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::event::AnyEntity;

/// Unique identifier for a stored entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh v4 identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The six entity kinds of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Actor,
    Goal,
    Task,
    Interaction,
    Question,
    Journey,
}

impl EntityKind {
    /// All kinds in canonical processing order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Actor,
        EntityKind::Goal,
        EntityKind::Task,
        EntityKind::Interaction,
        EntityKind::Question,
        EntityKind::Journey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::Goal => "goal",
            EntityKind::Task => "task",
            EntityKind::Interaction => "interaction",
            EntityKind::Question => "question",
            EntityKind::Journey => "journey",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header fields carried by every entity record
///
/// Embedded `#[serde(flatten)]` in each kind so durable records stay flat
/// JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntityMeta {
    /// Fresh metadata: generated id, both timestamps set to now
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`. Never moves it backwards, so the pair of
    /// timestamps stays monotonically non-decreasing even if the wall
    /// clock steps back.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Utc::now());
    }
}

/// Behavior shared by the six stored entity kinds
pub trait Entity: Clone + Serialize + DeserializeOwned + Into<AnyEntity> {
    /// Collection this type belongs to
    const KIND: EntityKind;

    /// Partial-update shape accepted by `update`
    type Patch: Default;

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// Shallow-merge the provided fields over this record
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Check the record against the kind's validation rules
    fn validate(&self) -> Result<(), ValidationError> {
        if self.meta().name.is_empty() {
            return Err(ValidationError {
                kind: Self::KIND,
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn id(&self) -> EntityId {
        self.meta().id
    }

    fn name(&self) -> &str {
        &self.meta().name
    }
}
