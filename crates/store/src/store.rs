//! The persistent entity store: the single source of truth for what
//! currently exists.

use std::fs;
use std::path::{Path, PathBuf};

use screenplay_model::{
    Actor, ChangeEvent, Entity, EntityId, Goal, Interaction, Journey, ModelError, ModelSnapshot,
    Question, Result, Task,
};

use crate::bus::{EventBus, SubscriptionId};
use crate::collection::Collection;

/// Maps an entity type to its collection inside the store
pub trait Stored: Entity {
    fn collection(store: &ModelStore) -> &Collection<Self>;
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self>;
}

/// Durable entity store over six per-kind collections
///
/// Mutating operations take `&mut self` and run to completion before
/// returning: validate, update the cache, persist the kind's file
/// atomically, then deliver change events. Reads only touch the cache.
/// Hosts needing cross-thread access wrap the store themselves; nothing
/// here spawns or defers work.
#[derive(Debug)]
pub struct ModelStore {
    base_dir: PathBuf,
    actors: Collection<Actor>,
    goals: Collection<Goal>,
    tasks: Collection<Task>,
    interactions: Collection<Interaction>,
    questions: Collection<Question>,
    journeys: Collection<Journey>,
    bus: EventBus,
}

impl ModelStore {
    /// Open the store rooted at `dir`.
    ///
    /// Creates the directory and any missing collection files, and loads
    /// and validates the ones that exist. A record failing validation on
    /// load is a fatal initialization error; nothing is silently dropped.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = dir.into();
        fs::create_dir_all(&base_dir)?;
        let store = Self {
            actors: Collection::open(&base_dir)?,
            goals: Collection::open(&base_dir)?,
            tasks: Collection::open(&base_dir)?,
            interactions: Collection::open(&base_dir)?,
            questions: Collection::open(&base_dir)?,
            journeys: Collection::open(&base_dir)?,
            bus: EventBus::new(),
            base_dir,
        };
        tracing::info!(
            dir = %store.base_dir.display(),
            actors = store.actors.len(),
            goals = store.goals.len(),
            tasks = store.tasks.len(),
            interactions = store.interactions.len(),
            questions = store.questions.len(),
            journeys = store.journeys.len(),
            "model store opened"
        );
        Ok(store)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Total number of stored entities across all kinds
    pub fn entity_count(&self) -> usize {
        self.actors.len()
            + self.goals.len()
            + self.tasks.len()
            + self.interactions.len()
            + self.questions.len()
            + self.journeys.len()
    }

    // ========== CRUD ==========

    /// Validate and append a new record, persist its kind's collection,
    /// then emit a create event carrying the full record.
    pub fn save<T: Stored>(&mut self, entity: T) -> Result<T> {
        entity.validate()?;
        T::collection_mut(self).push(entity.clone());
        T::collection(self).persist()?;
        tracing::debug!(kind = %T::KIND, id = %entity.id(), "saved entity");
        self.bus.emit(&ChangeEvent::Created(entity.clone().into()));
        Ok(entity)
    }

    /// Fetch one record by id from the cache
    pub fn get<T: Stored>(&self, id: EntityId) -> Option<&T> {
        T::collection(self).find(id)
    }

    /// All records of one kind, insertion order
    pub fn get_all<T: Stored>(&self) -> &[T] {
        T::collection(self).records()
    }

    /// Shallow-merge the patch over the stored record, revalidate the
    /// whole merged record, persist, then emit an update event. The
    /// record keeps its position in iteration order; a validation
    /// failure leaves the stored record untouched.
    pub fn update<T: Stored>(&mut self, id: EntityId, patch: T::Patch) -> Result<T> {
        let record = T::collection_mut(self)
            .find_mut(id)
            .ok_or(ModelError::NotFound { kind: T::KIND, id })?;
        let mut merged = record.clone();
        merged.apply_patch(patch);
        merged.meta_mut().touch();
        merged.validate()?;
        *record = merged.clone();

        T::collection(self).persist()?;
        tracing::debug!(kind = %T::KIND, id = %id, "updated entity");
        self.bus.emit(&ChangeEvent::Updated(merged.clone().into()));
        Ok(merged)
    }

    /// Remove the record, persist the shorter collection, then emit a
    /// delete event carrying only the kind and id.
    pub fn delete<T: Stored>(&mut self, id: EntityId) -> Result<()> {
        if T::collection_mut(self).remove(id).is_none() {
            return Err(ModelError::NotFound { kind: T::KIND, id });
        }
        T::collection(self).persist()?;
        tracing::debug!(kind = %T::KIND, id = %id, "deleted entity");
        self.bus.emit(&ChangeEvent::Deleted { kind: T::KIND, id });
        Ok(())
    }

    /// Delete everything across all six kinds.
    ///
    /// For each kind in canonical order, one delete event fires per
    /// stored entity (oldest first) before the collection is truncated
    /// and persisted empty, so consumers see the same event stream as
    /// if every entity had been deleted individually.
    pub fn clear(&mut self) -> Result<()> {
        self.clear_kind::<Actor>()?;
        self.clear_kind::<Goal>()?;
        self.clear_kind::<Task>()?;
        self.clear_kind::<Interaction>()?;
        self.clear_kind::<Question>()?;
        self.clear_kind::<Journey>()?;
        tracing::debug!("cleared all collections");
        Ok(())
    }

    fn clear_kind<T: Stored>(&mut self) -> Result<()> {
        let ids: Vec<EntityId> = T::collection(self)
            .records()
            .iter()
            .map(|record| record.id())
            .collect();
        for id in ids {
            self.bus.emit(&ChangeEvent::Deleted { kind: T::KIND, id });
        }
        T::collection_mut(self).truncate_all();
        T::collection(self).persist()
    }

    // ========== Snapshot ==========

    /// Copy of every collection in insertion order. `gaps` is left
    /// empty; the consistency layer computes it from this snapshot.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            actors: self.actors.records().to_vec(),
            goals: self.goals.records().to_vec(),
            tasks: self.tasks.records().to_vec(),
            interactions: self.interactions.records().to_vec(),
            questions: self.questions.records().to_vec(),
            journeys: self.journeys.records().to_vec(),
            gaps: Vec::new(),
        }
    }

    // ========== Change feed ==========

    /// Register a change-event subscriber
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ChangeEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    /// Remove a subscriber; reports whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}

// ========== Kind bindings ==========

impl Stored for Actor {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.actors
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.actors
    }
}

impl Stored for Goal {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.goals
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.goals
    }
}

impl Stored for Task {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.tasks
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.tasks
    }
}

impl Stored for Interaction {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.interactions
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.interactions
    }
}

impl Stored for Question {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.questions
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.questions
    }
}

impl Stored for Journey {
    fn collection(store: &ModelStore) -> &Collection<Self> {
        &store.journeys
    }
    fn collection_mut(store: &mut ModelStore) -> &mut Collection<Self> {
        &mut store.journeys
    }
}
