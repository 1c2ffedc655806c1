use crate::model::{
    Break, BreakPatch, EntryPatch, FreeBlock, FreeBlockPatch, NewBreak, NewEntry, NewFreeBlock,
    NewSubject, NewTimeSlot, Subject, SubjectPatch, TimeSlot, TimeSlotPatch, Timetable,
    TimetableEntry, TimetablePatch,
};
use crate::persistence::SnapshotStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// The complete public state of the store: every timetable plus the
/// process-wide active pointer. Timetables are held behind `Arc` so a
/// snapshot only reallocates the timetable a mutation touched; observers can
/// check `Arc::ptr_eq` to skip unchanged ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub timetables: Vec<Arc<Timetable>>,
    pub active_timetable_id: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            timetables: Vec::new(),
            active_timetable_id: None,
        }
    }
}

/// Handle returned by [`TimetableStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Arc<StoreState>)>;

/// Single source of truth for all timetable data.
///
/// Every mutation follows the same discipline: snapshot-read the current
/// state, build the next state copy-on-write, publish it as a fresh `Arc`,
/// write it through to the backend, then notify subscribers. Persistence is
/// fire-and-forget; a failed write is logged and never fails the mutation.
pub struct TimetableStore {
    state: Arc<StoreState>,
    backend: Option<Box<dyn SnapshotStore>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}

impl TimetableStore {
    /// In-memory store with no durable backend.
    pub fn new() -> Self {
        Self {
            state: Arc::new(StoreState::default()),
            backend: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rehydrate from the backend, or start empty when nothing is stored or
    /// the stored document cannot be read.
    pub fn with_backend(backend: Box<dyn SnapshotStore>) -> Self {
        let state = match backend.load_state() {
            Ok(Some(state)) => state,
            Ok(None) => StoreState::default(),
            Err(err) => {
                log::warn!("failed to load stored timetable state, starting empty: {err}");
                StoreState::default()
            }
        };
        Self {
            state: Arc::new(state),
            backend: Some(backend),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The most recently published snapshot.
    pub fn state(&self) -> Arc<StoreState> {
        Arc::clone(&self.state)
    }

    pub fn timetable(&self, id: &str) -> Option<Arc<Timetable>> {
        self.state
            .timetables
            .iter()
            .find(|t| t.id == id)
            .map(Arc::clone)
    }

    pub fn active_timetable(&self) -> Option<Arc<Timetable>> {
        let id = self.state.active_timetable_id.as_deref()?;
        self.timetable(id)
    }

    /// Register an observer invoked with every snapshot published after a
    /// committed mutation.
    pub fn subscribe(&mut self, callback: impl Fn(&Arc<StoreState>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    fn commit(&mut self, next: StoreState) {
        self.state = Arc::new(next);
        if let Some(backend) = &self.backend {
            if let Err(err) = backend.save_state(&self.state) {
                log::warn!("failed to persist timetable state: {err}");
            }
        }
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Rebuild the timetable list with the matching timetable replaced by a
    /// mutated copy. Untouched timetables keep their `Arc`. Returns whether
    /// the id matched; nothing is committed otherwise.
    fn with_timetable<F>(&mut self, timetable_id: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut Timetable),
    {
        let Some(idx) = self
            .state
            .timetables
            .iter()
            .position(|t| t.id == timetable_id)
        else {
            return false;
        };
        let mut timetables = self.state.timetables.clone();
        let mut next = Timetable::clone(&timetables[idx]);
        mutate(&mut next);
        timetables[idx] = Arc::new(next);
        let active_timetable_id = self.state.active_timetable_id.clone();
        self.commit(StoreState {
            timetables,
            active_timetable_id,
        });
        true
    }

    // Timetable operations

    /// Append a new empty timetable. It becomes the active timetable iff no
    /// timetable was active before.
    pub fn create_timetable(&mut self, name: impl Into<String>) -> String {
        let id = new_entity_id();
        let mut timetables = self.state.timetables.clone();
        timetables.push(Arc::new(Timetable::empty(id.clone(), name.into())));
        let active_timetable_id = self
            .state
            .active_timetable_id
            .clone()
            .or_else(|| Some(id.clone()));
        self.commit(StoreState {
            timetables,
            active_timetable_id,
        });
        id
    }

    pub fn update_timetable(&mut self, id: &str, patch: TimetablePatch) -> bool {
        self.with_timetable(id, |timetable| {
            if let Some(name) = patch.name {
                timetable.name = name;
            }
        })
    }

    /// Remove a timetable and everything it owns. When the active timetable
    /// is deleted the pointer moves to the first remaining timetable, or
    /// `None` when none remain.
    pub fn delete_timetable(&mut self, id: &str) -> bool {
        if !self.state.timetables.iter().any(|t| t.id == id) {
            return false;
        }
        let timetables: Vec<Arc<Timetable>> = self
            .state
            .timetables
            .iter()
            .filter(|t| t.id != id)
            .map(Arc::clone)
            .collect();
        let active_timetable_id = if self.state.active_timetable_id.as_deref() == Some(id) {
            timetables.first().map(|t| t.id.clone())
        } else {
            self.state.active_timetable_id.clone()
        };
        self.commit(StoreState {
            timetables,
            active_timetable_id,
        });
        true
    }

    /// Overwrite the active pointer unconditionally; no existence check.
    pub fn set_active_timetable(&mut self, id: impl Into<String>) {
        let timetables = self.state.timetables.clone();
        self.commit(StoreState {
            timetables,
            active_timetable_id: Some(id.into()),
        });
    }

    // Time slot operations

    pub fn add_time_slot(&mut self, timetable_id: &str, slot: NewTimeSlot) -> Option<String> {
        let id = new_entity_id();
        let slot = TimeSlot {
            id: id.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        };
        self.with_timetable(timetable_id, |timetable| timetable.time_slots.push(slot))
            .then_some(id)
    }

    pub fn update_time_slot(&mut self, timetable_id: &str, id: &str, patch: TimeSlotPatch) -> bool {
        self.update_child(timetable_id, |timetable| {
            let slot = timetable.time_slots.iter_mut().find(|s| s.id == id)?;
            if let Some(start_time) = patch.start_time {
                slot.start_time = start_time;
            }
            if let Some(end_time) = patch.end_time {
                slot.end_time = end_time;
            }
            Some(())
        })
    }

    /// Remove a time slot and every record referencing it: entries, breaks
    /// and free blocks alike, keeping all slot references valid.
    pub fn delete_time_slot(&mut self, timetable_id: &str, id: &str) -> bool {
        self.update_child(timetable_id, |timetable| {
            let before = timetable.time_slots.len();
            timetable.time_slots.retain(|s| s.id != id);
            if timetable.time_slots.len() == before {
                return None;
            }
            timetable.entries.retain(|e| e.time_slot_id != id);
            timetable.breaks.retain(|b| b.time_slot_id != id);
            timetable.free_blocks.retain(|f| f.time_slot_id != id);
            Some(())
        })
    }

    // Subject operations

    pub fn add_subject(&mut self, timetable_id: &str, subject: NewSubject) -> Option<String> {
        let id = new_entity_id();
        let subject = Subject {
            id: id.clone(),
            name: subject.name,
            color: subject.color,
            teacher: subject.teacher,
            room: subject.room,
        };
        self.with_timetable(timetable_id, |timetable| timetable.subjects.push(subject))
            .then_some(id)
    }

    pub fn update_subject(&mut self, timetable_id: &str, id: &str, patch: SubjectPatch) -> bool {
        self.update_child(timetable_id, |timetable| {
            let subject = timetable.subjects.iter_mut().find(|s| s.id == id)?;
            if let Some(name) = patch.name {
                subject.name = name;
            }
            if let Some(color) = patch.color {
                subject.color = color;
            }
            if let Some(teacher) = patch.teacher {
                subject.teacher = teacher;
            }
            if let Some(room) = patch.room {
                subject.room = room;
            }
            Some(())
        })
    }

    /// Remove a subject and cascade to every entry assigned to it.
    pub fn delete_subject(&mut self, timetable_id: &str, id: &str) -> bool {
        self.update_child(timetable_id, |timetable| {
            let before = timetable.subjects.len();
            timetable.subjects.retain(|s| s.id != id);
            if timetable.subjects.len() == before {
                return None;
            }
            timetable.entries.retain(|e| e.subject_id != id);
            Some(())
        })
    }

    // Entry operations

    pub fn add_entry(&mut self, timetable_id: &str, entry: NewEntry) -> Option<String> {
        let id = new_entity_id();
        let entry = TimetableEntry {
            id: id.clone(),
            day: entry.day,
            time_slot_id: entry.time_slot_id,
            subject_id: entry.subject_id,
            notes: entry.notes,
        };
        self.with_timetable(timetable_id, |timetable| timetable.entries.push(entry))
            .then_some(id)
    }

    pub fn update_entry(&mut self, timetable_id: &str, id: &str, patch: EntryPatch) -> bool {
        self.update_child(timetable_id, |timetable| {
            let entry = timetable.entries.iter_mut().find(|e| e.id == id)?;
            if let Some(day) = patch.day {
                entry.day = day;
            }
            if let Some(time_slot_id) = patch.time_slot_id {
                entry.time_slot_id = time_slot_id;
            }
            if let Some(subject_id) = patch.subject_id {
                entry.subject_id = subject_id;
            }
            if let Some(notes) = patch.notes {
                entry.notes = notes;
            }
            Some(())
        })
    }

    pub fn delete_entry(&mut self, timetable_id: &str, id: &str) -> bool {
        self.delete_child(timetable_id, |timetable| {
            let before = timetable.entries.len();
            timetable.entries.retain(|e| e.id != id);
            timetable.entries.len() != before
        })
    }

    // Break operations

    pub fn add_break(&mut self, timetable_id: &str, break_period: NewBreak) -> Option<String> {
        let id = new_entity_id();
        let break_period = Break {
            id: id.clone(),
            name: break_period.name,
            time_slot_id: break_period.time_slot_id,
            days: break_period.days,
        };
        self.with_timetable(timetable_id, |timetable| {
            timetable.breaks.push(break_period)
        })
        .then_some(id)
    }

    pub fn update_break(&mut self, timetable_id: &str, id: &str, patch: BreakPatch) -> bool {
        self.update_child(timetable_id, |timetable| {
            let break_period = timetable.breaks.iter_mut().find(|b| b.id == id)?;
            if let Some(name) = patch.name {
                break_period.name = name;
            }
            if let Some(time_slot_id) = patch.time_slot_id {
                break_period.time_slot_id = time_slot_id;
            }
            if let Some(days) = patch.days {
                break_period.days = days;
            }
            Some(())
        })
    }

    pub fn delete_break(&mut self, timetable_id: &str, id: &str) -> bool {
        self.delete_child(timetable_id, |timetable| {
            let before = timetable.breaks.len();
            timetable.breaks.retain(|b| b.id != id);
            timetable.breaks.len() != before
        })
    }

    // Free block operations

    pub fn add_free_block(&mut self, timetable_id: &str, block: NewFreeBlock) -> Option<String> {
        let id = new_entity_id();
        let block = FreeBlock {
            id: id.clone(),
            description: block.description,
            time_slot_id: block.time_slot_id,
            days: block.days,
            color: block.color,
        };
        self.with_timetable(timetable_id, |timetable| {
            timetable.free_blocks.push(block)
        })
        .then_some(id)
    }

    pub fn update_free_block(
        &mut self,
        timetable_id: &str,
        id: &str,
        patch: FreeBlockPatch,
    ) -> bool {
        self.update_child(timetable_id, |timetable| {
            let block = timetable.free_blocks.iter_mut().find(|f| f.id == id)?;
            if let Some(description) = patch.description {
                block.description = description;
            }
            if let Some(time_slot_id) = patch.time_slot_id {
                block.time_slot_id = time_slot_id;
            }
            if let Some(days) = patch.days {
                block.days = days;
            }
            if let Some(color) = patch.color {
                block.color = color;
            }
            Some(())
        })
    }

    pub fn delete_free_block(&mut self, timetable_id: &str, id: &str) -> bool {
        self.delete_child(timetable_id, |timetable| {
            let before = timetable.free_blocks.len();
            timetable.free_blocks.retain(|f| f.id != id);
            timetable.free_blocks.len() != before
        })
    }

    /// Shared shape of the update operations: locate the child inside a
    /// cloned timetable, merge the patch, commit only when it was found.
    fn update_child<F>(&mut self, timetable_id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Timetable) -> Option<()>,
    {
        let Some(idx) = self
            .state
            .timetables
            .iter()
            .position(|t| t.id == timetable_id)
        else {
            return false;
        };
        let mut next = Timetable::clone(&self.state.timetables[idx]);
        if apply(&mut next).is_none() {
            return false;
        }
        let mut timetables = self.state.timetables.clone();
        timetables[idx] = Arc::new(next);
        let active_timetable_id = self.state.active_timetable_id.clone();
        self.commit(StoreState {
            timetables,
            active_timetable_id,
        });
        true
    }

    fn delete_child<F>(&mut self, timetable_id: &str, remove: F) -> bool
    where
        F: FnOnce(&mut Timetable) -> bool,
    {
        self.update_child(timetable_id, |timetable| remove(timetable).then_some(()))
    }
}

impl Default for TimetableStore {
    fn default() -> Self {
        Self::new()
    }
}
