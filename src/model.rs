use crate::day::Day;
use serde::{Deserialize, Serialize};

/// A named interval of the day shared by every weekday of a timetable.
/// Times are zero-padded `HH:MM` strings so lexicographic order matches
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
}

/// A recurring class or activity definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// The assignment of a subject to one (day, time slot) coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub day: Day,
    pub time_slot_id: String,
    pub subject_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A recurring non-class period (lunch and the like) occupying one time slot
/// on a set of weekdays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub id: String,
    pub name: String,
    pub time_slot_id: String,
    pub days: Vec<Day>,
}

/// A recurring uncategorized period (study time and the like), same scoping
/// as a break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub time_slot_id: String,
    pub days: Vec<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Root aggregate for one weekly schedule. Owns every child collection
/// exclusively; nothing is shared across timetables.
///
/// `breaks` and `free_blocks` default to empty on load because documents
/// written before those collections existed omit the arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub id: String,
    pub name: String,
    pub time_slots: Vec<TimeSlot>,
    pub subjects: Vec<Subject>,
    pub entries: Vec<TimetableEntry>,
    #[serde(default)]
    pub breaks: Vec<Break>,
    #[serde(default)]
    pub free_blocks: Vec<FreeBlock>,
}

impl Timetable {
    pub(crate) fn empty(id: String, name: String) -> Self {
        Self {
            id,
            name,
            time_slots: Vec::new(),
            subjects: Vec::new(),
            entries: Vec::new(),
            breaks: Vec::new(),
            free_blocks: Vec::new(),
        }
    }
}

// Creation inputs: the entity minus its generated id.

#[derive(Debug, Clone, Default)]
pub struct NewTimeSlot {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewSubject {
    pub name: String,
    pub color: Option<String>,
    pub teacher: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub day: Day,
    pub time_slot_id: String,
    pub subject_id: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBreak {
    pub name: String,
    pub time_slot_id: String,
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, Default)]
pub struct NewFreeBlock {
    pub description: Option<String>,
    pub time_slot_id: String,
    pub days: Vec<Day>,
    pub color: Option<String>,
}

// Partial updates: `None` keeps the prior value. Optional entity fields are
// nested so a patch can also clear them (`Some(None)`).

#[derive(Debug, Clone, Default)]
pub struct TimetablePatch {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TimeSlotPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
    pub teacher: Option<Option<String>>,
    pub room: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub day: Option<Day>,
    pub time_slot_id: Option<String>,
    pub subject_id: Option<String>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct BreakPatch {
    pub name: Option<String>,
    pub time_slot_id: Option<String>,
    pub days: Option<Vec<Day>>,
}

#[derive(Debug, Clone, Default)]
pub struct FreeBlockPatch {
    pub description: Option<Option<String>>,
    pub time_slot_id: Option<String>,
    pub days: Option<Vec<Day>>,
    pub color: Option<Option<String>>,
}
