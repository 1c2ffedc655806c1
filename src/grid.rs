//! Pure derivation of the renderable weekly grid from one timetable
//! snapshot. Nothing here is stateful; callers recompute on every published
//! store state.

use crate::day::Day;
use crate::model::{Break, FreeBlock, Subject, TimeSlot, Timetable, TimetableEntry};

/// Time slots ordered by start time for display. The sort is stable and
/// lexicographic, which matches chronological order for zero-padded `HH:MM`
/// values; the input is left untouched.
pub fn sorted_time_slots(timetable: &Timetable) -> Vec<TimeSlot> {
    let mut slots = timetable.time_slots.clone();
    slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    slots
}

/// The entry occupying a (day, time slot) coordinate. When the uniqueness
/// convention is violated and several entries share the coordinate, the
/// first one wins.
pub fn find_entry<'a>(
    timetable: &'a Timetable,
    day: Day,
    time_slot_id: &str,
) -> Option<&'a TimetableEntry> {
    timetable
        .entries
        .iter()
        .find(|entry| entry.day == day && entry.time_slot_id == time_slot_id)
}

pub fn find_subject<'a>(timetable: &'a Timetable, subject_id: &str) -> Option<&'a Subject> {
    timetable
        .subjects
        .iter()
        .find(|subject| subject.id == subject_id)
}

/// Deterministic composite key for one grid cell, used by rendering layers
/// as a stable iteration key. Not a uniqueness constraint on the data.
pub fn cell_key(day: Day, time_slot_id: &str) -> String {
    format!("{}-{}", day.as_str(), time_slot_id)
}

/// The record occupying one grid cell, with the entry's subject resolved
/// inline for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOccupant {
    Lesson {
        entry: TimetableEntry,
        subject: Option<Subject>,
    },
    Break(Break),
    Free(FreeBlock),
}

/// Resolve the record occupying a coordinate, if any. Precedence when
/// records overlap: entry, then break, then free block.
pub fn resolve_cell(timetable: &Timetable, day: Day, time_slot_id: &str) -> Option<CellOccupant> {
    if let Some(entry) = find_entry(timetable, day, time_slot_id) {
        let subject = find_subject(timetable, &entry.subject_id).cloned();
        return Some(CellOccupant::Lesson {
            entry: entry.clone(),
            subject,
        });
    }
    if let Some(break_period) = timetable
        .breaks
        .iter()
        .find(|b| b.time_slot_id == time_slot_id && b.days.contains(&day))
    {
        return Some(CellOccupant::Break(break_period.clone()));
    }
    timetable
        .free_blocks
        .iter()
        .find(|f| f.time_slot_id == time_slot_id && f.days.contains(&day))
        .map(|block| CellOccupant::Free(block.clone()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub key: String,
    pub day: Day,
    pub occupant: Option<CellOccupant>,
}

/// One row of the weekly grid: a time slot and its seven day cells in
/// `Day::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub time_slot: TimeSlot,
    pub cells: Vec<GridCell>,
}

/// The full cross product of sorted time slots and the seven weekdays.
pub fn week_grid(timetable: &Timetable) -> Vec<GridRow> {
    sorted_time_slots(timetable)
        .into_iter()
        .map(|time_slot| {
            let cells = Day::ALL
                .iter()
                .map(|&day| GridCell {
                    key: cell_key(day, &time_slot.id),
                    day,
                    occupant: resolve_cell(timetable, day, &time_slot.id),
                })
                .collect();
            GridRow { time_slot, cells }
        })
        .collect()
}
