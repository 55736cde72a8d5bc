//! Per-emission action record.

use crate::value::Value;
use std::time::SystemTime;

/// The record pipeline functions receive for one emission.
///
/// `payload` starts as the emitted arguments. Pipeline functions may replace
/// it wholesale; listeners receive whatever it holds after the last one ran.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    /// The positional arguments listeners will receive.
    pub payload: Vec<Value>,
    /// When the emission started.
    pub date: SystemTime,
}

impl ActionRecord {
    /// Create a record stamped with the current time.
    pub fn new(payload: Vec<Value>) -> Self {
        Self {
            payload,
            date: SystemTime::now(),
        }
    }

    /// Keep only the arguments for which `predicate(value, index)` holds.
    pub fn filter_payload<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&Value, usize) -> bool,
    {
        self.payload = std::mem::take(&mut self.payload)
            .into_iter()
            .enumerate()
            .filter(|(index, value)| predicate(value, *index))
            .map(|(_, value)| value)
            .collect();
    }

    /// Replace every argument with `transform(value, index)`.
    pub fn map_payload<F>(&mut self, mut transform: F)
    where
        F: FnMut(&Value, usize) -> Value,
    {
        self.payload = self
            .payload
            .iter()
            .enumerate()
            .map(|(index, value)| transform(value, index))
            .collect();
    }
}
