//! Submitted data: one Polars frame per subtable.

use polars::prelude::DataFrame;

use crate::description::TableDescription;
use crate::error::{ModelError, Result};

/// Ordered mapping of subtable file name to frame.
///
/// Columns are matched to the description by position, so frame column
/// names are free-form.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    frames: Vec<(String, DataFrame)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches frames to the description's subtables by position.
    pub fn from_positional(description: &TableDescription, frames: Vec<DataFrame>) -> Result<Self> {
        if frames.len() != description.subtables.len() {
            return Err(ModelError::SubtableCount {
                expected: description.subtables.len(),
                found: frames.len(),
            });
        }
        let frames = description
            .subtables
            .iter()
            .map(|s| s.file_name.clone())
            .zip(frames)
            .collect();
        Ok(Self { frames })
    }

    /// Adds or replaces the frame for a subtable. New names keep insertion order.
    pub fn insert(&mut self, name: impl Into<String>, frame: DataFrame) {
        let name = name.into();
        if let Some(slot) = self.frames.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = frame;
        } else {
            self.frames.push((name, frame));
        }
    }

    pub fn with(mut self, name: impl Into<String>, frame: DataFrame) -> Self {
        self.insert(name, frame);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.frames.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.frames.iter().map(|(n, f)| (n.as_str(), f))
    }
}

impl FromIterator<(String, DataFrame)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (String, DataFrame)>>(iter: T) -> Self {
        let mut dataset = Self::new();
        for (name, frame) in iter {
            dataset.insert(name, frame);
        }
        dataset
    }
}
