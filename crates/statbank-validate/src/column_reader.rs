//! Positional column access for validation.
//!
//! Statbank files have no header row, so columns are addressed by their
//! 1-based position as declared in the table description.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};
use statbank_common::cell_text;

#[derive(Debug)]
pub struct ColumnReader<'a> {
    df: &'a DataFrame,
}

impl<'a> ColumnReader<'a> {
    #[inline]
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Column at a 1-based position.
    pub fn column(&self, number: usize) -> Option<&'a Column> {
        let index = number.checked_sub(1)?;
        self.df.get_columns().get(index)
    }

    /// Cell text at a 1-based column and 0-based row. Missing cells read as empty.
    pub fn get_string(&self, number: usize, row: usize) -> String {
        self.column(number)
            .map(|column| cell_text(column, row))
            .unwrap_or_default()
    }

    /// Yields `(row, text)` for every row of a column.
    pub fn iter_strings(&self, number: usize) -> impl Iterator<Item = (usize, String)> + 'a {
        let column = self.column(number);
        (0..self.df.height()).filter_map(move |row| column.map(|c| (row, cell_text(c, row))))
    }

    /// Distinct cell texts of a column, sorted.
    pub fn distinct_values(&self, number: usize) -> BTreeSet<String> {
        self.iter_strings(number).map(|(_, value)| value).collect()
    }

    /// Distinct values matching a predicate: total count and the first `limit`.
    pub fn collect_matching<F>(&self, number: usize, predicate: F, limit: usize) -> (usize, Vec<String>)
    where
        F: Fn(&str) -> bool,
    {
        let matching: BTreeSet<String> = self
            .iter_strings(number)
            .map(|(_, value)| value)
            .filter(|value| predicate(value))
            .collect();
        let count = matching.len();
        (count, matching.into_iter().take(limit).collect())
    }
}
