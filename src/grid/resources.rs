// src/grid/resources.rs
use bevy::prelude::*;
use std::collections::HashMap;

use super::definitions::{
    default_columns, ColumnDefinition, MetricType, RowId, RowRecord,
    DEFAULT_COLUMN_WIDTH,
};
use super::error::{RowError, SchemaError};
use super::events::InsertSide;
use super::validation::validate_cell_value;

/// Prefix of generated column field identifiers.
pub const METRIC_FIELD_PREFIX: &str = "metric";

// --- SchemaRegistry (schema store) ---
/// Owns the ordered column definitions and the monotonic counter for
/// generated field identifiers. Every mutation is all-or-nothing: a column is
/// either fully present (definition + order slot) or fully absent.
#[derive(Resource, Debug)]
pub struct SchemaRegistry {
    columns: Vec<ColumnDefinition>,
    next_metric_number: u64,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        SchemaRegistry {
            columns: default_columns(),
            next_metric_number: 1,
        }
    }
}

impl SchemaRegistry {
    /// An empty schema, for sessions that build their columns from scratch.
    pub fn empty() -> Self {
        SchemaRegistry {
            columns: Vec::new(),
            next_metric_number: 1,
        }
    }

    /// Ordered column descriptors (the presentation boundary snapshot).
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.field == field)
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.field == field)
    }

    pub fn field_order(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.field.clone()).collect()
    }

    /// Display label for a field, falling back to the field itself.
    pub fn header_for(&self, field: &str) -> String {
        self.column(field)
            .map(|c| c.header.clone())
            .unwrap_or_else(|| field.to_string())
    }

    /// Inserts a fresh generated text column next to `anchor` (or at the end
    /// when no anchor is given, regardless of side) and returns its field.
    /// Field numbers are allocated from a monotonic counter and never reused,
    /// even after the column is deleted.
    pub fn insert_metric(&mut self, anchor: Option<&str>, side: InsertSide) -> String {
        let field = format!("{}{}", METRIC_FIELD_PREFIX, self.next_metric_number);
        self.next_metric_number += 1;

        let mut def = ColumnDefinition::new_text(field.clone(), field.clone());
        def.width = DEFAULT_COLUMN_WIDTH;

        let index = match anchor.and_then(|a| self.position(a)) {
            Some(anchor_index) => match side {
                InsertSide::Before => anchor_index,
                InsertSide::After => anchor_index + 1,
            },
            None => self.columns.len(),
        };
        self.columns.insert(index, def);
        field
    }

    /// Appends an externally proposed column (synthesis path). Duplicate
    /// fields are rejected rather than replaced.
    pub fn insert_column(&mut self, definition: ColumnDefinition) -> Result<(), SchemaError> {
        if self.has_field(&definition.field) {
            return Err(SchemaError::DuplicateField(definition.field));
        }
        self.columns.push(definition);
        Ok(())
    }

    pub fn remove_column(&mut self, field: &str) -> Result<ColumnDefinition, SchemaError> {
        let index = self
            .position(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
        Ok(self.columns.remove(index))
    }

    /// Changes only the value type. Existing row values must have been
    /// validated against the new type by the caller before this is invoked.
    pub fn retype_column(&mut self, field: &str, new_type: MetricType) -> Result<(), SchemaError> {
        let column = self
            .column_mut(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
        column.metric_type = new_type;
        Ok(())
    }

    pub fn rename_column(&mut self, field: &str, new_header: &str) -> Result<(), SchemaError> {
        let trimmed = new_header.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::EmptyHeader);
        }
        let column = self
            .column_mut(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
        column.header = trimmed.to_string();
        Ok(())
    }

    pub fn resize_column(&mut self, field: &str, new_width: u32) -> Result<(), SchemaError> {
        if new_width == 0 {
            return Err(SchemaError::ZeroWidth);
        }
        let column = self
            .column_mut(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
        column.width = new_width;
        Ok(())
    }

    /// Replaces the option list wholesale. Row values are not revalidated.
    pub fn set_options(&mut self, field: &str, options: Vec<String>) -> Result<(), SchemaError> {
        let column = self
            .column_mut(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;
        column.options = options;
        Ok(())
    }

    fn column_mut(&mut self, field: &str) -> Option<&mut ColumnDefinition> {
        self.columns.iter_mut().find(|c| c.field == field)
    }
}

// --- RowRegistry (row store) ---
/// Owns the identity-addressed row collection. Holds no reference to the
/// schema: field back-fill/strip is driven by column change notifications so
/// the two stores stay independently testable.
#[derive(Resource, Default, Debug)]
pub struct RowRegistry {
    rows: Vec<RowRecord>,
}

impl RowRegistry {
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&RowRecord> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Creates a row with a fresh identity and every given field set to the
    /// empty string. Returns the new row's id.
    pub fn add_row<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) -> RowId {
        let row = RowRecord::empty_over(fields);
        let id = row.id;
        self.rows.push(row);
        id
    }

    /// Removes the listed rows; unknown ids are ignored. Returns how many
    /// rows were actually removed.
    pub fn remove_rows(&mut self, ids: &[RowId]) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !ids.contains(&r.id));
        before - self.rows.len()
    }

    /// Removes every row, returning the removed ids.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.rows.drain(..).map(|r| r.id).collect()
    }

    /// Back-fills a newly added field with an empty value on every row.
    pub fn backfill_field(&mut self, field: &str) {
        for row in self.rows.iter_mut() {
            row.cells.entry(field.to_string()).or_default();
        }
    }

    /// Strips a removed field's key from every row.
    pub fn strip_field(&mut self, field: &str) {
        for row in self.rows.iter_mut() {
            row.cells.remove(field);
        }
    }

    /// All current values stored under `field`, in row order.
    pub fn values_for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .filter_map(move |r| r.cells.get(field).map(|s| s.as_str()))
    }

    /// Validates and commits one cell. On rejection the row is left exactly
    /// as it was.
    pub fn update_cell(
        &mut self,
        id: RowId,
        field: &str,
        new_value: &str,
        metric_type: MetricType,
        options: &[String],
    ) -> Result<(), RowError> {
        if !validate_cell_value(new_value, metric_type, options) {
            return Err(RowError::InvalidValue {
                field: field.to_string(),
                value: new_value.to_string(),
                metric_type,
            });
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RowError::UnknownRow(id))?;
        let cell = row
            .cells
            .get_mut(field)
            .ok_or_else(|| RowError::UnknownField(field.to_string()))?;
        *cell = new_value.to_string();
        Ok(())
    }

    /// The first field whose proposed value differs from the stored row,
    /// mirroring the single-cell-at-a-time editing model: a snapshot commit
    /// applies at most one field.
    pub fn first_changed_field(
        &self,
        id: RowId,
        proposed: &HashMap<String, String>,
    ) -> Option<(String, String)> {
        let row = self.get(id)?;
        // Walk the stored key set so extra keys in the proposal are ignored.
        let mut fields: Vec<&String> = row.cells.keys().collect();
        fields.sort();
        for field in fields {
            if let Some(new_value) = proposed.get(field) {
                if row.cells.get(field) != Some(new_value) {
                    return Some((field.clone(), new_value.clone()));
                }
            }
        }
        None
    }
}

// --- Instructions ---
/// Free-text instructions feeding the synthesis adapter (typed in directly or
/// loaded from a `.txt` file).
#[derive(Resource, Default, Debug)]
pub struct Instructions(String);

impl Instructions {
    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn set(&mut self, text: String) {
        self.0 = text;
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// --- SynthesisState ---
/// Cooperative single-flight bookkeeping for the synthesis adapter. A new
/// request is refused while `in_flight` is set; `generation` stamps each
/// request so a result resolving for a superseded request is discarded
/// instead of mutating state.
#[derive(Resource, Default, Debug)]
pub struct SynthesisState {
    pub in_flight: bool,
    pub generation: u64,
}
