// src/grid/definitions.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Default rendered width for a freshly created or synthesized column.
pub const DEFAULT_COLUMN_WIDTH: u32 = 160;
/// Wider default used for the name column.
pub const NAME_COLUMN_WIDTH: u32 = 200;

/// Value-type semantics of a metric column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Text,
    Number,
    Select,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Text => write!(f, "text"),
            MetricType::Number => write!(f, "number"),
            MetricType::Select => write!(f, "select"),
        }
    }
}

/// One column of the grid. `field` is the immutable identity; `header` is the
/// independently editable display label. `options` is only meaningful while
/// `metric_type == Select` and is kept (not cleared) across retypes so a
/// round-trip back to Select restores the previous list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub field: String,
    pub header: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default)]
    pub options: Vec<String>,
    pub width: u32,
}

impl ColumnDefinition {
    pub fn new_text(field: impl Into<String>, header: impl Into<String>) -> Self {
        ColumnDefinition {
            field: field.into(),
            header: header.into(),
            metric_type: MetricType::Text,
            options: Vec::new(),
            width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn new_select(
        field: impl Into<String>,
        header: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        ColumnDefinition {
            field: field.into(),
            header: header.into(),
            metric_type: MetricType::Select,
            options,
            width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// The columns every new grid session starts with.
pub fn default_columns() -> Vec<ColumnDefinition> {
    let mut name = ColumnDefinition::new_text("name", "Name");
    name.width = NAME_COLUMN_WIDTH;
    vec![
        name,
        ColumnDefinition::new_select(
            "sex",
            "Sex",
            vec!["male".to_string(), "female".to_string()],
        ),
        ColumnDefinition::new_text("strengths", "Strengths"),
        ColumnDefinition::new_text("growthPoints", "Growth points"),
        ColumnDefinition::new_text("comment", "Comment"),
    ]
}

/// Opaque stable row identity, unique for the session, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        RowId(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        RowId::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One subject row: identity plus a field -> value mapping whose key set is
/// kept exactly equal to the current column-field set.
#[derive(Debug, Clone, Serialize)]
pub struct RowRecord {
    pub id: RowId,
    pub cells: HashMap<String, String>,
}

impl RowRecord {
    pub fn empty_over<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        RowRecord {
            id: RowId::new(),
            cells: fields
                .into_iter()
                .map(|f| (f.to_string(), String::new()))
                .collect(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.cells.get(field).map(|s| s.as_str())
    }
}
