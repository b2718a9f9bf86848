// src/grid/error.rs
use super::definitions::{MetricType, RowId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by `SchemaRegistry` mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("no column with field '{0}'")]
    UnknownField(String),
    #[error("a column with field '{0}' already exists")]
    DuplicateField(String),
    #[error("column header cannot be empty")]
    EmptyHeader,
    #[error("column width must be positive")]
    ZeroWidth,
}

/// Errors raised by `RowRegistry` mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("no row with id {0}")]
    UnknownRow(RowId),
    #[error("row has no field '{0}'")]
    UnknownField(String),
    #[error("value '{value}' is not valid for {metric_type} column '{field}'")]
    InvalidValue {
        field: String,
        value: String,
        metric_type: MetricType,
    },
}

/// Errors raised while ingesting an instructions file, checked in order:
/// extension, then size, then the actual read.
#[derive(Debug, Error)]
pub enum InstructionsError {
    #[error("only .txt files are supported: {0}")]
    WrongExtension(PathBuf),
    #[error("file is {size} bytes, which exceeds the {limit} byte limit")]
    Oversize { size: u64, limit: u64 },
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
}
