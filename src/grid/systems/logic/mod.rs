// src/grid/systems/logic/mod.rs

pub mod add_column;
pub mod add_row;
pub mod delete_column;
pub mod delete_rows;
pub mod rename_column;
pub mod resize_column;
pub mod retype_column;
pub mod row_sync;
pub mod set_options;
pub mod update_cell;

pub use add_column::handle_insert_column_request;
pub use add_row::{handle_add_row_request, seed_initial_row};
pub use delete_column::{
    handle_delete_column_request, handle_delete_selected_column_request,
};
pub use delete_rows::{handle_clear_rows_request, handle_delete_rows_request};
pub use rename_column::handle_rename_column_request;
pub use resize_column::handle_resize_column_request;
pub use retype_column::handle_retype_column_request;
pub use row_sync::sync_rows_with_schema;
pub use set_options::handle_set_options_request;
pub use update_cell::{handle_row_snapshot_edited, handle_update_cell_request};
