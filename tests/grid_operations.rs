// tests/grid_operations.rs
//! Schema and row operations driven end-to-end through request events on a
//! headless app.

use bevy::ecs::event::Events;
use bevy::prelude::*;

use reportgrid::grid::definitions::MetricType;
use reportgrid::grid::events::*;
use reportgrid::interaction::events::ColumnHeaderClicked;
use reportgrid::{GridEditorPlugin, GridInteractionState, RowRegistry, SchemaRegistry};

fn setup_app() -> App {
    let mut app = App::new();
    app.add_plugins(GridEditorPlugin);
    // Run Startup so the seed row exists.
    app.update();
    app
}

fn drain_feedback(app: &mut App) -> Vec<GridOperationFeedback> {
    app.world_mut()
        .resource_mut::<Events<GridOperationFeedback>>()
        .drain()
        .collect()
}

fn first_row_id(app: &App) -> reportgrid::RowId {
    app.world().resource::<RowRegistry>().rows()[0].id
}

#[test]
fn starts_with_default_columns_and_one_seed_row() {
    let app = setup_app();
    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(
        schema.field_order(),
        vec!["name", "sex", "strengths", "growthPoints", "comment"]
    );
    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.rows()[0].value("name"), Some(""));
}

#[test]
fn insert_after_selected_column_splices_and_backfills() {
    let mut app = setup_app();
    app.world_mut().send_event(ColumnHeaderClicked {
        field: "sex".to_string(),
    });
    app.update();

    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::After,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.position("metric1"), Some(2));
    let column = schema.column("metric1").unwrap();
    assert_eq!(column.metric_type, MetricType::Text);
    assert_eq!(column.header, "metric1");

    // Row back-fill happens via the column-added notification same frame.
    let rows = app.world().resource::<RowRegistry>();
    assert!(rows.rows().iter().all(|r| r.value("metric1") == Some("")));
}

#[test]
fn insert_before_selected_column() {
    let mut app = setup_app();
    app.world_mut().send_event(ColumnHeaderClicked {
        field: "sex".to_string(),
    });
    app.update();
    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::Before,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.position("metric1"), Some(1));
    assert_eq!(schema.position("sex"), Some(2));
}

#[test]
fn insert_with_no_selection_appends() {
    let mut app = setup_app();
    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::After,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.position("metric1"), Some(schema.columns().len() - 1));
}

#[test]
fn metric_numbers_are_never_reused() {
    let mut app = setup_app();
    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::After,
    });
    app.update();
    app.world_mut().send_event(RequestDeleteColumn {
        field: "metric1".to_string(),
    });
    app.update();
    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::After,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    assert!(!schema.has_field("metric1"));
    assert!(schema.has_field("metric2"));
}

#[test]
fn delete_column_strips_rows_and_clears_selection() {
    let mut app = setup_app();
    app.world_mut().send_event(ColumnHeaderClicked {
        field: "sex".to_string(),
    });
    app.update();
    assert_eq!(
        app.world()
            .resource::<GridInteractionState>()
            .selected_column(),
        Some("sex")
    );

    app.world_mut().send_event(RequestDeleteColumn {
        field: "sex".to_string(),
    });
    app.update();

    assert!(!app.world().resource::<SchemaRegistry>().has_field("sex"));
    let rows = app.world().resource::<RowRegistry>();
    assert!(rows.rows().iter().all(|r| r.value("sex").is_none()));
    assert_eq!(
        app.world()
            .resource::<GridInteractionState>()
            .selected_column(),
        None
    );
}

#[test]
fn selection_delete_refuses_default_columns() {
    let mut app = setup_app();
    app.world_mut().send_event(ColumnHeaderClicked {
        field: "name".to_string(),
    });
    app.update();
    drain_feedback(&mut app);

    app.world_mut().send_event(RequestDeleteSelectedColumn);
    app.update();

    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().any(|f| f.is_error));
    assert!(app.world().resource::<SchemaRegistry>().has_field("name"));
}

#[test]
fn selection_delete_removes_metric_column_same_frame() {
    let mut app = setup_app();
    app.world_mut().send_event(RequestInsertColumn {
        side: InsertSide::After,
    });
    app.update();

    app.world_mut().send_event(ColumnHeaderClicked {
        field: "metric1".to_string(),
    });
    app.update();
    app.world_mut().send_event(RequestDeleteSelectedColumn);
    app.update();

    assert!(!app.world().resource::<SchemaRegistry>().has_field("metric1"));
}

#[test]
fn selection_delete_without_selection_reports_error() {
    let mut app = setup_app();
    drain_feedback(&mut app);
    app.world_mut().send_event(RequestDeleteSelectedColumn);
    app.update();

    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().any(|f| f.is_error));
}

#[test]
fn update_cell_validates_number_values() {
    let mut app = setup_app();
    let row_id = first_row_id(&app);

    // Seed row only holds "", so the retype goes through.
    app.world_mut().send_event(RequestRetypeColumn {
        field: "growthPoints".to_string(),
        new_type: MetricType::Number,
    });
    app.update();
    drain_feedback(&mut app);

    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "growthPoints".to_string(),
        new_value: "-1".to_string(),
    });
    app.update();
    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().any(|f| f.is_error));
    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.get(row_id).unwrap().value("growthPoints"), Some(""));

    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "growthPoints".to_string(),
        new_value: "3.5".to_string(),
    });
    app.update();
    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().all(|f| !f.is_error));
    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.get(row_id).unwrap().value("growthPoints"), Some("3.5"));
}

#[test]
fn update_cell_enforces_select_membership() {
    let mut app = setup_app();
    let row_id = first_row_id(&app);

    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "sex".to_string(),
        new_value: "other".to_string(),
    });
    app.update();
    assert!(drain_feedback(&mut app).iter().any(|f| f.is_error));

    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "sex".to_string(),
        new_value: "female".to_string(),
    });
    app.update();
    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.get(row_id).unwrap().value("sex"), Some("female"));
}

#[test]
fn row_snapshot_applies_only_the_changed_field() {
    let mut app = setup_app();
    let row_id = first_row_id(&app);

    let mut proposed: std::collections::HashMap<String, String> = app
        .world()
        .resource::<RowRegistry>()
        .get(row_id)
        .unwrap()
        .cells
        .clone();
    proposed.insert("comment".to_string(), "doing well".to_string());

    app.world_mut().send_event(RowSnapshotEdited { row_id, proposed });
    app.update();

    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.get(row_id).unwrap().value("comment"), Some("doing well"));
}

#[test]
fn retype_rejected_while_values_are_incompatible() {
    let mut app = setup_app();
    let row_id = first_row_id(&app);

    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "strengths".to_string(),
        new_value: "reading".to_string(),
    });
    app.update();
    drain_feedback(&mut app);

    app.world_mut().send_event(RequestRetypeColumn {
        field: "strengths".to_string(),
        new_type: MetricType::Number,
    });
    app.update();

    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().any(|f| f.is_error && f.message.contains("reading")));
    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.column("strengths").unwrap().metric_type, MetricType::Text);
}

#[test]
fn retype_to_select_opens_options_editor() {
    let mut app = setup_app();
    app.world_mut().send_event(RequestRetypeColumn {
        field: "comment".to_string(),
        new_type: MetricType::Select,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.column("comment").unwrap().metric_type, MetricType::Select);
    let opened: Vec<OpenOptionsEditorEvent> = app
        .world_mut()
        .resource_mut::<Events<OpenOptionsEditorEvent>>()
        .drain()
        .collect();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].field, "comment");
}

#[test]
fn rename_and_resize_update_schema_only() {
    let mut app = setup_app();
    app.world_mut().send_event(RequestRenameColumn {
        field: "comment".to_string(),
        new_header: "Teacher Notes".to_string(),
    });
    app.world_mut().send_event(RequestResizeColumn {
        field: "comment".to_string(),
        new_width: 320,
    });
    app.update();

    let schema = app.world().resource::<SchemaRegistry>();
    let column = schema.column("comment").unwrap();
    assert_eq!(column.header, "Teacher Notes");
    assert_eq!(column.width, 320);
    assert_eq!(column.field, "comment");
}

#[test]
fn rename_to_blank_is_rejected() {
    let mut app = setup_app();
    drain_feedback(&mut app);
    app.world_mut().send_event(RequestRenameColumn {
        field: "comment".to_string(),
        new_header: "   ".to_string(),
    });
    app.update();

    assert!(drain_feedback(&mut app).iter().any(|f| f.is_error));
    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.column("comment").unwrap().header, "Comment");
}

#[test]
fn add_and_delete_rows() {
    let mut app = setup_app();
    app.world_mut().send_event(AddRowRequest);
    app.world_mut().send_event(AddRowRequest);
    app.update();
    assert_eq!(app.world().resource::<RowRegistry>().len(), 3);

    let victim = app.world().resource::<RowRegistry>().rows()[1].id;
    app.world_mut().send_event(RequestDeleteRows {
        row_ids: vec![victim],
    });
    app.update();

    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.len(), 2);
    assert!(rows.get(victim).is_none());
}

#[test]
fn clear_rows_empties_the_table() {
    let mut app = setup_app();
    app.world_mut().send_event(AddRowRequest);
    app.update();
    drain_feedback(&mut app);

    app.world_mut().send_event(RequestClearRows);
    app.update();

    assert!(app.world().resource::<RowRegistry>().is_empty());
    let feedback = drain_feedback(&mut app);
    assert!(feedback.iter().any(|f| !f.is_error && f.message.contains("cleared")));
}

#[test]
fn set_options_replaces_list_without_revalidating_rows() {
    let mut app = setup_app();
    let row_id = first_row_id(&app);
    app.world_mut().send_event(UpdateCellEvent {
        row_id,
        field: "sex".to_string(),
        new_value: "male".to_string(),
    });
    app.update();

    app.world_mut().send_event(RequestSetColumnOptions {
        field: "sex".to_string(),
        options: vec!["unknown".to_string()],
    });
    app.update();

    // The stored value is now stale but untouched.
    let rows = app.world().resource::<RowRegistry>();
    assert_eq!(rows.get(row_id).unwrap().value("sex"), Some("male"));
    let schema = app.world().resource::<SchemaRegistry>();
    assert_eq!(schema.column("sex").unwrap().options, vec!["unknown"]);
}
