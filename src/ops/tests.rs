// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use super::{apply_ops, Op};
use crate::layout::{resolve_edges, Point, Size};
use crate::model::{Column, DiagramSession, Table};

fn users_table() -> Table {
    let mut table = Table::new("users");
    let mut id = Column::new("id", "INT");
    id.set_primary_key(true);
    table.push_column(id);
    table
}

fn orders_table() -> Table {
    let mut table = Table::new("orders");
    table.push_column(Column::new("user_id", "INT"));
    table.add_relationship("users");
    table
}

#[test]
fn merge_op_reports_conflicts_without_aborting() {
    let mut session = DiagramSession::new();

    let mut duplicate = Table::new("users");
    duplicate.push_column(Column::new("x", "VARCHAR"));

    let result = apply_ops(
        &mut session,
        &[Op::Merge {
            tables: vec![users_table(), duplicate],
        }],
    );

    assert_eq!(result.conflicts, ["users"]);
    assert_eq!(result.applied, 1);
    assert_eq!(session.schema().len(), 1);
    // The first "users" won.
    assert!(session
        .schema()
        .table("users")
        .expect("users")
        .column("id")
        .is_some());
}

#[test]
fn conflicts_accumulate_across_merges_in_one_batch() {
    let mut session = DiagramSession::new();

    let result = apply_ops(
        &mut session,
        &[
            Op::Merge {
                tables: vec![users_table()],
            },
            Op::Merge {
                tables: vec![users_table(), orders_table()],
            },
        ],
    );

    assert_eq!(result.conflicts, ["users"]);
    assert_eq!(session.schema().len(), 2);
}

#[test]
fn set_position_moves_edge_endpoints_on_next_resolution() {
    let mut session = DiagramSession::new();
    apply_ops(
        &mut session,
        &[Op::Merge {
            tables: vec![orders_table(), users_table()],
        }],
    );

    apply_ops(
        &mut session,
        &[Op::SetPosition {
            table: "users".to_owned(),
            position: Point::new(800.0, 600.0),
        }],
    );

    let edges = resolve_edges(session.schema(), session.layout());
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].end, session.layout().rect_of("users").center());
}

#[test]
fn set_size_changes_the_rect_center() {
    let mut session = DiagramSession::new();
    apply_ops(
        &mut session,
        &[Op::Merge {
            tables: vec![orders_table(), users_table()],
        }],
    );

    let before = session.layout().rect_of("users").center();
    apply_ops(
        &mut session,
        &[Op::SetSize {
            table: "users".to_owned(),
            size: Size::new(450.0, 400.0),
        }],
    );
    let after = session.layout().rect_of("users").center();

    assert_ne!(before, after);
    let edges = resolve_edges(session.schema(), session.layout());
    assert_eq!(edges[0].end, after);
}

#[test]
fn zoom_ops_clamp_and_never_fail() {
    let mut session = DiagramSession::new();

    let ops: Vec<Op> = std::iter::repeat(Op::ZoomIn).take(100).collect();
    apply_ops(&mut session, &ops);
    assert_eq!(session.viewport().factor(), 2.0);

    let ops: Vec<Op> = std::iter::repeat(Op::ZoomOut).take(100).collect();
    apply_ops(&mut session, &ops);
    assert_eq!(session.viewport().factor(), 0.5);
}

#[test]
fn zoom_does_not_touch_model_positions() {
    let mut session = DiagramSession::new();
    apply_ops(
        &mut session,
        &[Op::Merge {
            tables: vec![users_table()],
        }],
    );
    let before = session.layout().position_of("users");

    apply_ops(&mut session, &[Op::ZoomIn, Op::ZoomIn, Op::ZoomOut]);
    assert_eq!(session.layout().position_of("users"), before);
}

#[test]
fn select_unknown_table_is_a_tolerated_noop() {
    let mut session = DiagramSession::new();
    let result = apply_ops(
        &mut session,
        &[Op::Select {
            table: "ghost".to_owned(),
        }],
    );

    assert_eq!(result.applied, 1);
    assert_eq!(session.selected(), None);
}

#[test]
fn remove_table_clears_selection_and_edges() {
    let mut session = DiagramSession::new();
    apply_ops(
        &mut session,
        &[
            Op::Merge {
                tables: vec![orders_table(), users_table()],
            },
            Op::Select {
                table: "users".to_owned(),
            },
        ],
    );
    assert_eq!(session.selected(), Some("users"));

    apply_ops(
        &mut session,
        &[Op::RemoveTable {
            table: "users".to_owned(),
        }],
    );

    assert_eq!(session.selected(), None);
    assert!(resolve_edges(session.schema(), session.layout()).is_empty());
}

#[test]
fn apply_reports_the_session_rev() {
    let mut session = DiagramSession::new();
    let result = apply_ops(&mut session, &[Op::ZoomIn, Op::ZoomOut]);
    assert_eq!(result.new_rev, session.rev());
    assert_eq!(result.applied, 2);
}

#[test]
fn empty_batch_changes_nothing() {
    let mut session = DiagramSession::new();
    let rev = session.rev();
    let result = apply_ops(&mut session, &[]);
    assert_eq!(result.applied, 0);
    assert_eq!(result.new_rev, rev);
    assert!(result.conflicts.is_empty());
}
