// SPDX-FileCopyrightText: 2026 Galatea Contributors
// SPDX-License-Identifier: MIT

use super::{LayoutStore, Point};
use crate::model::Schema;

/// One relationship connector, in model space.
///
/// Derived per render pass, never persisted. Endpoints are the rect centers
/// of the two cards; anchor-point routing is a deliberate simplification.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGeometry {
    pub start: Point,
    pub end: Point,
    pub source: String,
    pub target: String,
}

/// Resolves the connector set for the current schema and layout state.
///
/// Pure function of its inputs: relationships whose target is absent from
/// the schema are dropped silently (forward references resolve on a later
/// pass), and self-relationships draw nothing rather than a degenerate
/// zero-length line.
pub fn resolve_edges(schema: &Schema, layout: &LayoutStore) -> Vec<EdgeGeometry> {
    let mut edges = Vec::new();

    for source in schema.tables() {
        for target_name in source.relationships() {
            if target_name == source.name() {
                continue;
            }
            if !schema.contains(target_name) {
                continue;
            }

            let start = layout.rect_of(source.name()).center();
            let end = layout.rect_of(target_name).center();
            edges.push(EdgeGeometry {
                start,
                end,
                source: source.name().to_owned(),
                target: target_name.clone(),
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::resolve_edges;
    use crate::layout::{LayoutStore, Point};
    use crate::model::{Schema, Table};

    fn schema_with_relationship() -> Schema {
        let mut schema = Schema::new();
        let mut orders = Table::new("orders");
        orders.add_relationship("users");
        schema.merge(vec![orders, Table::new("users")]);
        schema
    }

    #[test]
    fn one_edge_per_existing_target() {
        let schema = schema_with_relationship();
        let layout = LayoutStore::new();

        let edges = resolve_edges(&schema, &layout);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "orders");
        assert_eq!(edges[0].target, "users");
    }

    #[test]
    fn missing_target_is_dropped_until_it_arrives() {
        let mut schema = Schema::new();
        let mut orders = Table::new("orders");
        orders.add_relationship("users");
        schema.merge(vec![orders]);
        let layout = LayoutStore::new();

        assert!(resolve_edges(&schema, &layout).is_empty());

        schema.merge(vec![Table::new("users")]);
        assert_eq!(resolve_edges(&schema, &layout).len(), 1);
    }

    #[test]
    fn self_relationship_draws_nothing() {
        let mut schema = Schema::new();
        let mut employees = Table::new("employees");
        employees.add_relationship("employees");
        schema.merge(vec![employees]);

        assert!(resolve_edges(&schema, &LayoutStore::new()).is_empty());
    }

    #[test]
    fn endpoints_are_rect_centers() {
        let schema = schema_with_relationship();
        let mut layout = LayoutStore::new();
        layout.set_position("orders", Point::new(0.0, 0.0));
        layout.set_position("users", Point::new(400.0, 0.0));

        let edges = resolve_edges(&schema, &layout);
        assert_eq!(edges[0].start, Point::new(125.0, 100.0));
        assert_eq!(edges[0].end, Point::new(525.0, 100.0));
    }

    #[test]
    fn endpoints_track_moved_cards() {
        let schema = schema_with_relationship();
        let mut layout = LayoutStore::new();
        layout.set_position("users", Point::new(100.0, 300.0));

        let edges = resolve_edges(&schema, &layout);
        assert_eq!(edges[0].end, layout.rect_of("users").center());
    }
}
