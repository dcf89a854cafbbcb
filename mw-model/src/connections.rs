//! Connection lines for the diagram layer.

use std::collections::HashMap;

use tracing::debug;

use crate::document::{Document, Element};
use crate::error::Result;
use crate::placement::Placement;
use crate::section::Section;
use crate::value::{Scalar, Value};

/// Line color of drawn connections.
pub const LINE_COLOR: [i64; 3] = [0, 0, 255];

/// Annotate every connection between two placed declarations with a
/// `Line` from one origin to the other.
///
/// Connections whose owners are not declarations of this document, or are
/// not placed, are left alone. Returns the number of annotated connections.
pub fn draw_connections(doc: &mut Document) -> Result<usize> {
    let origins: HashMap<String, (Scalar, Scalar)> = doc
        .declarations()
        .filter_map(|decl| {
            Placement::origin_of(decl.annotation()).map(|origin| (decl.ident().to_string(), origin))
        })
        .collect();

    let mut drawn = 0;
    for element in doc.section_mut(Section::Equation) {
        let Element::Connect(connect) = element else {
            continue;
        };
        let (owner_a, owner_b) = connect.owners();
        let (Some((x1, y1)), Some((x2, y2))) = (origins.get(owner_a), origins.get(owner_b))
        else {
            continue;
        };

        let points = Value::list([
            Value::point(x1.clone(), y1.clone()),
            Value::point(x2.clone(), y2.clone()),
        ]);
        let line = connect.annotation.path_mut(&["Line"])?;
        line.set("points", points);
        line.set("color", Value::list(LINE_COLOR));
        drawn += 1;
    }

    debug!(document = doc.ident(), drawn, "connections drawn");
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationOptions;

    fn placed(doc: &mut Document, ident: &str, x: f64, y: f64) {
        doc.add_declaration(
            "Resistor",
            ident,
            DeclarationOptions::new().placement(Placement::at(x, y)),
        )
        .unwrap();
    }

    #[test]
    fn test_draws_between_placed_owners() {
        let mut doc = Document::new("Circuit");
        placed(&mut doc, "r1", 0.0, 0.0);
        placed(&mut doc, "r2", 20.0, -10.0);
        doc.add_connection(&["r1", "n", "r2", "p"]).unwrap();

        assert_eq!(draw_connections(&mut doc).unwrap(), 1);

        let Element::Connect(connect) = &doc.section(Section::Equation)[0] else {
            panic!("Expected a connection");
        };
        let line = connect.annotation.get_path(&["Line"]).unwrap().unwrap();
        assert_eq!(
            line.get("points"),
            Some(&Value::list([Value::point(0, 0), Value::point(20, -10)]))
        );
        assert_eq!(line.get("color"), Some(&Value::list([0, 0, 255])));
    }

    #[test]
    fn test_skips_unplaced_owners() {
        let mut doc = Document::new("Circuit");
        placed(&mut doc, "r1", 0.0, 0.0);
        doc.add_declaration("Ground", "ground", DeclarationOptions::new())
            .unwrap();
        doc.add_connection(&["r1.n", "ground.p"]).unwrap();
        doc.add_connection(&["r1.p", "missing.p"]).unwrap();

        assert_eq!(draw_connections(&mut doc).unwrap(), 0);
        assert!(doc.section(Section::Equation).iter().all(|e| match e {
            Element::Connect(c) => c.annotation.is_empty(),
            _ => true,
        }));
    }
}
