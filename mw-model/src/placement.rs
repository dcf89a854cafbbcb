//! Diagram placement of declarations.
//!
//! A [`Placement`] is not stored on the declaration itself; it is written
//! into the `Placement` entry of the declaration's annotation:
//!
//! ```text
//! Placement(visible=true, transformation(extent={{-10,-10},{10,10}}, rotation=90, origin={0,-40}))
//! ```

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::value::{Annotation, Scalar, Value};

/// Mirror axis of a placed declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flip {
    Horizontal,
    Vertical,
}

/// Position, orientation and size of a declaration in the diagram layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub origin: (f64, f64),
    pub flip: Option<Flip>,
    pub rotation: Option<f64>,
    pub size: f64,
    pub visible: Option<bool>,
}

impl Placement {
    /// Default size of a placed icon, in diagram units from its center.
    pub const DEFAULT_SIZE: f64 = 10.0;

    /// Place at `(x, y)` with the default size and no rotation.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            origin: (x, y),
            flip: None,
            rotation: None,
            size: Self::DEFAULT_SIZE,
            visible: None,
        }
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = Some(flip);
        self
    }

    /// Rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// The extent corners; a flip swaps the corners along its axis.
    pub fn extent(&self) -> [(f64, f64); 2] {
        let s = self.size;
        match self.flip {
            Some(Flip::Horizontal) => [(s, -s), (-s, s)],
            Some(Flip::Vertical) => [(-s, s), (s, -s)],
            None => [(-s, -s), (s, s)],
        }
    }

    /// Write this placement into `annotation` under `Placement`.
    ///
    /// An existing transformation is overwritten with a warning; other
    /// entries of the `Placement` record are kept.
    pub fn apply(&self, ident: &str, annotation: &mut Annotation) -> Result<()> {
        let placement = annotation.path_mut(&["Placement"])?;
        if let Some(visible) = self.visible {
            placement.set("visible", visible);
        }

        let transformation = placement.path_mut(&["transformation"])?;
        if !transformation.is_empty() {
            warn!(ident, "overwriting placement transformation");
        }

        let [lower, upper] = self.extent();
        transformation.set("extent", Value::list([point(lower), point(upper)]));
        if let Some(rotation) = self.rotation {
            transformation.set("rotation", Scalar::number(rotation));
        }
        transformation.set("origin", point(self.origin));
        Ok(())
    }

    /// Read the origin back from an annotation written by [`apply`](Self::apply).
    pub fn origin_of(annotation: &Annotation) -> Option<(Scalar, Scalar)> {
        let transformation = annotation
            .get_path(&["Placement", "transformation"])
            .ok()
            .flatten()?;
        match transformation.get("origin")? {
            Value::List(items) => match items.as_slice() {
                [Value::Scalar(x), Value::Scalar(y)] => Some((x.clone(), y.clone())),
                _ => None,
            },
            Value::Tuple(items) => match items.as_slice() {
                [x, y] => Some((x.clone(), y.clone())),
                _ => None,
            },
            _ => None,
        }
    }
}

fn point((x, y): (f64, f64)) -> Value {
    Value::point(Scalar::number(x), Scalar::number(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transformation(annotation: &Annotation) -> &Annotation {
        annotation
            .get_path(&["Placement", "transformation"])
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_apply_writes_transformation() {
        let mut annotation = Annotation::new();
        Placement::at(0.0, -40.0)
            .with_rotation(90.0)
            .apply("r1", &mut annotation)
            .unwrap();

        let t = transformation(&annotation);
        let keys: Vec<_> = t.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["extent", "rotation", "origin"]);
        assert_eq!(t.get("origin"), Some(&Value::point(0, -40)));
        assert_eq!(t.get("rotation"), Some(&Value::from(90)));
    }

    #[test]
    fn test_flip_swaps_extent() {
        let p = Placement::at(0.0, 0.0).with_size(20.0);
        assert_eq!(p.extent(), [(-20.0, -20.0), (20.0, 20.0)]);
        assert_eq!(
            p.clone().with_flip(Flip::Horizontal).extent(),
            [(20.0, -20.0), (-20.0, 20.0)]
        );
        assert_eq!(
            p.with_flip(Flip::Vertical).extent(),
            [(-20.0, 20.0), (20.0, -20.0)]
        );
    }

    #[test]
    fn test_visible_is_kept_beside_transformation() {
        let mut annotation = Annotation::new();
        Placement::at(1.0, 2.0)
            .with_visible(false)
            .apply("c", &mut annotation)
            .unwrap();
        let placement = annotation.get_path(&["Placement"]).unwrap().unwrap();
        assert_eq!(placement.get("visible"), Some(&Value::from(false)));
    }

    #[test]
    fn test_overwrite_replaces_origin() {
        let mut annotation = Annotation::new();
        Placement::at(1.0, 2.0).apply("c", &mut annotation).unwrap();
        Placement::at(3.5, 4.0).apply("c", &mut annotation).unwrap();
        assert_eq!(
            Placement::origin_of(&annotation),
            Some((Scalar::Real(3.5), Scalar::Integer(4)))
        );
    }

    #[test]
    fn test_origin_of_missing() {
        assert_eq!(Placement::origin_of(&Annotation::new()), None);
    }
}
