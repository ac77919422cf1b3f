//! Footprint value and its element types.
//!
//! All coordinates stored here are absolute footprint coordinates in
//! millimeters. Elements are only ever appended.

use std::path::PathBuf;

use glam::{DVec2, DVec3};

use crate::layer::Layer;

/// Token standing in for the output library directory in model paths.
pub const LIBRARY_PLACEHOLDER: &str = "{LIBRARY}";

/// KiCad's project directory variable.
pub const PROJECT_DIR_VAR: &str = "${KIPRJMOD}";

pub const DEFAULT_STROKE_WIDTH: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadKind {
    ThroughHole,
    Smd,
    NpThroughHole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadShape {
    Circle,
    Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Pad number; empty for mechanical holes.
    pub number: String,
    pub kind: PadKind,
    pub shape: PadShape,
    pub at: DVec2,
    pub size: DVec2,
    pub drill: Option<f64>,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub layer: Layer,
    pub width: f64,
}

impl Stroke {
    pub fn new(layer: Layer, width: f64) -> Self {
        Self { layer, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Layer::FrontSilk, DEFAULT_STROKE_WIDTH)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: DVec2,
    pub end: DVec2,
    pub stroke: Stroke,
}

/// Circular arc from `start` to `end` around `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub start: DVec2,
    pub center: DVec2,
    pub end: DVec2,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub stroke: Stroke,
}

/// Filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<DVec2>,
    pub stroke: Stroke,
}

/// Axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub start: DVec2,
    pub end: DVec2,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Reference,
    Value,
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub kind: TextKind,
    pub text: String,
    pub at: DVec2,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub size: DVec2,
    pub thickness: f64,
    pub layer: Layer,
    pub mirror: bool,
    pub hidden: bool,
}

/// Reference to a 3D model file.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub path: String,
    /// Offset in inches.
    pub at: DVec3,
    pub scale: DVec3,
    /// Degrees around each axis.
    pub rotate: DVec3,
}

impl Model {
    /// Path relative to the library directory, while the path still carries
    /// the library placeholder.
    pub fn library_relative_path(&self) -> Option<&str> {
        self.path
            .strip_prefix(LIBRARY_PLACEHOLDER)
            .map(|rest| rest.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Pad(Pad),
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    Polygon(Polygon),
    RectOutline(Rect),
    FilledRect(Rect),
    Text(Text),
    Model(Model),
}

macro_rules! impl_from_element {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$ty(value)
                }
            }
        )*
    };
}

impl_from_element!(Pad, Line, Arc, Circle, Polygon, Text, Model);

/// A complete footprint: name, description and ordered elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    name: String,
    description: String,
    elements: Vec<Element>,
}

impl Footprint {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub(crate) fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.elements.iter().filter_map(|e| match e {
            Element::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.elements.iter().filter_map(|e| match e {
            Element::Model(model) => Some(model),
            _ => None,
        })
    }

    /// Model files referenced through the library placeholder, relative to
    /// the library directory (e.g. `3dshapes/CPG151101S11.step`).
    pub fn model_files(&self) -> Vec<PathBuf> {
        self.models()
            .filter_map(Model::library_relative_path)
            .map(PathBuf::from)
            .collect()
    }

    /// Replace the library placeholder in model paths with a path relative to
    /// the KiCad project, `${KIPRJMOD}/<library>.pretty`. Returns the number of
    /// paths rewritten.
    pub fn resolve_model_paths(&mut self, library: &str) -> usize {
        let resolved = format!("{PROJECT_DIR_VAR}/{library}.pretty");
        let mut count = 0;
        for element in &mut self.elements {
            if let Element::Model(model) = element {
                if model.path.contains(LIBRARY_PLACEHOLDER) {
                    model.path = model.path.replace(LIBRARY_PLACEHOLDER, &resolved);
                    count += 1;
                }
            }
        }
        log::trace!("Resolved {count} model path(s) in {}", self.name);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(path: &str) -> Model {
        Model {
            path: path.to_string(),
            at: DVec3::ZERO,
            scale: DVec3::ONE,
            rotate: DVec3::ZERO,
        }
    }

    #[test]
    fn model_paths_resolve_to_project_library() {
        let mut fp = Footprint::new("X", "");
        fp.push(model("{LIBRARY}/3dshapes/CPG151101S11.step"));
        fp.push(model("/abs/other.step"));

        assert_eq!(
            fp.model_files(),
            vec![PathBuf::from("3dshapes/CPG151101S11.step")]
        );
        assert_eq!(fp.resolve_model_paths("MX_Hotswap"), 1);

        let paths: Vec<&str> = fp.models().map(|m| m.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "${KIPRJMOD}/MX_Hotswap.pretty/3dshapes/CPG151101S11.step",
                "/abs/other.step"
            ]
        );
        assert!(fp.model_files().is_empty());
    }

    #[test]
    fn elements_keep_insertion_order() {
        let mut fp = Footprint::new("X", "desc");
        fp.push(Circle {
            center: DVec2::ZERO,
            radius: 1.0,
            stroke: Stroke::default(),
        });
        fp.push(Line {
            start: DVec2::ZERO,
            end: DVec2::X,
            stroke: Stroke::default(),
        });
        assert!(matches!(fp.elements()[0], Element::Circle(_)));
        assert!(matches!(fp.elements()[1], Element::Line(_)));
        assert_eq!(fp.description(), "desc");
    }
}
