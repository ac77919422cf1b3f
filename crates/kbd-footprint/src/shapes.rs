//! Primitive shape composers.
//!
//! Each function takes local coordinates and a [`Transform`], resolves the
//! geometry to footprint coordinates and appends the result to a
//! [`Footprint`].

use glam::DVec2;

use crate::error::{FootprintError, Result};
use crate::footprint::{
    Arc, Circle, Element, Footprint, Line, Pad, PadKind, PadShape, Polygon, Rect, Stroke, Text,
    TextKind,
};
use crate::geometry::Transform;
use crate::layer::{Layer, NPTH_LAYERS};

/// A node in a curve: a corner point, or the center of an arc whose start is
/// the preceding point and whose end is the following point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveNode {
    Point(DVec2),
    ArcCenter(DVec2),
}

impl CurveNode {
    pub const fn point(x: f64, y: f64) -> Self {
        Self::Point(DVec2::new(x, y))
    }

    pub const fn arc_center(x: f64, y: f64) -> Self {
        Self::ArcCenter(DVec2::new(x, y))
    }
}

/// Text appearance. Rotation is in degrees and is added to the transform's
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub rotation: f64,
    pub size: DVec2,
    pub thickness: f64,
    pub mirror: bool,
    pub hidden: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            size: DVec2::ONE,
            thickness: 0.15,
            mirror: false,
            hidden: false,
        }
    }
}

/// Add a non-plated hole whose drill equals its diameter.
pub fn add_npth(fp: &mut Footprint, center: DVec2, diameter: f64, transform: &Transform) {
    fp.push(Pad {
        number: String::new(),
        kind: PadKind::NpThroughHole,
        shape: PadShape::Circle,
        at: transform.apply(center),
        size: DVec2::splat(diameter),
        drill: Some(diameter),
        layers: NPTH_LAYERS.to_vec(),
    });
}

/// Add a plated through-hole pad.
#[allow(clippy::too_many_arguments)]
pub fn add_tht_pad(
    fp: &mut Footprint,
    number: impl ToString,
    center: DVec2,
    size: DVec2,
    drill: f64,
    shape: PadShape,
    layers: &[Layer],
    transform: &Transform,
) {
    fp.push(Pad {
        number: number.to_string(),
        kind: PadKind::ThroughHole,
        shape,
        at: transform.apply(center),
        size,
        drill: Some(drill),
        layers: layers.to_vec(),
    });
}

/// Add a surface-mount pad. The pad size follows the transform's rotation.
pub fn add_smt_pad(
    fp: &mut Footprint,
    number: impl ToString,
    center: DVec2,
    size: DVec2,
    shape: PadShape,
    layers: &[Layer],
    transform: &Transform,
) {
    fp.push(Pad {
        number: number.to_string(),
        kind: PadKind::Smd,
        shape,
        at: transform.apply(center),
        size: transform.rotation.rotate_size(size),
        drill: None,
        layers: layers.to_vec(),
    });
}

/// Add a rectangle. Both corners are transformed independently.
pub fn add_rect(
    fp: &mut Footprint,
    center: DVec2,
    size: DVec2,
    stroke: Stroke,
    fill: bool,
    transform: &Transform,
) {
    let rect = Rect {
        start: transform.apply(center - size / 2.0),
        end: transform.apply(center + size / 2.0),
        stroke,
    };
    if fill {
        fp.push(Element::FilledRect(rect));
    } else {
        fp.push(Element::RectOutline(rect));
    }
}

pub fn add_square(
    fp: &mut Footprint,
    center: DVec2,
    size: f64,
    stroke: Stroke,
    fill: bool,
    transform: &Transform,
) {
    add_rect(fp, center, DVec2::splat(size), stroke, fill, transform);
}

/// Add a circle. Only the center is transformed.
pub fn add_circle(
    fp: &mut Footprint,
    center: DVec2,
    radius: f64,
    stroke: Stroke,
    transform: &Transform,
) {
    fp.push(Circle {
        center: transform.apply(center),
        radius,
        stroke,
    });
}

fn line(start: DVec2, end: DVec2, stroke: Stroke, transform: &Transform) -> Line {
    Line {
        start: transform.apply(start),
        end: transform.apply(end),
        stroke,
    }
}

fn arc(start: DVec2, center: DVec2, end: DVec2, stroke: Stroke, transform: &Transform) -> Arc {
    Arc {
        start: transform.apply(start),
        center: transform.apply(center),
        end: transform.apply(end),
        stroke,
    }
}

pub fn add_line(
    fp: &mut Footprint,
    start: DVec2,
    end: DVec2,
    stroke: Stroke,
    transform: &Transform,
) {
    fp.push(line(start, end, stroke, transform));
}

pub fn add_arc(
    fp: &mut Footprint,
    start: DVec2,
    center: DVec2,
    end: DVec2,
    stroke: Stroke,
    transform: &Transform,
) {
    fp.push(arc(start, center, end, stroke, transform));
}

/// Add a chain of lines and arcs.
///
/// Consecutive points are joined by lines. A point, an [`CurveNode::ArcCenter`]
/// and a point form an arc. Nothing is appended if the sequence is malformed.
pub fn add_curve(
    fp: &mut Footprint,
    nodes: &[CurveNode],
    stroke: Stroke,
    transform: &Transform,
) -> Result<()> {
    let elements = curve_elements(nodes, stroke, transform)?;
    fp.extend(elements);
    Ok(())
}

fn curve_elements(
    nodes: &[CurveNode],
    stroke: Stroke,
    transform: &Transform,
) -> Result<Vec<Element>> {
    let points = nodes
        .iter()
        .filter(|n| matches!(n, CurveNode::Point(_)))
        .count();
    if points < 2 {
        return Err(FootprintError::TooFewPoints { count: points });
    }

    let mut elements = Vec::with_capacity(nodes.len());
    let mut arc_start = None;
    for (index, pair) in nodes.windows(2).enumerate() {
        match (pair[0], pair[1]) {
            (CurveNode::ArcCenter(_), CurveNode::ArcCenter(_)) => {
                return Err(FootprintError::AdjacentArcCenters { index: index + 1 });
            }
            (CurveNode::Point(start), CurveNode::ArcCenter(_)) => arc_start = Some(start),
            (CurveNode::ArcCenter(center), CurveNode::Point(end)) => {
                let start = arc_start
                    .take()
                    .ok_or(FootprintError::ArcCenterWithoutStart { index })?;
                elements.push(arc(start, center, end, stroke, transform).into());
            }
            (CurveNode::Point(start), CurveNode::Point(end)) => {
                elements.push(line(start, end, stroke, transform).into());
            }
        }
    }

    if let Some(CurveNode::ArcCenter(_)) = nodes.last() {
        return Err(FootprintError::DanglingArcCenter {
            index: nodes.len() - 1,
        });
    }
    Ok(elements)
}

/// Add a polygon. Filled polygons are emitted as one element; outlines are
/// closed and drawn as a curve.
pub fn add_polygon(
    fp: &mut Footprint,
    points: &[DVec2],
    stroke: Stroke,
    fill: bool,
    transform: &Transform,
) -> Result<()> {
    if points.len() < 3 {
        return Err(FootprintError::TooFewPoints {
            count: points.len(),
        });
    }

    if fill {
        fp.push(Polygon {
            points: points.iter().map(|p| transform.apply(*p)).collect(),
            stroke,
        });
        return Ok(());
    }

    let nodes: Vec<CurveNode> = points
        .iter()
        .chain(points.first())
        .map(|p| CurveNode::Point(*p))
        .collect();
    add_curve(fp, &nodes, stroke, transform)
}

pub fn add_text(
    fp: &mut Footprint,
    kind: TextKind,
    text: impl Into<String>,
    center: DVec2,
    layer: Layer,
    style: TextStyle,
    transform: &Transform,
) {
    fp.push(Text {
        kind,
        text: text.into(),
        at: transform.apply(center),
        rotation: style.rotation + f64::from(transform.rotation.degrees()),
        size: style.size,
        thickness: style.thickness,
        layer,
        mirror: style.mirror,
        hidden: style.hidden,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rotation;
    use crate::layer::SMT_LAYERS;

    fn stroke() -> Stroke {
        Stroke::new(Layer::BackCourtyard, 0.127)
    }

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn two_points_make_one_line() {
        let mut fp = Footprint::new("X", "");
        let nodes = [CurveNode::point(0.0, 0.0), CurveNode::point(1.0, 2.0)];
        add_curve(&mut fp, &nodes, stroke(), &Transform::IDENTITY).unwrap();

        assert_eq!(
            fp.elements(),
            &[Element::Line(Line {
                start: p(0.0, 0.0),
                end: p(1.0, 2.0),
                stroke: stroke(),
            })]
        );
    }

    #[test]
    fn point_center_point_makes_one_arc() {
        let mut fp = Footprint::new("X", "");
        let nodes = [
            CurveNode::point(-4.0, -7.0),
            CurveNode::arc_center(-4.0, -4.5),
            CurveNode::point(-6.5, -4.5),
        ];
        add_curve(&mut fp, &nodes, stroke(), &Transform::IDENTITY).unwrap();

        assert_eq!(
            fp.elements(),
            &[Element::Arc(Arc {
                start: p(-4.0, -7.0),
                center: p(-4.0, -4.5),
                end: p(-6.5, -4.5),
                stroke: stroke(),
            })]
        );
    }

    #[test]
    fn malformed_curves_append_nothing() {
        let mut fp = Footprint::new("X", "");
        let t = Transform::IDENTITY;

        let adjacent = [
            CurveNode::point(0.0, 0.0),
            CurveNode::arc_center(1.0, 0.0),
            CurveNode::arc_center(2.0, 0.0),
            CurveNode::point(3.0, 0.0),
        ];
        assert_eq!(
            add_curve(&mut fp, &adjacent, stroke(), &t),
            Err(FootprintError::AdjacentArcCenters { index: 2 })
        );

        let leading = [
            CurveNode::arc_center(1.0, 0.0),
            CurveNode::point(0.0, 0.0),
            CurveNode::point(3.0, 0.0),
        ];
        assert_eq!(
            add_curve(&mut fp, &leading, stroke(), &t),
            Err(FootprintError::ArcCenterWithoutStart { index: 0 })
        );

        let trailing = [
            CurveNode::point(0.0, 0.0),
            CurveNode::point(3.0, 0.0),
            CurveNode::arc_center(1.0, 0.0),
        ];
        assert_eq!(
            add_curve(&mut fp, &trailing, stroke(), &t),
            Err(FootprintError::DanglingArcCenter { index: 2 })
        );

        assert_eq!(
            add_curve(&mut fp, &[CurveNode::point(0.0, 0.0)], stroke(), &t),
            Err(FootprintError::TooFewPoints { count: 1 })
        );
        assert!(fp.elements().is_empty());
    }

    #[test]
    fn outline_polygon_is_closed() {
        let mut fp = Footprint::new("X", "");
        let square = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        add_polygon(&mut fp, &square, stroke(), false, &Transform::IDENTITY).unwrap();

        assert_eq!(fp.elements().len(), 4);
        let Element::Line(last) = &fp.elements()[3] else {
            panic!("expected a line");
        };
        assert_eq!(last.start, p(0.0, 1.0));
        assert_eq!(last.end, p(0.0, 0.0));
    }

    #[test]
    fn filled_polygon_is_one_element() {
        let mut fp = Footprint::new("X", "");
        let tri = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
        let t = Transform::from_scale(DVec2::splat(2.0));
        add_polygon(&mut fp, &tri, stroke(), true, &t).unwrap();

        assert_eq!(
            fp.elements(),
            &[Element::Polygon(Polygon {
                points: vec![p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0)],
                stroke: stroke(),
            })]
        );
    }

    #[test]
    fn smt_pad_size_follows_rotation() {
        let mut fp = Footprint::new("X", "");
        let t = Transform::from_rotation(Rotation::Deg90);
        add_smt_pad(
            &mut fp,
            1,
            p(-7.085, -2.54),
            p(2.55, 2.5),
            PadShape::Rect,
            SMT_LAYERS,
            &t,
        );

        let pad = fp.pads().next().unwrap();
        assert_eq!(pad.number, "1");
        assert_eq!(pad.at, p(2.54, -7.085));
        assert_eq!(pad.size, p(2.5, 2.55));
        assert_eq!(pad.drill, None);
    }

    #[test]
    fn npth_drill_matches_diameter() {
        let mut fp = Footprint::new("X", "");
        add_npth(&mut fp, p(5.08, 0.0), 1.7, &Transform::IDENTITY);

        let pad = fp.pads().next().unwrap();
        assert_eq!(pad.kind, PadKind::NpThroughHole);
        assert_eq!(pad.size, DVec2::splat(1.7));
        assert_eq!(pad.drill, Some(1.7));
        assert!(pad.number.is_empty());
    }

    #[test]
    fn rect_corners_are_transformed_separately() {
        let mut fp = Footprint::new("X", "");
        let t = Transform::new(p(1.0, 0.0), Rotation::Deg90, DVec2::ONE);
        add_rect(&mut fp, DVec2::ZERO, p(4.0, 2.0), stroke(), false, &t);

        let Element::RectOutline(rect) = &fp.elements()[0] else {
            panic!("expected a rect outline");
        };
        // (-2, -1) -> (1, -2) -> (2, -2); (2, 1) -> (-1, 2) -> (0, 2)
        assert_eq!(rect.start, p(2.0, -2.0));
        assert_eq!(rect.end, p(0.0, 2.0));
    }

    #[test]
    fn text_rotation_adds_transform_rotation() {
        let mut fp = Footprint::new("X", "");
        let t = Transform::from_rotation(Rotation::Deg270);
        let style = TextStyle {
            rotation: 15.0,
            ..TextStyle::default()
        };
        add_text(&mut fp, TextKind::User, "1U", p(0.0, 8.0), Layer::UserDrawings, style, &t);

        let text = fp.texts().next().unwrap();
        assert_eq!(text.rotation, 285.0);
        assert_eq!(text.at, p(8.0, 0.0));
        assert_eq!(text.size, DVec2::ONE);
    }
}
