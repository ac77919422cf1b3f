//! `.kicad_mod` serialization.

use glam::{DVec2, DVec3};
use kbd_footprint::footprint::{
    Arc, Circle, Element, Footprint, Line, Model, Pad, PadKind, PadShape, Polygon, Rect, Stroke,
    Text, TextKind,
};
use kbd_footprint::layer::Layer;
use kbd_sexpr::formatter::format_tree;
use kbd_sexpr::{ListBuilder, Sexpr, kv, xy};

/// KiCad 7 footprint file format version.
pub const FORMAT_VERSION: i64 = 20221018;

pub const GENERATOR: &str = "kbd";

/// Render a footprint as the text of a `.kicad_mod` file.
pub fn format_footprint(fp: &Footprint) -> String {
    format_tree(&footprint_to_sexpr(fp))
}

pub fn footprint_to_sexpr(fp: &Footprint) -> Sexpr {
    let mut b = ListBuilder::node("footprint");
    b.push(Sexpr::string(fp.name()))
        .push(kv("version", FORMAT_VERSION))
        .push(kv("generator", GENERATOR))
        .push(layer(Layer::FrontCopper));

    if !fp.description().is_empty() {
        b.push(kv("descr", Sexpr::string(fp.description())));
    }
    if let Some(attr) = footprint_attr(fp) {
        b.push(kv("attr", attr));
    }

    b.extend(fp.elements().iter().map(element_to_sexpr));
    b.build()
}

/// `through_hole` if any plated through-hole pad exists, `smd` if only
/// surface-mount pads do.
fn footprint_attr(fp: &Footprint) -> Option<&'static str> {
    if fp.pads().any(|p| p.kind == PadKind::ThroughHole) {
        Some("through_hole")
    } else if fp.pads().any(|p| p.kind == PadKind::Smd) {
        Some("smd")
    } else {
        None
    }
}

fn element_to_sexpr(element: &Element) -> Sexpr {
    match element {
        Element::Pad(pad) => pad_to_sexpr(pad),
        Element::Line(line) => line_to_sexpr(line),
        Element::Arc(arc) => arc_to_sexpr(arc),
        Element::Circle(circle) => circle_to_sexpr(circle),
        Element::Polygon(poly) => polygon_to_sexpr(poly),
        Element::RectOutline(rect) => rect_to_sexpr(rect, false),
        Element::FilledRect(rect) => rect_to_sexpr(rect, true),
        Element::Text(text) => text_to_sexpr(text),
        Element::Model(model) => model_to_sexpr(model),
    }
}

fn layer(layer: Layer) -> Sexpr {
    kv("layer", Sexpr::string(layer.as_str()))
}

fn point(tag: &str, p: DVec2) -> Sexpr {
    xy(tag, p.x, p.y)
}

fn xyz(tag: &str, v: DVec3) -> Sexpr {
    kv(
        tag,
        Sexpr::list(vec![
            Sexpr::symbol("xyz"),
            Sexpr::float(v.x),
            Sexpr::float(v.y),
            Sexpr::float(v.z),
        ]),
    )
}

fn stroke(s: &Stroke) -> Sexpr {
    Sexpr::list(vec![
        Sexpr::symbol("stroke"),
        kv("width", s.width),
        kv("type", "solid"),
    ])
}

fn fill(filled: bool) -> Sexpr {
    kv("fill", if filled { "solid" } else { "none" })
}

fn line_to_sexpr(line: &Line) -> Sexpr {
    let mut b = ListBuilder::node("fp_line");
    b.push(point("start", line.start))
        .push(point("end", line.end))
        .push(stroke(&line.stroke))
        .push(layer(line.stroke.layer));
    b.build()
}

/// The point halfway along the minor arc from `start` to `end` around
/// `center`. Arcs are stored as three points on the curve in KiCad 7.
pub fn arc_mid(start: DVec2, center: DVec2, end: DVec2) -> DVec2 {
    use std::f64::consts::{PI, TAU};

    let from = start - center;
    let to = end - center;
    let a0 = from.y.atan2(from.x);
    let a1 = to.y.atan2(to.x);

    let mut sweep = a1 - a0;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep <= -PI {
        sweep += TAU;
    }

    let mid = a0 + sweep / 2.0;
    center + from.length() * DVec2::new(mid.cos(), mid.sin())
}

fn arc_to_sexpr(arc: &Arc) -> Sexpr {
    let mut b = ListBuilder::node("fp_arc");
    b.push(point("start", arc.start))
        .push(point("mid", arc_mid(arc.start, arc.center, arc.end)))
        .push(point("end", arc.end))
        .push(stroke(&arc.stroke))
        .push(layer(arc.stroke.layer));
    b.build()
}

fn circle_to_sexpr(circle: &Circle) -> Sexpr {
    let edge = circle.center + DVec2::new(circle.radius, 0.0);
    let mut b = ListBuilder::node("fp_circle");
    b.push(point("center", circle.center))
        .push(point("end", edge))
        .push(stroke(&circle.stroke))
        .push(fill(false))
        .push(layer(circle.stroke.layer));
    b.build()
}

fn rect_to_sexpr(rect: &Rect, filled: bool) -> Sexpr {
    let mut b = ListBuilder::node("fp_rect");
    b.push(point("start", rect.start))
        .push(point("end", rect.end))
        .push(stroke(&rect.stroke))
        .push(fill(filled))
        .push(layer(rect.stroke.layer));
    b.build()
}

fn polygon_to_sexpr(poly: &Polygon) -> Sexpr {
    let mut pts = ListBuilder::node("pts");
    pts.extend(poly.points.iter().map(|p| point("xy", *p)));

    let mut b = ListBuilder::node("fp_poly");
    b.push(pts.build())
        .push(stroke(&poly.stroke))
        .push(fill(true))
        .push(layer(poly.stroke.layer));
    b.build()
}

fn text_to_sexpr(text: &Text) -> Sexpr {
    let kind = match text.kind {
        TextKind::Reference => "reference",
        TextKind::Value => "value",
        TextKind::User => "user",
    };

    let mut at = ListBuilder::node("at");
    at.push(text.at.x)
        .push(text.at.y)
        .push_if(text.rotation != 0.0, text.rotation);

    let mut font = ListBuilder::node("font");
    font.push(point("size", text.size))
        .push(kv("thickness", text.thickness));

    let mut effects = ListBuilder::node("effects");
    effects
        .push(font.build())
        .push_if(text.mirror, kv("justify", "mirror"));

    let mut b = ListBuilder::node("fp_text");
    b.push(kind)
        .push(Sexpr::string(text.text.as_str()))
        .push(at.build())
        .push(layer(text.layer))
        .push_if(text.hidden, "hide")
        .push(effects.build());
    b.build()
}

fn pad_to_sexpr(pad: &Pad) -> Sexpr {
    let kind = match pad.kind {
        PadKind::ThroughHole => "thru_hole",
        PadKind::Smd => "smd",
        PadKind::NpThroughHole => "np_thru_hole",
    };
    let shape = match pad.shape {
        PadShape::Circle => "circle",
        PadShape::Rect => "rect",
    };

    let mut layers = ListBuilder::node("layers");
    layers.extend(pad.layers.iter().map(|l| Sexpr::string(l.as_str())));

    let mut b = ListBuilder::node("pad");
    b.push(Sexpr::string(pad.number.as_str()))
        .push(kind)
        .push(shape)
        .push(point("at", pad.at))
        .push(point("size", pad.size));
    if let Some(drill) = pad.drill {
        b.push(kv("drill", drill));
    }
    b.push(layers.build());
    b.build()
}

fn model_to_sexpr(model: &Model) -> Sexpr {
    let mut b = ListBuilder::node("model");
    b.push(Sexpr::string(model.path.as_str()))
        .push(xyz("at", model.at))
        .push(xyz("scale", model.scale))
        .push(xyz("rotate", model.rotate));
    b.build()
}
