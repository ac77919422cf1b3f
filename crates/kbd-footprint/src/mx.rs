//! Cherry MX footprint assembly.
//!
//! A footprint is built in a fixed order: reference, value, switch body,
//! stabilizer, LED, keycap outline, 3D model. Switch-related shapes go through
//! the placement transform; stabilizer and keycap shapes stay centered on the
//! key.

use glam::{DVec2, DVec3};
use log::debug;

use crate::error::{FootprintError, Result};
use crate::footprint::{Footprint, LIBRARY_PLACEHOLDER, Model, PadShape, Stroke, TextKind};
use crate::geometry::{MM_PER_INCH, Rotation, Transform, UNIT_SIZE, round_to};
use crate::layer::{Layer, THT_LAYERS};
use crate::naming::{KeySize, VariantKey, VariantName, format_number};
use crate::options::{LedOption, MountStyle, StabilizerOption, SwitchVariant};
use crate::shapes::{
    CurveNode, TextStyle, add_circle, add_curve, add_npth, add_polygon, add_rect, add_smt_pad,
    add_square, add_text, add_tht_pad,
};

const HOTSWAP_MODEL_FILE: &str = "CPG151101S11.step";

/// Options for a regular rectangular key.
#[derive(Debug, Clone, PartialEq)]
pub struct MxOptions {
    /// Keycap width in units.
    pub units: f64,
    pub switch: SwitchVariant,
    pub mount: MountStyle,
    pub led: LedOption,
    pub stabilizer: StabilizerOption,
    /// Keycap rotated 90 degrees.
    pub vertical: bool,
    /// Outline the switch on the front silkscreen.
    pub front_silk: bool,
    /// Show the value label.
    pub show_value: bool,
    /// Put the value label on the back silkscreen, mirrored.
    pub value_on_back: bool,
    /// Switch position relative to the keycap center, in units.
    pub switch_offset: DVec2,
    /// Switch rotation in degrees clockwise. Must be a multiple of 90.
    pub switch_angle: i32,
}

impl Default for MxOptions {
    fn default() -> Self {
        Self {
            units: 1.0,
            switch: SwitchVariant::default(),
            mount: MountStyle::default(),
            led: LedOption::default(),
            stabilizer: StabilizerOption::default(),
            vertical: false,
            front_silk: true,
            show_value: true,
            value_on_back: true,
            switch_offset: DVec2::ZERO,
            switch_angle: 0,
        }
    }
}

impl MxOptions {
    pub fn variant_key(&self) -> VariantKey {
        VariantKey {
            size: KeySize::Units(self.units),
            switch: self.switch,
            mount: self.mount,
            led: self.led,
            stabilizer: self.stabilizer,
            vertical: self.vertical,
            switch_offset: self.switch_offset,
            switch_angle: self.switch_angle,
        }
    }
}

/// Options for an ISO Enter key.
#[derive(Debug, Clone, PartialEq)]
pub struct MxIsoOptions {
    pub switch: SwitchVariant,
    pub mount: MountStyle,
    pub led: LedOption,
    pub stabilizer: StabilizerOption,
    pub front_silk: bool,
    pub show_value: bool,
    pub value_on_back: bool,
    pub switch_angle: i32,
}

impl Default for MxIsoOptions {
    fn default() -> Self {
        Self {
            switch: SwitchVariant::default(),
            mount: MountStyle::default(),
            led: LedOption::default(),
            stabilizer: StabilizerOption::default(),
            front_silk: true,
            show_value: true,
            value_on_back: true,
            switch_angle: 0,
        }
    }
}

impl MxIsoOptions {
    pub fn variant_key(&self) -> VariantKey {
        VariantKey {
            size: KeySize::IsoEnter,
            switch: self.switch,
            mount: self.mount,
            led: self.led,
            stabilizer: self.stabilizer,
            vertical: false,
            switch_offset: DVec2::ZERO,
            switch_angle: self.switch_angle,
        }
    }
}

/// Build the footprint for a rectangular key.
pub fn make_mx_switch(opts: &MxOptions) -> Result<Footprint> {
    if !opts.units.is_finite() || opts.units <= 0.0 {
        return Err(FootprintError::InvalidUnits(opts.units));
    }
    let rotation = Rotation::from_degrees(opts.switch_angle)?;

    let VariantName { name, description } = opts.variant_key().name();
    debug!("Building {name}");
    let mut fp = Footprint::new(name, description);

    let transform = Transform::new(opts.switch_offset * UNIT_SIZE, rotation, DVec2::ONE);

    add_mx_reference(&mut fp, opts.switch, &transform);
    add_mx_value(&mut fp, opts.show_value, opts.value_on_back, &transform);
    add_mx_switch(&mut fp, opts.switch, opts.mount, opts.front_silk, &transform)?;
    add_mx_stabilizer(&mut fp, opts.units, opts.vertical, opts.stabilizer);
    add_mx_led(&mut fp, opts.switch, opts.led, &transform);
    add_mx_keycap_outline(&mut fp, opts.units, opts.vertical);
    add_mx_3d_model(&mut fp, opts.switch, &transform);

    debug!("{} has {} elements", fp.name(), fp.elements().len());
    Ok(fp)
}

/// Build the footprint for an ISO Enter key.
pub fn make_mx_iso_enter(opts: &MxIsoOptions) -> Result<Footprint> {
    let rotation = Rotation::from_degrees(opts.switch_angle)?;

    let VariantName { name, description } = opts.variant_key().name();
    debug!("Building {name}");
    let mut fp = Footprint::new(name, description);

    let transform = Transform::from_rotation(rotation);

    add_mx_reference(&mut fp, opts.switch, &transform);
    add_mx_value(&mut fp, opts.show_value, opts.value_on_back, &transform);
    add_mx_switch(&mut fp, opts.switch, opts.mount, opts.front_silk, &transform)?;
    add_mx_stabilizer(&mut fp, 2.25, true, opts.stabilizer);
    add_mx_led(&mut fp, opts.switch, opts.led, &transform);
    add_mx_iso_enter_keycap_outline(&mut fp)?;
    add_mx_3d_model(&mut fp, opts.switch, &transform);

    debug!("{} has {} elements", fp.name(), fp.elements().len());
    Ok(fp)
}

/// Spacing in millimeters between the two sides of a Cherry stabilizer, or 0
/// when the key size takes no stabilizer.
pub fn mx_stabilizer_width(units: f64) -> f64 {
    if units < 2.0 {
        return 0.0;
    }
    // 2u up to 2.75u share the 2.25u spacing.
    let units = if units < 3.0 { 2.25 } else { units };

    // Stabilizer posts sit half a unit in from each end.
    round_to((units - 1.0) * UNIT_SIZE, 0.05)
}

pub fn add_mx_reference(fp: &mut Footprint, switch: SwitchVariant, transform: &Transform) {
    let (center, layer, mirror) = if switch.is_hotswap() {
        (DVec2::new(0.0, -3.81), Layer::BackFab, true)
    } else {
        (DVec2::new(0.0, 3.0), Layer::UserDrawings, false)
    };

    add_text(
        fp,
        TextKind::Reference,
        "REF**",
        center,
        layer,
        TextStyle {
            mirror,
            ..TextStyle::default()
        },
        &transform.with_rotation(Rotation::Deg0),
    );
}

pub fn add_mx_value(fp: &mut Footprint, show_value: bool, on_back: bool, transform: &Transform) {
    let layer = if on_back {
        Layer::BackSilk
    } else {
        Layer::FrontSilk
    };

    add_text(
        fp,
        TextKind::Value,
        "Val**",
        DVec2::new(0.0, -8.0),
        layer,
        TextStyle {
            size: DVec2::splat(1.27),
            mirror: on_back,
            hidden: !show_value,
            ..TextStyle::default()
        },
        &transform.with_rotation(Rotation::Deg0),
    );
}

/// Switch outlines, holes and pads.
pub fn add_mx_switch(
    fp: &mut Footprint,
    switch: SwitchVariant,
    mount: MountStyle,
    front_silk: bool,
    transform: &Transform,
) -> Result<()> {
    if switch == SwitchVariant::None {
        return Ok(());
    }

    // Hotswap sockets sit on the back, so only the solder switch gets a front
    // fab outline.
    if switch == SwitchVariant::Solder {
        let stroke = Stroke::new(Layer::FrontFab, 0.1);
        add_square(fp, DVec2::ZERO, 12.7, stroke, false, transform);
    }

    let stroke = Stroke::new(Layer::FrontCourtyard, 0.05);
    add_square(fp, DVec2::ZERO, 13.2, stroke, false, transform);

    if front_silk {
        let stroke = Stroke::new(Layer::FrontSilk, 0.12);
        add_square(fp, DVec2::ZERO, 13.87, stroke, false, transform);
    }

    add_npth(fp, DVec2::ZERO, 4.0, transform);

    if mount == MountStyle::Pcb {
        add_npth(fp, DVec2::new(5.08, 0.0), 1.7, transform);
        add_npth(fp, DVec2::new(-5.08, 0.0), 1.7, transform);
    }

    match switch {
        SwitchVariant::Solder => add_solder_pads(fp, transform),
        SwitchVariant::Hotswap => add_hotswap_socket(fp, transform)?,
        SwitchVariant::HotswapAntishear => add_hotswap_socket_antishear(fp, transform)?,
        SwitchVariant::None => {}
    }
    Ok(())
}

const SWITCH_PIN_1: DVec2 = DVec2::new(2.54, -5.08);
const SWITCH_PIN_2: DVec2 = DVec2::new(-3.81, -2.54);

// Socket anchor positions are the switch pins, in reverse pad order.
const SOCKET_MOUNT_1: DVec2 = SWITCH_PIN_2;
const SOCKET_MOUNT_2: DVec2 = SWITCH_PIN_1;

const SOCKET_PAD_1: DVec2 = DVec2::new(-7.085, -2.54);
const SOCKET_PAD_2: DVec2 = DVec2::new(5.842, -5.08);
const SOCKET_PAD_SIZE: DVec2 = DVec2::new(2.55, 2.5);
const SOCKET_PAD_LAYERS: &[Layer] = &[Layer::BackCopper, Layer::BackMask, Layer::BackPaste];

fn add_solder_pads(fp: &mut Footprint, transform: &Transform) {
    let size = DVec2::splat(2.2);
    let drill = 1.5;
    for (number, center) in [(1, SWITCH_PIN_1), (2, SWITCH_PIN_2)] {
        add_tht_pad(fp, number, center, size, drill, PadShape::Circle, THT_LAYERS, transform);
    }
}

fn add_hotswap_socket(fp: &mut Footprint, transform: &Transform) -> Result<()> {
    for (number, center) in [(1, SOCKET_PAD_1), (2, SOCKET_PAD_2)] {
        add_smt_pad(
            fp,
            number,
            center,
            SOCKET_PAD_SIZE,
            PadShape::Rect,
            SOCKET_PAD_LAYERS,
            transform,
        );
    }

    add_npth(fp, SOCKET_MOUNT_1, 3.0, transform);
    add_npth(fp, SOCKET_MOUNT_2, 3.0, transform);

    add_hotswap_courtyard(fp, transform)?;
    add_hotswap_fab(fp, transform)
}

fn add_hotswap_socket_antishear(fp: &mut Footprint, transform: &Transform) -> Result<()> {
    const COPPER_SIZE: DVec2 = DVec2::new(4.5, 2.5);
    const PASTE_2: DVec2 = DVec2::new(5.815, -5.08);
    const MOUNT_SIZE: f64 = 4.0;
    const MOUNT_DRILL: f64 = 3.0;
    const VIA_SIZE: f64 = 0.8;
    const VIA_DRILL: f64 = 0.4;
    const VIAS: [(u32, DVec2); 4] = [
        (1, DVec2::new(-8.89, -3.302)),
        (1, DVec2::new(-8.89, -1.778)),
        (2, DVec2::new(7.62, -5.842)),
        (2, DVec2::new(7.62, -4.318)),
    ];

    let copper = [Layer::BackCopper];
    let paste = [Layer::BackMask, Layer::BackPaste];

    for (number, center) in [(1, SOCKET_PAD_1), (2, SOCKET_PAD_2)] {
        add_smt_pad(fp, number, center, COPPER_SIZE, PadShape::Rect, &copper, transform);
    }
    for (number, center) in [(1, SOCKET_PAD_1), (2, PASTE_2)] {
        add_smt_pad(fp, number, center, SOCKET_PAD_SIZE, PadShape::Rect, &paste, transform);
    }

    for (number, center) in [(1, SOCKET_MOUNT_1), (2, SOCKET_MOUNT_2)] {
        add_tht_pad(
            fp,
            number,
            center,
            DVec2::splat(MOUNT_SIZE),
            MOUNT_DRILL,
            PadShape::Circle,
            THT_LAYERS,
            transform,
        );
    }

    for (number, center) in VIAS {
        add_tht_pad(
            fp,
            number,
            center,
            DVec2::splat(VIA_SIZE),
            VIA_DRILL,
            PadShape::Circle,
            &[Layer::AllCopper],
            transform,
        );
    }

    add_hotswap_courtyard(fp, transform)?;
    add_hotswap_fab(fp, transform)
}

const HOTSWAP_COURTYARD: [CurveNode; 10] = [
    CurveNode::point(-0.4, -2.6),
    CurveNode::point(5.3, -2.6),
    CurveNode::point(5.3, -7.0),
    CurveNode::point(-4.0, -7.0),
    CurveNode::arc_center(-4.0, -4.5),
    CurveNode::point(-6.5, -4.5),
    CurveNode::point(-6.5, -0.6),
    CurveNode::point(-2.4, -0.6),
    CurveNode::arc_center(-0.4, -0.6),
    CurveNode::point(-0.4, -2.6),
];

const HOTSWAP_FAB: [CurveNode; 10] = [
    CurveNode::point(-0.5, -2.7),
    CurveNode::point(5.2, -2.7),
    CurveNode::point(5.2, -6.9),
    CurveNode::point(-4.0, -6.9),
    CurveNode::arc_center(-4.0, -4.5),
    CurveNode::point(-6.4, -4.5),
    CurveNode::point(-6.4, -0.7),
    CurveNode::point(-2.5, -0.7),
    CurveNode::arc_center(-0.4, -0.6),
    CurveNode::point(-0.5, -2.7),
];

fn add_hotswap_courtyard(fp: &mut Footprint, transform: &Transform) -> Result<()> {
    let stroke = Stroke::new(Layer::BackCourtyard, 0.127);
    add_curve(fp, &HOTSWAP_COURTYARD, stroke, transform)
}

fn add_hotswap_fab(fp: &mut Footprint, transform: &Transform) -> Result<()> {
    let stroke = Stroke::new(Layer::BackFab, 0.1);
    add_curve(fp, &HOTSWAP_FAB, stroke, transform)?;
    add_circle(fp, SOCKET_MOUNT_1, 1.5, stroke, transform);
    add_circle(fp, SOCKET_MOUNT_2, 1.5, stroke, transform);
    Ok(())
}

/// Stabilizer holes, centered on the keycap.
pub fn add_mx_stabilizer(
    fp: &mut Footprint,
    units: f64,
    vertical: bool,
    stabilizer: StabilizerOption,
) {
    const TOP_SIZE: f64 = 3.05;
    const BOTTOM_SIZE: f64 = 4.0;
    const TOP_Y: f64 = -7.0;
    const BOTTOM_Y: f64 = TOP_Y + 15.24;

    if stabilizer == StabilizerOption::None {
        return;
    }
    let width = mx_stabilizer_width(units);
    if width == 0.0 {
        return;
    }

    let mut transform = if vertical {
        Transform::from_rotation(Rotation::Deg270)
    } else {
        Transform::IDENTITY
    };
    if stabilizer == StabilizerOption::Reverse {
        transform = transform.with_scale(DVec2::new(1.0, -1.0));
    }

    let half = width / 2.0;
    add_npth(fp, DVec2::new(-half, TOP_Y), TOP_SIZE, &transform);
    add_npth(fp, DVec2::new(half, TOP_Y), TOP_SIZE, &transform);
    add_npth(fp, DVec2::new(-half, BOTTOM_Y), BOTTOM_SIZE, &transform);
    add_npth(fp, DVec2::new(half, BOTTOM_Y), BOTTOM_SIZE, &transform);
}

/// Two LED pins below the switch. Pin numbers follow the switch pins.
pub fn add_mx_led(
    fp: &mut Footprint,
    switch: SwitchVariant,
    led: LedOption,
    transform: &Transform,
) {
    const PAD_X: f64 = 1.27;
    const PAD_Y: f64 = 5.08;
    const PAD_SIZE: DVec2 = DVec2::splat(1.905);
    const PAD_DRILL: f64 = 1.04;

    let transform = match led {
        LedOption::None => return,
        LedOption::Normal => *transform,
        LedOption::Reverse => transform.with_scale(DVec2::new(-1.0, 1.0)),
    };

    let switch_pins = if switch == SwitchVariant::None { 0 } else { 2 };
    let pins = [
        (1, PadShape::Circle, DVec2::new(-PAD_X, PAD_Y)),
        (2, PadShape::Rect, DVec2::new(PAD_X, PAD_Y)),
    ];
    for (number, shape, center) in pins {
        add_tht_pad(
            fp,
            switch_pins + number,
            center,
            PAD_SIZE,
            PAD_DRILL,
            shape,
            THT_LAYERS,
            &transform,
        );
    }
}

fn keycap_stroke() -> Stroke {
    Stroke::new(Layer::UserDrawings, 0.15)
}

const KEYCAP_LABEL_POS: DVec2 = DVec2::new(0.0, 8.0);

/// Keycap outline and size label on the user drawings layer.
pub fn add_mx_keycap_outline(fp: &mut Footprint, units: f64, vertical: bool) {
    let size = if vertical {
        DVec2::new(1.0, units)
    } else {
        DVec2::new(units, 1.0)
    };
    let unit_scale = Transform::from_scale(DVec2::splat(UNIT_SIZE));

    add_rect(fp, DVec2::ZERO, size, keycap_stroke(), false, &unit_scale);
    add_text(
        fp,
        TextKind::User,
        format!("{}U", format_number(units)),
        KEYCAP_LABEL_POS,
        Layer::UserDrawings,
        TextStyle::default(),
        &Transform::IDENTITY,
    );
}

/// ISO Enter corners in units, starting at the bottom right.
const ISO_ENTER_OUTLINE: [DVec2; 6] = [
    DVec2::new(0.625, 1.0),
    DVec2::new(0.625, -1.0),
    DVec2::new(-0.875, -1.0),
    DVec2::new(-0.875, 0.0),
    DVec2::new(-0.625, 0.0),
    DVec2::new(-0.625, 1.0),
];

pub fn add_mx_iso_enter_keycap_outline(fp: &mut Footprint) -> Result<()> {
    let unit_scale = Transform::from_scale(DVec2::splat(UNIT_SIZE));
    add_polygon(fp, &ISO_ENTER_OUTLINE, keycap_stroke(), false, &unit_scale)?;
    add_text(
        fp,
        TextKind::User,
        "ISO",
        KEYCAP_LABEL_POS,
        Layer::UserDrawings,
        TextStyle::default(),
        &Transform::IDENTITY,
    );
    Ok(())
}

/// 3D model of the hotswap socket. Other variants have no model.
pub fn add_mx_3d_model(fp: &mut Footprint, switch: SwitchVariant, transform: &Transform) {
    if !switch.is_hotswap() {
        return;
    }

    // The model offset field is in inches, unlike every other coordinate.
    let at = transform.translate.extend(0.0) / MM_PER_INCH;
    fp.push(Model {
        path: format!("{LIBRARY_PLACEHOLDER}/3dshapes/{HOTSWAP_MODEL_FILE}"),
        at,
        scale: DVec3::ONE,
        rotate: DVec3::new(0.0, 0.0, f64::from(transform.rotation.degrees())),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{Element, PadKind};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn stabilizer_width_rule() {
        assert_eq!(mx_stabilizer_width(1.0), 0.0);
        assert_eq!(mx_stabilizer_width(1.99), 0.0);
        assert!(approx(mx_stabilizer_width(2.0), 23.8));
        assert!(approx(mx_stabilizer_width(2.25), 23.8));
        assert_eq!(mx_stabilizer_width(2.5), mx_stabilizer_width(2.25));
        assert_eq!(mx_stabilizer_width(2.75), mx_stabilizer_width(2.25));
        assert!(approx(mx_stabilizer_width(3.0), 38.1));
        assert!(approx(mx_stabilizer_width(6.0), round_to(5.0 * UNIT_SIZE, 0.05)));
        assert!(approx(mx_stabilizer_width(6.25), 100.0));
    }

    #[test]
    fn invalid_inputs_fail_before_building() {
        let opts = MxOptions {
            switch_angle: 45,
            ..MxOptions::default()
        };
        assert_eq!(make_mx_switch(&opts), Err(FootprintError::InvalidAngle(45)));

        let opts = MxOptions {
            units: 0.0,
            ..MxOptions::default()
        };
        assert_eq!(make_mx_switch(&opts), Err(FootprintError::InvalidUnits(0.0)));

        let iso = MxIsoOptions {
            switch_angle: 100,
            ..MxIsoOptions::default()
        };
        assert_eq!(make_mx_iso_enter(&iso), Err(FootprintError::InvalidAngle(100)));
    }

    #[test]
    fn reference_and_value_stay_upright() {
        let opts = MxOptions {
            switch: SwitchVariant::Hotswap,
            switch_angle: 90,
            ..MxOptions::default()
        };
        let fp = make_mx_switch(&opts).unwrap();
        let texts: Vec<_> = fp.texts().collect();

        assert_eq!(texts[0].kind, TextKind::Reference);
        assert_eq!(texts[0].layer, Layer::BackFab);
        assert!(texts[0].mirror);
        assert_eq!(texts[0].rotation, 0.0);
        assert_eq!(texts[0].at, DVec2::new(0.0, -3.81));

        assert_eq!(texts[1].kind, TextKind::Value);
        assert_eq!(texts[1].layer, Layer::BackSilk);
        assert_eq!(texts[1].rotation, 0.0);
        assert_eq!(texts[1].size, DVec2::splat(1.27));
    }

    #[test]
    fn value_on_front_is_upright_and_can_hide() {
        let opts = MxOptions {
            value_on_back: false,
            show_value: false,
            ..MxOptions::default()
        };
        let fp = make_mx_switch(&opts).unwrap();
        let value = fp.texts().find(|t| t.kind == TextKind::Value).unwrap();
        assert_eq!(value.layer, Layer::FrontSilk);
        assert!(!value.mirror);
        assert!(value.hidden);
    }

    #[test]
    fn reversed_vertical_stabilizer_holes() {
        let mut fp = Footprint::new("X", "");
        add_mx_stabilizer(&mut fp, 2.0, true, StabilizerOption::Reverse);

        let holes: Vec<DVec2> = fp.pads().map(|p| p.at).collect();
        // (-11.9, -7) scaled (1, -1) = (-11.9, 7), rotated 270 = (7, 11.9)
        assert_eq!(holes.len(), 4);
        assert!(holes[0].abs_diff_eq(DVec2::new(7.0, 11.9), 1e-9));
        assert!(holes[2].abs_diff_eq(DVec2::new(-8.24, 11.9), 1e-9));
        assert!(fp.pads().all(|p| p.kind == PadKind::NpThroughHole));
    }

    #[test]
    fn reversed_led_mirrors_pins() {
        let mut fp = Footprint::new("X", "");
        add_mx_led(&mut fp, SwitchVariant::None, LedOption::Reverse, &Transform::IDENTITY);

        let pads: Vec<_> = fp.pads().collect();
        assert_eq!(pads[0].number, "1");
        assert_eq!(pads[0].shape, PadShape::Circle);
        assert_eq!(pads[0].at, DVec2::new(1.27, 5.08));
        assert_eq!(pads[1].number, "2");
        assert_eq!(pads[1].at, DVec2::new(-1.27, 5.08));
    }

    #[test]
    fn hotswap_model_is_placed_in_inches() {
        let opts = MxOptions {
            units: 6.0,
            switch: SwitchVariant::Hotswap,
            switch_offset: DVec2::new(0.5, 0.0),
            switch_angle: 180,
            ..MxOptions::default()
        };
        let fp = make_mx_switch(&opts).unwrap();
        let models: Vec<_> = fp.models().collect();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].path, "{LIBRARY}/3dshapes/CPG151101S11.step");
        assert!(approx(models[0].at.x, 0.375));
        assert_eq!(models[0].at.y, 0.0);
        assert_eq!(models[0].rotate, DVec3::new(0.0, 0.0, 180.0));
        assert!(matches!(fp.elements().last(), Some(Element::Model(_))));
    }
}
