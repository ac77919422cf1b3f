use std::collections::HashMap;

use glam::DVec2;
use kbd_footprint::footprint::{Element, PadKind};
use kbd_footprint::{
    FootprintError, LedOption, MountStyle, MxIsoOptions, MxOptions, Selection, StabilizerOption,
    SwitchVariant, make_mx_iso_enter, make_mx_switch, standard_variants,
};

fn count_pads(fp: &kbd_footprint::Footprint, kind: PadKind) -> usize {
    fp.pads().filter(|p| p.kind == kind).count()
}

#[test]
fn default_solder_switch() {
    let fp = make_mx_switch(&MxOptions::default()).unwrap();

    assert_eq!(fp.name(), "Cherry_MX_1.00u");
    assert_eq!(fp.description(), "Cherry MX keyswitch, 1.00u, PCB mount");
    assert_eq!(count_pads(&fp, PadKind::ThroughHole), 2);
    assert_eq!(count_pads(&fp, PadKind::NpThroughHole), 3);
    assert_eq!(count_pads(&fp, PadKind::Smd), 0);
    assert_eq!(fp.models().count(), 0);

    let outlines: Vec<_> = fp
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::RectOutline(r) => Some(r.stroke.layer.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(outlines, vec!["F.Fab", "F.CrtYd", "F.SilkS", "Dwgs.User"]);

    let texts: Vec<&str> = fp.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["REF**", "Val**", "1U"]);
}

#[test]
fn plate_mount_without_switch_has_only_keycap() {
    let fp = make_mx_switch(&MxOptions {
        switch: SwitchVariant::None,
        mount: MountStyle::Plate,
        ..MxOptions::default()
    })
    .unwrap();

    assert_eq!(fp.name(), "Cherry_MX_1.00u_NoSwitch_Plate");
    assert_eq!(fp.pads().count(), 0);
    assert_eq!(fp.texts().count(), 3);
}

#[test]
fn led_pins_follow_switch_pins() {
    let fp = make_mx_switch(&MxOptions {
        led: LedOption::Normal,
        ..MxOptions::default()
    })
    .unwrap();

    let numbers: Vec<&str> = fp
        .pads()
        .filter(|p| p.kind == PadKind::ThroughHole)
        .map(|p| p.number.as_str())
        .collect();
    assert_eq!(numbers, vec!["1", "2", "3", "4"]);
    assert_eq!(fp.name(), "Cherry_MX_1.00u_LED");
}

#[test]
fn hotswap_socket() {
    let fp = make_mx_switch(&MxOptions {
        switch: SwitchVariant::Hotswap,
        ..MxOptions::default()
    })
    .unwrap();

    assert_eq!(fp.name(), "Cherry_MX_1.00u_Hotswap");
    assert_eq!(count_pads(&fp, PadKind::Smd), 2);
    assert_eq!(count_pads(&fp, PadKind::ThroughHole), 0);
    // center, two PCB mount pegs, two socket anchors
    assert_eq!(count_pads(&fp, PadKind::NpThroughHole), 5);

    let arcs = fp
        .elements()
        .iter()
        .filter(|e| matches!(e, Element::Arc(_)))
        .count();
    assert_eq!(arcs, 4);
    assert_eq!(fp.models().count(), 1);
    assert!(
        !fp.elements()
            .iter()
            .any(|e| matches!(e, Element::RectOutline(r) if r.stroke.layer.as_str() == "F.Fab"))
    );
}

#[test]
fn antishear_socket() {
    let fp = make_mx_switch(&MxOptions {
        switch: SwitchVariant::HotswapAntishear,
        mount: MountStyle::Plate,
        ..MxOptions::default()
    })
    .unwrap();

    assert_eq!(count_pads(&fp, PadKind::Smd), 4);
    // two anchors and four vias
    assert_eq!(count_pads(&fp, PadKind::ThroughHole), 6);
    assert_eq!(count_pads(&fp, PadKind::NpThroughHole), 1);

    let copper = fp.pads().find(|p| p.kind == PadKind::Smd).unwrap();
    assert_eq!(copper.size, DVec2::new(4.5, 2.5));
}

#[test]
fn rotated_switch_swaps_socket_pad_size() {
    let fp = make_mx_switch(&MxOptions {
        switch: SwitchVariant::Hotswap,
        switch_angle: 90,
        ..MxOptions::default()
    })
    .unwrap();

    let pad = fp.pads().find(|p| p.kind == PadKind::Smd).unwrap();
    assert_eq!(pad.size, DVec2::new(2.5, 2.55));
    assert_eq!(pad.at, DVec2::new(2.54, -7.085));
}

#[test]
fn iso_enter() {
    let fp = make_mx_iso_enter(&MxIsoOptions::default()).unwrap();

    assert_eq!(fp.name(), "Cherry_MX_ISOEnter");
    // center hole, two pegs, four stabilizer holes
    assert_eq!(count_pads(&fp, PadKind::NpThroughHole), 7);

    let outline = fp
        .elements()
        .iter()
        .filter(|e| matches!(e, Element::Line(l) if l.stroke.layer.as_str() == "Dwgs.User"))
        .count();
    assert_eq!(outline, 6);
    assert!(fp.texts().any(|t| t.text == "ISO"));
}

#[test]
fn builds_are_deterministic() {
    let opts = MxOptions {
        units: 2.25,
        switch: SwitchVariant::Hotswap,
        led: LedOption::Reverse,
        stabilizer: StabilizerOption::Reverse,
        switch_angle: -90,
        ..MxOptions::default()
    };
    let a = make_mx_switch(&opts).unwrap();
    let b = make_mx_switch(&opts.clone()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.name(),
        "Cherry_MX_2.25u_Hotswap_Rotate_270_ReversedLED_ReversedStabilizers"
    );
}

#[test]
fn names_are_unique_per_geometry() {
    let mut by_name: HashMap<String, kbd_footprint::Footprint> = HashMap::new();
    for units in [1.0, 1.25, 2.0, 6.0] {
        for &switch in SwitchVariant::ALL {
            for &led in LedOption::ALL {
                for &stabilizer in StabilizerOption::ALL {
                    let fp = make_mx_switch(&MxOptions {
                        units,
                        switch,
                        led,
                        stabilizer,
                        ..MxOptions::default()
                    })
                    .unwrap();
                    if let Some(existing) = by_name.get(fp.name()) {
                        assert_eq!(existing, &fp, "{} names two footprints", fp.name());
                    } else {
                        by_name.insert(fp.name().to_string(), fp);
                    }
                }
            }
        }
    }
    // stabilizer options only matter from 2u up
    assert_eq!(by_name.len(), 2 * 4 * 3 + 2 * 4 * 3 * 3);
}

#[test]
fn bad_angle_is_rejected() {
    let err = make_mx_switch(&MxOptions {
        switch_angle: 30,
        ..MxOptions::default()
    })
    .unwrap_err();
    assert_eq!(err, FootprintError::InvalidAngle(30));
    assert_eq!(
        err.to_string(),
        "Invalid angle 30: only multiples of 90 degrees are supported"
    );
}

#[test]
fn standard_solder_library() {
    let names: Vec<String> = standard_variants(&Selection::default())
        .iter()
        .map(|v| v.name().name)
        .collect();

    insta::assert_snapshot!(names.join("\n"), @r"
    Cherry_MX_1.00u
    Cherry_MX_1.25u
    Cherry_MX_1.50u
    Cherry_MX_1.75u
    Cherry_MX_2.00u_NoStabilizers
    Cherry_MX_2.00u
    Cherry_MX_2.00u_ReversedStabilizers
    Cherry_MX_2.25u_NoStabilizers
    Cherry_MX_2.25u
    Cherry_MX_2.25u_ReversedStabilizers
    Cherry_MX_2.75u_NoStabilizers
    Cherry_MX_2.75u
    Cherry_MX_2.75u_ReversedStabilizers
    Cherry_MX_3.00u_NoStabilizers
    Cherry_MX_3.00u
    Cherry_MX_3.00u_ReversedStabilizers
    Cherry_MX_6.00u_NoStabilizers
    Cherry_MX_6.00u
    Cherry_MX_6.00u_ReversedStabilizers
    Cherry_MX_6.25u_NoStabilizers
    Cherry_MX_6.25u
    Cherry_MX_6.25u_ReversedStabilizers
    Cherry_MX_7.00u_NoStabilizers
    Cherry_MX_7.00u
    Cherry_MX_7.00u_ReversedStabilizers
    Cherry_MX_2.00u_Vertical_NoStabilizers
    Cherry_MX_2.00u_Vertical
    Cherry_MX_2.00u_Vertical_ReversedStabilizers
    Cherry_MX_6.00u_Offset_0.5u_NoStabilizers
    Cherry_MX_6.00u_Offset_0.5u
    Cherry_MX_6.00u_Offset_0.5u_ReversedStabilizers
    Cherry_MX_ISOEnter_NoStabilizers
    Cherry_MX_ISOEnter_Rotate_90_NoStabilizers
    Cherry_MX_ISOEnter_Rotate_180_NoStabilizers
    Cherry_MX_ISOEnter_Rotate_270_NoStabilizers
    Cherry_MX_ISOEnter
    Cherry_MX_ISOEnter_Rotate_90
    Cherry_MX_ISOEnter_Rotate_180
    Cherry_MX_ISOEnter_Rotate_270
    Cherry_MX_ISOEnter_ReversedStabilizers
    Cherry_MX_ISOEnter_Rotate_90_ReversedStabilizers
    Cherry_MX_ISOEnter_Rotate_180_ReversedStabilizers
    Cherry_MX_ISOEnter_Rotate_270_ReversedStabilizers
    ");
}
