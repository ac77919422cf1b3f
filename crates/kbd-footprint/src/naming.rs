//! Footprint names and descriptions.
//!
//! Names are a pure function of the options that change geometry. Options at
//! their default value add nothing, so the common case gets the shortest name.

use glam::DVec2;

use crate::geometry::normalize_angle;
use crate::mx::mx_stabilizer_width;
use crate::options::{LedOption, MountStyle, StabilizerOption, SwitchVariant};

const FAMILY_NAME: &str = "Cherry_MX";
const FAMILY_DESCRIPTION: &str = "Cherry MX keyswitch";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeySize {
    /// Width in units (1u = 19.05mm).
    Units(f64),
    IsoEnter,
}

/// The options that identify a footprint variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantKey {
    pub size: KeySize,
    pub switch: SwitchVariant,
    pub mount: MountStyle,
    pub led: LedOption,
    pub stabilizer: StabilizerOption,
    pub vertical: bool,
    pub switch_offset: DVec2,
    pub switch_angle: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantName {
    pub name: String,
    pub description: String,
}

impl VariantKey {
    pub fn name(&self) -> VariantName {
        let (size_name, size_desc, has_stabilizer) = match self.size {
            KeySize::Units(units) => {
                let size = format!("{units:.2}u");
                (size.clone(), size, mx_stabilizer_width(units) != 0.0)
            }
            KeySize::IsoEnter => ("ISOEnter".to_string(), "ISO Enter".to_string(), true),
        };

        let mut name = vec![FAMILY_NAME.to_string(), size_name];
        name.extend(switch_name(self.switch).iter().map(|s| s.to_string()));
        if self.mount == MountStyle::Plate {
            name.push("Plate".to_string());
        }
        if self.vertical {
            name.push("Vertical".to_string());
        }
        name.extend(offset_name(self.switch_offset));
        name.extend(angle_name(self.switch_angle));
        name.extend(led_name(self.led).map(str::to_string));
        if has_stabilizer {
            name.extend(stabilizer_name(self.stabilizer).map(str::to_string));
        }

        let mut desc = vec![FAMILY_DESCRIPTION.to_string(), size_desc];
        desc.extend(switch_description(self.switch).iter().map(|s| s.to_string()));
        desc.push(
            match self.mount {
                MountStyle::Pcb => "PCB mount",
                MountStyle::Plate => "plate mount",
            }
            .to_string(),
        );
        if self.vertical {
            desc.push("vertical".to_string());
        }
        desc.extend(offset_description(self.switch_offset));
        desc.extend(angle_description(self.switch_angle));
        desc.extend(led_description(self.led).map(str::to_string));
        if has_stabilizer {
            desc.extend(stabilizer_description(self.stabilizer).map(str::to_string));
        }

        VariantName {
            name: name.join("_"),
            description: desc.join(", "),
        }
    }
}

fn switch_name(switch: SwitchVariant) -> &'static [&'static str] {
    match switch {
        SwitchVariant::None => &["NoSwitch"],
        SwitchVariant::Solder => &[],
        SwitchVariant::Hotswap => &["Hotswap"],
        SwitchVariant::HotswapAntishear => &["Hotswap", "Antishear"],
    }
}

fn switch_description(switch: SwitchVariant) -> &'static [&'static str] {
    match switch {
        SwitchVariant::None => &["no switch"],
        SwitchVariant::Solder => &[],
        SwitchVariant::Hotswap => &["hotswap"],
        SwitchVariant::HotswapAntishear => &["hotswap", "anti-shear pads"],
    }
}

fn led_name(led: LedOption) -> Option<&'static str> {
    match led {
        LedOption::None => None,
        LedOption::Normal => Some("LED"),
        LedOption::Reverse => Some("ReversedLED"),
    }
}

fn led_description(led: LedOption) -> Option<&'static str> {
    match led {
        LedOption::None => None,
        LedOption::Normal => Some("LED"),
        LedOption::Reverse => Some("reverse polarity LED"),
    }
}

fn stabilizer_name(stabilizer: StabilizerOption) -> Option<&'static str> {
    match stabilizer {
        StabilizerOption::None => Some("NoStabilizers"),
        StabilizerOption::Normal => None,
        StabilizerOption::Reverse => Some("ReversedStabilizers"),
    }
}

fn stabilizer_description(stabilizer: StabilizerOption) -> Option<&'static str> {
    match stabilizer {
        StabilizerOption::None => Some("no stabilizers"),
        StabilizerOption::Normal => None,
        StabilizerOption::Reverse => Some("reversed stabilizers"),
    }
}

/// At most six decimals, trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    let mut s = format!("{value:.6}");
    if s.contains('.') {
        let len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(len);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn offset_name(offset: DVec2) -> Vec<String> {
    if offset == DVec2::ZERO {
        return Vec::new();
    }
    let mut name = vec!["Offset".to_string(), format!("{}u", format_number(offset.x))];
    if offset.y != 0.0 {
        name.push(format!("{}u", format_number(offset.y)));
    }
    name
}

fn offset_description(offset: DVec2) -> Option<String> {
    if offset == DVec2::ZERO {
        return None;
    }
    let mut desc = format!("offset {}u", format_number(offset.x));
    if offset.y != 0.0 {
        desc.push_str(&format!(" x {}u", format_number(offset.y)));
    }
    Some(desc)
}

fn angle_name(angle: i32) -> Vec<String> {
    match normalize_angle(angle) {
        0 => Vec::new(),
        n => vec!["Rotate".to_string(), n.to_string()],
    }
}

fn angle_description(angle: i32) -> Option<String> {
    match normalize_angle(angle) {
        0 => None,
        n => Some(format!("switch rotated {n}")),
    }
}
