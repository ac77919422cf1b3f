//! Variant sets: cartesian products of option lists, and the standard
//! library of Cherry MX footprints.

use std::collections::HashSet;

use glam::DVec2;
use itertools::Itertools;
use log::{debug, trace};

use crate::error::Result;
use crate::footprint::Footprint;
use crate::mx::{MxIsoOptions, MxOptions, make_mx_iso_enter, make_mx_switch};
use crate::naming::VariantName;
use crate::options::{LedOption, MountStyle, StabilizerOption, SwitchVariant};

/// Key sizes that never take a stabilizer.
pub const SMALL_UNITS: [f64; 4] = [1.0, 1.25, 1.5, 1.75];

/// Key sizes that take a stabilizer.
pub const LARGE_UNITS: [f64; 7] = [2.0, 2.25, 2.75, 3.0, 6.0, 6.25, 7.0];

pub const SWITCH_ANGLES: [i32; 4] = [0, 90, 180, 270];

/// One footprint to build.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Key(MxOptions),
    IsoEnter(MxIsoOptions),
}

impl Variant {
    pub fn name(&self) -> VariantName {
        match self {
            Variant::Key(opts) => opts.variant_key().name(),
            Variant::IsoEnter(opts) => opts.variant_key().name(),
        }
    }

    pub fn build(&self) -> Result<Footprint> {
        match self {
            Variant::Key(opts) => make_mx_switch(opts),
            Variant::IsoEnter(opts) => make_mx_iso_enter(opts),
        }
    }
}

/// Lists of values for every key option. An empty list keeps the default.
///
/// The silkscreen flags do not change the footprint name, so they take a
/// single value. A list would give several footprints with the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    pub units: Vec<f64>,
    pub switch: Vec<SwitchVariant>,
    pub mount: Vec<MountStyle>,
    pub led: Vec<LedOption>,
    pub stabilizer: Vec<StabilizerOption>,
    pub vertical: Vec<bool>,
    pub front_silk: Option<bool>,
    pub show_value: Option<bool>,
    pub value_on_back: Option<bool>,
    pub switch_offset: Vec<DVec2>,
    pub switch_angle: Vec<i32>,
}

impl KeySet {
    /// Every combination of the listed values.
    pub fn variants(&self) -> Vec<Variant> {
        let mut all = vec![MxOptions::default()];
        all = expand(all, &self.units, |o, v| o.units = v);
        all = expand(all, &self.switch, |o, v| o.switch = v);
        all = expand(all, &self.mount, |o, v| o.mount = v);
        all = expand(all, &self.led, |o, v| o.led = v);
        all = expand(all, &self.stabilizer, |o, v| o.stabilizer = v);
        all = expand(all, &self.vertical, |o, v| o.vertical = v);
        for opts in &mut all {
            self.apply_silk(opts);
        }
        all = expand(all, &self.switch_offset, |o, v| o.switch_offset = v);
        all = expand(all, &self.switch_angle, |o, v| o.switch_angle = v);
        all.into_iter().map(Variant::Key).collect()
    }

    fn apply_silk(&self, opts: &mut MxOptions) {
        opts.front_silk = self.front_silk.unwrap_or(opts.front_silk);
        opts.show_value = self.show_value.unwrap_or(opts.show_value);
        opts.value_on_back = self.value_on_back.unwrap_or(opts.value_on_back);
    }
}

/// Lists of values for every ISO Enter option. An empty list keeps the
/// default, and the silkscreen flags are single values as in [`KeySet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoSet {
    pub switch: Vec<SwitchVariant>,
    pub mount: Vec<MountStyle>,
    pub led: Vec<LedOption>,
    pub stabilizer: Vec<StabilizerOption>,
    pub front_silk: Option<bool>,
    pub show_value: Option<bool>,
    pub value_on_back: Option<bool>,
    pub switch_angle: Vec<i32>,
}

impl IsoSet {
    pub fn variants(&self) -> Vec<Variant> {
        let mut all = vec![MxIsoOptions::default()];
        all = expand(all, &self.switch, |o, v| o.switch = v);
        all = expand(all, &self.mount, |o, v| o.mount = v);
        all = expand(all, &self.led, |o, v| o.led = v);
        all = expand(all, &self.stabilizer, |o, v| o.stabilizer = v);
        for opts in &mut all {
            self.apply_silk(opts);
        }
        all = expand(all, &self.switch_angle, |o, v| o.switch_angle = v);
        all.into_iter().map(Variant::IsoEnter).collect()
    }

    fn apply_silk(&self, opts: &mut MxIsoOptions) {
        opts.front_silk = self.front_silk.unwrap_or(opts.front_silk);
        opts.show_value = self.show_value.unwrap_or(opts.show_value);
        opts.value_on_back = self.value_on_back.unwrap_or(opts.value_on_back);
    }
}

fn expand<O: Clone, T: Copy>(base: Vec<O>, values: &[T], set: impl Fn(&mut O, T)) -> Vec<O> {
    if values.is_empty() {
        return base;
    }
    base.iter()
        .cartesian_product(values)
        .map(|(opts, value)| {
            let mut opts = opts.clone();
            set(&mut opts, *value);
            opts
        })
        .collect()
}

/// Options shared by every footprint in the standard library.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub switches: Vec<SwitchVariant>,
    pub mounts: Vec<MountStyle>,
    pub leds: Vec<LedOption>,
    pub front_silk: bool,
    pub show_value: bool,
    pub value_on_back: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            switches: vec![SwitchVariant::Solder],
            mounts: vec![MountStyle::Pcb],
            leds: vec![LedOption::None],
            front_silk: true,
            show_value: true,
            value_on_back: true,
        }
    }
}

impl Selection {
    fn key_set(&self) -> KeySet {
        KeySet {
            switch: self.switches.clone(),
            mount: self.mounts.clone(),
            led: self.leds.clone(),
            front_silk: Some(self.front_silk),
            show_value: Some(self.show_value),
            value_on_back: Some(self.value_on_back),
            ..KeySet::default()
        }
    }
}

/// The standard footprint set: regular sizes, wide keys with every stabilizer
/// option, a vertical 2u key, a 6u spacebar with an offset stem and ISO Enter
/// at every switch angle. Duplicate names are dropped, first one wins.
pub fn standard_variants(selection: &Selection) -> Vec<Variant> {
    let stabilizers = StabilizerOption::ALL.to_vec();
    let base = selection.key_set();

    let sets = [
        KeySet {
            units: SMALL_UNITS.to_vec(),
            ..base.clone()
        },
        KeySet {
            units: LARGE_UNITS.to_vec(),
            stabilizer: stabilizers.clone(),
            ..base.clone()
        },
        KeySet {
            units: vec![2.0],
            stabilizer: stabilizers.clone(),
            vertical: vec![true],
            ..base.clone()
        },
        KeySet {
            units: vec![6.0],
            stabilizer: stabilizers.clone(),
            switch_offset: vec![DVec2::new(0.5, 0.0)],
            ..base
        },
    ];
    let iso = IsoSet {
        switch: selection.switches.clone(),
        mount: selection.mounts.clone(),
        led: selection.leds.clone(),
        stabilizer: stabilizers,
        front_silk: Some(selection.front_silk),
        show_value: Some(selection.show_value),
        value_on_back: Some(selection.value_on_back),
        switch_angle: SWITCH_ANGLES.to_vec(),
    };

    let variants = sets
        .iter()
        .flat_map(KeySet::variants)
        .chain(iso.variants())
        .collect();
    dedup_by_name(variants)
}

/// Drop variants whose name was already seen, keeping the first.
pub fn dedup_by_name(variants: Vec<Variant>) -> Vec<Variant> {
    let total = variants.len();
    let mut seen = HashSet::new();
    let unique: Vec<Variant> = variants
        .into_iter()
        .filter(|variant| {
            let name = variant.name().name;
            let fresh = seen.insert(name.clone());
            if !fresh {
                trace!("Skipping duplicate variant {name}");
            }
            fresh
        })
        .collect();
    debug!("{} unique variant(s) out of {total}", unique.len());
    unique
}
