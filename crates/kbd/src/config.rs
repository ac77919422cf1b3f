//! TOML variant files.
//!
//! ```toml
//! library = "MX_Custom"
//!
//! [[key]]
//! units = [1, 1.25, 1.5]
//! switch = ["solder", "hotswap"]
//! led = "normal"
//!
//! [[key]]
//! units = 6.25
//! stabilizer = ["normal", "reverse"]
//! switch_offset = { x = 0.5 }
//!
//! [[iso]]
//! switch_angle = [0, 90]
//! ```
//!
//! Every field takes a single value or a list, except the silkscreen flags
//! (`front_silk`, `show_value`, `value_on_back`), which do not change the
//! footprint name and so take one value per table. Each table produces the
//! cartesian product of its lists, and fields left out keep their defaults.
//! Option names are case-insensitive.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};
use glam::DVec2;
use kbd_footprint::catalog::dedup_by_name;
use kbd_footprint::{
    IsoSet, KeySet, LedOption, MountStyle, StabilizerOption, SwitchVariant, Variant,
};
use log::debug;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// A field that is either a single value or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    fn to_vec(&self) -> Vec<T> {
        self.clone().into()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OneOrManyVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OneOrManyVisitor<T> {
            type Value = OneOrMany<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a value or a list of values")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(OneOrMany::Many)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                T::deserialize(MapAccessDeserializer::new(map)).map(OneOrMany::One)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::One)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::One)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::One)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::One)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                T::deserialize(v.into_deserializer()).map(OneOrMany::One)
            }
        }

        deserializer.deserialize_any(OneOrManyVisitor(PhantomData))
    }
}

/// Switch stem offset in key units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Offset {
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl From<Offset> for DVec2 {
    fn from(offset: Offset) -> Self {
        DVec2::new(offset.x, offset.y)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyTable {
    pub units: OneOrMany<f64>,
    pub switch: OneOrMany<SwitchVariant>,
    pub mount: OneOrMany<MountStyle>,
    pub led: OneOrMany<LedOption>,
    pub stabilizer: OneOrMany<StabilizerOption>,
    pub vertical: OneOrMany<bool>,
    pub front_silk: Option<bool>,
    pub show_value: Option<bool>,
    pub value_on_back: Option<bool>,
    pub switch_offset: OneOrMany<Offset>,
    pub switch_angle: OneOrMany<i32>,
}

impl KeyTable {
    pub fn to_set(&self) -> KeySet {
        KeySet {
            units: self.units.to_vec(),
            switch: self.switch.to_vec(),
            mount: self.mount.to_vec(),
            led: self.led.to_vec(),
            stabilizer: self.stabilizer.to_vec(),
            vertical: self.vertical.to_vec(),
            front_silk: self.front_silk,
            show_value: self.show_value,
            value_on_back: self.value_on_back,
            switch_offset: self
                .switch_offset
                .to_vec()
                .into_iter()
                .map(DVec2::from)
                .collect(),
            switch_angle: self.switch_angle.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsoTable {
    pub switch: OneOrMany<SwitchVariant>,
    pub mount: OneOrMany<MountStyle>,
    pub led: OneOrMany<LedOption>,
    pub stabilizer: OneOrMany<StabilizerOption>,
    pub front_silk: Option<bool>,
    pub show_value: Option<bool>,
    pub value_on_back: Option<bool>,
    pub switch_angle: OneOrMany<i32>,
}

impl IsoTable {
    pub fn to_set(&self) -> IsoSet {
        IsoSet {
            switch: self.switch.to_vec(),
            mount: self.mount.to_vec(),
            led: self.led.to_vec(),
            stabilizer: self.stabilizer.to_vec(),
            front_silk: self.front_silk,
            show_value: self.show_value,
            value_on_back: self.value_on_back,
            switch_angle: self.switch_angle.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantFile {
    pub library: Option<String>,
    #[serde(default)]
    pub key: Vec<KeyTable>,
    #[serde(default)]
    pub iso: Vec<IsoTable>,
}

impl VariantFile {
    /// Key tables first, then ISO tables, in file order. Repeated names are
    /// dropped.
    pub fn variants(&self) -> Vec<Variant> {
        let keys = self.key.iter().flat_map(|table| table.to_set().variants());
        let isos = self.iso.iter().flat_map(|table| table.to_set().variants());
        dedup_by_name(keys.chain(isos).collect())
    }
}

pub fn parse(contents: &str) -> Result<VariantFile> {
    Ok(toml::from_str(contents)?)
}

pub fn load(path: &Path) -> Result<VariantFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        "Loaded {} key and {} ISO table(s) from {}",
        file.key.len(),
        file.iso.len(),
        path.display()
    );
    Ok(file)
}
