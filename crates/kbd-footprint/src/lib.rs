//! Parametric Cherry MX keyswitch footprints.
//!
//! The crate builds [`Footprint`] values in memory and performs no I/O:
//!
//! - [`geometry`]: quadrant-only transforms,
//! - [`shapes`]: primitive composers that append pads, outlines and text,
//! - [`mx`]: switch footprint assembly,
//! - [`naming`]: deterministic names and descriptions,
//! - [`catalog`]: option permutations and the standard footprint set.

pub mod catalog;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod layer;
pub mod mx;
pub mod naming;
pub mod options;
pub mod shapes;

pub use catalog::{IsoSet, KeySet, Selection, Variant, standard_variants};
pub use error::{FootprintError, Result};
pub use footprint::{Element, Footprint, PadKind, PadShape};
pub use geometry::{Rotation, Transform, UNIT_SIZE};
pub use layer::Layer;
pub use mx::{MxIsoOptions, MxOptions, make_mx_iso_enter, make_mx_switch, mx_stabilizer_width};
pub use naming::VariantName;
pub use options::{LedOption, MountStyle, StabilizerOption, SwitchVariant};
