//! Writes kbd footprints as KiCad footprint libraries.

pub mod footprint_file;
pub mod library;

pub use footprint_file::{footprint_to_sexpr, format_footprint};
pub use library::FootprintLibrary;
