//! KiCad board layers and the standard pad layer sets.

use std::fmt;

/// Board layers a footprint element can be drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    FrontCopper,
    BackCopper,
    AllCopper,
    FrontMask,
    BackMask,
    AllMask,
    FrontPaste,
    BackPaste,
    FrontSilk,
    BackSilk,
    FrontFab,
    BackFab,
    FrontCourtyard,
    BackCourtyard,
    UserDrawings,
}

impl Layer {
    /// KiCad layer name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrontCopper => "F.Cu",
            Self::BackCopper => "B.Cu",
            Self::AllCopper => "*.Cu",
            Self::FrontMask => "F.Mask",
            Self::BackMask => "B.Mask",
            Self::AllMask => "*.Mask",
            Self::FrontPaste => "F.Paste",
            Self::BackPaste => "B.Paste",
            Self::FrontSilk => "F.SilkS",
            Self::BackSilk => "B.SilkS",
            Self::FrontFab => "F.Fab",
            Self::BackFab => "B.Fab",
            Self::FrontCourtyard => "F.CrtYd",
            Self::BackCourtyard => "B.CrtYd",
            Self::UserDrawings => "Dwgs.User",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plated through-hole pads.
pub const THT_LAYERS: &[Layer] = &[Layer::AllCopper, Layer::AllMask];

/// Front surface-mount pads.
pub const SMT_LAYERS: &[Layer] = &[Layer::FrontCopper, Layer::FrontMask, Layer::FrontPaste];

/// Non-plated mechanical holes.
pub const NPTH_LAYERS: &[Layer] = &[Layer::AllCopper, Layer::AllMask];
