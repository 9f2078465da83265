//! Crop modes and the qualifiers each one accepts.

use std::fmt;
use std::str::FromStr;

use crate::error::TransformError;

/// Which gravity values a mode accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravitySupport {
    None,
    /// Only `g_auto`.
    AutoOnly,
    Any,
}

/// Optional qualifiers a crop mode accepts.
///
/// Width, height, aspect ratio and DPR are accepted by every mode and are
/// not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub gravity: GravitySupport,
    pub offset: bool,
    pub zoom: bool,
    pub liquid_rescaling: bool,
    pub background: bool,
    pub ignore_aspect_ratio: bool,
}

impl Capabilities {
    const NONE: Capabilities = Capabilities {
        gravity: GravitySupport::None,
        offset: false,
        zoom: false,
        liquid_rescaling: false,
        background: false,
        ignore_aspect_ratio: false,
    };

    const ALL: Capabilities = Capabilities {
        gravity: GravitySupport::Any,
        offset: true,
        zoom: true,
        liquid_rescaling: true,
        background: true,
        ignore_aspect_ratio: true,
    };

    const SCALE: Capabilities = Capabilities {
        liquid_rescaling: true,
        ignore_aspect_ratio: true,
        ..Self::NONE
    };

    const FIT: Capabilities = Capabilities {
        ignore_aspect_ratio: true,
        ..Self::NONE
    };

    const PAD: Capabilities = Capabilities {
        gravity: GravitySupport::Any,
        offset: true,
        background: true,
        ..Self::NONE
    };

    const FILL_PAD: Capabilities = Capabilities {
        gravity: GravitySupport::AutoOnly,
        background: true,
        ..Self::NONE
    };

    const CROP: Capabilities = Capabilities {
        gravity: GravitySupport::Any,
        offset: true,
        zoom: true,
        ..Self::NONE
    };

    const FILL: Capabilities = Capabilities {
        gravity: GravitySupport::Any,
        ..Self::NONE
    };
}

/// How the source is fitted into the requested dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CropMode {
    Scale,
    Fit,
    LimitFit,
    MinimumFit,
    Pad,
    LimitPad,
    MinimumPad,
    FillPad,
    Crop,
    Thumbnail,
    Fill,
    LimitFill,
    ImaggaCrop,
    ImaggaScale,
    /// Any mode the typed model does not know, rendered as `c_<name>`.
    Generic(String),
}

impl CropMode {
    /// All named modes.
    pub const NAMED: [CropMode; 14] = [
        CropMode::Scale,
        CropMode::Fit,
        CropMode::LimitFit,
        CropMode::MinimumFit,
        CropMode::Pad,
        CropMode::LimitPad,
        CropMode::MinimumPad,
        CropMode::FillPad,
        CropMode::Crop,
        CropMode::Thumbnail,
        CropMode::Fill,
        CropMode::LimitFill,
        CropMode::ImaggaCrop,
        CropMode::ImaggaScale,
    ];

    /// The `c_` token value.
    pub fn token(&self) -> &str {
        match self {
            CropMode::Scale => "scale",
            CropMode::Fit => "fit",
            CropMode::LimitFit => "limit",
            CropMode::MinimumFit => "mfit",
            CropMode::Pad => "pad",
            CropMode::LimitPad => "lpad",
            CropMode::MinimumPad => "mpad",
            CropMode::FillPad => "fill_pad",
            CropMode::Crop => "crop",
            CropMode::Thumbnail => "thumb",
            CropMode::Fill => "fill",
            CropMode::LimitFill => "lfill",
            CropMode::ImaggaCrop => "imagga_crop",
            CropMode::ImaggaScale => "imagga_scale",
            CropMode::Generic(name) => name,
        }
    }

    /// The builder-style name, e.g. `limitFit`.
    pub fn name(&self) -> &str {
        match self {
            CropMode::Scale => "scale",
            CropMode::Fit => "fit",
            CropMode::LimitFit => "limitFit",
            CropMode::MinimumFit => "minimumFit",
            CropMode::Pad => "pad",
            CropMode::LimitPad => "limitPad",
            CropMode::MinimumPad => "minimumPad",
            CropMode::FillPad => "fillPad",
            CropMode::Crop => "crop",
            CropMode::Thumbnail => "thumbnail",
            CropMode::Fill => "fill",
            CropMode::LimitFill => "limitFill",
            CropMode::ImaggaCrop => "imaggaCrop",
            CropMode::ImaggaScale => "imaggaScale",
            CropMode::Generic(name) => name,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            CropMode::Scale => Capabilities::SCALE,
            CropMode::Fit | CropMode::LimitFit | CropMode::MinimumFit => Capabilities::FIT,
            CropMode::Pad | CropMode::LimitPad | CropMode::MinimumPad => Capabilities::PAD,
            CropMode::FillPad => Capabilities::FILL_PAD,
            CropMode::Crop | CropMode::Thumbnail => Capabilities::CROP,
            CropMode::Fill | CropMode::LimitFill => Capabilities::FILL,
            CropMode::ImaggaCrop | CropMode::ImaggaScale => Capabilities::NONE,
            CropMode::Generic(_) => Capabilities::ALL,
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parses a named mode from either its token (`limit`) or its name (`limitFit`).
///
/// Unknown names are rejected; use [`CropMode::Generic`] for those.
impl FromStr for CropMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CropMode::NAMED
            .iter()
            .find(|mode| mode.token() == s || mode.name() == s)
            .cloned()
            .ok_or_else(|| TransformError::type_error(format!("unknown crop mode '{}'", s)))
    }
}
