//! Resize actions.
//!
//! A [`Resize`] pairs one [`CropMode`] with the qualifiers that shape it.
//! Setters consume and return the action so calls chain:
//!
//! ```ignore
//! let action = Resize::pad(100, 200)
//!     .offset(50, 100)?
//!     .background(Background::red())?;
//! assert_eq!(action.to_string(), "b_red,c_pad,h_200,w_100,x_50,y_100");
//! ```
//!
//! # Validation
//!
//! Each mode accepts a fixed set of optional qualifiers (see
//! [`Capabilities`]). A setter for a qualifier the mode does not accept
//! fails immediately with [`TransformError::Validation`]; the action passed
//! in is consumed. [`Resize::add_parameter`] is the unchecked escape hatch.

mod mode;

use std::fmt;

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::background::Background;
use crate::error::{TransformError, TransformResult};
use crate::gravity::{CompassPosition, Gravity};
use crate::number::{Number, NumericInput};
use crate::param::{flags, keys, Qualifier};
use crate::serialize::{serialize, ParameterSet};

pub use mode::{Capabilities, CropMode, GravitySupport};

/// A resize action: one crop mode plus its qualifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Resize {
    mode: CropMode,
    params: ParameterSet,
}

impl Resize {
    pub fn new(mode: CropMode) -> Self {
        tracing::trace!(mode = %mode, "resize action created");
        Self {
            mode,
            params: ParameterSet::new(),
        }
    }

    fn sized(mode: CropMode, width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::new(mode).dimensions(width, height)
    }

    fn sized_with_gravity(
        mode: CropMode,
        width: impl Into<Number>,
        height: impl Into<Number>,
        gravity: Option<Gravity>,
    ) -> TransformResult<Self> {
        let action = Self::sized(mode, width, height);
        match gravity {
            Some(gravity) => action.gravity(gravity),
            None => Ok(action),
        }
    }

    /// Scale to the given size, changing the aspect ratio only if both
    /// dimensions are given.
    pub fn scale(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::Scale, width, height)
    }

    /// Fit within the bounding box, keeping the aspect ratio.
    pub fn fit(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::Fit, width, height)
    }

    /// Like [`Resize::fit`] but never upscales.
    pub fn limit_fit(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::LimitFit, width, height)
    }

    /// Like [`Resize::fit`] but only upscales.
    pub fn minimum_fit(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::MinimumFit, width, height)
    }

    pub fn pad(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::Pad, width, height)
    }

    pub fn limit_pad(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::LimitPad, width, height)
    }

    pub fn minimum_pad(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::MinimumPad, width, height)
    }

    /// Fill the box with padding where needed.
    ///
    /// Only automatic gravity is accepted; `None` means automatic.
    ///
    /// # Errors
    /// Returns [`TransformError::Validation`] for any other gravity.
    pub fn fill_pad(
        width: impl Into<Number>,
        height: impl Into<Number>,
        gravity: Option<Gravity>,
    ) -> TransformResult<Self> {
        Self::sized(CropMode::FillPad, width, height).gravity(gravity.unwrap_or(Gravity::Auto))
    }

    pub fn crop(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::Crop, width, height)
    }

    /// Face-aware thumbnail. `None` leaves gravity unset.
    pub fn thumbnail(
        width: impl Into<Number>,
        height: impl Into<Number>,
        gravity: Option<Gravity>,
    ) -> TransformResult<Self> {
        Self::sized_with_gravity(CropMode::Thumbnail, width, height, gravity)
    }

    /// Fill the box exactly, cropping the overflow around `gravity`.
    pub fn fill(
        width: impl Into<Number>,
        height: impl Into<Number>,
        gravity: Option<Gravity>,
    ) -> TransformResult<Self> {
        Self::sized_with_gravity(CropMode::Fill, width, height, gravity)
    }

    /// Like [`Resize::fill`] but never upscales.
    pub fn limit_fill(
        width: impl Into<Number>,
        height: impl Into<Number>,
        gravity: Option<Gravity>,
    ) -> TransformResult<Self> {
        Self::sized_with_gravity(CropMode::LimitFill, width, height, gravity)
    }

    pub fn imagga_crop(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::ImaggaCrop, width, height)
    }

    pub fn imagga_scale(width: impl Into<Number>, height: impl Into<Number>) -> Self {
        Self::sized(CropMode::ImaggaScale, width, height)
    }

    /// A mode not covered by the typed constructors. Accepts every qualifier.
    ///
    /// # Errors
    /// Returns [`TransformError::Type`] for a blank name; it would render as
    /// a bare `c_`.
    pub fn generic(
        name: impl Into<String>,
        width: impl Into<Number>,
        height: impl Into<Number>,
    ) -> TransformResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TransformError::type_error("crop mode name must not be empty"));
        }
        Ok(Self::sized(CropMode::Generic(name), width, height))
    }

    pub fn mode(&self) -> &CropMode {
        &self.mode
    }

    pub fn capabilities(&self) -> Capabilities {
        self.mode.capabilities()
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn width(mut self, width: impl Into<Number>) -> Self {
        self.params.set(Qualifier::number(keys::WIDTH, width));
        self
    }

    pub fn height(mut self, height: impl Into<Number>) -> Self {
        self.params.set(Qualifier::number(keys::HEIGHT, height));
        self
    }

    pub fn dimensions(self, width: impl Into<Number>, height: impl Into<Number>) -> Self {
        self.width(width).height(height)
    }

    pub fn aspect_ratio(mut self, ratio: impl NumericInput) -> TransformResult<Self> {
        let ratio = ratio.into_number()?;
        self.params.set(Qualifier::number(keys::ASPECT_RATIO, ratio));
        Ok(self)
    }

    /// Device pixel ratio.
    pub fn dpr(mut self, dpr: impl NumericInput) -> TransformResult<Self> {
        let dpr = dpr.into_number()?;
        self.params.set(Qualifier::number(keys::DPR, dpr));
        Ok(self)
    }

    /// Set the gravity. [`Gravity::Liquid`] is routed through
    /// [`Resize::liquid_rescaling`].
    pub fn gravity(mut self, gravity: impl Into<Gravity>) -> TransformResult<Self> {
        let gravity = gravity.into();
        if gravity == Gravity::Liquid {
            return self.liquid_rescaling();
        }
        match self.capabilities().gravity {
            GravitySupport::Any => {}
            GravitySupport::AutoOnly if gravity.is_auto() => {}
            GravitySupport::AutoOnly => {
                return Err(self.unsupported(&format!("Gravity '{}'", gravity)))
            }
            GravitySupport::None => return Err(self.unsupported("Gravity")),
        }
        self.params.set(Qualifier::new(keys::GRAVITY, gravity.token()));
        Ok(self)
    }

    /// Content-aware rescaling, rendered as `g_liquid`.
    pub fn liquid_rescaling(mut self) -> TransformResult<Self> {
        if !self.capabilities().liquid_rescaling {
            return Err(self.unsupported("Liquid Rescaling"));
        }
        self.params
            .set(Qualifier::new(keys::GRAVITY, Gravity::Liquid.token()));
        Ok(self)
    }

    /// Toggle the `ignore_aspect_ratio` flag.
    pub fn ignore_aspect_ratio(mut self, ignore: bool) -> TransformResult<Self> {
        if !self.capabilities().ignore_aspect_ratio {
            return Err(self.unsupported("Ignoring aspect ratio"));
        }
        self.params.set_flag(flags::IGNORE_ASPECT_RATIO, ignore);
        Ok(self)
    }

    pub fn background(mut self, background: Background) -> TransformResult<Self> {
        if !self.capabilities().background {
            return Err(self.unsupported("Background"));
        }
        self.params
            .set(Qualifier::new(keys::BACKGROUND, background.to_string()));
        Ok(self)
    }

    pub fn offset(self, x: impl NumericInput, y: impl NumericInput) -> TransformResult<Self> {
        self.x(x)?.y(y)
    }

    pub fn x(mut self, x: impl NumericInput) -> TransformResult<Self> {
        self.require_offset()?;
        self.params.set(Qualifier::number(keys::X, x.into_number()?));
        Ok(self)
    }

    pub fn y(mut self, y: impl NumericInput) -> TransformResult<Self> {
        self.require_offset()?;
        self.params.set(Qualifier::number(keys::Y, y.into_number()?));
        Ok(self)
    }

    /// Anchor at a compass point and apply its offsets, if any.
    pub fn position(self, position: CompassPosition) -> TransformResult<Self> {
        self.require_offset()?;
        let mut action = self.gravity(position.gravity)?;
        if let Some(x) = position.x {
            action = action.x(x)?;
        }
        if let Some(y) = position.y {
            action = action.y(y)?;
        }
        Ok(action)
    }

    pub fn zoom(mut self, zoom: impl NumericInput) -> TransformResult<Self> {
        if !self.capabilities().zoom {
            return Err(self.unsupported("Zoom"));
        }
        self.params.set(Qualifier::number(keys::ZOOM, zoom.into_number()?));
        Ok(self)
    }

    /// Attach a qualifier without any capability check.
    ///
    /// A qualifier keyed `c` is kept but never rendered; the crop mode is
    /// fixed at construction.
    pub fn add_parameter(mut self, qualifier: Qualifier) -> Self {
        self.params.set(qualifier);
        self
    }

    fn require_offset(&self) -> TransformResult<()> {
        if self.capabilities().offset {
            Ok(())
        } else {
            Err(self.unsupported("Offset"))
        }
    }

    fn unsupported(&self, feature: &str) -> TransformError {
        TransformError::unsupported(feature, self.mode.token())
    }

    fn crop_qualifier(&self) -> Qualifier {
        Qualifier::new(keys::CROP, self.mode.token())
    }
}

impl fmt::Display for Resize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let crop = self.crop_qualifier();
        let params = self.params.iter().filter(|q| q.key() != keys::CROP);
        f.write_str(&serialize(std::iter::once(&crop).chain(params)))
    }
}

/// Descriptive name used in the structured form.
fn long_name(key: &str) -> &str {
    match key {
        keys::ASPECT_RATIO => "aspect_ratio",
        keys::BACKGROUND => "background",
        keys::FLAG => "flags",
        keys::GRAVITY => "gravity",
        keys::HEIGHT => "height",
        keys::WIDTH => "width",
        keys::ZOOM => "zoom",
        other => other,
    }
}

/// One `{"name": value}` object in the parameter list.
struct Entry<'a, V>(&'a str, V);

impl<V: Serialize> Serialize for Entry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(std::iter::once((self.0, &self.1)))
    }
}

struct Parameters<'a>(&'a Resize);

impl Serialize for Parameters<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<&Qualifier> = self
            .0
            .params
            .iter()
            .filter(|q| q.is_set() && q.key() != keys::CROP)
            .collect();
        entries.sort_by(|a, b| a.key().cmp(b.key()));

        let mut seq = serializer.serialize_seq(Some(entries.len() + 1))?;
        seq.serialize_element(&Entry("crop_mode", self.0.mode.token()))?;
        for q in entries {
            seq.serialize_element(&Entry(long_name(q.key()), q.value()))?;
        }
        seq.end()
    }
}

/// `{"name": "resize", "parameters": [{"crop_mode": "pad"}, {"width": 100}, ...]}`
///
/// Parameters are single-entry objects: the crop mode first, then the rest
/// sorted by qualifier key.
impl Serialize for Resize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Resize", 2)?;
        state.serialize_field("name", "resize")?;
        state.serialize_field("parameters", &Parameters(self))?;
        state.end()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::gravity::CompassGravity;
    use proptest::prelude::*;

    fn compass_strategy() -> impl Strategy<Value = CompassGravity> {
        prop::sample::select(CompassGravity::ALL.to_vec())
    }

    fn mode_strategy() -> impl Strategy<Value = CropMode> {
        prop::sample::select(CropMode::NAMED.to_vec())
    }

    proptest! {
        /// Property: scale renders exactly its dimensions.
        #[test]
        fn prop_scale_dimensions(w in 1u32..10_000, h in 1u32..10_000) {
            prop_assert_eq!(
                Resize::scale(w, h).to_string(),
                format!("c_scale,h_{},w_{}", h, w)
            );
        }

        /// Property: rendering the same action twice gives the same string.
        #[test]
        fn prop_render_idempotent(
            mode in mode_strategy(),
            w in 1u32..5000,
            h in 1u32..5000,
            dpr in 1u32..4,
        ) {
            let action = Resize::new(mode).width(w).height(h).dpr(dpr).unwrap();
            prop_assert_eq!(action.to_string(), action.to_string());
        }

        /// Property: fill_pad rejects every compass gravity.
        #[test]
        fn prop_fill_pad_rejects_compass(direction in compass_strategy()) {
            let result = Resize::fill_pad(100, 200, Some(direction.into()));
            prop_assert!(result.is_err());
        }

        /// Property: offsets render the same regardless of setter order.
        #[test]
        fn prop_offset_order_irrelevant(x in -500i32..500, y in -500i32..500) {
            let a = Resize::crop(10, 10).x(x).unwrap().y(y).unwrap();
            let b = Resize::crop(10, 10).y(y).unwrap().x(x).unwrap();
            prop_assert_eq!(a.to_string(), b.to_string());
        }

        /// Property: the crop mode token always appears exactly once.
        #[test]
        fn prop_single_crop_token(mode in mode_strategy(), w in 1u32..5000) {
            let rendered = Resize::new(mode.clone()).width(w).to_string();
            let expected = format!("c_{}", mode.token());
            let count = rendered.split(',').filter(|t| *t == expected).count();
            prop_assert_eq!(count, 1);
        }
    }
}
