//! Resize action WASM bindings.
//!
//! `JsResize` wraps a core `Resize`. Setters mutate in place; a rejected
//! setter throws and leaves the action as it was.

use crate::to_js_error;
use mediaxf_core::{
    Background, CompassGravity, CompassPosition, CropMode, Gravity, Number, Qualifier, Resize,
    TransformError, TransformResult,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// JavaScript-accessible resize action.
///
/// # Example (TypeScript)
/// ```typescript
/// const action = new JsResize('thumb', 100, 200);
/// action.gravity('auto');
/// action.zoom(0.5);
/// action.toString(); // "c_thumb,g_auto,h_200,w_100,z_0.5"
/// ```
#[wasm_bindgen]
pub struct JsResize {
    inner: Resize,
}

/// Build an action from a mode token or name (`limit`, `limitFit`).
///
/// `fill_pad` gets its implicit automatic gravity.
fn build(mode: &str, width: Option<f64>, height: Option<f64>) -> TransformResult<Resize> {
    let mode: CropMode = mode.parse()?;
    let fill_pad = mode == CropMode::FillPad;

    let mut inner = Resize::new(mode);
    if let Some(width) = width {
        inner = inner.width(Number::try_from(width)?);
    }
    if let Some(height) = height {
        inner = inner.height(Number::try_from(height)?);
    }
    if fill_pad {
        inner = inner.gravity(Gravity::Auto)?;
    }
    Ok(inner)
}

fn generic(name: &str, width: f64, height: f64) -> TransformResult<Resize> {
    Resize::generic(name, Number::try_from(width)?, Number::try_from(height)?)
}

fn parse_compass(text: &str) -> TransformResult<CompassGravity> {
    match text.parse::<Gravity>()? {
        Gravity::Compass(direction) => Ok(direction),
        other => Err(TransformError::type_error(format!(
            "expected a compass direction, got '{}'",
            other
        ))),
    }
}

#[wasm_bindgen]
impl JsResize {
    /// Create an action for a named crop mode.
    ///
    /// # Errors
    /// Throws if the mode is unknown. Use `JsResize.generic` for custom modes.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, width: Option<f64>, height: Option<f64>) -> Result<JsResize, JsValue> {
        let inner = build(mode, width, height).map_err(to_js_error)?;
        Ok(JsResize { inner })
    }

    /// Create an action for a mode outside the named set.
    ///
    /// # Errors
    /// Throws for a blank name or a non-finite dimension.
    pub fn generic(name: &str, width: f64, height: f64) -> Result<JsResize, JsValue> {
        let inner = generic(name, width, height).map_err(to_js_error)?;
        Ok(JsResize { inner })
    }

    /// The `c_` token of this action's mode.
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().token().to_string()
    }

    pub fn width(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| Ok(inner.width(Number::try_from(value)?)))
    }

    pub fn height(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| Ok(inner.height(Number::try_from(value)?)))
    }

    #[wasm_bindgen(js_name = aspectRatio)]
    pub fn aspect_ratio(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.aspect_ratio(value))
    }

    pub fn dpr(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.dpr(value))
    }

    /// Set gravity from its token, e.g. `"auto"` or `"north_west"`.
    pub fn gravity(&mut self, value: &str) -> Result<(), JsValue> {
        self.update(|inner| inner.gravity(value.parse::<Gravity>()?))
    }

    #[wasm_bindgen(js_name = liquidRescaling)]
    pub fn liquid_rescaling(&mut self) -> Result<(), JsValue> {
        self.update(Resize::liquid_rescaling)
    }

    #[wasm_bindgen(js_name = ignoreAspectRatio)]
    pub fn ignore_aspect_ratio(&mut self, ignore: bool) -> Result<(), JsValue> {
        self.update(|inner| inner.ignore_aspect_ratio(ignore))
    }

    /// Set the padding background: a color name, `#rrggbb`, or `"auto"`.
    pub fn background(&mut self, value: &str) -> Result<(), JsValue> {
        self.update(|inner| inner.background(value.parse::<Background>()?))
    }

    pub fn offset(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.offset(x, y))
    }

    pub fn x(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.x(value))
    }

    pub fn y(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.y(value))
    }

    /// Anchor at a compass direction with optional offsets.
    pub fn position(
        &mut self,
        gravity: &str,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Result<(), JsValue> {
        self.update(|inner| {
            let position = CompassPosition {
                gravity: parse_compass(gravity)?,
                x: x.map(Number::try_from).transpose()?,
                y: y.map(Number::try_from).transpose()?,
            };
            inner.position(position)
        })
    }

    pub fn zoom(&mut self, value: f64) -> Result<(), JsValue> {
        self.update(|inner| inner.zoom(value))
    }

    /// Attach an unchecked `key_namespace:value` qualifier.
    #[wasm_bindgen(js_name = addParameter)]
    pub fn add_parameter(&mut self, key: &str, namespace: &str, value: &str) {
        self.inner = self
            .inner
            .clone()
            .add_parameter(Qualifier::generic(key, namespace, value));
    }

    /// The canonical string, e.g. `"c_scale,h_200,w_100"`.
    #[wasm_bindgen(js_name = toString)]
    pub fn render(&self) -> String {
        self.inner.to_string()
    }

    /// Structured form: `{name: "resize", parameters: [{crop_mode}, {width}, ...]}`.
    ///
    /// Each parameter is a single-entry object; the crop mode comes first.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        self.inner
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsResize {
    /// Apply a fallible builder step, keeping the current action on error.
    fn update(
        &mut self,
        step: impl FnOnce(Resize) -> TransformResult<Resize>,
    ) -> Result<(), JsValue> {
        self.inner = step(self.inner.clone()).map_err(to_js_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_named_modes() {
        assert_eq!(
            build("scale", Some(100.0), Some(200.0)).unwrap().to_string(),
            "c_scale,h_200,w_100"
        );
        assert_eq!(build("limitFit", None, None).unwrap().to_string(), "c_limit");
        assert!(build("squash", None, None).unwrap_err().is_type());
    }

    #[test]
    fn test_build_fill_pad_defaults_to_auto() {
        let action = build("fill_pad", Some(100.0), Some(200.0)).unwrap();
        assert_eq!(action.to_string(), "c_fill_pad,g_auto,h_200,w_100");
    }

    #[test]
    fn test_parse_compass() {
        assert_eq!(parse_compass("north_west").unwrap(), CompassGravity::NorthWest);
        assert!(parse_compass("auto").unwrap_err().is_type());
    }

    #[test]
    fn test_build_rejects_non_finite() {
        assert!(build("scale", Some(f64::NAN), None).unwrap_err().is_type());
        assert!(build("scale", None, Some(f64::INFINITY)).unwrap_err().is_type());
        assert_eq!(
            build("scale", Some(2.5), None).unwrap().to_string(),
            "c_scale,w_2.5"
        );
    }

    #[test]
    fn test_generic_checks_name_and_dimensions() {
        assert!(generic("", 100.0, 200.0).unwrap_err().is_type());
        assert!(generic("custom", f64::NAN, 200.0).unwrap_err().is_type());
        assert_eq!(
            generic("custom", 100.0, 200.0).unwrap().to_string(),
            "c_custom,h_200,w_100"
        );
    }

    #[test]
    fn test_setters_chain_in_place() {
        let mut action = JsResize::new("pad", Some(100.0), Some(200.0)).unwrap();
        action.offset(50.0, 100.0).unwrap();
        action.background("red").unwrap();
        assert_eq!(action.render(), "b_red,c_pad,h_200,w_100,x_50,y_100");
        assert_eq!(action.mode(), "pad");
    }

    #[test]
    fn test_position() {
        let mut action = JsResize::new("lpad", Some(100.0), Some(200.0)).unwrap();
        action.position("north_west", Some(50.0), Some(100.0)).unwrap();
        assert_eq!(
            action.render(),
            "c_lpad,g_north_west,h_200,w_100,x_50,y_100"
        );
    }

    #[test]
    fn test_generic_with_parameter() {
        let mut action = JsResize::generic("custom", 100.0, 200.0).unwrap();
        action.offset(10.0, 20.0).unwrap();
        action.add_parameter("cu", "v1", "17");
        assert_eq!(action.render(), "c_custom,cu_v1:17,h_200,w_100,x_10,y_20");
    }

    #[test]
    fn test_scale_liquid() {
        let mut action = JsResize::new("scale", Some(100.0), Some(200.0)).unwrap();
        action.liquid_rescaling().unwrap();
        action.ignore_aspect_ratio(true).unwrap();
        action.dpr(2.5).unwrap();
        assert_eq!(
            action.render(),
            "c_scale,dpr_2.5,fl_ignore_aspect_ratio,g_liquid,h_200,w_100"
        );
    }
}
