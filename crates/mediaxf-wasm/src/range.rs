//! Frame-rate range WASM bindings.

use crate::to_js_error;
use mediaxf_core::{Fps, RangeParams};
use wasm_bindgen::prelude::*;

/// JavaScript-accessible `fps_<min>:<max>` qualifier.
///
/// # Example (TypeScript)
/// ```typescript
/// JsFps.fromParams([24, 30]).toString();   // "fps_24:30"
/// JsFps.fromParams({ max: 60 }).toString(); // "fps_:60"
/// JsFps.fromParams(25).toString();          // "fps_25"
/// ```
#[wasm_bindgen]
#[derive(Default)]
pub struct JsFps {
    inner: Fps,
}

#[wasm_bindgen]
impl JsFps {
    /// Create an empty range. Renders as an empty string until a bound is set.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFps {
        JsFps::default()
    }

    /// Build from a scalar, a `[min, max]` array or a `{min, max}` object.
    ///
    /// # Errors
    /// Throws for any other shape, more than two values, unknown keys or
    /// non-numeric bounds.
    #[wasm_bindgen(js_name = fromParams)]
    pub fn from_params(value: JsValue) -> Result<JsFps, JsValue> {
        let params: RangeParams = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid range parameters: {}", e)))?;
        let inner = Fps::from_params(params).map_err(to_js_error)?;
        Ok(JsFps { inner })
    }

    /// # Errors
    /// Throws for NaN or an infinite bound; the range is left unchanged.
    pub fn min(&mut self, value: f64) -> Result<(), JsValue> {
        self.inner = self.inner.min(value).map_err(to_js_error)?;
        Ok(())
    }

    pub fn max(&mut self, value: f64) -> Result<(), JsValue> {
        self.inner = self.inner.max(value).map_err(to_js_error)?;
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = minValue)]
    pub fn min_value(&self) -> Option<f64> {
        self.inner.range().min_value().map(|n| n.as_f64())
    }

    #[wasm_bindgen(getter, js_name = maxValue)]
    pub fn max_value(&self) -> Option<f64> {
        self.inner.range().max_value().map(|n| n.as_f64())
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn render(&self) -> String {
        self.inner.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_nothing() {
        let fps = JsFps::new();
        assert_eq!(fps.render(), "");
        assert_eq!(fps.min_value(), None);
    }

    #[test]
    fn test_bounds() {
        let mut fps = JsFps::new();
        fps.min(24.0).unwrap();
        fps.max(29.97).unwrap();
        assert_eq!(fps.render(), "fps_24:29.97");
        assert_eq!(fps.min_value(), Some(24.0));
        assert_eq!(fps.max_value(), Some(29.97));
    }
}

/// WASM-specific tests that require JsValue.
///
/// These tests use `JsFps::from_params`, which takes a `JsValue` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_array() {
        let value = serde_wasm_bindgen::to_value(&vec![24, 30]).unwrap();
        assert_eq!(JsFps::from_params(value).unwrap().render(), "fps_24:30");
    }

    #[wasm_bindgen_test]
    fn test_from_scalar() {
        let value = serde_wasm_bindgen::to_value(&25).unwrap();
        assert_eq!(JsFps::from_params(value).unwrap().render(), "fps_25");
    }

    #[wasm_bindgen_test]
    fn test_from_object() {
        let mut map = BTreeMap::new();
        map.insert("max", 60);
        let value = map
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap();
        assert_eq!(JsFps::from_params(value).unwrap().render(), "fps_:60");
    }

    #[wasm_bindgen_test]
    fn test_rejects_too_many_values() {
        let value = serde_wasm_bindgen::to_value(&vec![1, 2, 3]).unwrap();
        assert!(JsFps::from_params(value).is_err());
    }

    #[wasm_bindgen_test]
    fn test_non_finite_bounds_throw() {
        let mut fps = JsFps::new();
        fps.min(24.0).unwrap();
        assert!(fps.min(f64::NAN).is_err());
        assert!(fps.max(f64::INFINITY).is_err());
        assert_eq!(fps.render(), "fps_24");
    }

    #[wasm_bindgen_test]
    fn test_rejects_text_bound() {
        let value = serde_wasm_bindgen::to_value(&vec!["fast", "slow"]).unwrap();
        assert!(JsFps::from_params(value).is_err());
    }
}
