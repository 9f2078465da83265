//! Mediaxf WASM - WebAssembly bindings for Mediaxf
//!
//! This crate exposes the mediaxf-core descriptor builders to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `resize` - Resize action builder (`JsResize`)
//! - `range` - Frame-rate ranges (`JsFps`)
//! - `expression` - Expression normalization and operator lookup
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsResize, normalize_expression } from '@mediaxf/wasm';
//!
//! await init();
//!
//! const action = new JsResize('pad', 100, 200);
//! action.background('red');
//! console.log(action.toString()); // "b_red,c_pad,h_200,w_100"
//!
//! normalize_expression('width > 100 && height <= 200'); // "w_gt_100_and_h_lte_200"
//! ```
//!
//! Every fallible call throws a string carrying the core error message.

use mediaxf_core::TransformError;
use wasm_bindgen::prelude::*;

mod expression;
mod range;
mod resize;

pub use expression::{normalize_expression, operator_aliases, resolve_operator};
pub use range::JsFps;
pub use resize::JsResize;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a core error into the value thrown to JavaScript.
///
/// The message is also written to the browser console as a warning.
pub(crate) fn to_js_error(err: TransformError) -> JsValue {
    let message = err.to_string();
    let value = JsValue::from_str(&message);
    web_sys::console::warn_1(&value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
