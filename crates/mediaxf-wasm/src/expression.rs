//! Expression and operator WASM bindings.

use crate::to_js_error;
use mediaxf_core::expression;
use mediaxf_core::{
    ArithmeticOperator, LogicalOperator, Operator, OperatorFamily, RelationalOperator,
    StringRelationalOperator,
};
use wasm_bindgen::prelude::*;

/// Normalize a human-typed expression into canonical form.
///
/// # Example (TypeScript)
/// ```typescript
/// normalize_expression('width > 100 && height <= 200'); // "w_gt_100_and_h_lte_200"
/// ```
///
/// # Errors
/// Throws for empty input or an unterminated `!quote!`.
#[wasm_bindgen]
pub fn normalize_expression(raw: &str) -> Result<String, JsValue> {
    expression::normalize_expression(raw).map_err(to_js_error)
}

/// Resolve an operator alias within a family to its canonical token.
///
/// `family` is one of `string_relational`, `relational`, `logical`,
/// `arithmetic`.
///
/// # Errors
/// Throws for an unknown family or an alias outside the family.
#[wasm_bindgen]
pub fn resolve_operator(family: &str, alias: &str) -> Result<String, JsValue> {
    resolve(family, alias).map_err(to_js_error)
}

/// List the aliases of a family as `[alias, token]` pairs.
#[wasm_bindgen]
pub fn operator_aliases(family: &str) -> Result<js_sys::Array, JsValue> {
    let family: OperatorFamily = family.parse().map_err(to_js_error)?;
    let pairs = js_sys::Array::new();
    for (alias, token) in aliases(family) {
        let pair = js_sys::Array::of2(&JsValue::from_str(alias), &JsValue::from_str(token));
        pairs.push(&pair);
    }
    Ok(pairs)
}

fn resolve(family: &str, alias: &str) -> mediaxf_core::TransformResult<String> {
    let family: OperatorFamily = family.parse()?;
    Ok(Operator::resolve_in(family, alias)?.token().to_string())
}

fn aliases(family: OperatorFamily) -> Vec<(&'static str, &'static str)> {
    fn pairs<T: Copy>(
        table: &'static [(&'static str, T)],
        token: fn(T) -> &'static str,
    ) -> Vec<(&'static str, &'static str)> {
        table.iter().map(|(alias, kind)| (*alias, token(*kind))).collect()
    }

    match family {
        OperatorFamily::StringRelational => {
            pairs(StringRelationalOperator::ALIASES, StringRelationalOperator::token)
        }
        OperatorFamily::Relational => pairs(RelationalOperator::ALIASES, RelationalOperator::token),
        OperatorFamily::Logical => pairs(LogicalOperator::ALIASES, LogicalOperator::token),
        OperatorFamily::Arithmetic => pairs(ArithmeticOperator::ALIASES, ArithmeticOperator::token),
    }
}


/// WASM-specific tests that require JsValue.
///
/// Error paths and `js_sys::Array` results can only run on wasm32 targets.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unknown_alias_throws_message() {
        let err = resolve_operator("string_relational", "~=").unwrap_err();
        assert_eq!(
            err.as_string().unwrap(),
            "Unknown string relational operator: '~='"
        );
    }

    #[wasm_bindgen_test]
    fn test_empty_expression_throws() {
        assert!(normalize_expression("  ").is_err());
    }

    #[wasm_bindgen_test]
    fn test_operator_aliases_array() {
        let pairs = operator_aliases("logical").unwrap();
        assert_eq!(pairs.length(), 2);
        let first = js_sys::Array::from(&pairs.get(0));
        assert_eq!(first.get(0).as_string().unwrap(), "&&");
        assert_eq!(first.get(1).as_string().unwrap(), "and");
    }
}
