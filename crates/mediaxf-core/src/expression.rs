//! Conditional expressions.
//!
//! ```text
//! Expression := Operand Operator Operand (Operator Operand)*
//! ```
//!
//! An expression renders its operators by canonical token, never by alias,
//! and joins everything with `_`:
//!
//! ```ignore
//! let expr = Expression::new(Operand::var("width"), RelationalOperator::GreaterThan, 100)
//!     .then(LogicalOperator::And, Operand::var("height"))
//!     .then(RelationalOperator::LessThan, 300);
//! assert_eq!(expr.to_string(), "w_gt_100_and_h_lt_300");
//! ```
//!
//! String literals are quoted as `!text!`. Lists (the right-hand side of
//! `in` / `nin`) render as one quoted group with `:` between items, e.g.
//! `!sale:new!`.

use std::fmt;
use std::sync::OnceLock;

use crate::error::{TransformError, TransformResult};
use crate::number::Number;
use crate::operator::{
    ArithmeticOperator, LogicalOperator, Operator, RelationalOperator, StringRelationalOperator,
};

/// Separator between operands and operators.
pub const EXPRESSION_SEPARATOR: &str = "_";

/// Separator between items of a list operand.
pub const LIST_SEPARATOR: &str = ":";

const QUOTE: char = '!';
const LIST_SEPARATOR_CHAR: char = ':';

/// Predefined variable names and their short codes.
const PREDEFINED_VARIABLES: &[(&str, &str)] = &[
    ("width", "w"),
    ("height", "h"),
    ("aspect_ratio", "ar"),
    ("initial_width", "iw"),
    ("initial_height", "ih"),
    ("initial_aspect_ratio", "iar"),
    ("page_count", "pc"),
    ("current_page", "cp"),
    ("face_count", "fc"),
    ("duration", "du"),
    ("initial_duration", "idu"),
    ("illustration_score", "ils"),
    ("page_x", "px"),
    ("page_y", "py"),
    ("context", "ctx"),
    ("tags", "tags"),
];

/// Map a predefined variable name to its short code.
///
/// Short codes map to themselves; unknown names return `None`.
pub fn predefined_variable(name: &str) -> Option<&'static str> {
    PREDEFINED_VARIABLES
        .iter()
        .find(|(long, short)| *long == name || *short == name)
        .map(|(_, short)| *short)
}

/// One side of a comparison or arithmetic step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(Number),
    Text(String),
    Variable(String),
    List(Vec<String>),
    Expression(Box<Expression>),
}

impl Operand {
    pub fn number(value: impl Into<Number>) -> Self {
        Operand::Number(value.into())
    }

    /// A string literal, rendered quoted.
    ///
    /// # Errors
    /// Returns [`TransformError::Type`] if the text contains the `!` quote
    /// character.
    pub fn text(value: impl Into<String>) -> TransformResult<Self> {
        let value = value.into();
        check_literal(&value, &[QUOTE])?;
        Ok(Operand::Text(value))
    }

    /// A variable reference: a predefined name (`width`, `w`) or a user
    /// variable (`$size`).
    pub fn var(name: impl Into<String>) -> Self {
        Operand::Variable(name.into())
    }

    /// A list of string literals, rendered as one quoted group.
    ///
    /// # Errors
    /// Returns [`TransformError::Type`] if an item contains `!` or the `:`
    /// item separator.
    pub fn list<I, S>(items: I) -> TransformResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        for item in &items {
            check_literal(item, &[QUOTE, LIST_SEPARATOR_CHAR])?;
        }
        Ok(Operand::List(items))
    }
}

fn check_literal(text: &str, reserved: &[char]) -> TransformResult<()> {
    match text.chars().find(|c| reserved.contains(c)) {
        Some(c) => Err(TransformError::type_error(format!(
            "'{}' is not allowed in literal '{}'",
            c, text
        ))),
        None => Ok(()),
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Text(text) => write!(f, "{}{}{}", QUOTE, text, QUOTE),
            Operand::Variable(name) => {
                f.write_str(predefined_variable(name).unwrap_or(name.as_str()))
            }
            Operand::List(items) => write!(f, "{}{}{}", QUOTE, items.join(LIST_SEPARATOR), QUOTE),
            Operand::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl From<Number> for Operand {
    fn from(value: Number) -> Self {
        Operand::Number(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Number(value.into())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Number(value.into())
    }
}

impl From<Expression> for Operand {
    fn from(value: Expression) -> Self {
        Operand::Expression(Box::new(value))
    }
}

/// A chain of operands joined by operators.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    left: Operand,
    rest: Vec<(Operator, Operand)>,
}

impl Expression {
    pub fn new(
        left: impl Into<Operand>,
        op: impl Into<Operator>,
        right: impl Into<Operand>,
    ) -> Self {
        Self {
            left: left.into(),
            rest: vec![(op.into(), right.into())],
        }
    }

    /// Append another operator/operand pair.
    pub fn then(mut self, op: impl Into<Operator>, operand: impl Into<Operand>) -> Self {
        self.rest.push((op.into(), operand.into()));
        self
    }

    /// `variable in [items…]`
    pub fn is_in<I, S>(variable: impl Into<String>, items: I) -> TransformResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = Operand::list(items)?;
        Ok(Self::new(Operand::var(variable), StringRelationalOperator::In, items))
    }

    /// `variable nin [items…]`
    pub fn not_in<I, S>(variable: impl Into<String>, items: I) -> TransformResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = Operand::list(items)?;
        Ok(Self::new(Operand::var(variable), StringRelationalOperator::NotIn, items))
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.rest.iter().map(|(op, _)| *op)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left)?;
        for (op, operand) in &self.rest {
            write!(f, "{sep}{}{sep}{}", op, operand, sep = EXPRESSION_SEPARATOR)?;
        }
        Ok(())
    }
}

/// Normalize a human-typed expression into canonical form.
///
/// Words are separated by whitespace or by symbol operators, so
/// `width>100` and `width > 100` read the same. Operator aliases are replaced by
/// their canonical tokens (relational first, then string relational, logical
/// and arithmetic), predefined variable names by their short codes. Quoted
/// `!…!` literals are kept intact, spaces included.
///
/// `"width > 100 && height <= 200"` becomes `"w_gt_100_and_h_lte_200"`.
///
/// # Errors
/// Returns [`TransformError::Type`] for empty input, an unterminated quote,
/// or a stray `&`/`|` that is not part of an operator.
pub fn normalize_expression(raw: &str) -> TransformResult<String> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err(TransformError::type_error("empty expression"));
    }

    let normalized: Vec<String> = tokens.into_iter().map(normalize_token).collect();
    Ok(normalized.join(EXPRESSION_SEPARATOR))
}

fn normalize_token(token: &str) -> String {
    if is_quoted(token) {
        return token.to_string();
    }
    if let Some(op) = resolve_any(token) {
        return op.token().to_string();
    }
    predefined_variable(token).unwrap_or(token).to_string()
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with(QUOTE) && token.ends_with(QUOTE)
}

fn resolve_any(token: &str) -> Option<Operator> {
    RelationalOperator::resolve(token)
        .map(Operator::from)
        .or_else(|_| StringRelationalOperator::resolve(token).map(Operator::from))
        .or_else(|_| LogicalOperator::resolve(token).map(Operator::from))
        .or_else(|_| ArithmeticOperator::resolve(token).map(Operator::from))
        .ok()
}

/// Symbol aliases of every family (`<=`, `&&`, `+` …), longest first.
fn symbol_aliases() -> &'static [&'static str] {
    static SYMBOLS: OnceLock<Vec<&'static str>> = OnceLock::new();
    SYMBOLS.get_or_init(|| {
        let mut symbols: Vec<&'static str> = StringRelationalOperator::ALIASES
            .iter()
            .map(|(alias, _)| *alias)
            .chain(RelationalOperator::ALIASES.iter().map(|(alias, _)| *alias))
            .chain(LogicalOperator::ALIASES.iter().map(|(alias, _)| *alias))
            .chain(ArithmeticOperator::ALIASES.iter().map(|(alias, _)| *alias))
            .filter(|alias| !alias.chars().any(char::is_alphanumeric))
            .collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        symbols.dedup();
        symbols
    })
}

fn symbol_at(rest: &str) -> Option<&'static str> {
    symbol_aliases()
        .iter()
        .copied()
        .find(|symbol| rest.starts_with(symbol))
}

/// Split into words, symbol operators and `!quoted text!` literals.
///
/// Symbol operators need no surrounding whitespace (`width>100` is three
/// tokens). A `-` directly before a digit is a sign when it follows an
/// operator or starts the input.
fn tokenize(raw: &str) -> TransformResult<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut after_operator = true;
    let mut i = 0;

    while let Some(ch) = raw[i..].chars().next() {
        let rest = &raw[i..];
        if ch.is_whitespace() {
            i += ch.len_utf8();
            continue;
        }

        // `!=` is an operator, not the start of a quoted literal.
        if ch == QUOTE && !rest[1..].starts_with('=') {
            let close = rest[1..].find(QUOTE).ok_or_else(|| {
                TransformError::type_error(format!("unterminated quoted literal in '{}'", raw))
            })?;
            let len = close + 2;
            tokens.push(&rest[..len]);
            i += len;
            after_operator = false;
            continue;
        }

        let signed_number = ch == '-'
            && after_operator
            && rest[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.');
        if !signed_number {
            if let Some(symbol) = symbol_at(rest) {
                tokens.push(&rest[..symbol.len()]);
                i += symbol.len();
                after_operator = true;
                continue;
            }
        }

        let start = i;
        i += ch.len_utf8();
        while let Some(c) = raw[i..].chars().next() {
            if c.is_whitespace() || c == QUOTE || symbol_at(&raw[i..]).is_some() {
                break;
            }
            i += c.len_utf8();
        }
        let word = &raw[start..i];
        if word.contains(['&', '|']) {
            return Err(TransformError::type_error(format!(
                "unknown operator in '{}'",
                word
            )));
        }
        tokens.push(word);
        after_operator = resolve_any(word).is_some();
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_canonical_tokens() {
        let expr = Expression::new(
            Operand::var("width"),
            RelationalOperator::resolve(">").unwrap(),
            100,
        )
        .then(LogicalOperator::resolve("&&").unwrap(), Operand::var("height"))
        .then(RelationalOperator::LessThan, 300);

        assert_eq!(expr.to_string(), "w_gt_100_and_h_lt_300");
    }

    #[test]
    fn test_string_literal_quoted() {
        let expr = Expression::new(
            Operand::var("ctx"),
            StringRelationalOperator::Equal,
            Operand::text("sale").unwrap(),
        );
        assert_eq!(expr.to_string(), "ctx_eq_!sale!");
    }

    #[test]
    fn test_list_operand() {
        let expr = Expression::is_in("tags", ["sale", "new"]).unwrap();
        assert_eq!(expr.to_string(), "tags_in_!sale:new!");

        let expr = Expression::not_in("tags", vec!["archived".to_string()]).unwrap();
        assert_eq!(expr.to_string(), "tags_nin_!archived!");
    }

    #[test]
    fn test_literals_reject_quote_character() {
        assert!(Operand::text("a!b").unwrap_err().is_type());
        assert!(Operand::list(["ok", "bad!"]).unwrap_err().is_type());
        assert!(Operand::list(["a:b"]).unwrap_err().is_type());
        assert!(Expression::is_in("tags", ["x!y"]).is_err());
        assert_eq!(Operand::text("a b").unwrap().to_string(), "!a b!");
    }

    #[test]
    fn test_user_variable_passes_through() {
        let expr = Expression::new(Operand::var("$size"), ArithmeticOperator::Multiply, 2);
        assert_eq!(expr.to_string(), "$size_mul_2");
    }

    #[test]
    fn test_nested_expression_inline() {
        let inner = Expression::new(Operand::var("iw"), ArithmeticOperator::Divide, 2);
        let expr = Expression::new(Operand::var("w"), RelationalOperator::GreaterThan, inner);
        assert_eq!(expr.to_string(), "w_gt_iw_div_2");
    }

    #[test]
    fn test_float_operand() {
        let ratio = Number::try_from(0.75).unwrap();
        let expr = Expression::new(Operand::var("aspect_ratio"), RelationalOperator::LessThan, ratio);
        assert_eq!(expr.to_string(), "ar_lt_0.75");
    }

    #[test]
    fn test_operators_iterator() {
        let expr = Expression::is_in("tags", ["a"]).unwrap();
        let ops: Vec<&str> = expr.operators().map(Operator::token).collect();
        assert_eq!(ops, vec!["in"]);
        assert_eq!(expr.left(), &Operand::var("tags"));
    }

    #[test]
    fn test_predefined_variables() {
        assert_eq!(predefined_variable("width"), Some("w"));
        assert_eq!(predefined_variable("w"), Some("w"));
        assert_eq!(predefined_variable("initial_aspect_ratio"), Some("iar"));
        assert_eq!(predefined_variable("$mine"), None);
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(
            normalize_expression("width > 100 && height <= 200").unwrap(),
            "w_gt_100_and_h_lte_200"
        );
        assert_eq!(
            normalize_expression("face_count != 0 || $x * 2 >= iw").unwrap(),
            "fc_ne_0_or_$x_mul_2_gte_iw"
        );
    }

    #[test]
    fn test_normalize_keeps_canonical_input() {
        assert_eq!(normalize_expression("w gt 100").unwrap(), "w_gt_100");
    }

    #[test]
    fn test_normalize_quoted_literal_with_spaces() {
        assert_eq!(
            normalize_expression("ctx = !summer sale!").unwrap(),
            "ctx_eq_!summer sale!"
        );
        assert_eq!(
            normalize_expression("tags in !a:b!").unwrap(),
            "tags_in_!a:b!"
        );
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        assert!(normalize_expression("   ").unwrap_err().is_type());
        assert!(normalize_expression("ctx = !open").unwrap_err().is_type());
    }

    #[test]
    fn test_normalize_not_equal_is_not_a_quote() {
        assert_eq!(normalize_expression("ctx != !x!").unwrap(), "ctx_ne_!x!");
    }

    #[test]
    fn test_normalize_negative_number_not_operator() {
        assert_eq!(normalize_expression("x > -5").unwrap(), "x_gt_-5");
        assert_eq!(normalize_expression("-5 < x").unwrap(), "-5_lt_x");
        assert_eq!(normalize_expression("iw - 5 > 0").unwrap(), "iw_sub_5_gt_0");
    }

    #[test]
    fn test_normalize_without_spaces() {
        assert_eq!(
            normalize_expression("width>100&&height<=200").unwrap(),
            "w_gt_100_and_h_lte_200"
        );
        assert_eq!(normalize_expression("x>-5").unwrap(), "x_gt_-5");
        assert_eq!(normalize_expression("iw-5>=0").unwrap(), "iw_sub_5_gte_0");
        assert_eq!(normalize_expression("ctx!=!x!").unwrap(), "ctx_ne_!x!");
        assert_eq!(normalize_expression("ctx=!a b!").unwrap(), "ctx_eq_!a b!");
    }

    #[test]
    fn test_normalize_rejects_stray_operator_characters() {
        assert!(normalize_expression("w & h").unwrap_err().is_type());
        assert!(normalize_expression("w|h").unwrap_err().is_type());
    }

    #[test]
    fn test_symbol_aliases_longest_first() {
        let symbols = symbol_aliases();
        assert!(symbols.windows(2).all(|pair| pair[0].len() >= pair[1].len()));
        assert!(symbols.contains(&"<="));
        assert!(!symbols.contains(&"in"));
    }
}
