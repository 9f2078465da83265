//! Operator registry for conditional expressions.
//!
//! Each operator family is a closed enum. A family maps human-facing aliases
//! (`=`, `!=`, `<=`, `&&` …) to its kinds through an alias table that is
//! built once, on first lookup, and never mutated afterwards. Every kind
//! renders as a fixed canonical token (`eq`, `ne`, `lte`, `and` …).
//!
//! | Family | Kinds |
//! |---|---|
//! | [`StringRelationalOperator`] | `eq` `ne` `in` `nin` |
//! | [`RelationalOperator`] | `eq` `ne` `lt` `gt` `lte` `gte` |
//! | [`LogicalOperator`] | `and` `or` |
//! | [`ArithmeticOperator`] | `add` `sub` `mul` `div` `mod` `pow` |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{TransformError, TransformResult};

/// The operator families known to the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    StringRelational,
    Relational,
    Logical,
    Arithmetic,
}

impl OperatorFamily {
    pub const ALL: [OperatorFamily; 4] = [
        OperatorFamily::StringRelational,
        OperatorFamily::Relational,
        OperatorFamily::Logical,
        OperatorFamily::Arithmetic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OperatorFamily::StringRelational => "string relational",
            OperatorFamily::Relational => "relational",
            OperatorFamily::Logical => "logical",
            OperatorFamily::Arithmetic => "arithmetic",
        }
    }
}

impl fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatorFamily {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "stringrelational" | "string" => Ok(OperatorFamily::StringRelational),
            "relational" => Ok(OperatorFamily::Relational),
            "logical" => Ok(OperatorFamily::Logical),
            "arithmetic" => Ok(OperatorFamily::Arithmetic),
            _ => Err(TransformError::type_error(format!(
                "unknown operator family '{}'",
                s
            ))),
        }
    }
}

/// Defines one operator family: the enum, its tokens and its alias table.
macro_rules! operator_family {
    (
        $(#[$meta:meta])*
        $name:ident => $family:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $token:literal [$($alias:literal),* $(,)?] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Alias/kind pairs; aliases must be unique within the family.
            pub const ALIASES: &'static [(&'static str, $name)] = &[
                $( $( ($alias, $name::$variant), )* )+
            ];

            pub const fn family() -> OperatorFamily {
                OperatorFamily::$family
            }

            /// The canonical token, e.g. `eq`.
            pub const fn token(self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }

            fn alias_table() -> &'static HashMap<&'static str, $name> {
                static TABLE: OnceLock<HashMap<&'static str, $name>> = OnceLock::new();
                TABLE.get_or_init(|| Self::ALIASES.iter().copied().collect())
            }

            /// Resolve a user-facing alias (or a canonical token) to its kind.
            ///
            /// # Errors
            /// Returns [`TransformError::Lookup`] if the alias is not part of
            /// this family.
            pub fn resolve(alias: &str) -> TransformResult<Self> {
                let alias = alias.trim();
                if let Some(kind) = Self::alias_table().get(alias) {
                    return Ok(*kind);
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|kind| kind.token() == alias)
                    .ok_or_else(|| TransformError::Lookup {
                        family: OperatorFamily::$family.name(),
                        alias: alias.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $name {
            type Err = TransformError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::resolve(s)
            }
        }

        impl From<$name> for Operator {
            fn from(kind: $name) -> Self {
                Operator::$family(kind)
            }
        }
    };
}

operator_family! {
    /// Comparisons between string operands.
    StringRelationalOperator => StringRelational {
        Equal = "eq" ["="],
        NotEqual = "ne" ["!="],
        /// Left operand is one of a list of strings.
        In = "in" ["in"],
        /// Left operand is none of a list of strings.
        NotIn = "nin" ["nin"],
    }
}

impl StringRelationalOperator {
    pub const fn equal() -> Self {
        StringRelationalOperator::Equal
    }

    pub const fn not_equal() -> Self {
        StringRelationalOperator::NotEqual
    }

    pub const fn is_in() -> Self {
        StringRelationalOperator::In
    }

    pub const fn not_in() -> Self {
        StringRelationalOperator::NotIn
    }
}

operator_family! {
    /// Numeric comparisons.
    RelationalOperator => Relational {
        Equal = "eq" ["=", "=="],
        NotEqual = "ne" ["!="],
        LessThan = "lt" ["<"],
        GreaterThan = "gt" [">"],
        LessThanOrEqual = "lte" ["<="],
        GreaterThanOrEqual = "gte" [">="],
    }
}

operator_family! {
    /// Boolean connectives between sub-conditions.
    LogicalOperator => Logical {
        And = "and" ["&&"],
        Or = "or" ["||"],
    }
}

operator_family! {
    /// Arithmetic on numeric operands.
    ArithmeticOperator => Arithmetic {
        Add = "add" ["+"],
        Subtract = "sub" ["-"],
        Multiply = "mul" ["*"],
        Divide = "div" ["/"],
        Modulo = "mod" ["%"],
        Power = "pow" ["^"],
    }
}

/// An operator from any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    StringRelational(StringRelationalOperator),
    Relational(RelationalOperator),
    Logical(LogicalOperator),
    Arithmetic(ArithmeticOperator),
}

impl Operator {
    pub fn token(self) -> &'static str {
        match self {
            Operator::StringRelational(op) => op.token(),
            Operator::Relational(op) => op.token(),
            Operator::Logical(op) => op.token(),
            Operator::Arithmetic(op) => op.token(),
        }
    }

    pub fn family(self) -> OperatorFamily {
        match self {
            Operator::StringRelational(_) => OperatorFamily::StringRelational,
            Operator::Relational(_) => OperatorFamily::Relational,
            Operator::Logical(_) => OperatorFamily::Logical,
            Operator::Arithmetic(_) => OperatorFamily::Arithmetic,
        }
    }

    /// Resolve an alias within the given family.
    pub fn resolve_in(family: OperatorFamily, alias: &str) -> TransformResult<Self> {
        match family {
            OperatorFamily::StringRelational => {
                StringRelationalOperator::resolve(alias).map(Into::into)
            }
            OperatorFamily::Relational => RelationalOperator::resolve(alias).map(Into::into),
            OperatorFamily::Logical => LogicalOperator::resolve(alias).map(Into::into),
            OperatorFamily::Arithmetic => ArithmeticOperator::resolve(alias).map(Into::into),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_string_relational_aliases() {
        let eq = StringRelationalOperator::resolve("=").unwrap();
        let ne = StringRelationalOperator::resolve("!=").unwrap();
        assert_ne!(eq, ne);
        assert_eq!(eq.token(), "eq");
        assert_eq!(ne.token(), "ne");
        assert_eq!(StringRelationalOperator::resolve("in").unwrap().token(), "in");
        assert_eq!(StringRelationalOperator::resolve("nin").unwrap().token(), "nin");
    }

    #[test]
    fn test_unknown_alias_is_lookup_error() {
        let err = StringRelationalOperator::resolve("~=").unwrap_err();
        assert!(err.is_lookup());
        assert_eq!(err.to_string(), "Unknown string relational operator: '~='");
    }

    #[test]
    fn test_alias_not_shared_across_families() {
        // `<` is relational only.
        assert!(StringRelationalOperator::resolve("<").is_err());
        assert_eq!(RelationalOperator::resolve("<").unwrap(), RelationalOperator::LessThan);
    }

    #[test]
    fn test_canonical_token_resolves_to_itself() {
        for op in RelationalOperator::ALL {
            assert_eq!(RelationalOperator::resolve(op.token()).unwrap(), *op);
        }
        for op in ArithmeticOperator::ALL {
            assert_eq!(op.token().parse::<ArithmeticOperator>().unwrap(), *op);
        }
    }

    #[test]
    fn test_factories() {
        assert_eq!(StringRelationalOperator::equal().token(), "eq");
        assert_eq!(StringRelationalOperator::not_equal().token(), "ne");
        assert_eq!(StringRelationalOperator::is_in().token(), "in");
        assert_eq!(StringRelationalOperator::not_in().token(), "nin");
    }

    #[test]
    fn test_aliases_unique_within_family() {
        fn unique<T>(aliases: &[(&str, T)]) -> bool {
            let set: HashSet<&str> = aliases.iter().map(|(a, _)| *a).collect();
            set.len() == aliases.len()
        }
        assert!(unique(StringRelationalOperator::ALIASES));
        assert!(unique(RelationalOperator::ALIASES));
        assert!(unique(LogicalOperator::ALIASES));
        assert!(unique(ArithmeticOperator::ALIASES));
    }

    #[test]
    fn test_operator_carries_family() {
        let op: Operator = LogicalOperator::And.into();
        assert_eq!(op.family(), OperatorFamily::Logical);
        assert_eq!(op.token(), "and");
        assert_eq!(op.to_string(), "and");
        assert_eq!(LogicalOperator::family(), OperatorFamily::Logical);
    }

    #[test]
    fn test_resolve_in_family() {
        let op = Operator::resolve_in(OperatorFamily::Relational, ">=").unwrap();
        assert_eq!(op, Operator::Relational(RelationalOperator::GreaterThanOrEqual));

        let op = Operator::resolve_in(OperatorFamily::Arithmetic, "^").unwrap();
        assert_eq!(op.token(), "pow");

        let err = Operator::resolve_in(OperatorFamily::Logical, "and also").unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!(
            "string_relational".parse::<OperatorFamily>().unwrap(),
            OperatorFamily::StringRelational
        );
        assert_eq!("Logical".parse::<OperatorFamily>().unwrap(), OperatorFamily::Logical);
        assert!("bitwise".parse::<OperatorFamily>().unwrap_err().is_type());
    }
}
