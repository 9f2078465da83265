//! Chained transformations and conditional blocks.
//!
//! Components render in insertion order, joined by `/`. A conditional block
//! renders as `if_<expr>/<then…>/if_else/<else…>/if_end`.

use std::fmt;

use crate::error::TransformResult;
use crate::expression::{normalize_expression, Expression};
use crate::param::Qualifier;
use crate::resize::Resize;

/// Separator between chained components.
pub const COMPONENT_SEPARATOR: &str = "/";

/// The guard of a conditional block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    expression: String,
}

impl Condition {
    pub fn new(expression: &Expression) -> Self {
        Self {
            expression: expression.to_string(),
        }
    }

    /// Build a condition from a human-typed expression such as
    /// `"width > 100 && height <= 200"`.
    pub fn parse(raw: &str) -> TransformResult<Self> {
        Ok(Self {
            expression: normalize_expression(raw)?,
        })
    }

    /// The canonical expression, without the `if_` prefix.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl From<Expression> for Condition {
    fn from(expression: Expression) -> Self {
        Condition::new(&expression)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if_{}", self.expression)
    }
}

/// One step of a [`Transformation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Action(Resize),
    Qualifier(Qualifier),
    /// Pre-rendered text, emitted as is.
    Raw(String),
    Conditional {
        condition: Condition,
        then: Transformation,
        otherwise: Option<Transformation>,
    },
}

impl Component {
    fn render(&self) -> String {
        match self {
            Component::Action(action) => action.to_string(),
            Component::Qualifier(qualifier) => qualifier.to_string(),
            Component::Raw(text) => text.clone(),
            Component::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let mut parts = vec![condition.to_string()];
                parts.extend(then.rendered_parts());
                if let Some(otherwise) = otherwise {
                    parts.push("if_else".to_string());
                    parts.extend(otherwise.rendered_parts());
                }
                parts.push("if_end".to_string());
                parts.join(COMPONENT_SEPARATOR)
            }
        }
    }
}

/// An ordered chain of components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformation {
    components: Vec<Component>,
}

impl Transformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize(self, action: Resize) -> Self {
        self.push(Component::Action(action))
    }

    pub fn qualifier(self, qualifier: Qualifier) -> Self {
        self.push(Component::Qualifier(qualifier))
    }

    pub fn raw(self, text: impl Into<String>) -> Self {
        self.push(Component::Raw(text.into()))
    }

    pub fn if_then(self, condition: impl Into<Condition>, then: Transformation) -> Self {
        self.push(Component::Conditional {
            condition: condition.into(),
            then,
            otherwise: None,
        })
    }

    pub fn if_then_else(
        self,
        condition: impl Into<Condition>,
        then: Transformation,
        otherwise: Transformation,
    ) -> Self {
        self.push(Component::Conditional {
            condition: condition.into(),
            then,
            otherwise: Some(otherwise),
        })
    }

    pub fn push(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.rendered_parts().is_empty()
    }

    fn rendered_parts(&self) -> Vec<String> {
        self.components
            .iter()
            .map(Component::render)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered_parts().join(COMPONENT_SEPARATOR))
    }
}

impl From<Resize> for Transformation {
    fn from(action: Resize) -> Self {
        Transformation::new().resize(action)
    }
}
