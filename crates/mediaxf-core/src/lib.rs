//! Mediaxf Core - Media transformation descriptors
//!
//! This crate builds the canonical URL fragments that a media delivery
//! service uses to transform images and video on the fly: resize actions
//! (`c_pad,h_200,w_100`), value ranges (`fps_24:30`), conditional
//! expressions (`if_w_gt_100/…/if_end`) and the operator tables behind them.
//!
//! Nothing here touches pixels or performs I/O. Every builder is a plain
//! owned value, every check runs eagerly, and rendering is a pure function of
//! the value.

pub mod background;
pub mod chain;
pub mod error;
pub mod expression;
pub mod gravity;
pub mod number;
pub mod operator;
pub mod param;
pub mod resize;
pub mod serialize;

pub use background::Background;
pub use chain::{Component, Condition, Transformation};
pub use error::{TransformError, TransformResult};
pub use expression::{normalize_expression, Expression, Operand};
pub use gravity::{CompassGravity, CompassPosition, Gravity};
pub use number::{Number, NumericInput, RawValue};
pub use operator::{
    ArithmeticOperator, LogicalOperator, Operator, OperatorFamily, RelationalOperator,
    StringRelationalOperator,
};
pub use param::{Fps, MinMaxRange, Qualifier, QualifierValue, RangeParams};
pub use resize::{Capabilities, CropMode, GravitySupport, Resize};
pub use serialize::{serialize, ParameterSet};
