//! Testing utilities and harness for Twig

pub mod assertions;
pub mod query;
mod rule;
mod shape;

pub use rule::RenderTestRule;
pub use shape::NodeShape;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::query::*;
    pub use crate::rule::RenderTestRule;
    pub use crate::shape::NodeShape;
}
