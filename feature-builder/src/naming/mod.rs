//! Naming conventions for generated code
//!
//! [`NameHelpers`] holds the string transforms; [`NamingContext`] derives
//! every shared identifier once from a [`FeatureConfig`](crate::model::FeatureConfig)
//! so that all generators agree on them.

pub mod context;
pub mod helpers;

pub use context::{EndpointNames, NamingContext, RelationNames};
pub use helpers::NameHelpers;
