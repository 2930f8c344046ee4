//! Entity model for the lab workspace.
//!
//! This crate provides the value types manipulated through the workspace
//! API. Every other labws crate depends on `labws-objects`.
//!
//! # Key Types
//!
//! - [`SignalObject`] — 1-D signal: x/y arrays plus optional error bars
//! - [`ImageObject`] — 2-D image: row-major data plus optional coordinates
//! - [`DataObject`] — closed tagged variant over the two kinds
//! - [`Metadata`] — insertion-ordered scalar key/value attributes
//!
//! Array shapes are validated at construction time: a `SignalObject` whose
//! `x` and `y` lengths differ, or an `ImageObject` whose `rows * cols` does
//! not match its data length, is rejected with [`ObjectError`] before it can
//! ever reach a store.

pub mod error;
pub mod image;
pub mod metadata;
pub mod object;
pub mod signal;

pub use error::{ObjectError, ObjectResult};
pub use image::ImageObject;
pub use metadata::{MetaValue, Metadata};
pub use object::{DataObject, ObjectKind};
pub use signal::SignalObject;
