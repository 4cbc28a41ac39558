//! Strongly-typed domain types for safer APIs.
//!
//! Newtypes and small enums that keep grid sizes, physical extents and the
//! string-keyed run options (convention, precision, engine) from being mixed
//! up with plain integers and strings.
//!
//! # Example
//!
//! ```
//! use vox_rs::types::{Convention, Extent3D, Resolution3D};
//!
//! let res = Convention::StaggeredX.resolution(16);
//! assert_eq!(res, Resolution3D::new(17, 16, 16));
//!
//! let extent = Extent3D::unit_cube();
//! assert_eq!(extent.volume(), 1.0);
//! ```

mod convention;
mod extent;
mod resolution;

pub use convention::{
    BackendKind, Convention, ParseBackendError, ParseConventionError, ParsePrecisionError,
    Precision,
};
pub use extent::Extent3D;
pub use resolution::Resolution3D;
