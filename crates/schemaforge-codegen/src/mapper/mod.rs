//! Type mapping from one column to its three target representations.
//!
//! Each mapper is a pure function, total over the column type vocabulary.
//! Unknown type tags (and enum references that do not resolve) fall back to
//! plain text in every target.

mod storage;
mod surface;
mod validation;

pub use storage::{to_storage_type, Modifier, StorageConstructor, StorageType};
pub use surface::{to_surface_type, Surface, SurfaceType};
pub use validation::{
    to_validation_expression, Refinement, ValidationBase, ValidationExpr, DECIMAL_PATTERN,
    LAT_LNG_PATTERN,
};
