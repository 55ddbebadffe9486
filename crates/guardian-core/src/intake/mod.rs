//! Form intake: parsing, validation and normalization.
//!
//! Raw submissions are schema-checked (when they arrive as JSON or YAML),
//! validated field by field, and normalized into a [`Pothole`] or
//! [`Supplier`] with every derived field filled in.
//!
//! [`Pothole`]: crate::types::Pothole
//! [`Supplier`]: crate::types::Supplier

mod form;
mod normalize;
mod schema;
mod validate;

pub use form::{RoadForm, SupplyForm, NEW_ID_SENTINEL};
pub use normalize::{normalize_road, normalize_supply};
pub use schema::{check_road_form, check_supply_form};
pub use validate::{RoadFields, SupplyFields, ValidationError};
