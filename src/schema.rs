//! Structural schemas and the walker that checks documents against them.
//!
//! The exhibit schema is static data defined once for the whole process and
//! shared read-only by every validator.

mod definition;
mod exhibit;
mod walker;

pub use definition::{
    Attribute, ComplexType, Content, ElementDecl, Enumeration, Occurs, Schema, SimpleType,
};
pub use exhibit::{
    ACQUISITION_METHOD, CATEGORY, CONDITION, EXHIBIT_SCHEMA, NAMESPACE, STATUS, UNIT,
};
pub use walker::StructuralValidator;
