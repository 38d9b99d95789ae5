//! Exhibit documents: the element tree, the XML reader that builds it and a
//! typed view over the exhibit record.

mod exhibit;
mod parser;
mod sanitize;
mod tree;

pub use exhibit::{
    Acquisition, BasicInfo, Dimensions, Exhibit, Exhibition, History, Image, Location, Media,
    Technical,
};
pub use parser::{ParseError, parse};
pub use sanitize::sanitize;
pub use tree::{Document, Element};
