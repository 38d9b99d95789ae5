//! The exhibit record schema.

use crate::schema::definition::{
    Attribute, ComplexType, ElementDecl, Enumeration, Occurs, Schema, SimpleType,
};

use Occurs::{ExactlyOne, OneOrMore, ZeroOrMore, ZeroOrOne};

/// Namespace of exhibit documents.
pub const NAMESPACE: &str = "http://museum.example.com/exhibit";

/// Object categories.
pub static CATEGORY: Enumeration = Enumeration {
    name: "Category",
    values: &[
        "Painting",
        "Sculpture",
        "Pottery",
        "Jewelry",
        "Textile",
        "Weapon",
        "Tool",
        "Coin",
        "Manuscript",
        "Photograph",
        "Other",
    ],
};

/// Lifecycle status of an exhibit.
pub static STATUS: Enumeration = Enumeration {
    name: "Status",
    values: &[
        "Active",
        "OnLoan",
        "InConservation",
        "Deaccessioned",
        "Missing",
    ],
};

/// State of preservation.
pub static CONDITION: Enumeration = Enumeration {
    name: "Condition",
    values: &["Excellent", "Good", "Fair", "Poor", "Critical"],
};

/// Units for physical dimensions.
pub static UNIT: Enumeration = Enumeration {
    name: "Unit",
    values: &["cm", "mm", "m", "in", "ft"],
};

/// How an exhibit entered the collection.
pub static ACQUISITION_METHOD: Enumeration = Enumeration {
    name: "AcquisitionMethod",
    values: &[
        "Purchase", "Donation", "Bequest", "Exchange", "Transfer", "Found",
    ],
};

static EXHIBIT_TYPE: ComplexType = ComplexType {
    name: "ExhibitType",
    attributes: &[
        Attribute {
            name: "id",
            ty: SimpleType::String,
            required: true,
        },
        Attribute {
            name: "status",
            ty: SimpleType::Enumeration(&STATUS),
            required: true,
        },
    ],
    children: &[
        ElementDecl::complex("BasicInfo", ExactlyOne, &BASIC_INFO_TYPE),
        ElementDecl::complex("Description", ExactlyOne, &DESCRIPTION_TYPE),
        ElementDecl::complex("Technical", ExactlyOne, &TECHNICAL_TYPE),
        ElementDecl::complex("Location", ExactlyOne, &LOCATION_TYPE),
        ElementDecl::complex("History", ZeroOrOne, &HISTORY_TYPE),
        ElementDecl::complex("Media", ZeroOrOne, &MEDIA_TYPE),
    ],
};

static BASIC_INFO_TYPE: ComplexType = ComplexType {
    name: "BasicInfoType",
    attributes: &[],
    children: &[
        ElementDecl::text("Title", ExactlyOne),
        ElementDecl::simple("Category", ExactlyOne, SimpleType::Enumeration(&CATEGORY)),
        ElementDecl::text("SubCategory", ZeroOrOne),
        ElementDecl::text("Creator", ZeroOrOne),
        ElementDecl::text("DateCreated", ZeroOrOne),
        ElementDecl::text("Period", ZeroOrOne),
        ElementDecl::text("Culture", ZeroOrOne),
    ],
};

static DESCRIPTION_TYPE: ComplexType = ComplexType {
    name: "DescriptionType",
    attributes: &[],
    children: &[
        ElementDecl::text("ShortDescription", ExactlyOne),
        ElementDecl::text("DetailedDescription", ZeroOrOne),
        ElementDecl::text("Significance", ZeroOrOne),
        ElementDecl::complex("Tags", ZeroOrOne, &TAGS_TYPE),
    ],
};

static TAGS_TYPE: ComplexType = ComplexType {
    name: "TagsType",
    attributes: &[],
    children: &[ElementDecl::text("Tag", OneOrMore)],
};

static TECHNICAL_TYPE: ComplexType = ComplexType {
    name: "TechnicalType",
    attributes: &[],
    children: &[
        ElementDecl::complex("Dimensions", ZeroOrOne, &DIMENSIONS_TYPE),
        ElementDecl::text("Weight", ZeroOrOne),
        ElementDecl::text("Material", OneOrMore),
        ElementDecl::text("Technique", ZeroOrOne),
        ElementDecl::simple("Condition", ExactlyOne, SimpleType::Enumeration(&CONDITION)),
        ElementDecl::text("ConservationNotes", ZeroOrOne),
    ],
};

static DIMENSIONS_TYPE: ComplexType = ComplexType {
    name: "DimensionsType",
    attributes: &[Attribute {
        name: "unit",
        ty: SimpleType::Enumeration(&UNIT),
        required: true,
    }],
    children: &[
        ElementDecl::simple("Height", ZeroOrOne, SimpleType::Double),
        ElementDecl::simple("Width", ZeroOrOne, SimpleType::Double),
        ElementDecl::simple("Depth", ZeroOrOne, SimpleType::Double),
        ElementDecl::simple("Diameter", ZeroOrOne, SimpleType::Double),
    ],
};

static LOCATION_TYPE: ComplexType = ComplexType {
    name: "LocationType",
    attributes: &[Attribute {
        name: "onDisplay",
        ty: SimpleType::Boolean,
        required: true,
    }],
    children: &[
        ElementDecl::text("Building", ExactlyOne),
        ElementDecl::text("Floor", ZeroOrOne),
        ElementDecl::text("Room", ExactlyOne),
        ElementDecl::text("Display", ZeroOrOne),
        ElementDecl::text("StorageLocation", ZeroOrOne),
    ],
};

static HISTORY_TYPE: ComplexType = ComplexType {
    name: "HistoryType",
    attributes: &[],
    children: &[
        ElementDecl::complex("Acquisition", ZeroOrOne, &ACQUISITION_TYPE),
        ElementDecl::text("Provenance", ZeroOrOne),
        ElementDecl::complex("Exhibitions", ZeroOrOne, &EXHIBITIONS_TYPE),
    ],
};

static ACQUISITION_TYPE: ComplexType = ComplexType {
    name: "AcquisitionType",
    attributes: &[],
    children: &[
        ElementDecl::simple("Date", ExactlyOne, SimpleType::Date),
        ElementDecl::simple(
            "Method",
            ExactlyOne,
            SimpleType::Enumeration(&ACQUISITION_METHOD),
        ),
        ElementDecl::text("Source", ExactlyOne),
        ElementDecl::simple("Price", ZeroOrOne, SimpleType::Decimal),
        ElementDecl::text("Currency", ZeroOrOne),
    ],
};

static EXHIBITIONS_TYPE: ComplexType = ComplexType {
    name: "ExhibitionsType",
    attributes: &[],
    children: &[ElementDecl::complex(
        "Exhibition",
        OneOrMore,
        &EXHIBITION_TYPE,
    )],
};

static EXHIBITION_TYPE: ComplexType = ComplexType {
    name: "ExhibitionType",
    attributes: &[],
    children: &[
        ElementDecl::text("Name", ExactlyOne),
        ElementDecl::text("Location", ExactlyOne),
        ElementDecl::simple("StartDate", ExactlyOne, SimpleType::Date),
        ElementDecl::simple("EndDate", ExactlyOne, SimpleType::Date),
    ],
};

static MEDIA_TYPE: ComplexType = ComplexType {
    name: "MediaType",
    attributes: &[],
    children: &[ElementDecl::complex("Image", ZeroOrMore, &IMAGE_TYPE)],
};

static IMAGE_TYPE: ComplexType = ComplexType {
    name: "ImageType",
    attributes: &[Attribute {
        name: "primary",
        ty: SimpleType::Boolean,
        required: false,
    }],
    children: &[
        ElementDecl::text("FileName", ExactlyOne),
        ElementDecl::text("Description", ZeroOrOne),
    ],
};

/// The schema every exhibit document is checked against.
pub static EXHIBIT_SCHEMA: Schema = Schema {
    namespace: NAMESPACE,
    root: ElementDecl::complex("Exhibit", ExactlyOne, &EXHIBIT_TYPE),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::Content;

    fn complex(decl: &ElementDecl) -> &'static ComplexType {
        match decl.content {
            Content::Complex(ty) => ty,
            Content::Simple(_) => panic!("{} is a simple element", decl.name),
        }
    }

    #[test]
    fn top_level_sections() {
        let exhibit = complex(&EXHIBIT_SCHEMA.root);
        let sections: Vec<_> = exhibit
            .children
            .iter()
            .map(|child| (child.name, child.occurs))
            .collect();
        assert_eq!(
            sections,
            vec![
                ("BasicInfo", ExactlyOne),
                ("Description", ExactlyOne),
                ("Technical", ExactlyOne),
                ("Location", ExactlyOne),
                ("History", ZeroOrOne),
                ("Media", ZeroOrOne),
            ]
        );
        assert!(exhibit.attributes.iter().all(|attribute| attribute.required));
    }

    #[test]
    fn enumerations_are_closed() {
        assert!(CATEGORY.contains("Manuscript"));
        assert!(!CATEGORY.contains("Furniture"));
        assert!(STATUS.contains("OnLoan"));
        assert!(CONDITION.contains("Critical"));
        assert!(!CONDITION.contains("Broken"));
        assert!(UNIT.contains("ft"));
        assert!(!UNIT.contains("km"));
    }

    #[test]
    fn outline_lists_nested_elements() {
        let outline = EXHIBIT_SCHEMA.to_string();
        assert!(outline.starts_with("namespace: http://museum.example.com/exhibit\n"));
        assert!(outline.contains("Exhibit [1]\n"));
        assert!(outline.contains("  @id: string (required)\n"));
        assert!(outline.contains("    Condition [1]: Condition {Excellent, Good, Fair, Poor, Critical}\n"));
        assert!(outline.contains("      @primary: boolean\n"));
    }
}
