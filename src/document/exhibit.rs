//! A typed view of the parts of an exhibit record the business rules read.
//!
//! Elements are looked up by local name only, so the view works the same
//! whatever namespace the document uses. Every field is optional: the view
//! reflects what is in the tree and leaves judging it to the rules.

use crate::document::{Document, Element};

fn text<'a>(parent: &'a Element, name: &str) -> Option<&'a str> {
    parent.child(name).map(Element::text)
}

/// The exhibit record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exhibit<'a> {
    /// The `id` attribute.
    pub id: Option<&'a str>,
    /// The `status` attribute.
    pub status: Option<&'a str>,
    /// The `BasicInfo` section.
    pub basic_info: Option<BasicInfo<'a>>,
    /// The `Technical` section.
    pub technical: Option<Technical<'a>>,
    /// The `Location` section.
    pub location: Option<Location<'a>>,
    /// The `History` section.
    pub history: Option<History<'a>>,
    /// The `Media` section.
    pub media: Option<Media<'a>>,
}

impl<'a> Exhibit<'a> {
    /// Builds the view from the record's root element.
    #[must_use]
    pub fn new(root: &'a Element) -> Self {
        Self {
            id: root.attribute("id"),
            status: root.attribute("status"),
            basic_info: root.child("BasicInfo").map(BasicInfo::new),
            technical: root.child("Technical").map(Technical::new),
            location: root.child("Location").map(Location::new),
            history: root.child("History").map(History::new),
            media: root.child("Media").map(Media::new),
        }
    }
}

impl<'a> From<&'a Document> for Exhibit<'a> {
    fn from(document: &'a Document) -> Self {
        Self::new(document.root())
    }
}

/// The `BasicInfo` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfo<'a> {
    /// `Title` text.
    pub title: Option<&'a str>,
    /// `Category` text.
    pub category: Option<&'a str>,
    /// `DateCreated` text, a historical date expression.
    pub date_created: Option<&'a str>,
}

impl<'a> BasicInfo<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            title: text(element, "Title"),
            category: text(element, "Category"),
            date_created: text(element, "DateCreated"),
        }
    }
}

/// The `Technical` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Technical<'a> {
    /// The `Dimensions` subsection.
    pub dimensions: Option<Dimensions<'a>>,
    /// `Condition` text.
    pub condition: Option<&'a str>,
}

impl<'a> Technical<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            dimensions: element.child("Dimensions").map(Dimensions::new),
            condition: text(element, "Condition"),
        }
    }
}

/// The `Dimensions` subsection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dimensions<'a> {
    /// The `unit` attribute.
    pub unit: Option<&'a str>,
    /// `Height` text.
    pub height: Option<&'a str>,
    /// `Width` text.
    pub width: Option<&'a str>,
    /// `Depth` text.
    pub depth: Option<&'a str>,
    /// `Diameter` text.
    pub diameter: Option<&'a str>,
}

impl<'a> Dimensions<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            unit: element.attribute("unit"),
            height: text(element, "Height"),
            width: text(element, "Width"),
            depth: text(element, "Depth"),
            diameter: text(element, "Diameter"),
        }
    }

    /// Returns each measurement with its element name, in schema order.
    #[must_use]
    pub const fn measurements(&self) -> [(&'static str, Option<&'a str>); 4] {
        [
            ("Height", self.height),
            ("Width", self.width),
            ("Depth", self.depth),
            ("Diameter", self.diameter),
        ]
    }
}

/// The `Location` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location<'a> {
    /// The `onDisplay` attribute.
    pub on_display: Option<&'a str>,
    /// `Building` text.
    pub building: Option<&'a str>,
    /// `Room` text.
    pub room: Option<&'a str>,
    /// `Display` text.
    pub display: Option<&'a str>,
}

impl<'a> Location<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            on_display: element.attribute("onDisplay"),
            building: text(element, "Building"),
            room: text(element, "Room"),
            display: text(element, "Display"),
        }
    }
}

/// The `History` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History<'a> {
    /// The `Acquisition` subsection.
    pub acquisition: Option<Acquisition<'a>>,
    /// Entries under `Exhibitions`, in document order.
    pub exhibitions: Vec<Exhibition<'a>>,
}

impl<'a> History<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            acquisition: element.child("Acquisition").map(Acquisition::new),
            exhibitions: element
                .child("Exhibitions")
                .map(|exhibitions| {
                    exhibitions
                        .children_named("Exhibition")
                        .map(Exhibition::new)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// The `Acquisition` subsection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acquisition<'a> {
    /// `Date` text.
    pub date: Option<&'a str>,
    /// `Price` text.
    pub price: Option<&'a str>,
}

impl<'a> Acquisition<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            date: text(element, "Date"),
            price: text(element, "Price"),
        }
    }
}

/// One `Exhibition` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exhibition<'a> {
    /// `StartDate` text.
    pub start_date: Option<&'a str>,
    /// `EndDate` text.
    pub end_date: Option<&'a str>,
}

impl<'a> Exhibition<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            start_date: text(element, "StartDate"),
            end_date: text(element, "EndDate"),
        }
    }
}

/// The `Media` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media<'a> {
    /// `Image` entries, in document order.
    pub images: Vec<Image<'a>>,
}

impl<'a> Media<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            images: element.children_named("Image").map(Image::new).collect(),
        }
    }
}

/// One `Image` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image<'a> {
    /// The `primary` attribute.
    pub primary: Option<&'a str>,
    /// `FileName` text.
    pub file_name: Option<&'a str>,
}

impl<'a> Image<'a> {
    fn new(element: &'a Element) -> Self {
        Self {
            primary: element.attribute("primary"),
            file_name: text(element, "FileName"),
        }
    }

    /// Returns `true` if the image is marked as the primary image.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.primary == Some("true")
    }
}
