use crate::{
    document::Exhibit,
    rules::{RuleViolation, non_blank},
};

pub fn location(exhibit: &Exhibit) -> Result<(), RuleViolation> {
    let location = exhibit
        .location
        .as_ref()
        .ok_or(RuleViolation::MissingSection("Location"))?;

    let on_display = location
        .on_display
        .filter(|value| !value.is_empty())
        .ok_or(RuleViolation::MissingField {
            section: "Location",
            field: "onDisplay",
        })?;
    non_blank(location.building).ok_or(RuleViolation::MissingField {
        section: "Location",
        field: "Building",
    })?;
    non_blank(location.room).ok_or(RuleViolation::MissingField {
        section: "Location",
        field: "Room",
    })?;

    // only the literal "true" counts, "1" does not
    if on_display == "true" && non_blank(location.display).is_none() {
        return Err(RuleViolation::DisplayRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::document::Location;

    fn at(location: Location<'_>) -> Exhibit<'_> {
        Exhibit {
            location: Some(location),
            ..Exhibit::default()
        }
    }

    fn placed<'a>(on_display: &'a str, display: Option<&'a str>) -> Location<'a> {
        Location {
            on_display: Some(on_display),
            building: Some("Main Building"),
            room: Some("Greek Hall"),
            display,
        }
    }

    #[test_case("true", Some("Case G-15"); "on display in a case")]
    #[test_case("false", None; "in storage")]
    #[test_case("1", None; "numeric true is not checked")]
    fn accepts(on_display: &str, display: Option<&str>) {
        assert_eq!(location(&at(placed(on_display, display))), Ok(()));
    }

    #[test_case(None; "absent")]
    #[test_case(Some("  "); "blank")]
    fn on_display_needs_a_display(display: Option<&str>) {
        assert_eq!(
            location(&at(placed("true", display))),
            Err(RuleViolation::DisplayRequired)
        );
    }

    #[test]
    fn missing_section() {
        assert_eq!(
            location(&Exhibit::default()),
            Err(RuleViolation::MissingSection("Location"))
        );
    }

    #[test]
    fn required_fields_in_order() {
        let mut place = Location::default();
        assert_eq!(
            location(&at(place.clone())),
            Err(RuleViolation::MissingField {
                section: "Location",
                field: "onDisplay"
            })
        );

        place.on_display = Some("false");
        assert_eq!(
            location(&at(place.clone())),
            Err(RuleViolation::MissingField {
                section: "Location",
                field: "Building"
            })
        );

        place.building = Some("Annex");
        place.room = Some("");
        assert_eq!(
            location(&at(place)),
            Err(RuleViolation::MissingField {
                section: "Location",
                field: "Room"
            })
        );
    }
}
