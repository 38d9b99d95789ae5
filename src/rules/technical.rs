use crate::{
    document::Exhibit,
    rules::{RuleViolation, non_blank},
    schema::{CONDITION, UNIT},
};

/// Largest accepted measurement, in whatever unit the record uses.
pub const MAX_DIMENSION: f64 = 10_000.0;

pub fn dimensions(exhibit: &Exhibit) -> Result<(), RuleViolation> {
    let Some(dimensions) = exhibit
        .technical
        .as_ref()
        .and_then(|technical| technical.dimensions.as_ref())
    else {
        return Ok(());
    };

    let unit = dimensions
        .unit
        .filter(|unit| !unit.is_empty())
        .ok_or(RuleViolation::MissingField {
            section: "Dimensions",
            field: "unit",
        })?;
    if !UNIT.contains(unit) {
        return Err(RuleViolation::Unit(unit.to_string()));
    }

    let mut measured = false;
    for (field, value) in dimensions.measurements() {
        let Some(value) = value else {
            continue;
        };
        measured = true;

        let number: f64 = value
            .trim()
            .parse()
            .map_err(|_| RuleViolation::NotANumber {
                field,
                value: value.to_string(),
            })?;
        if !number.is_finite() || number <= 0.0 || number > MAX_DIMENSION {
            return Err(RuleViolation::DimensionOutOfRange {
                field,
                value: number,
            });
        }
    }

    if measured {
        Ok(())
    } else {
        Err(RuleViolation::NoMeasurements)
    }
}

pub fn condition(exhibit: &Exhibit) -> Result<(), RuleViolation> {
    let technical = exhibit
        .technical
        .as_ref()
        .ok_or(RuleViolation::MissingSection("Technical"))?;

    let condition = non_blank(technical.condition).ok_or(RuleViolation::MissingField {
        section: "Technical",
        field: "Condition",
    })?;
    if CONDITION.contains(condition) {
        Ok(())
    } else {
        Err(RuleViolation::Condition(condition.to_string()))
    }
}
