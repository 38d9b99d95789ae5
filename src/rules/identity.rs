use crate::{
    document::Exhibit,
    domain::{ExhibitId, HistoricalDate},
    rules::{MAX_TEXT_LENGTH, RuleContext, RuleViolation, non_blank},
};

pub fn identifier(exhibit: &Exhibit) -> Result<(), RuleViolation> {
    let id = exhibit
        .id
        .filter(|id| !id.is_empty())
        .ok_or(RuleViolation::MissingId)?;
    ExhibitId::try_from(id)?;
    Ok(())
}

pub fn basic_info(exhibit: &Exhibit, context: &RuleContext) -> Result<(), RuleViolation> {
    let basic_info = exhibit
        .basic_info
        .as_ref()
        .ok_or(RuleViolation::MissingSection("BasicInfo"))?;

    let title = non_blank(basic_info.title).ok_or(RuleViolation::MissingField {
        section: "BasicInfo",
        field: "Title",
    })?;
    let length = title.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(RuleViolation::TooLong {
            field: "Title",
            length,
        });
    }

    non_blank(basic_info.category).ok_or(RuleViolation::MissingField {
        section: "BasicInfo",
        field: "Category",
    })?;

    if let Some(value) = basic_info.date_created.filter(|value| !value.is_empty()) {
        HistoricalDate::parse_at(value, context.now()).map_err(|source| {
            RuleViolation::DateCreated {
                value: value.to_string(),
                source,
            }
        })?;
    }

    Ok(())
}
