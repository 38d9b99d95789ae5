use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    document::{Exhibit, Exhibition},
    domain::historical_date::parse_calendar,
    rules::{RuleContext, RuleViolation},
    schema::SimpleType,
};

pub fn history(exhibit: &Exhibit, context: &RuleContext) -> Result<(), RuleViolation> {
    let Some(history) = exhibit.history.as_ref() else {
        return Ok(());
    };

    if let Some(acquisition) = &history.acquisition {
        if let Some(date) = acquisition.date {
            let acquired = parse_calendar(date)
                .ok_or_else(|| RuleViolation::AcquisitionDate(date.to_string()))?;
            if acquired > context.now() {
                return Err(RuleViolation::FutureAcquisition(date.to_string()));
            }
        }

        if let Some(price) = acquisition.price {
            let valid = SimpleType::Decimal.check(price).is_ok()
                && Decimal::from_str(price.trim()).is_ok_and(|price| price >= Decimal::ZERO);
            if !valid {
                return Err(RuleViolation::Price(price.to_string()));
            }
        }
    }

    for (index, exhibition) in history.exhibitions.iter().enumerate() {
        exhibition_dates(index + 1, exhibition)?;
    }
    Ok(())
}

/// Only checked when both dates are present and readable.
fn exhibition_dates(index: usize, exhibition: &Exhibition) -> Result<(), RuleViolation> {
    let (Some(start), Some(end)) = (exhibition.start_date, exhibition.end_date) else {
        return Ok(());
    };
    let (Some(starts), Some(ends)) = (parse_calendar(start), parse_calendar(end)) else {
        return Ok(());
    };

    if starts < ends {
        Ok(())
    } else {
        Err(RuleViolation::ExhibitionDates {
            index,
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}
