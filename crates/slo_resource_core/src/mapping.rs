use crate::conversion::{float_to_tpm, tpm_to_float};
use crate::error::HandlerError;
use crate::model::{ResourceModel, SliRef, Slo};

pub fn required_dataset(model: &ResourceModel) -> Result<&str, HandlerError> {
    required_text(model.dataset.as_deref(), "Dataset")
}

pub fn required_id(model: &ResourceModel) -> Result<&str, HandlerError> {
    required_text(model.id.as_deref(), "ID")
}

/// Builds the remote entity for a Create (`with_id == false`) or an Update.
pub fn slo_from_model(model: &ResourceModel, with_id: bool) -> Result<Slo, HandlerError> {
    let id = if with_id {
        Some(required_id(model)?.to_string())
    } else {
        None
    };
    let name = required_text(model.name.as_deref(), "Name")?;
    let time_period_days = model
        .time_period
        .ok_or(HandlerError::MissingProperty("TimePeriod"))?;
    let target_percentage = model
        .target_percentage
        .ok_or(HandlerError::MissingProperty("TargetPercentage"))?;
    let sli = required_text(model.sli.as_deref(), "SLI")?;

    if !target_percentage.is_finite() || !(0.0..=100.0).contains(&target_percentage) {
        return Err(HandlerError::InvalidProperty {
            property: "TargetPercentage",
            reason: format!("{target_percentage} is not between 0 and 100"),
        });
    }

    Ok(Slo {
        id,
        name: name.to_string(),
        description: model.description.clone(),
        time_period_days,
        target_per_million: float_to_tpm(target_percentage),
        sli: SliRef {
            alias: sli.to_string(),
        },
    })
}

/// Overwrites the model's SLO properties with what the remote service holds.
pub fn apply_slo(model: &mut ResourceModel, slo: &Slo) {
    model.name = Some(slo.name.clone());
    model.description = slo.description.clone();
    model.sli = Some(slo.sli.alias.clone());
    model.target_percentage = Some(tpm_to_float(slo.target_per_million));
    model.time_period = Some(slo.time_period_days);
}

fn required_text<'a>(
    value: Option<&'a str>,
    property: &'static str,
) -> Result<&'a str, HandlerError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(HandlerError::MissingProperty(property)),
    }
}
