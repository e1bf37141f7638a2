//! Annual solar yield estimation from a daily irradiance climatology

use crate::config::{PANEL_EFFICIENCY, SYSTEM_DERATE};
use crate::error::{Result, SunroofError};
use crate::models::IrradianceSeries;

/// Mean of the valid daily irradiance observations, in kWh/m^2/day.
///
/// Missing or non-numeric days are dropped, not treated as zero. Fails with
/// [`SunroofError::NoData`] when nothing usable remains.
pub fn mean_daily_irradiance(series: &IrradianceSeries) -> Result<f64> {
    let mut total = 0.0;
    let mut count: usize = 0;

    for value in series.values().flatten() {
        if value.is_finite() {
            total += value;
            count += 1;
        }
    }

    if count == 0 {
        return Err(SunroofError::NoData);
    }
    Ok(total / count as f64)
}

/// Estimated annual electrical yield in kWh for a footprint of `area_sqm`.
///
/// The arithmetic (365-day annualization, panel efficiency, system derate,
/// and the final /1000 scaling) is carried over verbatim from the reference
/// behaviour; the scaling constant is intentionally not "corrected".
pub fn estimate_annual_yield(series: &IrradianceSeries, area_sqm: f64) -> Result<f64> {
    let avg_daily = mean_daily_irradiance(series)?;
    let annual_irradiation = avg_daily * 365.0;
    Ok(annual_irradiation * area_sqm * PANEL_EFFICIENCY * SYSTEM_DERATE / 1000.0)
}
