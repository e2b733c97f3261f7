use serde::Serialize;

use super::RenderableZone;
use crate::config::SeismicCalibration;

const ENERGY_FLOOR_MT: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeismicZone {
    pub mmi: u8,
    pub radius_km: f64,
    pub effects: &'static str,
    pub color: &'static str,
}

impl RenderableZone for SeismicZone {
    fn zone_name(&self) -> String {
        format!("seismic_mmi_{}", self.mmi)
    }

    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn color(&self) -> &'static str {
        self.color
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeismicReport {
    pub magnitude_richter: f64,
    pub zones: Vec<SeismicZone>,
}

fn describe(mmi: u8) -> (&'static str, &'static str) {
    match mmi {
        11.. => ("Total destruction, ground displacement", "#4B0082"),
        9..=10 => ("Most structures destroyed", "#8B008B"),
        7..=8 => ("Considerable building damage", "#9370DB"),
        5..=6 => ("Strong shaking, cracked walls", "#BA55D3"),
        _ => ("Noticeable swaying", "#DDA0DD"),
    }
}

pub fn seismic_zones(energy_mt: f64, cal: &SeismicCalibration) -> SeismicReport {
    let energy_mt = energy_mt.max(ENERGY_FLOOR_MT);
    let magnitude_richter = cal.magnitude_slope * energy_mt.log10() + cal.magnitude_offset;
    let scale = energy_mt.powf(cal.radius_exponent);

    let zones = cal
        .bands
        .iter()
        .map(|band| {
            let (effects, color) = describe(band.mmi);
            SeismicZone {
                mmi: band.mmi,
                radius_km: band.coefficient * scale,
                effects,
                color,
            }
        })
        .collect();

    log::debug!("seismic: E={energy_mt:.3} Mt, M={magnitude_richter:.2}");

    SeismicReport {
        magnitude_richter,
        zones,
    }
}
