use anyhow::{Result, ensure};
use geo::Polygon;

/// The regulatory envelope of a parcel: the maximal legally buildable area after setbacks,
/// together with the caps that bound the building placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildableEnvelope {
    /// Buildable area after setbacks, ring of `[lng, lat]` vertices
    pub buildable_footprint: Polygon<f64>,
    /// Total parcel area in square feet, denominator of FAR and coverage
    pub parcel_sqft: f64,
    /// Maximum floor area ratio (GFA / parcel area)
    pub far_cap: f64,
    /// Maximum footprint-to-parcel ratio, in percent (0-100)
    pub coverage_cap_pct: f64,
    /// Maximum building height in feet
    pub height_cap_ft: f64,
}

impl BuildableEnvelope {
    /// Checks the numeric invariants the preview engine relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.parcel_sqft.is_finite() && self.parcel_sqft > 0.0,
            "parcel area must be positive, got {} sqft",
            self.parcel_sqft
        );
        ensure!(
            self.far_cap.is_finite() && self.far_cap >= 0.0,
            "FAR cap must be non-negative, got {}",
            self.far_cap
        );
        ensure!(
            self.coverage_cap_pct.is_finite() && self.coverage_cap_pct >= 0.0,
            "coverage cap must be non-negative, got {}%",
            self.coverage_cap_pct
        );
        ensure!(
            self.height_cap_ft.is_finite() && self.height_cap_ft >= 0.0,
            "height cap must be non-negative, got {} ft",
            self.height_cap_ft
        );
        Ok(())
    }

    /// Largest footprint the coverage cap allows, in square feet
    pub fn max_footprint_from_coverage_sqft(&self) -> f64 {
        self.coverage_cap_pct / 100.0 * self.parcel_sqft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn envelope() -> BuildableEnvelope {
        BuildableEnvelope {
            buildable_footprint: polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
            parcel_sqft: 10_000.0,
            far_cap: 2.0,
            coverage_cap_pct: 50.0,
            height_cap_ft: 40.0,
        }
    }

    #[test]
    fn coverage_ceiling() {
        assert_eq!(envelope().max_footprint_from_coverage_sqft(), 5000.0);
    }

    #[test]
    fn rejects_non_positive_parcel() {
        assert!(envelope().validate().is_ok());
        let zero = BuildableEnvelope {
            parcel_sqft: 0.0,
            ..envelope()
        };
        assert!(zero.validate().is_err());
        let nan_cap = BuildableEnvelope {
            far_cap: f64::NAN,
            ..envelope()
        };
        assert!(nan_cap.validate().is_err());
    }
}
