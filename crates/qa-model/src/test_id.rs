//! Canonical identifiers for radiology equipment compliance tests.
//!
//! Each identifier owns its own header namespace in the dictionary, so the
//! same column text can resolve to different fields under different tests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A compliance test whose measurements can be extracted from a spreadsheet.
///
/// The serialized form is the camelCase name that report forms bind to
/// (e.g. `accuracyOfOperatingPotential`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestId {
    /// Measured kVp against the console setting.
    AccuracyOfOperatingPotential,
    /// Measured exposure time against the set time.
    AccuracyOfIrradiationTime,
    /// Output (mGy/mAs) across mA stations at fixed time.
    LinearityOfMaLoading,
    /// Output (mGy/mAs) across mAs settings.
    LinearityOfMasLoading,
    /// Repeated exposures at identical settings (coefficient of variation).
    ConsistencyOfRadiationOutput,
    /// Half value layer and total filtration of the beam.
    TotalFiltration,
    /// Tube housing leakage measured at 1 m around the housing.
    RadiationLeakageLevel,
    /// Area survey of the installation (control panel, doors, walls).
    RadiationProtectionSurvey,
    /// Light field versus radiation field edge misalignment.
    CongruenceOfRadiation,
    /// Central ray tilt relative to the image receptor.
    CentralBeamAlignment,
    /// Focal spot dimensions against the nominal size.
    EffectiveFocalSpot,
    /// Smallest visible hole size on a contrast phantom.
    LowContrastResolution,
    /// Line pairs per mm on a resolution phantom.
    HighContrastResolution,
}

impl TestId {
    /// Every test identifier, in declaration order.
    pub const ALL: [TestId; 13] = [
        TestId::AccuracyOfOperatingPotential,
        TestId::AccuracyOfIrradiationTime,
        TestId::LinearityOfMaLoading,
        TestId::LinearityOfMasLoading,
        TestId::ConsistencyOfRadiationOutput,
        TestId::TotalFiltration,
        TestId::RadiationLeakageLevel,
        TestId::RadiationProtectionSurvey,
        TestId::CongruenceOfRadiation,
        TestId::CentralBeamAlignment,
        TestId::EffectiveFocalSpot,
        TestId::LowContrastResolution,
        TestId::HighContrastResolution,
    ];

    /// Returns the camelCase identifier used as the grouping key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestId::AccuracyOfOperatingPotential => "accuracyOfOperatingPotential",
            TestId::AccuracyOfIrradiationTime => "accuracyOfIrradiationTime",
            TestId::LinearityOfMaLoading => "linearityOfMaLoading",
            TestId::LinearityOfMasLoading => "linearityOfMasLoading",
            TestId::ConsistencyOfRadiationOutput => "consistencyOfRadiationOutput",
            TestId::TotalFiltration => "totalFiltration",
            TestId::RadiationLeakageLevel => "radiationLeakageLevel",
            TestId::RadiationProtectionSurvey => "radiationProtectionSurvey",
            TestId::CongruenceOfRadiation => "congruenceOfRadiation",
            TestId::CentralBeamAlignment => "centralBeamAlignment",
            TestId::EffectiveFocalSpot => "effectiveFocalSpot",
            TestId::LowContrastResolution => "lowContrastResolution",
            TestId::HighContrastResolution => "highContrastResolution",
        }
    }

    /// Human-readable title, as printed on the report.
    pub fn title(&self) -> &'static str {
        match self {
            TestId::AccuracyOfOperatingPotential => "Accuracy of Operating Potential",
            TestId::AccuracyOfIrradiationTime => "Accuracy of Irradiation Time",
            TestId::LinearityOfMaLoading => "Linearity of mA Loading",
            TestId::LinearityOfMasLoading => "Linearity of mAs Loading",
            TestId::ConsistencyOfRadiationOutput => "Consistency of Radiation Output",
            TestId::TotalFiltration => "Total Filtration",
            TestId::RadiationLeakageLevel => "Radiation Leakage Level from X-Ray Tube House",
            TestId::RadiationProtectionSurvey => "Radiation Protection Survey",
            TestId::CongruenceOfRadiation => "Congruence of Radiation and Optical Field",
            TestId::CentralBeamAlignment => "Central Beam Alignment",
            TestId::EffectiveFocalSpot => "Effective Focal Spot Size",
            TestId::LowContrastResolution => "Low Contrast Resolution",
            TestId::HighContrastResolution => "High Contrast Resolution",
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TestId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownTest(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_name() {
        for id in TestId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "LinearityOfMaLoading".parse::<TestId>().unwrap(),
            TestId::LinearityOfMaLoading
        );
        assert_eq!(
            " radiationleakagelevel ".parse::<TestId>().unwrap(),
            TestId::RadiationLeakageLevel
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "kvpAccuracy".parse::<TestId>().unwrap_err();
        assert_eq!(err, ModelError::UnknownTest("kvpAccuracy".to_string()));
    }
}
