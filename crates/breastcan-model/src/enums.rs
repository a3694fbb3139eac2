//! Closed clinical enumerations.
//!
//! Every categorical field of a clinical snapshot is one of these enums.
//! Parsing is case-insensitive and trims surrounding whitespace, so values
//! typed into a form or a JSON document map onto a single canonical variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result of a single receptor assay (ER, PR or HER2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceptorResult {
    Positive,
    Negative,
}

impl ReceptorResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceptorResult::Positive => "positive",
            ReceptorResult::Negative => "negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, ReceptorResult::Positive)
    }
}

impl fmt::Display for ReceptorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReceptorResult {
    type Err = String;

    /// Accepts `positive`/`negative` and the `+`/`-` shorthand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(ReceptorResult::Positive),
            "negative" | "neg" | "-" => Ok(ReceptorResult::Negative),
            _ => Err(format!("Unknown receptor result: {s}")),
        }
    }
}

/// Histological tumor grade (Nottingham 1-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TumorGrade {
    Grade1,
    Grade2,
    Grade3,
}

impl TumorGrade {
    pub fn as_number(&self) -> u8 {
        match self {
            TumorGrade::Grade1 => 1,
            TumorGrade::Grade2 => 2,
            TumorGrade::Grade3 => 3,
        }
    }
}

impl TryFrom<u8> for TumorGrade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TumorGrade::Grade1),
            2 => Ok(TumorGrade::Grade2),
            3 => Ok(TumorGrade::Grade3),
            _ => Err(format!("Unknown tumor grade: {value}")),
        }
    }
}

impl From<TumorGrade> for u8 {
    fn from(grade: TumorGrade) -> Self {
        grade.as_number()
    }
}

impl fmt::Display for TumorGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl FromStr for TumorGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let digits = normalized
            .strip_prefix("GRADE")
            .or_else(|| normalized.strip_prefix('G'))
            .unwrap_or(&normalized)
            .trim();
        match digits {
            "1" => Ok(TumorGrade::Grade1),
            "2" => Ok(TumorGrade::Grade2),
            "3" => Ok(TumorGrade::Grade3),
            _ => Err(format!("Unknown tumor grade: {s}")),
        }
    }
}

/// Regional lymph node involvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    /// No regional lymph node metastasis.
    N0,
    /// Metastasis to movable ipsilateral axillary nodes.
    N1,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::N0 => "N0",
            NodeStatus::N1 => "N1",
        }
    }

    pub fn is_node_positive(&self) -> bool {
        matches!(self, NodeStatus::N1)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N0" => Ok(NodeStatus::N0),
            "N1" => Ok(NodeStatus::N1),
            _ => Err(format!("Unknown node status: {s}")),
        }
    }
}

/// Ki-67 proliferation index, dichotomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ki67 {
    Low,
    High,
}

impl Ki67 {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ki67::Low => "low",
            Ki67::High => "high",
        }
    }
}

impl fmt::Display for Ki67 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ki67 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Ki67::Low),
            "high" => Ok(Ki67::High),
            _ => Err(format!("Unknown Ki-67 level: {s}")),
        }
    }
}

/// Anatomic stage group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    I,
    II,
    III,
    IV,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::I => "I",
            Stage::II => "II",
            Stage::III => "III",
            Stage::IV => "IV",
        }
    }

    /// Stage I and II disease.
    pub fn is_early(&self) -> bool {
        matches!(self, Stage::I | Stage::II)
    }

    pub fn is_metastatic(&self) -> bool {
        matches!(self, Stage::IV)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    /// Accepts Roman numerals, Arabic digits and an optional `stage` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let value = normalized
            .strip_prefix("STAGE")
            .unwrap_or(&normalized)
            .trim();
        match value {
            "I" | "1" => Ok(Stage::I),
            "II" | "2" => Ok(Stage::II),
            "III" | "3" => Ok(Stage::III),
            "IV" | "4" => Ok(Stage::IV),
            _ => Err(format!("Unknown stage: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenopausalStatus {
    Premenopausal,
    Postmenopausal,
}

impl MenopausalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenopausalStatus::Premenopausal => "premenopausal",
            MenopausalStatus::Postmenopausal => "postmenopausal",
        }
    }
}

impl fmt::Display for MenopausalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MenopausalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "premenopausal" | "pre" => Ok(MenopausalStatus::Premenopausal),
            "postmenopausal" | "post" => Ok(MenopausalStatus::Postmenopausal),
            _ => Err(format!("Unknown menopausal status: {s}")),
        }
    }
}

/// ECOG performance status, 0 (fully active) to 5 (dead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PerformanceStatus(u8);

impl PerformanceStatus {
    pub const MAX: u8 = 5;

    /// Returns `None` when `value` is outside the ECOG scale.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PerformanceStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "ECOG performance status must be between 0 and {}, got {value}",
                Self::MAX
            )
        })
    }
}

impl From<PerformanceStatus> for u8 {
    fn from(status: PerformanceStatus) -> Self {
        status.0
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receptor_from_str() {
        assert_eq!(
            " Positive ".parse::<ReceptorResult>().unwrap(),
            ReceptorResult::Positive
        );
        assert_eq!(
            "NEG".parse::<ReceptorResult>().unwrap(),
            ReceptorResult::Negative
        );
        assert!("equivocal".parse::<ReceptorResult>().is_err());
    }

    #[test]
    fn test_stage_from_str() {
        assert_eq!("iii".parse::<Stage>().unwrap(), Stage::III);
        assert_eq!("4".parse::<Stage>().unwrap(), Stage::IV);
        assert_eq!("Stage II".parse::<Stage>().unwrap(), Stage::II);
        assert!("V".parse::<Stage>().is_err());
    }

    #[test]
    fn test_grade_from_str() {
        assert_eq!("G3".parse::<TumorGrade>().unwrap(), TumorGrade::Grade3);
        assert_eq!("2".parse::<TumorGrade>().unwrap(), TumorGrade::Grade2);
        assert!(TumorGrade::try_from(4).is_err());
    }

    #[test]
    fn test_performance_status_bounds() {
        assert_eq!(PerformanceStatus::new(5).map(|s| s.value()), Some(5));
        assert!(PerformanceStatus::new(6).is_none());
    }

    #[test]
    fn test_stage_ordering() {
        assert!(Stage::I < Stage::IV);
        assert!(Stage::II.is_early());
        assert!(!Stage::III.is_early());
    }
}
