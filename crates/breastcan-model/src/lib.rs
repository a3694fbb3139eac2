pub mod enums;
pub mod recommendation;
pub mod snapshot;

pub use enums::{
    Ki67, MenopausalStatus, NodeStatus, PerformanceStatus, ReceptorResult, Stage, TumorGrade,
};
pub use recommendation::{Category, LinePriority, RecommendationLine};
pub use snapshot::{ClinicalSnapshot, PatientContext, ReceptorStatus, TumorCharacteristics};
