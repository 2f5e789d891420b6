pub mod analysis;
pub mod api_connection;
pub mod assistant;
pub mod barcode;
pub mod cli;
pub mod config;
pub mod dietary_plan;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod knowledge;
pub mod profile;

pub use analysis::{AllergenDetection, AnalysisRequest, AnalysisResult, SafetyAssessment};
pub use dietary_plan::DietaryPlan;
pub use engine::AllergyEngine;
pub use error::EngineError;
pub use knowledge::{AllergenDefinition, KnowledgeBase, Severity};
pub use profile::UserAllergyProfile;
