//! Domain layer - key directory model and errors

pub mod error;
pub mod key_directory;

pub use error::DomainError;
pub use key_directory::{
    ApiKeyRecord, ApiKeySummary, ApiStage, KeyDirectory, KeyLookup, ScopingPolicy, UsagePlan,
    UsagePlanKey,
};
