//! Key directory domain: records, lookup results and scoping policy

mod directory;
mod entity;
mod policy;

pub use directory::KeyDirectory;
pub use entity::{
    stage_key_matches, ApiKeyRecord, ApiKeySummary, ApiStage, KeyLookup, UsagePlan, UsagePlanKey,
};
pub use policy::ScopingPolicy;

#[cfg(test)]
pub use directory::{mock, MockKeyDirectory};
