//! Key gateway service
//!
//! Lists and validates API keys for one REST API on top of a [`KeyDirectory`],
//! applying the configured [`ScopingPolicy`] client-side.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::domain::{
    ApiKeyRecord, ApiKeySummary, DomainError, KeyDirectory, KeyLookup, ScopingPolicy, UsagePlan,
};

/// Message returned when either validation field is missing
pub const REQUIRED_FIELDS_MESSAGE: &str = "api_key_id and api_key_value are required";

pub struct KeyGatewayService {
    directory: Arc<dyn KeyDirectory>,
    policy: ScopingPolicy,
    rest_api_id: String,
}

impl std::fmt::Debug for KeyGatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGatewayService")
            .field("policy", &self.policy)
            .field("rest_api_id", &self.rest_api_id)
            .finish_non_exhaustive()
    }
}

impl KeyGatewayService {
    /// Create a service, rejecting configurations that cannot scope correctly
    pub fn new(
        directory: Arc<dyn KeyDirectory>,
        config: &GatewayConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            directory,
            policy: config.policy,
            rest_api_id: config.rest_api_id().unwrap_or_default().to_string(),
        })
    }

    pub fn policy(&self) -> ScopingPolicy {
        self.policy
    }

    pub fn rest_api_id(&self) -> &str {
        &self.rest_api_id
    }

    /// List the keys relevant to the REST API, in discovery order
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKeySummary>, DomainError> {
        let records = match self.policy {
            ScopingPolicy::Unscoped => self.directory.list_api_keys(false).await?,
            ScopingPolicy::UsagePlan => self.list_usage_plan_scoped().await?,
            ScopingPolicy::Stage => self.list_stage_scoped().await?,
        };

        info!(
            policy = %self.policy,
            count = records.len(),
            "Listed API keys"
        );

        Ok(records.into_iter().map(ApiKeySummary::from).collect())
    }

    /// Check whether the id/value pair is a genuine key for the REST API.
    /// Unknown ids and wrong values both yield `false`.
    pub async fn validate_api_key(
        &self,
        api_key_id: &str,
        api_key_value: &str,
    ) -> Result<bool, DomainError> {
        if api_key_id.is_empty() || api_key_value.is_empty() {
            return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
        }

        let valid = match self.policy {
            ScopingPolicy::Unscoped => self
                .fetch_with_value(api_key_id)
                .await?
                .is_some_and(|record| record.value_matches(api_key_value)),
            ScopingPolicy::UsagePlan => {
                if self.is_in_relevant_usage_plan(api_key_id).await? {
                    self.fetch_with_value(api_key_id)
                        .await?
                        .is_some_and(|record| record.value_matches(api_key_value))
                } else {
                    debug!(api_key_id = %api_key_id, "Key is not in a usage plan for this API");
                    false
                }
            }
            ScopingPolicy::Stage => self
                .fetch_with_value(api_key_id)
                .await?
                .is_some_and(|record| {
                    record.is_attached_to(&self.rest_api_id) && record.value_matches(api_key_value)
                }),
        };

        info!(
            policy = %self.policy,
            api_key_id = %api_key_id,
            valid,
            "Validated API key"
        );

        Ok(valid)
    }

    async fn fetch_with_value(&self, api_key_id: &str) -> Result<Option<ApiKeyRecord>, DomainError> {
        let lookup = self.directory.get_api_key(api_key_id, true).await?;

        if lookup == KeyLookup::NotFound {
            debug!(api_key_id = %api_key_id, "API key not found");
        }

        Ok(lookup.into_found())
    }

    async fn relevant_usage_plans(&self) -> Result<Vec<UsagePlan>, DomainError> {
        let plans = self.directory.list_usage_plans().await?;

        let relevant: Vec<UsagePlan> = plans
            .into_iter()
            .filter(|plan| plan.serves_api(&self.rest_api_id))
            .collect();

        debug!(
            rest_api_id = %self.rest_api_id,
            plans = relevant.len(),
            "Resolved usage plans"
        );

        Ok(relevant)
    }

    /// Key ids from every relevant plan, deduplicated, first occurrence wins
    async fn usage_plan_key_ids(&self) -> Result<Vec<String>, DomainError> {
        let mut seen = HashSet::new();
        let mut key_ids = Vec::new();

        for plan in self.relevant_usage_plans().await? {
            for association in self.directory.list_usage_plan_keys(&plan.id).await? {
                if seen.insert(association.key_id.clone()) {
                    key_ids.push(association.key_id);
                }
            }
        }

        Ok(key_ids)
    }

    async fn list_usage_plan_scoped(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let mut records = Vec::new();

        for key_id in self.usage_plan_key_ids().await? {
            match self.directory.get_api_key(&key_id, false).await? {
                KeyLookup::Found(record) => records.push(record),
                KeyLookup::NotFound => {
                    warn!(api_key_id = %key_id, "Usage plan references a missing API key");
                }
            }
        }

        Ok(records)
    }

    async fn list_stage_scoped(&self) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let mut records = Vec::new();

        for listed in self.directory.list_api_keys(false).await? {
            match self.directory.get_api_key(&listed.id, false).await? {
                KeyLookup::Found(record) if record.is_attached_to(&self.rest_api_id) => {
                    // Keep the listed name; the detail fetch may omit it
                    records.push(ApiKeyRecord {
                        name: if record.name.is_empty() { listed.name } else { record.name },
                        ..record
                    });
                }
                KeyLookup::Found(_) => {}
                KeyLookup::NotFound => {
                    warn!(api_key_id = %listed.id, "API key disappeared while listing");
                }
            }
        }

        Ok(records)
    }

    async fn is_in_relevant_usage_plan(&self, api_key_id: &str) -> Result<bool, DomainError> {
        for plan in self.relevant_usage_plans().await? {
            let associations = self.directory.list_usage_plan_keys(&plan.id).await?;

            if associations.iter().any(|a| a.key_id == api_key_id) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
