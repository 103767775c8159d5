use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{ApiKeyRecord, KeyLookup, UsagePlan, UsagePlanKey};
use crate::domain::DomainError;

/// Read access to the external key-management directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyDirectory: Send + Sync {
    /// Lists every key, in directory order
    async fn list_api_keys(&self, include_values: bool) -> Result<Vec<ApiKeyRecord>, DomainError>;

    /// Fetches a single key with its stage keys.
    /// An unknown id is `KeyLookup::NotFound`, not an error.
    async fn get_api_key(&self, id: &str, include_value: bool) -> Result<KeyLookup, DomainError>;

    /// Lists every usage plan with its API stages
    async fn list_usage_plans(&self) -> Result<Vec<UsagePlan>, DomainError>;

    /// Lists the keys attached to a usage plan
    async fn list_usage_plan_keys(&self, usage_plan_id: &str)
        -> Result<Vec<UsagePlanKey>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Directory double backed by fixed data, counting every call
    #[derive(Debug, Default)]
    pub struct InMemoryKeyDirectory {
        keys: Vec<ApiKeyRecord>,
        plans: Vec<UsagePlan>,
        plan_keys: HashMap<String, Vec<String>>,
        failing_plans: HashSet<String>,
        fail_listing: bool,
        calls: AtomicUsize,
        get_calls: AtomicUsize,
    }

    impl InMemoryKeyDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_key(mut self, key: ApiKeyRecord) -> Self {
            self.keys.push(key);
            self
        }

        pub fn with_plan(mut self, plan: UsagePlan, key_ids: &[&str]) -> Self {
            self.plan_keys.insert(
                plan.id.clone(),
                key_ids.iter().map(|id| id.to_string()).collect(),
            );
            self.plans.push(plan);
            self
        }

        /// Makes `list_usage_plan_keys` fail for this plan
        pub fn with_failing_plan(mut self, plan_id: &str) -> Self {
            self.failing_plans.insert(plan_id.to_string());
            self
        }

        /// Makes `list_api_keys` fail
        pub fn with_failing_listing(mut self) -> Self {
            self.fail_listing = true;
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn get_call_count(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        fn record_call(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KeyDirectory for InMemoryKeyDirectory {
        async fn list_api_keys(
            &self,
            include_values: bool,
        ) -> Result<Vec<ApiKeyRecord>, DomainError> {
            self.record_call();

            if self.fail_listing {
                return Err(DomainError::directory("GetApiKeys", "simulated failure"));
            }

            Ok(self
                .keys
                .iter()
                .map(|key| {
                    let listed = ApiKeyRecord::new(&key.id, &key.name);
                    if include_values {
                        ApiKeyRecord {
                            value: key.value.clone(),
                            ..listed
                        }
                    } else {
                        listed
                    }
                })
                .collect())
        }

        async fn get_api_key(
            &self,
            id: &str,
            include_value: bool,
        ) -> Result<KeyLookup, DomainError> {
            self.record_call();
            self.get_calls.fetch_add(1, Ordering::SeqCst);

            let lookup = match self.keys.iter().find(|key| key.id == id) {
                Some(key) if include_value => KeyLookup::Found(key.clone()),
                Some(key) => KeyLookup::Found(ApiKeyRecord {
                    value: None,
                    ..key.clone()
                }),
                None => KeyLookup::NotFound,
            };

            Ok(lookup)
        }

        async fn list_usage_plans(&self) -> Result<Vec<UsagePlan>, DomainError> {
            self.record_call();
            Ok(self.plans.clone())
        }

        async fn list_usage_plan_keys(
            &self,
            usage_plan_id: &str,
        ) -> Result<Vec<UsagePlanKey>, DomainError> {
            self.record_call();

            if self.failing_plans.contains(usage_plan_id) {
                return Err(DomainError::directory(
                    "GetUsagePlanKeys",
                    format!("simulated failure for {}", usage_plan_id),
                ));
            }

            let keys = self
                .plan_keys
                .get(usage_plan_id)
                .map(|ids| {
                    ids.iter()
                        .map(|key_id| UsagePlanKey::new(usage_plan_id, key_id))
                        .collect()
                })
                .unwrap_or_default();

            Ok(keys)
        }
    }
}
