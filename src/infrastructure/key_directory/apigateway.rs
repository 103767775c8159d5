use async_trait::async_trait;
use aws_sdk_apigateway::config::Region;
use aws_sdk_apigateway::error::DisplayErrorContext;
use aws_sdk_apigateway::operation::get_api_key::GetApiKeyOutput;
use aws_sdk_apigateway::types::{
    ApiKey as AwsApiKey, UsagePlan as AwsUsagePlan, UsagePlanKey as AwsUsagePlanKey,
};
use aws_sdk_apigateway::Client as ApiGatewayClient;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::domain::{
    ApiKeyRecord, ApiStage, DomainError, KeyDirectory, KeyLookup, UsagePlan, UsagePlanKey,
};

/// Key directory backed by the AWS API Gateway management API
#[derive(Debug, Clone)]
pub struct AwsKeyDirectory {
    client: ApiGatewayClient,
    page_size: i32,
}

impl AwsKeyDirectory {
    pub fn new(client: ApiGatewayClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: i32::try_from(page_size).unwrap_or(i32::MAX),
        }
    }

    /// Build a client from the default AWS credential chain in the configured region
    pub async fn from_config(config: &GatewayConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        debug!(region = %config.region, "API Gateway client initialized");

        Self::new(ApiGatewayClient::new(&sdk_config), config.page_size)
    }
}

#[async_trait]
impl KeyDirectory for AwsKeyDirectory {
    async fn list_api_keys(&self, include_values: bool) -> Result<Vec<ApiKeyRecord>, DomainError> {
        let mut records = Vec::new();
        let mut position = None;

        loop {
            let output = self
                .client
                .get_api_keys()
                .include_values(include_values)
                .limit(self.page_size)
                .set_position(position)
                .send()
                .await
                .map_err(|e| directory_error("GetApiKeys", e))?;

            records.extend(output.items().iter().filter_map(record_from_api_key));

            position = next_position(output.position());
            if position.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn get_api_key(&self, id: &str, include_value: bool) -> Result<KeyLookup, DomainError> {
        let result = self
            .client
            .get_api_key()
            .api_key(id)
            .include_value(include_value)
            .send()
            .await;

        match result {
            Ok(output) => Ok(KeyLookup::Found(record_from_get_output(id, &output))),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found_exception()) =>
            {
                Ok(KeyLookup::NotFound)
            }
            Err(err) => Err(directory_error("GetApiKey", err)),
        }
    }

    async fn list_usage_plans(&self) -> Result<Vec<UsagePlan>, DomainError> {
        let mut plans = Vec::new();
        let mut position = None;

        loop {
            let output = self
                .client
                .get_usage_plans()
                .limit(self.page_size)
                .set_position(position)
                .send()
                .await
                .map_err(|e| directory_error("GetUsagePlans", e))?;

            plans.extend(output.items().iter().filter_map(plan_from_usage_plan));

            position = next_position(output.position());
            if position.is_none() {
                break;
            }
        }

        Ok(plans)
    }

    async fn list_usage_plan_keys(
        &self,
        usage_plan_id: &str,
    ) -> Result<Vec<UsagePlanKey>, DomainError> {
        let mut keys = Vec::new();
        let mut position = None;

        loop {
            let output = self
                .client
                .get_usage_plan_keys()
                .usage_plan_id(usage_plan_id)
                .limit(self.page_size)
                .set_position(position)
                .send()
                .await
                .map_err(|e| directory_error("GetUsagePlanKeys", e))?;

            keys.extend(
                output
                    .items()
                    .iter()
                    .filter_map(|key| association_from_plan_key(usage_plan_id, key)),
            );

            position = next_position(output.position());
            if position.is_none() {
                break;
            }
        }

        Ok(keys)
    }
}

fn directory_error<E: std::error::Error>(operation: &str, err: E) -> DomainError {
    DomainError::directory(operation, DisplayErrorContext(err).to_string())
}

fn next_position(position: Option<&str>) -> Option<String> {
    position
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string)
}

fn record_from_api_key(key: &AwsApiKey) -> Option<ApiKeyRecord> {
    let id = key.id()?;

    Some(ApiKeyRecord {
        id: id.to_string(),
        name: key.name().unwrap_or_default().to_string(),
        value: key.value().map(str::to_string),
        stage_keys: key.stage_keys().to_vec(),
    })
}

fn record_from_get_output(requested_id: &str, output: &GetApiKeyOutput) -> ApiKeyRecord {
    ApiKeyRecord {
        id: output.id().unwrap_or(requested_id).to_string(),
        name: output.name().unwrap_or_default().to_string(),
        value: output.value().map(str::to_string),
        stage_keys: output.stage_keys().to_vec(),
    }
}

fn plan_from_usage_plan(plan: &AwsUsagePlan) -> Option<UsagePlan> {
    let id = plan.id()?;

    Some(UsagePlan {
        id: id.to_string(),
        api_stages: plan
            .api_stages()
            .iter()
            .filter_map(|stage| {
                stage.api_id().map(|api_id| ApiStage {
                    api_id: api_id.to_string(),
                    stage: stage.stage().map(str::to_string),
                })
            })
            .collect(),
    })
}

fn association_from_plan_key(usage_plan_id: &str, key: &AwsUsagePlanKey) -> Option<UsagePlanKey> {
    key.id().map(|key_id| UsagePlanKey::new(usage_plan_id, key_id))
}
