//! Key directory implementations

mod apigateway;

pub use apigateway::AwsKeyDirectory;
