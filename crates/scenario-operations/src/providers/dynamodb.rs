use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use scenario_core::Result;
use tracing::debug;

use super::context::AwsContext;
use super::convert::service_error;
use crate::traits::DynamoDbProvider;
use crate::types::ScanItem;

pub struct AwsDynamoDbProvider {
    client: Client,
}

impl AwsDynamoDbProvider {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self::new(ctx.dynamodb_client())
    }
}

fn render(value: &AttributeValue) -> String {
    match value {
        AttributeValue::S(s) => s.clone(),
        AttributeValue::N(n) => n.clone(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Null(_) => "null".to_string(),
        AttributeValue::Ss(values) | AttributeValue::Ns(values) => values.join(", "),
        other => format!("{other:?}"),
    }
}

fn scan_item(item: &HashMap<String, AttributeValue>) -> ScanItem {
    item.iter()
        .map(|(name, value)| (name.clone(), render(value)))
        .collect()
}

#[async_trait]
impl DynamoDbProvider for AwsDynamoDbProvider {
    async fn scan(&self, table_name: &str) -> Result<Vec<ScanItem>> {
        let mut pages = self
            .client
            .scan()
            .table_name(table_name)
            .into_paginator()
            .send();

        let mut items = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| service_error("Scan", e))?;
            items.extend(page.items().iter().map(scan_item));
        }
        debug!(table = table_name, count = items.len(), "table scanned");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_attributes_render_as_plain_text() {
        let item = HashMap::from([
            ("title".to_string(), AttributeValue::S("Dune".to_string())),
            ("year".to_string(), AttributeValue::N("1965".to_string())),
            ("read".to_string(), AttributeValue::Bool(true)),
        ]);

        let rendered = scan_item(&item);

        assert_eq!(rendered["title"], "Dune");
        assert_eq!(rendered["year"], "1965");
        assert_eq!(rendered["read"], "true");
    }

    #[test]
    fn string_sets_are_joined() {
        let value = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(render(&value), "a, b");
    }
}
