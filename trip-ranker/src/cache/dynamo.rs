//! DynamoDB-backed detail store.
//!
//! One item per train in the configured table, shaped
//! `{ productNumber: S, detail: M }`. The table is shared by every process
//! using it, so details survive restarts and are reused across instances.

use std::collections::HashMap;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::ns::JourneyDetail;

use super::store::{DetailStore, StoreError};

/// Partition key attribute.
const KEY_ATTRIBUTE: &str = "productNumber";
/// Attribute holding the detail document.
const DETAIL_ATTRIBUTE: &str = "detail";

/// Detail store kept in a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a store over an existing client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store with region and credentials taken from the standard
    /// AWS environment.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), table_name)
    }

    /// Table holding the details.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl DetailStore for DynamoStore {
    async fn get(&self, product_number: &str) -> Result<Option<Arc<JourneyDetail>>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(product_number.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Backend {
                key: product_number.to_string(),
                source: Box::new(aws_sdk_dynamodb::Error::from(e)),
            })?;

        let Some(item) = output.item() else {
            return Ok(None);
        };

        // An unreadable item is a miss; the next put replaces it.
        match decode_item(product_number, item) {
            Ok(detail) => Ok(Some(Arc::new(detail))),
            Err(e) => {
                warn!(
                    product_number,
                    table = %self.table_name,
                    error = %e,
                    "Discarding unreadable stored detail"
                );
                Ok(None)
            }
        }
    }

    async fn put(&self, product_number: &str, detail: Arc<JourneyDetail>) -> Result<(), StoreError> {
        let item = encode_item(product_number, &detail)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Backend {
                key: product_number.to_string(),
                source: Box::new(aws_sdk_dynamodb::Error::from(e)),
            })?;

        Ok(())
    }
}

/// Build the item stored for `product_number`.
pub(crate) fn encode_item(
    product_number: &str,
    detail: &JourneyDetail,
) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let document = serde_json::to_value(detail).map_err(|source| StoreError::Codec {
        key: product_number.to_string(),
        source,
    })?;

    Ok(HashMap::from([
        (
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(product_number.to_string()),
        ),
        (DETAIL_ATTRIBUTE.to_string(), to_attribute(document)),
    ]))
}

/// Read the detail back out of a stored item.
pub(crate) fn decode_item(
    product_number: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<JourneyDetail, StoreError> {
    let malformed = |reason: String| StoreError::Malformed {
        key: product_number.to_string(),
        reason,
    };

    let attribute = item
        .get(DETAIL_ATTRIBUTE)
        .ok_or_else(|| malformed(format!("missing {DETAIL_ATTRIBUTE:?} attribute")))?;
    let document = from_attribute(attribute).map_err(malformed)?;

    serde_json::from_value(document).map_err(|source| StoreError::Codec {
        key: product_number.to_string(),
        source,
    })
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(items) => AttributeValue::L(items.into_iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(k, v)| (k, to_attribute(v)))
                .collect(),
        ),
    }
}

fn from_attribute(attribute: &AttributeValue) -> Result<Value, String> {
    let number = |n: &String| {
        n.parse::<Number>()
            .map(Value::Number)
            .map_err(|e| format!("invalid number {n:?}: {e}"))
    };

    Ok(match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => number(n)?,
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(from_attribute)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
                .collect::<Result<Map<_, _>, String>>()?,
        ),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => {
            Value::Array(items.iter().map(number).collect::<Result<_, _>>()?)
        }
        other => return Err(format!("unsupported attribute {other:?}")),
    })
}
