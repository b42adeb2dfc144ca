//! Transaction resource implementation.
//!
//! Transactions only exist under an order: every path carries `order_id`.
//! They can be created but never updated or deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::Transaction;
//!
//! let transactions = Transaction::all_for_order(&client, 450789469, None).await?;
//!
//! let mut capture = Transaction::new_with_client(&client);
//! capture.order_id = Some(450789469);
//! capture.kind = Some("capture".to_string());
//! capture.amount = Some("10.00".to_string());
//! capture.save().await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ClientRef, HttpClient};
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, ResourceResponse, RestResource};
use crate::HttpMethod;

/// A payment movement on an order: authorization, capture, sale, void or
/// refund.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Transaction {
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The order the transaction belongs to. Required for every operation.
    #[serde(skip_serializing)]
    pub order_id: Option<u64>,

    /// `authorization`, `capture`, `sale`, `void` or `refund`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The amount as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// `pending`, `failure`, `success` or `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,

    /// The transaction this one captures, voids or refunds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    #[serde(skip_serializing)]
    pub source_name: Option<String>,

    #[serde(skip_serializing)]
    pub device_id: Option<u64>,

    #[serde(skip_serializing)]
    pub user_id: Option<u64>,

    /// Card details, as sent by the gateway.
    #[serde(skip_serializing)]
    pub payment_details: Option<Value>,

    /// The raw gateway receipt.
    #[serde(skip_serializing)]
    pub receipt: Option<Value>,

    #[serde(skip_serializing)]
    pub error_code: Option<String>,

    #[serde(skip_serializing)]
    pub processed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl Transaction {
    /// Lists the transactions of an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn all_for_order(
        client: &HttpClient,
        order_id: u64,
        params: Option<TransactionListParams>,
    ) -> Result<ResourceResponse<Vec<Self>>, ResourceError> {
        Self::all_with_parent(client, "order_id", order_id, params).await
    }

    /// Counts the transactions of an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn count_for_order(client: &HttpClient, order_id: u64) -> Result<u64, ResourceError> {
        Self::count_with_parent(client, "order_id", order_id, None).await
    }

    /// Finds one transaction of an order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the server does not
    /// answer 200.
    pub async fn find_for_order(
        client: &HttpClient,
        order_id: u64,
        id: u64,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        Self::find_with_parent(client, "order_id", order_id, id).await
    }
}

impl RestResource for Transaction {
    type Id = u64;
    type AllParams = TransactionListParams;
    type CountParams = TransactionCountParams;

    const NAME: &'static str = "Transaction";
    const PLURAL: &'static str = "transactions";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["order_id", "id"],
            "orders/{order_id}/transactions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["order_id"],
            "orders/{order_id}/transactions",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Count,
            &["order_id"],
            "orders/{order_id}/transactions/count",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["order_id"],
            "orders/{order_id}/transactions",
        ),
    ];

    fn get_id(&self) -> Option<u64> {
        self.id
    }

    fn client(&self) -> &ClientRef {
        &self.client
    }

    fn attach(&mut self, client: ClientRef) {
        self.client = client;
    }

    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        self.order_id
            .map(|id| vec![("order_id", id.to_string())])
            .unwrap_or_default()
    }
}

/// Parameters for listing the transactions of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TransactionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    /// Return amounts in the shop currency (`false`) or presentment currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_shop_currency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// Parameters for counting transactions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TransactionCountParams {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;

    #[test]
    fn test_transaction_deserialization() {
        let json = r#"{
            "id": 389404469,
            "order_id": 450789469,
            "kind": "authorization",
            "gateway": "bogus",
            "status": "success",
            "message": null,
            "created_at": "2005-08-01T11:57:11-04:00",
            "test": false,
            "authorization": "authorization-key",
            "parent_id": null,
            "processed_at": "2005-08-01T11:57:11-04:00",
            "device_id": null,
            "error_code": null,
            "source_name": "web",
            "receipt": {"testcase": true, "authorization": "123456"},
            "amount": "598.94",
            "currency": "USD",
            "payment_details": {"credit_card_number": "•••• •••• •••• 4242", "credit_card_company": "Visa"}
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.order_id, Some(450789469));
        assert_eq!(transaction.amount.as_deref(), Some("598.94"));
        assert_eq!(transaction.receipt.as_ref().unwrap()["testcase"], true);
        assert_eq!(
            transaction.payment_details.as_ref().unwrap()["credit_card_company"],
            "Visa"
        );
    }

    #[test]
    fn test_create_body_omits_order_id() {
        let transaction = Transaction {
            order_id: Some(450789469),
            kind: Some("capture".to_string()),
            amount: Some("10.00".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "capture", "amount": "10.00"}));
    }

    #[test]
    fn test_every_path_is_nested_under_order() {
        assert!(Transaction::PATHS.iter().all(|p| p.ids.contains(&"order_id")));
        assert!(get_path(Transaction::PATHS, ResourceOperation::All, &[]).is_none());
        assert!(get_path(Transaction::PATHS, ResourceOperation::Update, &["order_id", "id"]).is_none());
    }
}
