//! Order resource implementation.
//!
//! Orders embed their line items, shipping lines, addresses, client details
//! and a customer summary; see [`common`](super::common) for those types.
//! Payments recorded against an order are [`Transaction`](super::Transaction)s.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_rest::rest::RestResource;
//! use shopify_rest::rest::resources::{Order, OrderListParams};
//!
//! let params = OrderListParams {
//!     status: Some("any".to_string()),
//!     limit: Some(250),
//!     ..Default::default()
//! };
//! let mut page = Order::all(&client, Some(params)).await?;
//! loop {
//!     for order in page.iter() {
//!         println!("{:?} {:?}", order.name, order.total_price);
//!     }
//!     if !page.has_next_page() {
//!         break;
//!     }
//!     page = Order::next_page(&client, page.pagination()).await?;
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::ClientRef;
use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::common::{Address, ClientDetails, LineItem, OrderCustomer, ShippingLine, TaxLine};

/// An order placed in the store.
///
/// Money amounts are decimal strings in the shop currency, as sent by the
/// API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    /// The unique identifier of the order.
    #[serde(skip_serializing)]
    pub id: Option<u64>,

    /// The order name shown to the merchant, e.g. `#1001`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing)]
    pub number: Option<u64>,

    #[serde(skip_serializing)]
    pub order_number: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Comma-separated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_accepts_marketing: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes_included: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,

    #[serde(skip_serializing)]
    pub confirmed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_identifier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing)]
    pub token: Option<String>,

    #[serde(skip_serializing)]
    pub cart_token: Option<String>,

    #[serde(skip_serializing)]
    pub checkout_token: Option<String>,

    #[serde(skip_serializing)]
    pub checkout_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_site_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referring_site: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(skip_serializing)]
    pub subtotal_price: Option<String>,

    #[serde(skip_serializing)]
    pub total_discounts: Option<String>,

    #[serde(skip_serializing)]
    pub total_line_items_price: Option<String>,

    #[serde(skip_serializing)]
    pub total_price: Option<String>,

    #[serde(skip_serializing)]
    pub total_price_usd: Option<String>,

    #[serde(skip_serializing)]
    pub total_tax: Option<String>,

    /// Total weight in grams.
    #[serde(skip_serializing)]
    pub total_weight: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_lines: Option<Vec<ShippingLine>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_lines: Option<Vec<TaxLine>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,

    #[serde(skip_serializing)]
    pub client_details: Option<ClientDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<OrderCustomer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_codes: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_attributes: Option<Vec<Value>>,

    #[serde(skip_serializing)]
    pub fulfillments: Option<Vec<Value>>,

    #[serde(skip_serializing)]
    pub refunds: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,

    #[serde(skip_serializing)]
    pub cancelled_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    client: ClientRef,
}

impl RestResource for Order {
    type Id = u64;
    type AllParams = OrderListParams;
    type CountParams = OrderCountParams;

    const NAME: &'static str = "Order";
    const PLURAL: &'static str = "orders";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "orders/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "orders"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Count, &[], "orders/count"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "orders"),
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Update, &["id"], "orders/{id}")
            .with_status(201),
        ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, &["id"], "orders/{id}"),
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
}

/// Parameters for listing orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderListParams {
    /// Restrict to these IDs; sent as a comma-separated list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    /// Maximum number of results to return (default: 50, max: 250).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    /// `open` (the API default), `closed`, `cancelled` or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at_max: Option<DateTime<Utc>>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
}

/// Parameters for counting orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderCountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{get_path, serialize_to_query};

    #[test]
    fn test_order_deserializes_embedded_types() {
        let json = r##"{
            "id": 450789469,
            "name": "#1001",
            "email": "bob.norman@mail.example.com",
            "number": 1,
            "order_number": 1001,
            "currency": "USD",
            "financial_status": "partially_refunded",
            "fulfillment_status": null,
            "total_price": "598.94",
            "subtotal_price": "597.00",
            "total_weight": 0,
            "test": false,
            "created_at": "2008-01-10T11:00:00-05:00",
            "line_items": [
                {"id": 466157049, "variant_id": 39072856, "quantity": 1, "price": "199.00"}
            ],
            "shipping_lines": [{"code": "Free Shipping", "price": "0.00", "title": "Free Shipping"}],
            "billing_address": {"address1": "Chestnut Street 92", "city": "Louisville", "latitude": 45.41634, "longitude": -75.6868},
            "client_details": {"browser_ip": "0.0.0.0", "browser_width": null},
            "customer": {"id": 207119551, "email": "bob.norman@mail.example.com"},
            "discount_codes": [{"code": "TENOFF", "amount": "10.00", "type": "fixed_amount"}]
        }"##;

        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.id, Some(450789469));
        assert_eq!(order.order_number, Some(1001));
        assert_eq!(order.total_price.as_deref(), Some("598.94"));
        assert!(order.fulfillment_status.is_none());
        assert_eq!(order.line_items.as_ref().unwrap()[0].variant_id, Some(39072856));
        assert_eq!(
            order.billing_address.as_ref().unwrap().latitude,
            Some(45.41634)
        );
        assert_eq!(
            order.client_details.as_ref().unwrap().browser_ip.as_deref(),
            Some("0.0.0.0")
        );
        assert_eq!(order.customer.as_ref().unwrap().id, Some(207119551));
        assert_eq!(order.discount_codes.as_ref().unwrap()[0]["code"], "TENOFF");
    }

    #[test]
    fn test_order_body_skips_computed_fields() {
        let order = Order {
            id: Some(450789469),
            note: Some("Customer contacted us about a custom engraving".to_string()),
            total_price: Some("598.94".to_string()),
            client_details: Some(ClientDetails::default()),
            ..Default::default()
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"note": "Customer contacted us about a custom engraving"})
        );
    }

    #[test]
    fn test_order_paths() {
        let update = get_path(Order::PATHS, ResourceOperation::Update, &["id"]).unwrap();
        assert_eq!(update.template, "orders/{id}");
        assert_eq!(update.expected_status, 201);

        let count = get_path(Order::PATHS, ResourceOperation::Count, &[]).unwrap();
        assert_eq!(count.template, "orders/count");
    }

    #[test]
    fn test_list_params_query() {
        let params = OrderListParams {
            ids: Some(vec![1073459980, 450789469]),
            status: Some("any".to_string()),
            ..Default::default()
        };
        let query = serialize_to_query(&params).unwrap();
        assert_eq!(query["ids"], "1073459980,450789469");
        assert_eq!(query["status"], "any");
    }
}
