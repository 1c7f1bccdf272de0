//! Order schema and resolvers

use async_graphql::{Context, InputObject, Object, Result as GraphQLResult, SimpleObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{fetch, send_or_log, text_of};
use crate::clients::RestRequest;

#[derive(SimpleObject, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[graphql(name = "_id")]
    #[serde(rename = "_id", default, deserialize_with = "super::deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub customer_phone_number: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub table_number: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_int")]
    pub total_price: Option<i32>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub booking_date: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_int")]
    pub number_of_people: Option<i32>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub restaurant_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub status: Option<String>,
}

#[derive(SimpleObject, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[graphql(name = "_id")]
    #[serde(rename = "_id", default, deserialize_with = "super::deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub food_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_int")]
    pub quantity: Option<i32>,
}

/// Plain acknowledgement relayed from the backend
#[derive(SimpleObject, Clone, Debug)]
pub struct Info {
    pub message: Option<String>,
}

impl Info {
    pub fn from_body(body: &Value) -> Self {
        Self {
            message: text_of(body),
        }
    }
}

#[derive(InputObject, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

#[derive(InputObject, Clone, Debug)]
#[graphql(name = "OrderDetails")]
pub struct OrderDetailsInput {
    pub data: Option<Vec<Option<InputDetail>>>,
}

/// Body of `POST /customers/orders`
///
/// Arguments the client left out are omitted; `orderDetails` is always sent.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateOrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number_of_people: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    restaurant_id: Option<String>,
    order_details: Option<Vec<Option<InputDetail>>>,
}

#[derive(Default)]
pub struct OrderQuery;

#[Object]
impl OrderQuery {
    async fn order_details(
        &self,
        ctx: &Context<'_>,
        order_id: String,
    ) -> GraphQLResult<Option<Vec<Option<OrderDetail>>>> {
        let request = RestRequest::get("/orderDetails").query("orderId", Some(order_id));
        fetch(ctx, "orderDetails", request, None).await
    }

    async fn orders(
        &self,
        ctx: &Context<'_>,
        customer_name: String,
    ) -> GraphQLResult<Option<Vec<Option<Order>>>> {
        let request = RestRequest::get("/orders").query("customerName", Some(customer_name));
        fetch(ctx, "orders", request, None).await
    }
}

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_name: Option<String>,
        customer_email: Option<String>,
        customer_phone_number: Option<String>,
        table_number: Option<String>,
        total_price: Option<i32>,
        booking_date: Option<String>,
        number_of_people: Option<i32>,
        restaurant_id: Option<String>,
        order_details: Option<OrderDetailsInput>,
    ) -> GraphQLResult<Option<Info>> {
        let payload = CreateOrderPayload {
            customer_name,
            customer_phone_number,
            customer_email,
            table_number,
            total_price,
            booking_date,
            number_of_people,
            restaurant_id,
            order_details: order_details.and_then(|details| details.data),
        };

        let request = RestRequest::post("/customers/orders", serde_json::to_value(&payload)?);
        let body = send_or_log(ctx, "createOrder", request).await?;

        Ok(body.map(|body| Info::from_body(&body)))
    }
}
