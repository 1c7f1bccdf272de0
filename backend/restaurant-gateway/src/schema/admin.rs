//! Restaurant-admin schema and resolvers
//!
//! Admin operations forward the caller's token to the backend as the
//! `access_token` header; the backend decides whether it is valid.

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject, ID};
use serde::Serialize;
use serde_json::{json, Value};

use super::order::{Info, Order};
use super::restaurant::Restaurant;
use super::{fetch, log_failure, rest_client, send_or_log, text_of};
use crate::clients::{resource_path, RestRequest};
use crate::middleware::access_token;

#[derive(SimpleObject, Clone, Debug)]
pub struct MessageLogin {
    pub status: Option<String>,
    #[graphql(name = "access_token")]
    pub access_token: Option<String>,
}

impl MessageLogin {
    pub fn from_body(body: &Value) -> Self {
        Self {
            status: body.get("status").and_then(text_of),
            access_token: body.get("access_token").and_then(text_of),
        }
    }
}

#[derive(Serialize, Debug)]
struct LoginPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

#[derive(Default)]
pub struct AdminQuery;

#[Object]
impl AdminQuery {
    /// Restaurants owned by the admin the token belongs to
    async fn get_restaurant_by_admin(
        &self,
        ctx: &Context<'_>,
    ) -> GraphQLResult<Option<Vec<Option<Restaurant>>>> {
        let request =
            RestRequest::get("/restaurants/admin").header("access_token", access_token(ctx));
        fetch(ctx, "getRestaurantByAdmin", request, None).await
    }

    async fn get_orders_by_restaurant_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> GraphQLResult<Option<Vec<Option<Order>>>> {
        let request = RestRequest::get(resource_path("/restaurants", &id, Some("orders")))
            .header("access_token", access_token(ctx));
        fetch(ctx, "getOrdersByRestaurantId", request, Some("orders")).await
    }

    async fn get_booked_by_restaurant_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> GraphQLResult<Option<Vec<Option<Order>>>> {
        let request = RestRequest::get(resource_path("/restaurants", &id, Some("booked")))
            .header("access_token", access_token(ctx));
        fetch(ctx, "getBookedByRestaurantId", request, Some("booked")).await
    }
}

#[derive(Default)]
pub struct AdminMutation;

#[Object]
impl AdminMutation {
    async fn update_availability(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
        available: Option<String>,
    ) -> GraphQLResult<Option<Info>> {
        let body = match available {
            Some(available) => json!({ "availability": available }),
            None => json!({}),
        };
        let request = RestRequest::patch(resource_path("/restaurants", &id, None), body)
            .header("access_token", access_token(ctx));

        let reply = send_or_log(ctx, "updateAvailability", request).await?;
        Ok(reply.map(|body| Info::from_body(&body)))
    }

    /// Exchange admin credentials for a backend token
    ///
    /// Unlike every other operation, a backend failure here is returned to the
    /// client as a GraphQL error.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: Option<String>,
        password: Option<String>,
    ) -> GraphQLResult<Option<MessageLogin>> {
        let client = rest_client(ctx)?;
        let payload = serde_json::to_value(LoginPayload { email, password })?;

        let reply = client
            .send(RestRequest::post("/admin/login", payload))
            .await
            .map_err(|e| {
                log_failure("login", &e);
                e.extend()
            })?;

        Ok(Some(MessageLogin::from_body(&reply)))
    }
}
