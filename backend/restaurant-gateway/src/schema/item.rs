//! Menu item schema and resolvers

use async_graphql::{Context, Object, Result as GraphQLResult, SimpleObject, ID};
use serde::Deserialize;

use super::fetch;
use crate::clients::{resource_path, RestRequest};

#[derive(SimpleObject, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[graphql(name = "_id")]
    #[serde(rename = "_id", default, deserialize_with = "super::deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub restaurant_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_int")]
    pub price: Option<i32>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub category_item: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub description: Option<String>,
}

#[derive(Default)]
pub struct ItemQuery;

#[Object]
impl ItemQuery {
    async fn items(&self, ctx: &Context<'_>) -> GraphQLResult<Option<Vec<Option<Item>>>> {
        fetch(ctx, "items", RestRequest::get("/items"), None).await
    }

    /// Menu of one restaurant; the backend wraps it as `{ item: [...] }`
    async fn items_by_restaurant_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> GraphQLResult<Option<Vec<Option<Item>>>> {
        let request = RestRequest::get(resource_path("/restaurants", &id, Some("items")));
        fetch(ctx, "itemsByRestaurantId", request, Some("item")).await
    }
}
