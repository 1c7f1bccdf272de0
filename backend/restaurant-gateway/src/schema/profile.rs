//! Customer profile and favourites

use async_graphql::{Context, Object, Result as GraphQLResult, SimpleObject, ID};
use serde::Deserialize;

use super::fetch;
use crate::clients::{resource_path, RestRequest};

#[derive(SimpleObject, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteRestaurant {
    #[serde(default, deserialize_with = "super::deserialize_id")]
    pub id: Option<ID>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub restaurant_id: Option<String>,
}

#[derive(SimpleObject, Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[graphql(name = "_id")]
    #[serde(rename = "_id", default, deserialize_with = "super::deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub profile_picture: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub role: Option<String>,
}

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    async fn favourites(
        &self,
        ctx: &Context<'_>,
        customer_id: String,
    ) -> GraphQLResult<Option<Vec<Option<FavouriteRestaurant>>>> {
        let request = RestRequest::get("/favouriteRestaurants").query("customerId", Some(customer_id));
        fetch(ctx, "favourites", request, None).await
    }

    async fn user_profile(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: String,
    ) -> GraphQLResult<Option<UserProfile>> {
        let request = RestRequest::get(resource_path("/userProfiles", &id, None));
        fetch(ctx, "userProfile", request, None).await
    }
}
