//! Restaurant schema and resolvers

use async_graphql::{Context, Object, Result as GraphQLResult, SimpleObject, ID};
use serde::Deserialize;

use super::fetch;
use crate::clients::{resource_path, RestRequest};

#[derive(SimpleObject, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[graphql(name = "_id")]
    #[serde(rename = "_id", default, deserialize_with = "super::deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text_list")]
    pub cuisine: Option<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "super::deserialize_bool")]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "super::deserialize_int")]
    pub capacity: Option<i32>,
    #[serde(default, deserialize_with = "super::deserialize_text_list")]
    pub main_images_url: Option<Vec<Option<String>>>,
    #[serde(default, deserialize_with = "super::deserialize_text")]
    pub admin_id: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_float")]
    pub restaurant_distance: Option<f64>,
}

/// GeoJSON point as stored by the backend
#[derive(SimpleObject, Clone, Debug, Deserialize)]
pub struct Location {
    #[graphql(name = "type")]
    #[serde(rename = "type", default, deserialize_with = "super::deserialize_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_float_list")]
    pub coordinates: Option<Vec<Option<f64>>>,
}

/// Keep restaurants whose name contains `search`, ignoring case
///
/// An empty search keeps everything, `null` entries included. Restaurants
/// without a name never match a non-empty search.
pub fn filter_by_name(
    restaurants: Vec<Option<Restaurant>>,
    search: &str,
) -> Vec<Option<Restaurant>> {
    if search.is_empty() {
        return restaurants;
    }

    let needle = search.to_lowercase();
    restaurants
        .into_iter()
        .filter(|r| {
            r.as_ref()
                .and_then(|r| r.name.as_deref())
                .map(|name| name.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

#[derive(Default)]
pub struct RestaurantQuery;

#[Object]
impl RestaurantQuery {
    /// Restaurants near `stringCoordinates` ("lng,lat"), optionally narrowed by name
    async fn restaurants(
        &self,
        ctx: &Context<'_>,
        string_coordinates: Option<String>,
        search: Option<String>,
    ) -> GraphQLResult<Option<Vec<Option<Restaurant>>>> {
        let request = RestRequest::get("/restaurants").header("coordinates", string_coordinates);

        let restaurants =
            fetch::<Vec<Option<Restaurant>>>(ctx, "restaurants", request, None).await?;

        Ok(match search {
            Some(search) => restaurants.map(|list| filter_by_name(list, &search)),
            None => restaurants,
        })
    }

    async fn restaurant(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> GraphQLResult<Option<Restaurant>> {
        let request = RestRequest::get(resource_path("/restaurants", &id, None));
        fetch(ctx, "restaurant", request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::{schema_with, MockRestClient};
    use reqwest::Method;
    use serde_json::json;

    fn named(name: Option<&str>) -> Option<Restaurant> {
        Some(Restaurant {
            name: name.map(str::to_string),
            ..Restaurant::default()
        })
    }

    #[test]
    fn test_filter_by_name_ignores_case() {
        let restaurants = vec![
            named(Some("Pizza Hut")),
            named(Some("Sushi Tei")),
            None,
            named(Some("Mama's PIZZERIA")),
            named(None),
        ];

        let names: Vec<_> = filter_by_name(restaurants, "pIZz")
            .into_iter()
            .map(|r| r.unwrap().name.unwrap())
            .collect();
        assert_eq!(names, vec!["Pizza Hut", "Mama's PIZZERIA"]);
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let restaurants = vec![named(Some("Pizza Hut")), named(None), None];
        assert_eq!(filter_by_name(restaurants, "").len(), 3);
    }

    #[tokio::test]
    async fn test_restaurants_forwards_coordinates_and_filters() {
        let mock = MockRestClient::replying(json!([
            { "_id": "r1", "name": "Pizza Hut", "location": { "type": "Point", "coordinates": [106.8, -6.2] } },
            { "_id": "r2", "name": "Sushi Tei" },
            { "_id": "r3", "name": "Pizzeria Uno" }
        ]));
        let schema = schema_with(&mock);

        let response = schema
            .execute(r#"{ restaurants(stringCoordinates: "1,2", search: "Pizza") { _id name location { type coordinates } } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let request = mock.only_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/restaurants");
        assert_eq!(request.headers, vec![("coordinates", "1,2".to_string())]);

        let data = response.data.into_json().unwrap();
        assert_eq!(
            data,
            json!({ "restaurants": [
                { "_id": "r1", "name": "Pizza Hut", "location": { "type": "Point", "coordinates": [106.8, -6.2] } },
                { "_id": "r3", "name": "Pizzeria Uno", "location": null }
            ] })
        );
    }

    #[tokio::test]
    async fn test_restaurants_keeps_null_elements() {
        let mock = MockRestClient::replying(json!([
            { "_id": "r1", "cuisine": ["Italian", null], "mainImagesUrl": null },
            null,
            { "_id": "r2", "location": { "type": "Point", "coordinates": [106.8, null] } }
        ]));
        let schema = schema_with(&mock);

        let response = schema
            .execute("{ restaurants { _id cuisine location { coordinates } } }")
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "restaurants": [
                { "_id": "r1", "cuisine": ["Italian", null], "location": null },
                null,
                { "_id": "r2", "cuisine": null, "location": { "coordinates": [106.8, null] } }
            ] })
        );
    }

    #[tokio::test]
    async fn test_mistyped_scalars_only_null_their_field() {
        let mock = MockRestClient::replying(json!([
            { "_id": 1, "name": "Warung", "capacity": "40", "available": "yes", "contactNumber": 62812 }
        ]));
        let schema = schema_with(&mock);

        let response = schema
            .execute("{ restaurants { _id name capacity available contactNumber } }")
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "restaurants": [
                { "_id": "1", "name": "Warung", "capacity": 40, "available": null, "contactNumber": "62812" }
            ] })
        );
    }

    #[tokio::test]
    async fn test_restaurants_without_coordinates_sends_no_header() {
        let mock = MockRestClient::replying(json!([]));
        let schema = schema_with(&mock);

        let response = schema.execute("{ restaurants { _id } }").await;
        assert!(response.errors.is_empty());
        assert!(mock.only_request().headers.is_empty());
    }

    #[tokio::test]
    async fn test_restaurant_by_id() {
        let mock = MockRestClient::replying(json!({
            "_id": "r1",
            "name": "Pizza Hut",
            "cuisine": ["Italian", "Fast Food"],
            "available": true,
            "capacity": 40,
            "restaurantDistance": 1.25
        }));
        let schema = schema_with(&mock);

        let response = schema
            .execute(r#"{ restaurant(_id: "r1") { name cuisine available capacity restaurantDistance } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(mock.only_request().path, "/restaurants/r1");
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "restaurant": {
                "name": "Pizza Hut",
                "cuisine": ["Italian", "Fast Food"],
                "available": true,
                "capacity": 40,
                "restaurantDistance": 1.25
            } })
        );
    }

    #[tokio::test]
    async fn test_backend_failure_resolves_to_null() {
        let mock = MockRestClient::failing(500, json!({ "message": "Internal server error" }));
        let schema = schema_with(&mock);

        let response = schema
            .execute(r#"{ restaurants(search: "pizza") { _id } }"#)
            .await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), json!({ "restaurants": null }));
        assert_eq!(mock.requests().len(), 1);
    }
}
