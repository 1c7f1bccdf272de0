//! GraphQL schema
//!
//! Every resolver makes exactly one REST call through the injected
//! [`RestClient`](crate::clients::RestClient). Failures are logged and the
//! field resolves to `null`; `login` is the only operation that surfaces the
//! backend failure to the client.

pub mod admin;
pub mod item;
pub mod order;
pub mod profile;
pub mod restaurant;

use async_graphql::{
    Context, EmptySubscription, MergedObject, Result as GraphQLResult, Schema, ID,
};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::clients::{RestRequest, SharedRestClient};
use crate::config::GraphQLConfig;
use crate::error::RestError;

/// Root query object
#[derive(MergedObject, Default)]
pub struct QueryRoot(
    restaurant::RestaurantQuery,
    item::ItemQuery,
    order::OrderQuery,
    profile::ProfileQuery,
    admin::AdminQuery,
);

/// Root mutation object
#[derive(MergedObject, Default)]
pub struct MutationRoot(order::OrderMutation, admin::AdminMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around a REST client
pub fn build_schema(client: SharedRestClient, config: &GraphQLConfig) -> AppSchema {
    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(client)
    .limit_depth(config.max_depth)
    .limit_complexity(config.max_complexity);

    if !config.introspection {
        builder = builder.disable_introspection();
    }

    builder.finish()
}

pub(crate) fn rest_client<'a>(ctx: &Context<'a>) -> GraphQLResult<&'a SharedRestClient> {
    ctx.data::<SharedRestClient>()
        .map_err(|_| "REST client not available".into())
}

/// Send one request; a failure is logged and reported as `None`
pub(crate) async fn send_or_log(
    ctx: &Context<'_>,
    operation: &'static str,
    request: RestRequest,
) -> GraphQLResult<Option<Value>> {
    let client = rest_client(ctx)?;

    match client.send(request).await {
        Ok(body) => Ok(Some(body)),
        Err(e) => {
            log_failure(operation, &e);
            Ok(None)
        }
    }
}

/// Send one request and decode the body, or the named field of it
///
/// A `null` projection resolves to `None`; decode failures are logged like
/// transport failures.
pub(crate) async fn fetch<T: DeserializeOwned>(
    ctx: &Context<'_>,
    operation: &'static str,
    request: RestRequest,
    field: Option<&str>,
) -> GraphQLResult<Option<T>> {
    let Some(body) = send_or_log(ctx, operation, request).await? else {
        return Ok(None);
    };

    match project(body, field) {
        Ok(value) => Ok(value),
        Err(e) => {
            log_failure(operation, &e);
            Ok(None)
        }
    }
}

pub(crate) fn project<T: DeserializeOwned>(
    body: Value,
    field: Option<&str>,
) -> Result<Option<T>, RestError> {
    let value = match field {
        Some(field) => match body {
            Value::Object(mut map) => map.remove(field).unwrap_or(Value::Null),
            _ => Value::Null,
        },
        None => body,
    };

    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Render a backend value for a `String` field
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Render a backend value for an `Int` field
pub(crate) fn int_of(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i32::from(*b)),
        _ => None,
    }
}

pub(crate) fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(crate) fn bool_of(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

// Field-level decoders: a scalar that does not coerce becomes `None` instead
// of failing the whole response.

fn lenient<'de, D, T>(
    deserializer: D,
    convert: fn(&Value) -> Option<T>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(convert))
}

fn lenient_list<'de, D, T>(
    deserializer: D,
    convert: fn(&Value) -> Option<T>,
) -> Result<Option<Vec<Option<T>>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(items.iter().map(convert).collect())),
        _ => Ok(None),
    }
}

/// Accept any scalar for a `String` field; relational backends hand out numeric keys
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, text_of)
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<ID>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.map(ID))
}

pub(crate) fn deserialize_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, int_of)
}

pub(crate) fn deserialize_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, float_of)
}

pub(crate) fn deserialize_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer, bool_of)
}

pub(crate) fn deserialize_text_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<Option<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_list(deserializer, text_of)
}

pub(crate) fn deserialize_float_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<Option<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_list(deserializer, float_of)
}

pub(crate) fn log_failure(operation: &'static str, err: &RestError) {
    match err.response_body() {
        Some(body) => error!(
            operation,
            status = ?err.status(),
            response = %body,
            "REST backend rejected request"
        ),
        None => error!(operation, error = %err, "REST call failed"),
    }
}
