//! HTTP surface of the gateway

use actix_web::{web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::middleware::AccessToken;
use crate::schema::AppSchema;

/// Register GraphQL, SDL and health routes
///
/// GraphiQL is mounted on `GET /` and `GET /graphql` only when `playground` is set.
pub fn configure(cfg: &mut web::ServiceConfig, schema: AppSchema, playground: bool) {
    cfg.app_data(web::Data::new(schema))
        .route("/", web::post().to(graphql_handler))
        .route("/graphql", web::post().to(graphql_handler))
        .route("/schema", web::get().to(schema_handler))
        .route("/health", web::get().to(health_handler));

    if playground {
        cfg.route("/", web::get().to(playground_handler))
            .route("/graphql", web::get().to(playground_handler));
    }
}

async fn graphql_handler(
    schema: web::Data<AppSchema>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(token) = AccessToken::from_request(&http_req) {
        request = request.data(token);
    }
    schema.execute(request).await.into()
}

/// SDL (Schema Definition Language) endpoint for client code generation
async fn schema_handler(schema: web::Data<AppSchema>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn playground_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::{schema_with, MockRestClient};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_health() {
        let schema = schema_with(&MockRestClient::replying(Value::Null));
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, schema, true))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(&body[..], b"ok");
    }

    #[actix_web::test]
    async fn test_schema_endpoint_serves_sdl() {
        let schema = schema_with(&MockRestClient::replying(Value::Null));
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, schema, true))).await;

        let req = test::TestRequest::get().uri("/schema").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let sdl = String::from_utf8(body.to_vec()).unwrap();
        assert!(sdl.contains("getBookedByRestaurantId"));
        assert!(sdl.contains("updateAvailability"));
    }

    #[actix_web::test]
    async fn test_authorization_header_reaches_backend() {
        let mock = MockRestClient::replying(json!([]));
        let schema = schema_with(&mock);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, schema, true))).await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .insert_header((AUTHORIZATION, "admin-token"))
            .set_json(json!({ "query": "{ getRestaurantByAdmin { _id } }" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"], json!({ "getRestaurantByAdmin": [] }));
        assert_eq!(
            mock.only_request().headers,
            vec![("access_token", "admin-token".to_string())]
        );
    }

    #[actix_web::test]
    async fn test_root_path_executes_graphql() {
        let mock = MockRestClient::replying(json!([{ "_id": "i1" }]));
        let schema = schema_with(&mock);
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, schema, false))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({ "query": "{ items { _id } }" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"], json!({ "items": [{ "_id": "i1" }] }));
        assert!(mock.only_request().headers.is_empty());
    }

    #[actix_web::test]
    async fn test_playground_toggle() {
        let schema = schema_with(&MockRestClient::replying(Value::Null));
        let app = test::init_service(
            App::new().configure(|cfg| configure(cfg, schema.clone(), true)),
        )
        .await;
        let req = test::TestRequest::get().uri("/graphql").to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let app = test::init_service(App::new().configure(|cfg| configure(cfg, schema, false))).await;
        let req = test::TestRequest::get().uri("/graphql").to_request();
        assert!(test::call_service(&app, req).await.status().is_client_error());
    }
}
