//! Request handlers and router assembly.

use axum::extract::{Path, Query};
use axum::routing::{get, post, put};
use axum::{Json, Router, debug_handler};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::{IntoParams, OpenApi};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{AppJson, ValidatedQuery};
use crate::item::{Item, ItemWithId, ItemWithQuery, PricedItem};

/// Build the application router.
pub fn create_app() -> Router {
    Router::new()
        .route("/items1/", post(create_item))
        .route("/items2/{item_id}", put(replace_item))
        .route("/items3/{item_id}", put(replace_item_with_query))
        .route("/items4", get(read_items))
        .route("/openapi.json", get(openapi_spec))
        .layer(TraceLayer::new_for_http())
}

// Handler for POST /items1/
#[utoipa::path(
    post,
    path = "/items1/",
    request_body = Item,
    responses(
        (status = 200, description = "Item fields plus the tax-inclusive total", body = PricedItem),
        (status = 422, description = "Body rejected, or `tax` absent")
    )
)]
#[debug_handler]
pub async fn create_item(AppJson(item): AppJson<Item>) -> Result<Json<PricedItem>, ApiError> {
    let tax = item.tax.ok_or(ApiError::MissingField("tax"))?;
    let price_with_tax = item.price + tax;
    info!(name = %item.name, price_with_tax, "created item");

    Ok(Json(PricedItem {
        item,
        price_with_tax,
    }))
}

// Handler for PUT /items2/{item_id}
#[utoipa::path(
    put,
    path = "/items2/{item_id}",
    params(("item_id" = i64, Path, description = "Identifier of the item to replace")),
    request_body = Item,
    responses(
        (status = 200, description = "Item fields merged with the path identifier", body = ItemWithId),
        (status = 422, description = "Body rejected")
    )
)]
#[debug_handler]
pub async fn replace_item(
    Path(item_id): Path<i64>,
    AppJson(item): AppJson<Item>,
) -> Json<ItemWithId> {
    info!(item_id, name = %item.name, "replaced item");

    Json(ItemWithId { item_id, item })
}

/// Optional query parameter for the items3 route.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    pub q: Option<String>,
}

// Handler for PUT /items3/{item_id}
#[utoipa::path(
    put,
    path = "/items3/{item_id}",
    params(
        ("item_id" = i64, Path, description = "Identifier of the item to replace"),
        ItemQuery
    ),
    request_body = Item,
    responses(
        (status = 200, description = "Item fields merged with the path identifier and, when non-empty, `q`", body = ItemWithQuery),
        (status = 422, description = "Body rejected")
    )
)]
#[debug_handler]
pub async fn replace_item_with_query(
    Path(item_id): Path<i64>,
    Query(query): Query<ItemQuery>,
    AppJson(item): AppJson<Item>,
) -> Json<ItemWithQuery> {
    // An empty q= is treated the same as no q at all.
    let q = query.q.filter(|q| !q.is_empty());
    info!(item_id, q = ?q, "replaced item");

    Json(ItemWithQuery { item_id, item, q })
}

static FIXED_QUERY: Lazy<Regex> = Lazy::new(|| Regex::new("^fixedquery$").unwrap());

/// Required, constrained query parameter for the items4 route.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadItemsParams {
    #[validate(
        length(min = 3, max = 50, message = "must be between 3 and 50 characters"),
        regex(path = *FIXED_QUERY, message = "must match `^fixedquery$`")
    )]
    #[param(min_length = 3, max_length = 50, pattern = "^fixedquery$")]
    pub q: String,
}

// Handler for GET /items4
#[utoipa::path(
    get,
    path = "/items4",
    params(ReadItemsParams),
    responses(
        (status = 200, description = "Fixed item list plus a keyed copy of `q`"),
        (status = 422, description = "`q` missing or constraint violated")
    )
)]
#[debug_handler]
pub async fn read_items(ValidatedQuery(params): ValidatedQuery<ReadItemsParams>) -> Json<Value> {
    let mut results = serde_json::Map::new();
    results.insert(
        "items".to_string(),
        json!([{"item_id": "Foo"}, {"item_id": "Bar"}]),
    );
    // The value of q doubles as the key, mirroring the echoed entry.
    results.insert(params.q.clone(), Value::String(params.q));

    Json(Value::Object(results))
}

#[derive(OpenApi)]
#[openapi(
    info(title = "item_manager", description = "Typed request binding demo API"),
    paths(create_item, replace_item, replace_item_with_query, read_items),
    components(schemas(Item, PricedItem, ItemWithId, ItemWithQuery))
)]
struct ApiDoc;

// Handler for GET /openapi.json
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
