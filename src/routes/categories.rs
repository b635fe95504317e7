use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::catalog::{CategoryList, CreateCategoryRequest, ProductList, UpdateCategoryRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Category,
    response::{ApiResponse, Deleted},
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/deleted", get(list_deleted_categories))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/{id}/restore", put(restore_category))
        .route("/{id}/products", get(list_category_products))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(Pagination),
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/deleted",
    params(Pagination),
    responses(
        (status = 200, description = "List soft-deleted categories", body = ApiResponse<CategoryList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_deleted_categories(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_deleted_categories(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Category>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = catalog_service::get_category(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/products",
    params(("id" = i32, Path, description = "Category ID"), Pagination),
    responses(
        (status = 200, description = "Products of a category", body = ApiResponse<ProductList>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn list_category_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_products_by_category(&state, id, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Name already used for this brand")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let resp = catalog_service::create_category(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Update category", body = ApiResponse<Category>),
        (status = 404, description = "Category or brand not found"),
        (status = 409, description = "Name already used for this brand")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = catalog_service::update_category(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Soft-delete category", body = ApiResponse<Deleted>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = catalog_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}/restore",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Restore category", body = ApiResponse<Category>),
        (status = 404, description = "Deleted category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
pub async fn restore_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = catalog_service::restore_category(&state, &user, id).await?;
    Ok(Json(resp))
}
