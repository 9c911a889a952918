//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use dispensary_app::domain::catalog::models::ProductUuid;

use crate::{
    catalog::{errors::into_status_error, models::ProductResponse},
    extensions::*,
    state::State,
};

/// Get Product Handler
///
/// Product detail with the quantity held at the selected branch.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let branch = depot.selected_branch()?;
    let product = ProductUuid::from_uuid(product.into_inner());

    let product = state
        .app
        .catalog
        .get_product(product)
        .await
        .map_err(into_status_error)?;

    let available = state
        .app
        .catalog
        .get_available_quantity(branch, product.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(product, available)))
}
