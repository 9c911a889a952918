//! Catalog Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    branches::models::BranchResponse,
    catalog::{errors::into_status_error, models::ProductResponse},
    extensions::*,
    state::State,
};

/// Catalog Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    pub branch: BranchResponse,

    /// Every product with the branch's stock level, ordered by name
    pub products: Vec<ProductResponse>,
}

/// Catalog Handler
///
/// Lists products with the quantity held at the selected branch.
#[endpoint(
    tags("catalog"),
    summary = "Browse Catalog",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let branch = depot.selected_branch()?;

    let branch = state
        .app
        .catalog
        .get_branch(branch)
        .await
        .map_err(into_status_error)?;

    let entries = state
        .app
        .catalog
        .list_catalog(branch.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CatalogResponse {
        branch: branch.into(),
        products: entries
            .into_iter()
            .map(|entry| ProductResponse::new(entry.product, entry.available))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use dispensary_app::domain::catalog::{
        MockCatalogService,
        models::{CatalogEntry, ProductUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{
        TEST_BRANCH_UUID, TestServices, anonymous_with_branch, make_branch, make_product,
    };

    use super::*;

    #[tokio::test]
    async fn test_catalog_lists_products_with_stock() -> TestResult {
        let product = ProductUuid::new();
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_branch()
            .once()
            .withf(|branch| *branch == TEST_BRANCH_UUID)
            .return_once(|branch| Ok(make_branch(branch)));

        catalog
            .expect_list_catalog()
            .once()
            .withf(|branch| *branch == TEST_BRANCH_UUID)
            .return_once(move |_| {
                Ok(vec![CatalogEntry {
                    product: make_product(product),
                    available: 50,
                }])
            });

        let service = TestServices {
            catalog,
            ..TestServices::default()
        }
        .service(
            anonymous_with_branch(),
            Router::with_path("catalog").get(handler),
        );

        let mut res = TestClient::get("http://example.com/catalog")
            .send(&service)
            .await;

        let body: CatalogResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.branch.uuid, TEST_BRANCH_UUID.into_uuid());

        let listed: Vec<(uuid::Uuid, u64, i64)> = body
            .products
            .iter()
            .map(|p| (p.uuid, p.price, p.available))
            .collect();

        assert_eq!(listed, vec![(product.into_uuid(), 30_00, 50)]);

        Ok(())
    }
}
