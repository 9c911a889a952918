//! Landing Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Landing Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    pub name: String,

    /// Entry points for browsing the storefront
    pub links: Vec<String>,
}

/// Landing Handler
#[endpoint(tags("home"), summary = "Storefront landing document")]
pub(crate) async fn handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: "Dispensary".to_string(),
        links: ["/branches", "/catalog", "/cart", "/orders", "/register", "/login"]
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
