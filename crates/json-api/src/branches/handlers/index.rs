//! List Branches Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    branches::models::BranchResponse, catalog::errors::into_status_error, extensions::*,
    state::State,
};

/// Branches Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BranchesResponse {
    /// All branches, ordered by name
    pub branches: Vec<BranchResponse>,

    /// Branch currently selected on the session, if any
    pub selected: Option<Uuid>,
}

/// List Branches Handler
#[endpoint(tags("branches"), summary = "List Branches")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BranchesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let branches = state
        .app
        .catalog
        .list_branches()
        .await
        .map_err(into_status_error)?;

    let selected = depot
        .session_context()
        .and_then(|context| context.branch)
        .map(|branch| branch.into_uuid());

    Ok(Json(BranchesResponse {
        branches: branches.into_iter().map(BranchResponse::from).collect(),
        selected,
    }))
}
