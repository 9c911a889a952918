//! Select Branch Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dispensary_app::domain::catalog::models::BranchUuid;

use crate::{
    accounts::errors::into_status_error as auth_status_error,
    catalog::errors::into_status_error as catalog_status_error, extensions::*, state::State,
};

/// Branch Selected Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BranchSelectedResponse {
    /// The selected branch
    pub branch_uuid: Uuid,

    /// Bearer token of the session opened for an anonymous visitor
    pub token: Option<String>,
}

/// Select Branch Handler
///
/// Stores the branch on the presenting session, or opens an anonymous session
/// holding it when the request carries none.
#[endpoint(
    tags("branches"),
    summary = "Select Branch",
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Branch selected; continue to the catalog"),
        (status_code = StatusCode::NOT_FOUND, description = "Branch not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "branches.select", skip(branch, depot, res), err)]
pub(crate) async fn handler(
    branch: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BranchSelectedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let branch = BranchUuid::from_uuid(branch.into_inner());

    state
        .app
        .catalog
        .get_branch(branch)
        .await
        .map_err(catalog_status_error)?;

    let token = match depot.session_context() {
        Some(context) => {
            state
                .app
                .auth
                .select_branch(context.session, branch)
                .await
                .map_err(auth_status_error)?;

            None
        }
        None => {
            let issued = state
                .app
                .auth
                .open_session(None, Some(branch))
                .await
                .map_err(auth_status_error)?;

            Some(issued.token)
        }
    };

    info!(branch = %branch, new_session = token.is_some(), "branch selected");

    res.add_header(LOCATION, "/catalog", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::SEE_OTHER);

    Ok(Json(BranchSelectedResponse {
        branch_uuid: branch.into_uuid(),
        token,
    }))
}
