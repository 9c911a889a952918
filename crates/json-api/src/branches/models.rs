//! Branch Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispensary_app::domain::catalog::models::Branch;

/// Branch Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BranchResponse {
    /// The unique identifier of the branch
    pub uuid: Uuid,

    pub name: String,

    pub address: String,

    pub phone: Option<String>,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            uuid: branch.uuid.into_uuid(),
            name: branch.name,
            address: branch.address,
            phone: branch.phone,
        }
    }
}
