//! Account Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dispensary_app::auth::User;

/// Account Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub uuid: Uuid,

    pub name: String,

    pub email: String,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
        }
    }
}
