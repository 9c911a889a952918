//! Session context stored in the depot by the session middleware.

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use dispensary_app::{
    auth::{Session, SessionUuid, UserUuid},
    domain::catalog::models::BranchUuid,
};

/// Identity and branch selection of the presenting session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionContext {
    pub session: SessionUuid,
    pub user: Option<UserUuid>,
    pub branch: Option<BranchUuid>,
}

impl From<Session> for SessionContext {
    fn from(session: Session) -> Self {
        Self {
            session: session.uuid,
            user: session.user_uuid,
            branch: session.branch_uuid,
        }
    }
}

/// Helpers for reading the session context inside handlers.
pub(crate) trait DepotSessionExt {
    fn insert_session_context(&mut self, context: SessionContext);

    /// `None` for anonymous requests without a bearer token.
    fn session_context(&self) -> Option<SessionContext>;

    fn user_or_401(&self) -> Result<UserUuid, StatusError>;

    /// Branch chosen on the session. Routes needing it sit behind the
    /// `require_branch` hoop, so absence here is a routing bug.
    fn selected_branch(&self) -> Result<BranchUuid, StatusError>;
}

impl DepotSessionExt for Depot {
    fn insert_session_context(&mut self, context: SessionContext) {
        self.inject(context);
    }

    fn session_context(&self) -> Option<SessionContext> {
        self.obtain::<SessionContext>().ok().copied()
    }

    fn user_or_401(&self) -> Result<UserUuid, StatusError> {
        self.session_context()
            .and_then(|context| context.user)
            .ok_or_else(|| StatusError::unauthorized().brief("Please log in to continue"))
    }

    fn selected_branch(&self) -> Result<BranchUuid, StatusError> {
        self.session_context()
            .and_then(|context| context.branch)
            .ok_or_else(|| {
                error!("branch required but not selected; is require_branch missing?");

                StatusError::internal_server_error()
            })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn anonymous_depot_has_no_user() {
        let depot = Depot::new();

        assert_eq!(depot.session_context(), None);
        assert_eq!(
            depot.user_or_401().err().map(|e| e.code),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn inserted_context_is_readable() {
        let user = UserUuid::new();
        let branch = BranchUuid::new();
        let mut depot = Depot::new();

        depot.insert_session_context(SessionContext {
            session: SessionUuid::new(),
            user: Some(user),
            branch: Some(branch),
        });

        assert_eq!(depot.user_or_401().ok(), Some(user));
        assert_eq!(depot.selected_branch().ok(), Some(branch));
    }
}
