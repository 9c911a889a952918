//! Session middleware.

use std::sync::Arc;

use dispensary_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{
    extensions::{SessionContext, *},
    state::State,
};

/// Where visitors without a selected branch are sent.
pub(crate) const BRANCH_SELECTION_PATH: &str = "/branches";

enum BearerToken<'a> {
    Absent,
    Malformed,
    Present(&'a str),
}

/// Resolve the bearer token, if any, into a [`SessionContext`].
///
/// Requests without an `Authorization` header continue anonymously.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = match extract_bearer_token(req) {
        BearerToken::Absent => None,
        BearerToken::Malformed => {
            res.render(StatusError::unauthorized().brief("Invalid Authorization header"));
            ctrl.skip_rest();

            return;
        }
        BearerToken::Present(token) => Some(token.to_owned()),
    };

    let Some(token) = token else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let session = match state.app.auth.resolve_session(&token).await {
        Ok(session) => session,
        Err(AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired session"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to resolve session: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_session_context(SessionContext::from(session));

    ctrl.call_next(req, depot, res).await;
}

/// Send visitors that have not chosen a branch to the branch list.
#[salvo::handler]
pub(crate) async fn require_branch(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let has_branch = depot
        .session_context()
        .is_some_and(|context| context.branch.is_some());

    if !has_branch {
        res.render(Redirect::other(BRANCH_SELECTION_PATH));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> BearerToken<'_> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return BearerToken::Absent;
    };

    let Ok(value) = value.to_str() else {
        return BearerToken::Malformed;
    };

    let mut parts = value.splitn(2, ' ');

    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return BearerToken::Malformed;
    };

    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return BearerToken::Malformed;
    }

    BearerToken::Present(token)
}
