//! Request-pipeline authorization for axum routers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;

use warden_core::AuthenticatedPrincipal;

use crate::authenticator::Authenticator;
use crate::error::AuthError;

/// Bearer credential middleware.
///
/// Attaches the verified principal to the request extensions, or answers 401
/// without running the downstream handler.
pub async fn require_principal(
    State(auth): State<Arc<Authenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    match auth.authorize(request.headers()) {
        Ok(principal) => {
            tracing::trace!(user_id = %principal.user_id, "request authorized");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(
                reason = err.kind(),
                method = %request.method(),
                path = %request.uri().path(),
                "request rejected"
            );
            err.into_response()
        }
    }
}

/// Guard every route of `router` with [`require_principal`].
pub fn protected<S>(router: Router<S>, auth: Arc<Authenticator>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(auth, require_principal))
}

/// Handler extractor for the principal attached by [`require_principal`].
#[derive(Debug, Clone)]
pub struct Principal(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(Principal)
            .ok_or(AuthError::MissingAuthorization)
    }
}
