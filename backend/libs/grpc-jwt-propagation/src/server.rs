//! Server-side authentication gate
//!
//! Every incoming call passes through [`AuthInterceptor::intercept`] before its
//! handler runs. Routes listed in [`PublicRoutes`] go straight through; all
//! others need a bearer token that is not revoked, carries a valid HS256
//! signature and has not expired.

use crate::claims::CallIdentity;
use crate::extensions::{attach_identity, extract_bearer_token, unauthenticated, TOKEN_EXPIRED_MESSAGE};
use crate::revocation::RevocationCache;
use crypto_core::jwt::{TokenCodec, TokenError};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tonic::metadata::MetadataMap;
use tonic::{Request, Status};
use tracing::{debug, warn};

/// Fully qualified method names (`/package.Service/Method`) that skip authentication
#[derive(Debug, Clone, Default)]
pub struct PublicRoutes {
    methods: HashSet<String>,
}

impl PublicRoutes {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, full_method: &str) -> bool {
        self.methods.contains(full_method)
    }
}

/// Route-aware interceptor validating bearer tokens
///
/// Unlike a plain `tonic::service::Interceptor`, this one is told the method
/// being called, which is what lets the public-route list work.
///
/// ## Check order
///
/// 1. Public route: pass through with no identity
/// 2. Bearer token present and well-formed
/// 3. Token not in the revocation cache
/// 4. Signature and expiry valid
/// 5. Subject not revoked for tokens issued before a cutoff
#[derive(Clone)]
pub struct AuthInterceptor {
    codec: Arc<TokenCodec>,
    revocations: RevocationCache,
    public_routes: Arc<PublicRoutes>,
}

impl AuthInterceptor {
    pub fn new(codec: Arc<TokenCodec>, revocations: RevocationCache, public_routes: PublicRoutes) -> Self {
        Self {
            codec,
            revocations,
            public_routes: Arc::new(public_routes),
        }
    }

    pub fn is_public(&self, full_method: &str) -> bool {
        self.public_routes.contains(full_method)
    }

    /// Validate the bearer credential in `metadata`
    ///
    /// ## Errors
    ///
    /// Returns `Status::unauthenticated` with message "token expired" for an
    /// expired token and "Unauthenticated" for every other failure.
    pub fn authenticate(&self, metadata: &MetadataMap) -> Result<CallIdentity, Status> {
        let token = extract_bearer_token(metadata)?;

        if self.revocations.is_revoked(token) {
            warn!("Rejected revoked token");
            return Err(unauthenticated());
        }

        let claims = self.codec.decode(token).map_err(|e| {
            warn!("JWT validation failed: {}", e);
            match e {
                TokenError::Expired => Status::unauthenticated(TOKEN_EXPIRED_MESSAGE),
                _ => unauthenticated(),
            }
        })?;

        let identity = CallIdentity::from_validated_claims(claims, token).map_err(|e| {
            warn!("Failed to parse JWT claims: {}", e);
            unauthenticated()
        })?;

        if self.revocations.is_subject_revoked(&identity.user_id, identity.iat) {
            warn!(user_id = %identity.user_id, "Rejected token issued before subject revocation");
            return Err(unauthenticated());
        }

        debug!(
            user_id = %identity.user_id,
            role = %identity.role,
            "JWT validated successfully"
        );

        Ok(identity)
    }

    /// Gate `handler` behind authentication for `full_method`
    ///
    /// On a protected route the handler receives the request with a
    /// [`CallIdentity`] attached; on failure it is never invoked.
    pub async fn intercept<T, R, F, Fut>(
        &self,
        full_method: &str,
        request: Request<T>,
        handler: F,
    ) -> Result<R, Status>
    where
        F: FnOnce(Request<T>) -> Fut,
        Fut: Future<Output = Result<R, Status>>,
    {
        if self.is_public(full_method) {
            debug!(method = full_method, "Public route, skipping authentication");
            return handler(request).await;
        }

        let identity = self.authenticate(request.metadata()).map_err(|status| {
            debug!(method = full_method, "Authentication failed");
            status
        })?;

        handler(attach_identity(request, identity)).await
    }
}
