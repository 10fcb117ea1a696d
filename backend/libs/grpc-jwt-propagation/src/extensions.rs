//! Claims carrier: bearer extraction and request extension helpers
//!
//! The interceptor is the only writer of [`CallIdentity`] into a request;
//! everything downstream reads it back through [`IdentityExt`].

use crate::CallIdentity;
use tonic::metadata::MetadataMap;
use tonic::{Request, Status};
use tracing::{debug, warn};

/// Metadata key carrying the bearer credential
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// Only accepted authorization scheme
pub const BEARER_SCHEME: &str = "Bearer";

/// Message returned for every authentication failure
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated";

/// Message returned when a well-formed token has passed its expiry
pub const TOKEN_EXPIRED_MESSAGE: &str = "token expired";

/// The single status every credential failure collapses into
pub fn unauthenticated() -> Status {
    Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
}

/// Read the raw token out of `authorization: Bearer <token>`
///
/// ## Errors
///
/// Returns `Status::unauthenticated` if:
/// - The authorization entry is missing or not ASCII
/// - The entry is empty
/// - The entry is not exactly two space-separated parts
/// - The scheme is anything other than `Bearer`
pub fn extract_bearer_token(metadata: &MetadataMap) -> Result<&str, Status> {
    let header = metadata.get(AUTHORIZATION_METADATA_KEY).ok_or_else(|| {
        warn!("Missing authorization header");
        unauthenticated()
    })?;

    let value = header.to_str().map_err(|e| {
        warn!("Invalid authorization header encoding: {}", e);
        unauthenticated()
    })?;

    if value.is_empty() {
        warn!("Empty authorization header");
        return Err(unauthenticated());
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if *scheme == BEARER_SCHEME && !token.is_empty() => Ok(*token),
        _ => {
            warn!("Invalid authorization format (expected 'Bearer <token>')");
            Err(unauthenticated())
        }
    }
}

/// Return the request carrying `identity`
///
/// The request is consumed; callers continue with the returned value.
pub fn attach_identity<T>(mut request: Request<T>, identity: CallIdentity) -> Request<T> {
    request.extensions_mut().insert(identity);
    request
}

/// Extension trait for reading the identity attached by the interceptor
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::IdentityExt;
/// use tonic::{Request, Status};
///
/// fn handler<T>(request: Request<T>) -> Result<(), Status> {
///     let identity = request.identity()?;
///     println!("User ID: {}", identity.user_id);
///     Ok(())
/// }
/// ```
pub trait IdentityExt {
    /// Identity stored by `AuthInterceptor`
    ///
    /// ## Errors
    ///
    /// Returns `Status::unauthenticated` when nothing was attached: either a
    /// public route or a call that bypassed the interceptor.
    fn identity(&self) -> Result<&CallIdentity, Status>;
}

impl<T> IdentityExt for Request<T> {
    fn identity(&self) -> Result<&CallIdentity, Status> {
        self.extensions().get::<CallIdentity>().ok_or_else(|| {
            debug!("No identity attached to request");
            unauthenticated()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::jwt::{Claims, Role};
    use tonic::metadata::MetadataValue;
    use uuid::Uuid;

    fn metadata_with(value: &'static str) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        metadata.insert(AUTHORIZATION_METADATA_KEY, MetadataValue::from_static(value));
        metadata
    }

    fn identity(role: Role) -> CallIdentity {
        let claims = Claims::new(Uuid::new_v4(), "test@example.com", "Test User", role);
        CallIdentity::from_validated_claims(claims, "token").unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let metadata = metadata_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&metadata).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_missing_header() {
        let status = extract_bearer_token(&MetadataMap::new()).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(status.message(), UNAUTHENTICATED_MESSAGE);
    }

    #[test]
    fn test_extract_rejects_bad_shapes() {
        for value in [
            "",
            "abc.def.ghi",
            "Basic abc.def.ghi",
            "bearer abc.def.ghi",
            "Bearer",
            "Bearer ",
            "Bearer a b",
            "Bearer  abc",
        ] {
            let status = extract_bearer_token(&metadata_with(value)).unwrap_err();
            assert_eq!(status.code(), tonic::Code::Unauthenticated, "value: {value:?}");
        }
    }

    #[test]
    fn test_identity_missing() {
        let request = Request::new(());
        let status = request.identity().unwrap_err();

        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_attach_then_read() {
        let expected = identity(Role::Customer);
        let request = attach_identity(Request::new(()), expected.clone());

        assert_eq!(request.identity().unwrap(), &expected);
    }
}
