//! Client-side bearer injection
//!
//! Adds `authorization: Bearer <token>` to outgoing calls.

use crate::extensions::{AUTHORIZATION_METADATA_KEY, BEARER_SCHEME};
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Client-side interceptor that injects a bearer token into gRPC metadata
///
/// The header value is parsed once at construction and cloned into every
/// request.
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::BearerInterceptor;
///
/// # fn example(token: &str) -> Result<(), tonic::Status> {
/// let interceptor = BearerInterceptor::new(token)?;
/// // let client = CartServiceClient::with_interceptor(channel, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BearerInterceptor {
    auth_header: AsciiMetadataValue,
}

impl BearerInterceptor {
    /// ## Errors
    ///
    /// Returns `Status::invalid_argument` if the token is not valid ASCII metadata.
    pub fn new(token: impl AsRef<str>) -> Result<Self, Status> {
        let value = format!("{BEARER_SCHEME} {}", token.as_ref());
        let auth_header = AsciiMetadataValue::try_from(value)
            .map_err(|_| Status::invalid_argument("token is not valid header text"))?;

        Ok(Self { auth_header })
    }

    /// Attach the authorization header to any request
    pub fn apply<T>(&self, mut request: Request<T>) -> Request<T> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_METADATA_KEY, self.auth_header.clone());
        request
    }
}

impl Interceptor for BearerInterceptor {
    fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
        Ok(self.apply(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interceptor_injects_header() {
        let mut interceptor = BearerInterceptor::new("test-token-123").unwrap();

        let request = interceptor.call(Request::new(())).unwrap();

        let auth = request.metadata().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer test-token-123");
    }

    #[test]
    fn test_apply_replaces_existing_header() {
        let interceptor = BearerInterceptor::new("fresh").unwrap();
        let mut request = Request::new(42u32);
        request
            .metadata_mut()
            .insert("authorization", "Bearer stale".parse().unwrap());

        let request = interceptor.apply(request);

        let auth = request.metadata().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer fresh");
        assert_eq!(*request.get_ref(), 42);
    }

    #[test]
    fn test_new_rejects_non_ascii() {
        let status = BearerInterceptor::new("tok\nen").unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
