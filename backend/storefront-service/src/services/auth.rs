//! Registration, login and the token lifecycle
use crate::db::UserRepository;
use crate::error::{Result, StorefrontError};
use crate::grpc::proto::auth::*;
use crate::models::User;
use crate::security::{hash_password, verify_password};
use crate::services::{caller, response};
use chrono::Utc;
use crypto_core::jwt::{Claims, TokenCodec, TOKEN_EXPIRY_HOURS};
use grpc_jwt_propagation::{CallIdentity, RevocationCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codec: Arc<TokenCodec>,
    revocations: RevocationCache,
    revoke_on_password_change: bool,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codec: Arc<TokenCodec>,
        revocations: RevocationCache,
        revoke_on_password_change: bool,
    ) -> Self {
        Self {
            users,
            codec,
            revocations,
            revoke_on_password_change,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse> {
        if request.password != request.password_confirmation {
            return Ok(RegisterResponse {
                base: response::validation_error("password_confirmation", "Password is not match"),
            });
        }

        if self.users.get_by_email(&request.email).await?.is_some() {
            return Ok(RegisterResponse {
                base: response::conflict("User already exist"),
            });
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new_customer(&request.full_name, &request.email, password_hash);
        self.users.insert(&user).await?;

        info!(user_id = %user.id, "User registered");

        Ok(RegisterResponse {
            base: response::success("User successfully registered"),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let Some(user) = self.users.get_by_email(&request.email).await? else {
            return Ok(LoginResponse {
                base: response::not_found("User is not registered"),
                access_token: String::new(),
            });
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(StorefrontError::Unauthenticated);
        }

        let claims = Claims::new(user.id, &user.email, &user.full_name, user.role);
        let access_token = self.codec.issue(&claims)?;

        info!(user_id = %user.id, role = %user.role, "Login successful");

        Ok(LoginResponse {
            base: response::success("Login successful"),
            access_token,
        })
    }

    /// Revoke the caller's token for exactly the time it has left
    pub async fn logout(&self, identity: Option<&CallIdentity>) -> Result<LogoutResponse> {
        let identity = caller(identity)?;

        self.revocations
            .revoke(identity.bearer_token(), identity.remaining_ttl());

        info!(user_id = %identity.user_id, "User logged out");

        Ok(LogoutResponse {
            base: response::success("Logout Success"),
        })
    }

    pub async fn change_password(
        &self,
        identity: Option<&CallIdentity>,
        request: ChangePasswordRequest,
    ) -> Result<ChangePasswordResponse> {
        let identity = caller(identity)?;

        if request.new_password != request.new_password_confirmation {
            return Ok(ChangePasswordResponse {
                base: response::validation_error(
                    "new_password_confirmation",
                    "New password is not match",
                ),
            });
        }

        let Some(user) = self.users.get_by_id(identity.user_id).await? else {
            return Ok(ChangePasswordResponse {
                base: response::not_found("User not found"),
            });
        };

        if !verify_password(&request.old_password, &user.password_hash)? {
            return Ok(ChangePasswordResponse {
                base: response::bad_request("Old password is not match"),
            });
        }

        let password_hash = hash_password(&request.new_password)?;
        self.users
            .update_password(user.id, &password_hash, &identity.full_name)
            .await?;

        if self.revoke_on_password_change {
            let lifetime = Duration::from_secs(TOKEN_EXPIRY_HOURS as u64 * 3600);
            self.revocations
                .revoke_subject(user.id, Utc::now().timestamp(), lifetime);
            self.revocations
                .revoke(identity.bearer_token(), identity.remaining_ttl());
        }

        info!(user_id = %user.id, "Password changed");

        Ok(ChangePasswordResponse {
            base: response::success("Change password success"),
        })
    }

    pub async fn get_profile(&self, identity: Option<&CallIdentity>) -> Result<GetProfileResponse> {
        let identity = caller(identity)?;

        let Some(user) = self.users.get_by_id(identity.user_id).await? else {
            return Ok(GetProfileResponse {
                base: response::not_found("User not found"),
                ..Default::default()
            });
        };

        Ok(GetProfileResponse {
            base: response::success("Get profile success"),
            user_id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            role_code: user.role.to_string(),
            member_since: response::timestamp(user.created_at),
        })
    }
}
