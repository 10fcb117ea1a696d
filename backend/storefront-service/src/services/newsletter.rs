use crate::db::NewsletterRepository;
use crate::error::Result;
use crate::grpc::proto::newsletter::*;
use crate::models::newsletter::PUBLIC_ACTOR;
use crate::models::Newsletter;
use crate::services::response;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct NewsletterService {
    newsletters: Arc<dyn NewsletterRepository>,
}

impl NewsletterService {
    pub fn new(newsletters: Arc<dyn NewsletterRepository>) -> Self {
        Self { newsletters }
    }

    /// Public; subscribing an address twice succeeds without a second row
    pub async fn subscribe(
        &self,
        request: SubscribeNewsletterRequest,
    ) -> Result<SubscribeNewsletterResponse> {
        if request.email.trim().is_empty() {
            return Ok(SubscribeNewsletterResponse {
                base: response::validation_error("email", "Email is required"),
            });
        }

        if self.newsletters.get_by_email(&request.email).await?.is_some() {
            debug!("Newsletter address already subscribed");
        } else {
            self.newsletters
                .insert(&Newsletter {
                    id: Uuid::new_v4(),
                    full_name: request.full_name,
                    email: request.email,
                    created_at: Utc::now(),
                    created_by: PUBLIC_ACTOR.to_string(),
                })
                .await?;
            info!("Newsletter subscription added");
        }

        Ok(SubscribeNewsletterResponse {
            base: response::success("Subscribe newsletter success"),
        })
    }
}
