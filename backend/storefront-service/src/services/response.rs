//! `BaseResponse` builders
//!
//! Business outcomes are reported inside successful replies; only protocol
//! failures become gRPC statuses.

use crate::grpc::proto::common::{BaseResponse, PaginationResponse, ValidationError};
use crate::models::Pagination;
use chrono::{DateTime, Utc};

pub fn success(message: impl Into<String>) -> Option<BaseResponse> {
    Some(BaseResponse {
        status_code: 200,
        message: message.into(),
        is_error: false,
        validation_errors: Vec::new(),
    })
}

fn failure(status_code: i64, message: impl Into<String>) -> Option<BaseResponse> {
    Some(BaseResponse {
        status_code,
        message: message.into(),
        is_error: true,
        validation_errors: Vec::new(),
    })
}

pub fn bad_request(message: impl Into<String>) -> Option<BaseResponse> {
    failure(400, message)
}

pub fn not_found(message: impl Into<String>) -> Option<BaseResponse> {
    failure(404, message)
}

pub fn conflict(message: impl Into<String>) -> Option<BaseResponse> {
    failure(409, message)
}

/// Single-field validation failure
pub fn validation_error(field: &str, message: &str) -> Option<BaseResponse> {
    Some(BaseResponse {
        status_code: 400,
        message: "validation error".to_string(),
        is_error: true,
        validation_errors: vec![ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }],
    })
}

pub fn pagination(pagination: Pagination, total_items: u64) -> Option<PaginationResponse> {
    Some(PaginationResponse {
        current_page: i64::from(pagination.page),
        item_per_page: i64::from(pagination.per_page),
        total_page_count: pagination.page_count(total_items) as i64,
        total_item_count: total_items as i64,
    })
}

pub fn timestamp(at: DateTime<Utc>) -> Option<prost_types::Timestamp> {
    Some(prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    })
}
