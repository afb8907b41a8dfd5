//! Construction of error responses.

use iroha_data_model::query::{
    error::{ErrorQueryResponse, ErrorQueryType},
    QueryExecutorResult,
};
use iroha_logger::prelude::*;

use super::QueryContext;

/// Log the failure of the query in `context` and return it as an error response.
///
/// Every error response of the read path is produced here, so each is logged
/// exactly once.
///
/// # Errors
/// Always; the error carries `error_type`, `code` and `message`.
pub fn log_and_return_error_response(
    context: &QueryContext,
    error_type: ErrorQueryType,
    message: impl Into<String>,
    code: u32,
) -> QueryExecutorResult {
    let message = message.into();
    error!(
        query_hash = %context.query_hash,
        %error_type,
        code,
        reason = %message,
        "Query failed"
    );
    Err(ErrorQueryResponse {
        error_type,
        error_code: code,
        message,
        query_hash: context.query_hash,
    })
}

/// Message of `error` followed by the messages of its sources.
pub(super) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
