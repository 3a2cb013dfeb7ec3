//! Request ID generation.
//!
//! Every inbound request gets an `x-request-id` header (UUID v4) as early as
//! possible so log lines from one request can be correlated. The ID is
//! propagated onto the response by the request-id layers in the server.

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
