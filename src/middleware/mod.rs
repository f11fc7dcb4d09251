pub mod etag;
pub mod request_id;
pub mod response;

pub use etag::{etag_middleware, fingerprint, ConditionalResponseState};
pub use request_id::{request_id_middleware, RequestContext, REQUEST_ID_HEADER};
pub use response::{ApiResponse, ApiResult};
