pub mod claim_headers;
pub mod grpc;
pub mod http;
