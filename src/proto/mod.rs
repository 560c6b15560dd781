// Generated by tonic-build from proto/heimdall/v1/token.proto.

pub mod heimdall {
    pub mod v1 {
        include!("heimdall.v1.rs");
    }
}
