fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token_proto = "proto/heimdall/v1/token.proto";
    let proto_include = "proto";

    println!("cargo:rerun-if-changed={}", token_proto);
    println!("cargo:rerun-if-env-changed=HEIMDALL_REGEN_PROTO");

    // src/proto is checked in. Set HEIMDALL_REGEN_PROTO to rewrite it (needs protoc).
    if std::env::var_os("HEIMDALL_REGEN_PROTO").is_none() {
        return Ok(());
    }

    if !std::path::Path::new(token_proto).exists() {
        println!(
            "cargo:warning=Proto file not found, skipping tonic codegen: {}",
            token_proto
        );
        return Ok(());
    }

    if let Err(e) = tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .out_dir("src/proto")
        .compile_protos(&[token_proto], &[proto_include])
    {
        println!(
            "cargo:warning=tonic-build failed (protoc may not be installed): {}",
            e
        );
    }
    Ok(())
}
