//! ---
//! wmm_section: "01-wire-schema"
//! wmm_subsection: "build"
//! wmm_type: "source"
//! wmm_scope: "build"
//! wmm_description: "Compiles the gateway API protobuf definition into Rust."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
// Generation runs inside the crate so every consumer sees identical types
// without a separate codegen step. A vendored `protoc` keeps the build
// independent of the host toolchain.

fn main() {
    let protoc = protoc_bin_vendored::protoc_bin_path().expect("failed to locate protoc");
    std::env::set_var("PROTOC", protoc);

    println!("cargo:rerun-if-changed=proto/wirepas/gateway_api.proto");
    println!("cargo:rerun-if-changed=proto");

    prost_build::Config::new()
        .compile_protos(&["proto/wirepas/gateway_api.proto"], &["proto"])
        .expect("failed to compile gateway api protobufs");
}
