//! Build script for arl-sys
//!
//! This script locates the ARL C wrapper library (libarlffi) via pkg-config
//! or the `ARL_LIB_DIR` environment variable. When neither is available the
//! link directive is skipped with a warning, so crates that only use the
//! pure-Rust parts of the bindings still build.

use std::env;
use std::path::PathBuf;

fn main() {
    // Tell cargo to rerun if these change
    println!("cargo:rerun-if-env-changed=ARL_LIB_DIR");
    println!("cargo:rerun-if-env-changed=ARL_PYTHON_LIB");

    // Try pkg-config first (works after installing the ffiwrappers)
    if pkg_config::probe_library("arlffi").is_ok() {
        println!("cargo:rustc-link-lib=arlffi");
    } else if let Some(lib_dir) = locate_lib_dir() {
        println!("cargo:rustc-link-search=native={}", lib_dir.display());
        println!("cargo:rustc-link-lib=arlffi");
    } else {
        println!(
            "cargo:warning=libarlffi not found (set ARL_LIB_DIR); native ARL calls will not link"
        );
        return;
    }

    // The wrapper embeds a Python interpreter; allow overriding which one.
    if let Ok(python) = env::var("ARL_PYTHON_LIB") {
        println!("cargo:rustc-link-lib={}", python);
    }
}

fn locate_lib_dir() -> Option<PathBuf> {
    if let Ok(lib_dir) = env::var("ARL_LIB_DIR") {
        return Some(PathBuf::from(lib_dir));
    }

    // Default: assume building from bindings/rust/arl-sys/ inside an ARL
    // checkout, where the wrapper is built into ../../../ffiwrappers/lib/
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").ok()?;
    let lib_path = PathBuf::from(&manifest_dir).join("../../../ffiwrappers/lib");
    if lib_path.exists() {
        Some(lib_path.canonicalize().unwrap_or(lib_path))
    } else {
        None
    }
}
