//! Stamps `CATALOG_VERSION` for `/version` and `--version`.
//!
//! Release pipelines set `CATALOG_PATCH_VERSION` to their run number to
//! replace the patch segment from `Cargo.toml`. Values that are not a plain
//! number are ignored with a build warning.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=CATALOG_PATCH_VERSION");

    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");
    let Some((release, patch)) = version.rsplit_once('.') else {
        panic!("Version in Cargo.toml must be major.minor.patch, got {version}");
    };

    let patch = match env::var("CATALOG_PATCH_VERSION") {
        Ok(run) if !run.is_empty() && run.bytes().all(|b| b.is_ascii_digit()) => run,
        Ok(run) if !run.trim().is_empty() => {
            println!("cargo:warning=ignoring non-numeric CATALOG_PATCH_VERSION={run}");
            patch.to_string()
        }
        _ => patch.to_string(),
    };

    println!("cargo:rustc-env=CATALOG_VERSION={release}.{patch}");
}
