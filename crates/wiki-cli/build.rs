//! Embeds the version reported by `wiki --version`.
//!
//! Packagers can pin it with `WIKI_BUILD_VERSION`; otherwise it comes from
//! `git describe`, falling back to the crate version outside a checkout.

use std::env;
use std::process::Command;

const OVERRIDE_ENV: &str = "WIKI_BUILD_VERSION";

fn main() {
    println!("cargo:rerun-if-env-changed={OVERRIDE_ENV}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = env::var(OVERRIDE_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=WIKI_VERSION={version}");
}

/// `git describe`, without a leading `v`, marked `-dirty` for local changes.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    if described.is_empty() {
        return None;
    }

    Some(described.trim_start_matches('v').to_string())
}
