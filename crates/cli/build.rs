// Build script for Chatscope CLI crate
//
// Stamps the binary with build time and commit for `--version`.

fn main() {
    println!(
        "cargo:rustc-env=CLI_BUILD_TIMESTAMP={}",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let commit = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CLI_GIT_COMMIT={}", commit);

    println!("cargo:rerun-if-changed=build.rs");
}
