fn main() {
    // Re-run if git HEAD changes (new commits, checkouts, etc.)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Release tags report the crate version; everything else reports dev@<hash>.
    let version = if git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some() {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    } else {
        match git(&["rev-parse", "--short", "HEAD"]) {
            Some(hash) => format!("dev@{hash}"),
            None => "dev@unknown".to_string(),
        }
    };

    println!("cargo:rustc-env=REMARQ_VERSION={version}");
}

fn git(args: &[&str]) -> Option<String> {
    let out = std::process::Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}
