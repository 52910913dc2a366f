use std::path::{Path, PathBuf};

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

/// Crates that must stay free of storage, web and runtime dependencies.
const PURE_CRATES: &[&str] = &["fitnessapp-domain", "fitnessapp-shared"];

/// Dependencies the pure crates may not take.
const FORBIDDEN: &[&str] = &["sqlx", "axum", "tower", "tower-http", "tokio"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = Vec::new();
    for package in metadata
        .packages
        .iter()
        .filter(|p| PURE_CRATES.contains(&p.name.as_str()))
    {
        for dep in &package.dependencies {
            if FORBIDDEN.contains(&dep.name.as_str()) {
                violations.push(format!("{} depends on {}", package.name, dep.name));
            }
        }

        let src = package
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .context("manifest has no parent directory")?;
        scan_sources(&package.name, &src, &mut violations)?;
    }

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }

    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} architecture violation(s)", violations.len())
}

/// Flags `use` paths into forbidden crates, which would only fail later
/// when someone adds the dependency.
fn scan_sources(package: &str, dir: &Path, violations: &mut Vec<String>) -> anyhow::Result<()> {
    let pattern = Regex::new(r"\b(?:use\s+)?(sqlx|axum|tower_http|tower|tokio)::")
        .context("compiling import pattern")?;

    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            scan_sources(package, &path, violations)?;
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        for (line_no, line) in text.lines().enumerate() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            if let Some(found) = pattern.captures(line).and_then(|c| c.get(1)) {
                violations.push(format!(
                    "{package}: {}:{} uses {}",
                    path.display(),
                    line_no + 1,
                    found.as_str()
                ));
            }
        }
    }
    Ok(())
}
