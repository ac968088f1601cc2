pub mod grade;
pub mod init;
pub mod recommend;
pub mod stats;
pub mod validate;

/// Fail unless `format` is one of `supported`.
pub(crate) fn ensure_format(format: &str, supported: &[&str]) -> anyhow::Result<()> {
    anyhow::ensure!(
        supported.contains(&format),
        "unknown format: {format} (expected one of: {})",
        supported.join(", ")
    );
    Ok(())
}

/// Parse a comma-separated list, dropping blank entries.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
