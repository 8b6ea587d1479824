//! Registry documentation fetching.
//!
//! The provider's documentation page is only a description source: a failed
//! fetch degrades description quality but never blocks generation, so
//! callers treat errors here as warnings.

use anyhow::{Context, Result};
use tracing::debug;

use terramod_prompt::short_name;

/// File name under wiki/ for a resource's documentation page.
pub fn doc_file_name(provider: &str, resource_type: &str) -> String {
    format!("{}.html.markdown", short_name(provider, resource_type))
}

/// Raw documentation URL for a resource type on the provider's repository.
pub fn doc_url(supplier: &str, provider: &str, version: &str, resource_type: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/terraform-provider-{}/v{}/website/docs/r/{}",
        supplier,
        provider,
        version,
        doc_file_name(provider, resource_type)
    )
}

/// Fetch the documentation text for one resource type.
pub async fn fetch_resource_doc(
    supplier: &str,
    provider: &str,
    version: &str,
    resource_type: &str,
) -> Result<String> {
    let url = doc_url(supplier, provider, version, resource_type);
    println!("🔗 Downloading documentation from: {}", url);

    let response = reqwest::get(&url)
        .await
        .context("Documentation request failed")?;
    if !response.status().is_success() {
        anyhow::bail!("Documentation fetch returned {}", response.status());
    }

    let text = response
        .text()
        .await
        .context("Failed to read documentation body")?;
    debug!("Fetched {} bytes of documentation", text.len());
    Ok(text)
}
