//! Check stored articles against the authoring rules

use anyhow::Result;

use crate::content::validate::{validate_post, Violation};
use crate::store::Fetcher;
use crate::Kultur;

pub async fn run(kultur: &Kultur) -> Result<()> {
    let violations = collect(&kultur.fetcher()?).await?;
    for v in &violations {
        println!("  {}", v);
    }

    if violations.is_empty() {
        println!("All articles pass.");
        Ok(())
    } else {
        anyhow::bail!("{} problem(s) found", violations.len())
    }
}

/// Fetch every listed article in full and validate it
pub async fn collect(fetcher: &Fetcher) -> Result<Vec<Violation>> {
    let posts = fetcher.posts().await?;
    let mut violations = Vec::new();

    for summary in &posts {
        let slug = summary.slug.as_str();
        match fetcher.post(slug).await? {
            Some(post) => violations.extend(validate_post(&post)),
            None => tracing::warn!("Listed article {:?} could not be fetched", slug),
        }
    }

    tracing::info!("Checked {} articles", posts.len());
    Ok(violations)
}
