//! Print one rendered article

use anyhow::Result;

use crate::render::render_document;
use crate::Kultur;

pub async fn run(kultur: &Kultur, slug: &str) -> Result<()> {
    let post = match kultur.fetcher()?.post(slug).await? {
        Some(post) => post,
        None => anyhow::bail!("No article with slug {:?}", slug),
    };

    let images = kultur.images();
    println!("{}", render_document(&post.body, &images));
    Ok(())
}
