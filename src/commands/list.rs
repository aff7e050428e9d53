//! List store content

use anyhow::Result;

use crate::helpers::DateFormatter;
use crate::Kultur;

/// List store content by type
pub async fn run(kultur: &Kultur, content_type: &str) -> Result<()> {
    let fetcher = kultur.fetcher()?;

    match content_type {
        "post" | "posts" => {
            let posts = fetcher.posts().await?;
            let dates = DateFormatter::new(&kultur.config.timezone, &kultur.config.locale);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({})",
                    dates.long(&post.display_date()),
                    post.title,
                    post.slug.as_str(),
                    post.category.title
                );
            }
        }
        "category" | "categories" => {
            let categories = fetcher.categories().await?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} [{}]", category.title, category.slug.as_str());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
