use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use std::sync::Arc;

use super::{AppError, AppState};
use crate::content::{Page, Post, PostSummary};
use crate::helpers;
use crate::image;
use crate::render::{render_document, render_figure};
use crate::templates::{
    date_pair, reading_minutes, ArticleData, AuthorData, CategoryData, PageData,
    PostListItem,
};

type PageResult = Result<Html<String>, AppError>;

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    state.respond(render_index(&state).await)
}

pub async fn show_post(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    state.respond(render_post(&state, &slug).await)
}

pub async fn about(State(state): State<Arc<AppState>>) -> Response {
    state.respond(render_static(&state, "about", "about.html", "À propos").await)
}

pub async fn contact(State(state): State<Arc<AppState>>) -> Response {
    state.respond(render_static(&state, "contact", "contact.html", "Contact").await)
}

pub async fn categories(State(state): State<Arc<AppState>>) -> Response {
    state.respond(render_categories(&state).await)
}

pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    state.respond(Err(AppError::NotFound(
        "La page demandée n'existe pas.".to_string(),
    )))
}

async fn render_index(state: &AppState) -> PageResult {
    let posts = state.fetcher.posts().await?;
    tracing::debug!("Listing {} posts", posts.len());

    let items: Vec<PostListItem> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| list_item(state, i, post))
        .collect();

    let title = if state.config.subtitle.is_empty() {
        state.config.title.clone()
    } else {
        format!("{} - {}", state.config.title, state.config.subtitle)
    };
    let description = Some(state.config.description.as_str()).filter(|d| !d.is_empty());
    let head = state.head(&title, description, "/", None, "website");

    let html = state
        .templates
        .render_page("index.html", &state.site, &head, "posts", &items)?;
    Ok(Html(html))
}

fn list_item(state: &AppState, i: usize, post: &PostSummary) -> PostListItem {
    let (date, date_iso) = date_pair(&state.dates, &post.display_date());
    PostListItem {
        index: format!("{:02}", i + 1),
        title: post.title.clone(),
        url: helpers::post_path(&state.config, post.slug.as_str()),
        date,
        date_iso,
        author: post.author.name.clone(),
        category: post.category.title.clone(),
        excerpt: post.excerpt.clone(),
        thumbnail: post
            .main_image
            .as_ref()
            .map(|img| state.images.image_url(img, image::THUMBNAIL)),
    }
}

async fn render_post(state: &AppState, slug: &str) -> PageResult {
    let post = state
        .fetcher
        .post(slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Article non trouvé".to_string()))?;

    let article = article_data(state, &post);
    let seo = post.seo();
    let social = post
        .summary
        .main_image
        .as_ref()
        .map(|img| state.images.image_url(img, image::SOCIAL));
    let head = state.head(
        &seo.title,
        seo.description.as_deref(),
        &helpers::post_path(&state.config, slug),
        social.as_deref(),
        "article",
    );

    let html = state
        .templates
        .render_page("post.html", &state.site, &head, "article", &article)?;
    Ok(Html(html))
}

fn article_data(state: &AppState, post: &Post) -> ArticleData {
    let summary = &post.summary;
    let images = state.images.as_ref();
    let (date, date_iso) = date_pair(&state.dates, &post.display_date());

    ArticleData {
        title: summary.title.clone(),
        category: summary.category.title.clone(),
        date,
        date_iso,
        author: AuthorData {
            name: summary.author.name.clone(),
            bio: summary.author.bio.clone(),
            avatar: summary
                .author
                .image
                .as_ref()
                .map(|img| images.image_url(img, image::AVATAR)),
        },
        reading_time: summary.reading_time.map(reading_minutes),
        excerpt: summary.excerpt.clone(),
        hero: summary
            .main_image
            .as_ref()
            .map(|img| images.image_url(img, image::HERO)),
        body: render_document(&post.body, images),
        gallery: post
            .gallery
            .iter()
            .map(|img| render_figure(img, images, image::TILE, None))
            .collect(),
    }
}

/// A page the store may override; the built-in template otherwise
async fn render_static(state: &AppState, slug: &str, template: &str, title: &str) -> PageResult {
    let path = format!("/{}", slug);
    match state.fetcher.page(slug).await {
        Ok(Some(page)) => return render_store_page(state, &page, &path),
        Ok(None) => {}
        Err(e) => tracing::warn!("Serving built-in {} page: {}", slug, e),
    }

    let full_title = format!("{} - {}", title, state.config.title);
    let head = state.head(&full_title, None, &path, None, "website");
    let html = state
        .templates
        .render_page(template, &state.site, &head, "path", &path)?;
    Ok(Html(html))
}

fn render_store_page(state: &AppState, page: &Page, path: &str) -> PageResult {
    let seo = page.seo();
    let data = PageData {
        title: page.title.clone(),
        body: render_document(&page.content, state.images.as_ref()),
    };
    let head = state.head(&seo.title, seo.description.as_deref(), path, None, "website");
    let html = state
        .templates
        .render_page("page.html", &state.site, &head, "page", &data)?;
    Ok(Html(html))
}

async fn render_categories(state: &AppState) -> PageResult {
    let categories: Vec<CategoryData> = state
        .fetcher
        .categories()
        .await?
        .into_iter()
        .map(|c| CategoryData {
            title: c.title,
            slug: c.slug.current,
            description: c.description,
        })
        .collect();

    let title = format!("Catégories - {}", state.config.title);
    let head = state.head(&title, None, "/categories", None, "website");
    let html = state
        .templates
        .render_page("categories.html", &state.site, &head, "categories", &categories)?;
    Ok(Html(html))
}
