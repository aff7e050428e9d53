//! Initialize a new site directory

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Kultur Configuration

# Site
title: Kultur Photo Club
subtitle: Magazine Culture Photo
description: Un magazine culture photo avec des articles de fond, des portraits éditoriaux de photographes, et des recommandations mensuelles.
author: Kultur Photo Club
language: fr
locale: fr_FR
timezone: Europe/Paris
contact_email: contact@kulturphotoclub.com

# URL
url: http://localhost:4000
root: /

# Content store
## SANITY_PROJECT_ID, SANITY_DATASET, SANITY_API_VERSION, SANITY_API_TOKEN
## and SANITY_USE_CDN override these values.
store:
  project_id: ''
  dataset: production
  api_version: '2023-10-01'
  use_cdn: true
  # local_dataset: data/production.ndjson

# Server
server:
  ip: localhost
  port: 4000
  static_dir: static
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("static"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let style_path = target_dir.join("static/style.css");
    if !style_path.exists() {
        fs::write(&style_path, include_str!("../../static/style.css"))?;
    }

    Ok(())
}
