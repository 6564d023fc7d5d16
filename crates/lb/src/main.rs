/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use lb_core::{default_language_code, Data, EngineConfig, EnvLocale, LanguageProperties};
use lb_template::{I18n, Status, Templates};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            template,
            data,
            locale_dir,
            lang,
            id,
            config,
        } => {
            let options = RenderOptions {
                data,
                locale_dir,
                lang,
                id,
                config,
            };
            println!("{}", render(&template, options)?);
        }
        Command::Codes { locale_dir, lang } => {
            let properties = load_properties(&locale_dir)?;
            match lang {
                Some(lang) => match properties.matching_code(&lang) {
                    Some(code) => println!("{code}"),
                    None => bail!("no language file matches {lang:?}"),
                },
                None => {
                    for code in properties.language_codes() {
                        // The root language has an empty code.
                        if code.is_empty() {
                            println!("(root)");
                        } else {
                            println!("{code}");
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

struct RenderOptions {
    data: Option<PathBuf>,
    locale_dir: Option<PathBuf>,
    lang: Option<String>,
    id: Option<String>,
    config: Option<PathBuf>,
}

fn render(template: &Path, options: RenderOptions) -> Result<String> {
    let config = match &options.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let max_depth = config.max_resolution_depth;

    let mut document = lb_markup::parse_file(template)
        .with_context(|| format!("failed to parse template {}", template.display()))?;
    let data = match &options.data {
        Some(path) => load_data(path)?,
        None => Value::Object(Default::default()),
    };
    let root = document
        .document_element()
        .ok_or_else(|| anyhow!("template has no root element"))?;

    let mut templates = Templates::new(config);
    let (bound, items) = match &options.id {
        Some(id) => {
            let prototype = document
                .element_by_id(id)
                .ok_or_else(|| anyhow!("no element with id {id:?}"))?;
            let items = match &data {
                Value::Array(items) => items.clone(),
                other => vec![other.clone()],
            };
            let mut clones = Vec::new();
            for item in &items {
                if let Some(clone) = templates.add_clone(&mut document, prototype, item) {
                    clones.push(clone);
                }
            }
            tracing::info!(id = %id, added = clones.len(), "added clones");
            (clones, items)
        }
        None => {
            let status = templates.process(&mut document, root, &data);
            if status == Status::Failed {
                tracing::warn!("template has null parameters outside optional sections");
            }
            (vec![root], vec![data])
        }
    };

    if let Some(dir) = &options.locale_dir {
        let properties = load_properties(dir)?;
        let language = options
            .lang
            .clone()
            .unwrap_or_else(|| default_language_code(&document, &EnvLocale));
        tracing::debug!(language = %language, "filtering by language");
        let i18n = I18n::new(&properties).with_max_depth(max_depth);
        for (node, item) in bound.into_iter().zip(&items) {
            i18n.filter_html(&mut document, node, item, &language);
        }
    }

    Ok(lb_markup::to_html(&document, document.root()))
}

fn load_data(path: &Path) -> Result<Data> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read data {}", path.display()))?;
    let data = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON data {}", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML data {}", path.display()))?,
    };
    Ok(data)
}

fn load_properties(dir: &Path) -> Result<LanguageProperties> {
    let mut properties = LanguageProperties::new();
    let codes = properties
        .load_dir(dir)
        .with_context(|| format!("failed to load language files from {}", dir.display()))?;
    if codes.is_empty() {
        tracing::warn!(dir = %dir.display(), "no language files found");
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn options() -> RenderOptions {
        RenderOptions {
            data: None,
            locale_dir: None,
            lang: None,
            id: None,
            config: None,
        }
    }

    #[test]
    fn test_render_clones_with_i18n() {
        let dir = TempDir::new().unwrap();
        let template = write(
            &dir,
            "page.xhtml",
            r##"<ul lang="en"><li id="row" class="template">#label#: #name#</li></ul>"##,
        );
        let data = write(&dir, "data.json", r#"[{"name": "a"}, {"name": "b"}]"#);
        let locales = dir.path().join("locales");
        fs::create_dir(&locales).unwrap();
        fs::write(locales.join("en.yaml"), "label: Item\n").unwrap();

        let html = render(
            &template,
            RenderOptions {
                data: Some(data),
                locale_dir: Some(locales),
                ..options()
            },
        )
        .unwrap();

        assert_eq!(
            html,
            concat!(
                r##"<ul lang="en"><li id="row" class="template">#label#: #name#</li>"##,
                r#"<li class="" lang="en">Item: a</li>"#,
                r#"<li class="" lang="en">Item: b</li></ul>"#
            )
        );
    }

    #[test]
    fn test_render_with_config_and_yaml_data() {
        let dir = TempDir::new().unwrap();
        let template = write(
            &dir,
            "page.xhtml",
            r##"<div><p class="maybe">#note#</p><p class="maybe">#gone#</p></div>"##,
        );
        let data = write(&dir, "data.yaml", "note: hi\ngone: null\n");
        let config = write(&dir, "lb.yaml", "markers:\n  optional: maybe\n");

        let html = render(
            &template,
            RenderOptions {
                data: Some(data),
                config: Some(config),
                ..options()
            },
        )
        .unwrap();

        assert_eq!(html, r#"<div><p class="">hi</p></div>"#);
    }

    #[test]
    fn test_render_unknown_id() {
        let dir = TempDir::new().unwrap();
        let template = write(&dir, "page.xhtml", "<div/>");
        let result = render(
            &template,
            RenderOptions {
                id: Some("nope".to_string()),
                ..options()
            },
        );
        assert!(result.is_err());
    }
}
