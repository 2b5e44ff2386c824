use crate::config::DashboardConfig;
use anyhow::{Context, Result};
use minijinja::{context, Environment};

const INDEX_TEMPLATE: &str = "index.html";

/// Bookmark page, parsed once at startup and shared by every request
pub struct Dashboard {
    env: Environment<'static>,
    config: DashboardConfig,
}

impl Dashboard {
    /// Compile the embedded page template for `config`
    pub fn new(config: DashboardConfig) -> Result<Self> {
        Self::from_source(config, include_str!("../../templates/index.html"))
    }

    pub(super) fn from_source(config: DashboardConfig, source: &'static str) -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("strip_url_scheme", |url: String| {
            strip_url_scheme(&url).to_string()
        });
        env.add_template(INDEX_TEMPLATE, source)
            .context("parsing dashboard template")?;

        Ok(Self { env, config })
    }

    /// Render the full page
    pub fn render(&self) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            title => &self.config.title,
            sections => &self.config.sections,
        })
    }
}

/// `https://grafana.local/x` -> `grafana.local/x`; input without a scheme is returned unchanged
#[must_use]
pub fn strip_url_scheme(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}
