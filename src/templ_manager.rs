use std::sync::OnceLock;

use tera::{Context, Tera};
use tracing::info;

#[derive(Debug)]
pub struct TemplateManager {
    tera: &'static Tera,
}

impl TemplateManager {
    /// Parses everything under `templates/` once per process.
    pub fn init() -> Result<Self, tera::Error> {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        static TERA: OnceLock<Tera> = OnceLock::new();
        let tera = match TERA.get() {
            Some(tera) => tera,
            None => {
                let parsed = Tera::new("templates/**/*")?;
                TERA.get_or_init(|| parsed)
            }
        };
        Ok(Self { tera })
    }

    /// Renders the landing page, pointing its form at the given API endpoints.
    pub fn render_landing_page(
        &self,
        subscribe_path: &str,
        count_path: &str,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("subscribe_path", subscribe_path);
        ctx.insert("count_path", count_path);

        self.tera.render("html/home.html", &ctx)
    }

    #[cfg(test)]
    pub(crate) fn tera(&self) -> &Tera {
        self.tera
    }
}
