use handlebars::{Handlebars, no_escape};
use log::warn;
use serde_json::Value;

pub trait Render {
    fn render(&self, template: &str, ctx: &Value) -> Result<String, String>;
}

pub struct Templates {
    hbs: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(no_escape);
        Self { hbs }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for Templates {
    fn render(&self, template: &str, ctx: &Value) -> Result<String, String> {
        match self.hbs.render_template(template, ctx) {
            Ok(s)  => Ok(s.trim().to_owned()),
            Err(e) => Err(e.to_string()),
        }
    }
}

// Falls back to the raw template when rendering fails.
pub fn render_or_raw(render: &dyn Render, template: &str, ctx: &Value) -> String {
    match render.render(template, ctx) {
        Ok(s)  => s,
        Err(e) => {
            warn!("failed to render '{}': {}", template, e);
            template.to_owned()
        }
    }
}
