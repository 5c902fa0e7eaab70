//! HTML rendering of the options page.
//!
//! The template lives in `templates/options.html` and is compiled into the
//! binary. Its name ends in `.html`, so minijinja escapes every interpolated
//! value.

use minijinja::{context, Environment, Error};
use posttype_options_core::Page;

pub const OPTIONS_TEMPLATE: &str = include_str!("../templates/options.html");

const TEMPLATE_NAME: &str = "options.html";

/// Renders [`Page`] models into HTML documents.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// # Errors
    ///
    /// Fails if the bundled template does not compile.
    pub fn new() -> Result<Self, Error> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, OPTIONS_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders `page`; the form posts back to `action`.
    pub fn render(&self, page: &Page, action: &str) -> Result<String, Error> {
        self.env
            .get_template(TEMPLATE_NAME)?
            .render(context! { page => page, action => action })
    }
}
