//! Template parsing and evaluation against a decoded [`Value`].
//!
//! The whole data tree is bound to `root`. When it is a mapping, its keys are
//! also top-level variables, so both of these work for `{"items": [..]}`:
//!
//! ```text
//! {% for item in items %}{{ item }}{% endfor %}
//! {% for item in root.items %}{{ item }}{% endfor %}
//! ```
//!
//! A data key named `root` shadows the whole-tree binding.

use crate::error::{DtmplError, Result};
use crate::helpers::HelperTable;
use crate::value::Value;
use minijinja::{AutoEscape, Environment, ErrorKind, Template, UndefinedBehavior};
use std::collections::BTreeMap;
use std::io::Write;

/// Name under which the whole data tree is visible to templates.
pub const ROOT_VAR: &str = "root";

/// Evaluator set up with the helper table.
///
/// Helpers are installed at construction, before any template is parsed.
/// Undefined variables and attributes are errors, output is not escaped, and
/// a trailing newline in the template is kept.
pub struct Renderer<'source> {
    env: Environment<'source>,
}

impl<'source> Renderer<'source> {
    pub fn new(helpers: &HelperTable) -> Self {
        let mut env = Environment::new();
        helpers.install(&mut env);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Compile a template.
    ///
    /// # Errors
    /// [`DtmplError::TemplateParse`] on malformed syntax.
    pub fn parse(&self, source: &'source str) -> Result<Template<'_, 'source>> {
        let template = self
            .env
            .template_from_str(source)
            .map_err(DtmplError::TemplateParse)?;
        tracing::debug!(bytes = source.len(), "template parsed");
        Ok(template)
    }

    /// Evaluate `template` with `value` as context, streaming into `out`.
    ///
    /// Output already written when an error occurs stays written.
    ///
    /// # Errors
    /// [`DtmplError::Io`] if `out` rejects a write, [`DtmplError::Render`] for
    /// any evaluation failure.
    pub fn render<W: Write>(
        &self,
        template: &Template<'_, '_>,
        value: &Value,
        out: W,
    ) -> Result<()> {
        tracing::debug!(kind = %value.kind(), "rendering");
        template
            .render_captured_to(context(value), out)
            .map_err(|err| match err.kind() {
                ErrorKind::WriteFailure => DtmplError::Io {
                    resource: "output".to_string(),
                    source: std::io::Error::other(err),
                },
                _ => DtmplError::Render(err),
            })?;
        Ok(())
    }

    /// Parse and render in one step, collecting the output.
    pub fn render_str(&self, source: &'source str, value: &Value) -> Result<String> {
        let template = self.parse(source)?;
        template.render(context(value)).map_err(DtmplError::Render)
    }
}

fn context(value: &Value) -> minijinja::Value {
    let root = minijinja::Value::from_serialize(value);
    let mut vars = BTreeMap::new();
    if let Value::Mapping(map) = value {
        for key in map.keys() {
            if let Ok(item) = root.get_attr(key) {
                vars.insert(key.clone(), item);
            }
        }
    }
    vars.entry(ROOT_VAR.to_string()).or_insert(root);
    minijinja::Value::from(vars)
}
