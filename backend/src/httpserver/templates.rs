use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use minijinja::{Environment, ErrorKind, Value};
use serde::Serialize;
use walkdir::WalkDir;

use crate::httpserver::error::TemplateError;
use crate::httpserver::helpers;

/// Parsed HTML templates keyed by their normalized name (e.g. `users/list.html`),
/// with the helper functions registered.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    env: Environment<'static>,
    names: BTreeSet<String>,
}

impl TemplateSet {
    /// Walks `root` recursively and parses every file ending in `.html`.
    ///
    /// Fails on the first template that does not parse.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let root = root.as_ref();
        let mut env = Environment::new();
        register_helpers(&mut env);
        let mut names = BTreeSet::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|source| TemplateError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            if !path.to_string_lossy().ends_with(".html") {
                continue;
            }

            let bytes = std::fs::read(path).map_err(|source| TemplateError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let source = String::from_utf8(bytes).map_err(|_| TemplateError::Encoding {
                path: path.to_path_buf(),
            })?;

            let relative = path.strip_prefix(root).unwrap_or(path);
            let name = normalize_name(&relative.to_string_lossy());
            env.add_template_owned(name.clone(), source)
                .map_err(|source| TemplateError::Parse {
                    name: name.clone(),
                    source,
                })?;
            tracing::debug!(%name, "loaded template");
            names.insert(name);
        }

        Ok(Self { env, names })
    }

    /// Renders template `name` with `ctx` as its context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, TemplateError> {
        let render_err = |source| TemplateError::Render {
            name: name.to_owned(),
            source,
        };
        let template = self.env.get_template(name).map_err(render_err)?;
        template.render(ctx).map_err(render_err)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Template names never start with a separator and always use `/`.
pub fn normalize_name(path: &str) -> String {
    let trimmed = path
        .strip_prefix('/')
        .or_else(|| path.strip_prefix('\\'))
        .unwrap_or(path);
    trimmed.replace('\\', "/")
}

fn register_helpers(env: &mut Environment<'static>) {
    env.add_function("inc", helpers::inc);
    env.add_function("multiply", helpers::multiply);
    env.add_function("ToLower", |s: String| helpers::to_lower(&s));
    env.add_function("marshal", |value: Value| {
        Value::from_safe_string(helpers::marshal(&value))
    });
    env.add_function("FormatTimeAsRFC822", |value: Value| {
        template_time(&value).map(|t| helpers::format_time_rfc822(&t))
    });
    env.add_function("HumanizeTime", |value: Value| {
        template_time(&value).map(|t| helpers::humanize_time(&t, &Utc::now()))
    });
}

/// Times reach templates as unix seconds or RFC 3339 strings.
fn template_time(value: &Value) -> Result<DateTime<Utc>, minijinja::Error> {
    if let Some(secs) = value.as_i64() {
        return DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            minijinja::Error::new(ErrorKind::InvalidOperation, "timestamp out of range")
        });
    }
    if let Some(text) = value.as_str() {
        return DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|err| {
                minijinja::Error::new(ErrorKind::InvalidOperation, "invalid RFC 3339 time")
                    .with_source(err)
            });
    }
    Err(minijinja::Error::new(
        ErrorKind::InvalidOperation,
        format!("expected a unix timestamp or RFC 3339 string, got {}", value.kind()),
    ))
}
