use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum PaginateError {
    #[error("items per page must be positive, got {0}")]
    #[diagnostic(
        code(webutil::paginator::items_per_page),
        help("Configure a page size of at least 1")
    )]
    InvalidItemsPerPage(i64),
}

/// What can go wrong while loading or rendering templates.
#[derive(Error, Debug, Diagnostic)]
pub enum TemplateError {
    #[error("cannot walk template directory {}", .root.display())]
    #[diagnostic(code(webutil::templates::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot read template {}", .path.display())]
    #[diagnostic(code(webutil::templates::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template {} is not valid UTF-8", .path.display())]
    #[diagnostic(code(webutil::templates::encoding))]
    Encoding { path: PathBuf },

    #[error("cannot parse template {name}")]
    #[diagnostic(code(webutil::templates::parse))]
    Parse {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("cannot render template {name}")]
    #[diagnostic(code(webutil::templates::render))]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}
