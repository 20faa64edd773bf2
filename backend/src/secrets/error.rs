use miette::Diagnostic;
use thiserror::Error;

use crate::file::error::JsonError;

#[derive(Error, Debug, Diagnostic)]
pub enum SecretsError {
    #[error("error loading secrets")]
    #[diagnostic(
        code(webutil::secrets::load),
        help("Fix or delete the secrets file; missing keys are regenerated on start")
    )]
    Load(#[source] JsonError),

    #[error("error saving secrets")]
    #[diagnostic(code(webutil::secrets::save))]
    Save(#[source] JsonError),
}
