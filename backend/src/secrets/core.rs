use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::{DefaultOnNull, serde_as};

use crate::file::exists::file_exists;
use crate::file::json::{load_json_as, save_json_private};
use crate::secrets::error::SecretsError;

pub const DEFAULT_SECRETS_PATH: &str = "secrets.json";

pub const AUTH_KEY_LEN: usize = 64;
pub const ENCRYPTION_KEY_LEN: usize = 32;
pub const CSRF_KEY_LEN: usize = 32;
pub const PASSWORD_RESET_SECRET_LEN: usize = 32;

/// The four keys the web server needs. Keys are stored base64-encoded.
#[serde_as]
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Secrets {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Base64>")]
    auth_key: Vec<u8>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Base64>")]
    encryption_key: Vec<u8>,
    #[serde(default, rename = "CSRFKey")]
    #[serde_as(as = "DefaultOnNull<Base64>")]
    csrf_key: Vec<u8>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Base64>")]
    password_reset_secret: Vec<u8>,
}

impl Secrets {
    /// Loads `path` if it exists, generates every missing or empty key, and
    /// writes the file back only when something had to be generated. On unix
    /// the written file is readable by its owner only.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, SecretsError> {
        let path = path.as_ref();
        let mut secrets = if file_exists(path) {
            load_json_as::<Secrets>(path).map_err(SecretsError::Load)?
        } else {
            Secrets::default()
        };

        let generated = secrets.fill_missing();
        if !generated.is_empty() {
            save_json_private(path, &secrets).map_err(SecretsError::Save)?;
            tracing::info!(path = %path.display(), ?generated, "generated missing secrets");
        }
        Ok(secrets)
    }

    /// Fills empty keys with fresh random bytes and returns their names.
    pub fn fill_missing(&mut self) -> Vec<&'static str> {
        let mut generated = Vec::new();
        for (name, key, len) in [
            ("AuthKey", &mut self.auth_key, AUTH_KEY_LEN),
            ("EncryptionKey", &mut self.encryption_key, ENCRYPTION_KEY_LEN),
            ("CSRFKey", &mut self.csrf_key, CSRF_KEY_LEN),
            ("PasswordResetSecret", &mut self.password_reset_secret, PASSWORD_RESET_SECRET_LEN),
        ] {
            if key.is_empty() {
                *key = random_key(len);
                generated.push(name);
            }
        }
        generated
    }

    /// Authenticates cookie values with HMAC.
    pub fn auth_key(&self) -> &[u8] {
        &self.auth_key
    }

    /// Encrypts cookie values (AES-256).
    pub fn encryption_key(&self) -> &[u8] {
        &self.encryption_key
    }

    /// Cross Site Request Forgery protection.
    pub fn csrf_key(&self) -> &[u8] {
        &self.csrf_key
    }

    pub fn password_reset_secret(&self) -> &[u8] {
        &self.password_reset_secret
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("auth_key", &format_args!("<{} bytes>", self.auth_key.len()))
            .field("encryption_key", &format_args!("<{} bytes>", self.encryption_key.len()))
            .field("csrf_key", &format_args!("<{} bytes>", self.csrf_key.len()))
            .field(
                "password_reset_secret",
                &format_args!("<{} bytes>", self.password_reset_secret.len()),
            )
            .finish()
    }
}

fn random_key(len: usize) -> Vec<u8> {
    let mut key = vec![0u8; len];
    rand::rng().fill(&mut key[..]);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::error::JsonError;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SECRETS_PATH);

        let secrets = Secrets::load_or_create(&path).unwrap();

        assert!(path.exists());
        assert_eq!(secrets.auth_key().len(), AUTH_KEY_LEN);
        assert_eq!(secrets.encryption_key().len(), ENCRYPTION_KEY_LEN);
        assert_eq!(secrets.csrf_key().len(), CSRF_KEY_LEN);
        assert_eq!(secrets.password_reset_secret().len(), PASSWORD_RESET_SECRET_LEN);
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SECRETS_PATH);

        Secrets::load_or_create(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "{mode:o}");
    }

    #[test]
    fn second_load_reuses_keys_without_rewriting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SECRETS_PATH);

        let first = Secrets::load_or_create(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

        let second = Secrets::load_or_create(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn fills_only_missing_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SECRETS_PATH);
        // "AAEC" is base64 for [0, 1, 2]
        std::fs::write(&path, r#"{"AuthKey":"AAEC","EncryptionKey":null,"CSRFKey":""}"#).unwrap();

        let secrets = Secrets::load_or_create(&path).unwrap();

        assert_eq!(secrets.auth_key(), [0u8, 1, 2]);
        assert_eq!(secrets.encryption_key().len(), ENCRYPTION_KEY_LEN);
        assert_eq!(secrets.csrf_key().len(), CSRF_KEY_LEN);
        assert_eq!(secrets.password_reset_secret().len(), PASSWORD_RESET_SECRET_LEN);

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["AuthKey"], "AAEC");
        assert!(on_disk["PasswordResetSecret"].is_string());
    }

    #[test]
    fn fill_missing_reports_names() {
        let mut secrets = Secrets::default();
        assert_eq!(
            secrets.fill_missing(),
            ["AuthKey", "EncryptionKey", "CSRFKey", "PasswordResetSecret"]
        );
        assert!(secrets.fill_missing().is_empty());
    }

    #[test]
    fn keys_are_random() {
        let mut a = Secrets::default();
        let mut b = Secrets::default();
        a.fill_missing();
        b.fill_missing();
        assert_ne!(a.auth_key(), b.auth_key());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SECRETS_PATH);
        std::fs::write(&path, "{ not json").unwrap();

        let err = Secrets::load_or_create(&path).unwrap_err();
        assert!(matches!(err, SecretsError::Load(JsonError::Syntax { .. })));
    }

    #[test]
    fn debug_hides_key_material() {
        let mut secrets = Secrets::default();
        secrets.fill_missing();
        let shown = format!("{secrets:?}");
        assert!(shown.contains("<64 bytes>"), "{shown}");
    }
}
