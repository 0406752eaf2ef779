//! メッセージのローカライズ
//!
//! キーからロケール別のメッセージを引く。未知のロケールは英語、
//! 未知のキーはキー文字列そのものを返す。

use crate::settings::{AppSettings, APPLICATION_LOCALE};

pub const INVALID_ZIP: &str = "INVALID_ZIP";
pub const INVALID_ZIP_ENTRY: &str = "INVALID_ZIP_ENTRY";
pub const INVALID_MODULE_ZIP: &str = "INVALID_MODULE_ZIP";
pub const NO_SOURCE_DIR: &str = "NO_SOURCE_DIR";
pub const NO_UPLOAD_DIR: &str = "NO_UPLOAD_DIR";
pub const STATEMENT_FORMAT_NOT_SUPPORTED: &str = "STATEMENT_FORMAT_NOT_SUPPORTED";

/// 対応ロケール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Fr,
}

impl Locale {
    /// ロケール文字列を解釈（`fr_FR` や `fr-FR` も受け付ける）
    pub fn parse(value: &str) -> Self {
        let lang = value
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "fr" => Locale::Fr,
            _ => Locale::En,
        }
    }
}

/// メッセージカタログ
#[derive(Debug, Clone, Copy)]
pub struct I18n {
    locale: Locale,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

impl I18n {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// `application.locale` 設定から作成
    pub fn from_settings(settings: &AppSettings) -> Self {
        settings
            .get(APPLICATION_LOCALE)
            .map(|value| Self::new(Locale::parse(&value)))
            .unwrap_or_default()
    }

    /// キーに対応するメッセージ
    pub fn get(&self, key: &str) -> String {
        lookup(self.locale, key)
            .or_else(|| lookup(Locale::En, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// `{0}` を引数で置換したメッセージ
    pub fn format(&self, key: &str, arg: &str) -> String {
        self.get(key).replace("{0}", arg)
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    let message = match (locale, key) {
        (Locale::En, INVALID_ZIP) => "Please upload a zip file",
        (Locale::En, INVALID_ZIP_ENTRY) => "Invalid zip entry: {0}",
        (Locale::En, INVALID_MODULE_ZIP) => {
            "Invalid module name, it must match 'axelor-<name>' with lowercase letters"
        }
        (Locale::En, NO_SOURCE_DIR) => "Source directory is not configured or does not exist",
        (Locale::En, NO_UPLOAD_DIR) => "Upload directory is not configured",
        (Locale::En, STATEMENT_FORMAT_NOT_SUPPORTED) => {
            "Bank statement file format not supported: {0}"
        }
        (Locale::Fr, INVALID_ZIP) => "Veuillez téléverser un fichier zip",
        (Locale::Fr, INVALID_ZIP_ENTRY) => "Entrée zip invalide : {0}",
        (Locale::Fr, INVALID_MODULE_ZIP) => {
            "Nom de module invalide, il doit respecter 'axelor-<nom>' en minuscules"
        }
        (Locale::Fr, NO_SOURCE_DIR) => {
            "Le répertoire source n'est pas configuré ou n'existe pas"
        }
        (Locale::Fr, STATEMENT_FORMAT_NOT_SUPPORTED) => {
            "Format de relevé bancaire non supporté : {0}"
        }
        _ => return None,
    };
    Some(message)
}
