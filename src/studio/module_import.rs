//! モジュールアーカイブのインポート
//!
//! アップロードされたzipを検証し、`<studio.source.dir>/modules/<name>/` に展開する。
//!
//! 1. アーカイブ未指定なら何もしない
//! 2. 拡張子とエントリ構成を検証（ファイルシステムを変更する前に全エントリを走査）
//! 3. モジュール名を検証
//! 4. 展開先ディレクトリを作成
//! 5. アーカイブを開き直して全エントリを書き出す（既存ファイルは上書き）
//!
//! 展開中に失敗した場合、書き出し済みのファイルはそのまま残る。

use crate::error::{ErpError, Result};
use crate::i18n::{self, I18n};
use crate::meta_files::MetaFiles;
use crate::settings::{AppSettings, STUDIO_SOURCE_DIR};
use crate::studio::ModuleBuilder;
use regex::Regex;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use zip::ZipArchive;

/// モジュール名のパターン（全体一致）
const MODULE_PATTERN: &str = r"^axelor(-[a-z]+)+$";

/// アーカイブのエントリが含むべきパス（いずれかを部分文字列として含むこと）
pub const MODULE_STRUCTURE: &[&str] = &[
    "build.gradle",
    "src/main/java",
    "src/test/java",
    "src/main/resources",
];

/// ソースディレクトリ配下のモジュール格納ディレクトリ名
const MODULES_DIR: &str = "modules";

fn module_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(MODULE_PATTERN).expect("module pattern is a valid regex"))
}

/// インポート結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedModule {
    pub name: String,
    /// 展開先: <source>/modules/<name>
    pub module_dir: PathBuf,
    /// 書き出したファイル（アーカイブ内の順序）
    pub files: Vec<PathBuf>,
}

/// モジュールインポートサービス
pub struct ModuleImportService {
    source_dir: Option<PathBuf>,
    meta_files: MetaFiles,
    i18n: I18n,
}

impl ModuleImportService {
    pub fn new(settings: &AppSettings, i18n: I18n) -> Self {
        Self {
            source_dir: settings.get(STUDIO_SOURCE_DIR).map(PathBuf::from),
            meta_files: MetaFiles::new(settings, i18n),
            i18n,
        }
    }

    /// モジュール名がパターンに一致するか
    pub fn is_valid_module_name(name: &str) -> bool {
        module_pattern().is_match(name)
    }

    /// モジュールアーカイブをインポート
    ///
    /// アーカイブが指定されていなければ `Ok(None)`。
    pub fn import_module(&self, builder: &ModuleBuilder) -> Result<Option<ImportedModule>> {
        let Some(meta_file) = builder.import_meta_file.as_ref() else {
            tracing::debug!(module = %builder.name, "no archive attached, nothing to import");
            return Ok(None);
        };

        let file = self.meta_files.get_path(meta_file)?;
        let entry_names = self.validate_entries(&file)?;

        if !Self::is_valid_module_name(&builder.name) {
            return Err(ErpError::configuration(
                self.i18n.get(i18n::INVALID_MODULE_ZIP),
            ));
        }

        // zip-slip 対策: `..` を含むエントリは展開しない
        if let Some(unsafe_name) = entry_names.iter().find(|name| !is_contained(name)) {
            return Err(ErpError::configuration(
                self.i18n.format(i18n::INVALID_ZIP_ENTRY, unsafe_name),
            ));
        }

        let module_dir = self.module_dir()?.join(&builder.name);
        if !module_dir.exists() {
            fs::create_dir_all(&module_dir)?;
        }

        let files = extract(&file, &module_dir)?;

        tracing::info!(
            module = %builder.name,
            dir = %module_dir.display(),
            files = files.len(),
            "module imported"
        );

        Ok(Some(ImportedModule {
            name: builder.name.clone(),
            module_dir,
            files,
        }))
    }

    /// アーカイブを検証
    ///
    /// 拡張子が `zip`（大文字小文字を区別）でなければエントリを開かずに失敗する。
    /// 構成パスを1つも含まないエントリがあれば、その名前を添えて失敗する。
    pub fn validate_file(&self, file: &Path) -> Result<()> {
        self.validate_entries(file).map(|_| ())
    }

    /// 検証し、エントリ名の一覧を返す
    fn validate_entries(&self, file: &Path) -> Result<Vec<String>> {
        if extension(file) != Some("zip") {
            return Err(ErpError::configuration(self.i18n.get(i18n::INVALID_ZIP)));
        }

        let mut archive = ZipArchive::new(File::open(file)?)?;
        let mut names = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            let name = entry.name();
            if !MODULE_STRUCTURE.iter().any(|marker| name.contains(marker)) {
                tracing::warn!(entry = %name, file = %file.display(), "rejected zip entry");
                return Err(ErpError::configuration(
                    self.i18n.format(i18n::INVALID_ZIP_ENTRY, name),
                ));
            }
            names.push(name.to_string());
        }

        Ok(names)
    }

    /// `studio.source.dir` が指す既存ディレクトリ
    pub fn source_dir(&self) -> Result<PathBuf> {
        match &self.source_dir {
            Some(dir) if dir.is_dir() => Ok(dir.clone()),
            _ => Err(ErpError::configuration(self.i18n.get(i18n::NO_SOURCE_DIR))),
        }
    }

    /// `<source>/modules`（無ければ作成）
    pub fn module_dir(&self) -> Result<PathBuf> {
        let module_dir = self.source_dir()?.join(MODULES_DIR);
        if !module_dir.exists() {
            fs::create_dir_all(&module_dir)?;
        }
        Ok(module_dir)
    }
}

/// ファイル名の最後の `.` 以降
fn extension(file: &Path) -> Option<&str> {
    file.file_name()?
        .to_str()?
        .rsplit_once('.')
        .map(|(_, ext)| ext)
}

/// エントリ名を `/` で分割して展開先配下のパスにする
fn entry_path(module_dir: &Path, name: &str) -> PathBuf {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(module_dir.to_path_buf(), |path, segment| path.join(segment))
}

/// 展開先の外を指さないエントリ名か
///
/// 先頭や連続の `/` は `entry_path` で空セグメントとして捨てられるため許容する。
fn is_contained(name: &str) -> bool {
    name.split(['/', '\\']).all(|segment| segment != "..")
}

fn extract(file: &Path, module_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = ZipArchive::new(File::open(file)?)?;
    let mut written = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let target = entry_path(module_dir, entry.name());

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if !target.exists() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    Ok(written)
}

#[cfg(test)]
#[path = "module_import_test.rs"]
mod tests;

#[cfg(test)]
#[path = "module_import_proptests.rs"]
mod proptests;
