use super::*;
use crate::meta_files::MetaFile;
use proptest::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn write_archive(path: &Path, entries: &[(String, Vec<u8>)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

/// 構成パスを含むエントリ名
fn structural_entry_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(MODULE_STRUCTURE.to_vec()),
        "[a-z]{1,8}",
        "[A-Za-z]{1,8}",
    )
        .prop_map(|(marker, pkg, file)| {
            if marker == "build.gradle" {
                format!("{}/{}", pkg, marker)
            } else {
                format!("{}/{}/{}.java", marker, pkg, file)
            }
        })
}

/// 構成パスを含まないエントリ名
fn foreign_entry_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}/[a-z]{1,8}\\.(md|txt|xml)"
}

/// ユニークなエントリ一覧（名前, 内容）
fn structural_entries_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::btree_map(
        structural_entry_strategy(),
        prop::collection::vec(any::<u8>(), 0..256),
        1..8,
    )
    .prop_map(|m| m.into_iter().collect())
}

fn no_source() -> ModuleImportService {
    ModuleImportService::new(&AppSettings::new(), I18n::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// 全エントリが構成パスを含めば検証は成功する
    #[test]
    fn prop_structural_archive_is_valid(entries in structural_entries_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("module.zip");
        write_archive(&path, &entries);

        prop_assert!(no_source().validate_file(&path).is_ok());
    }

    /// 構成パスを含まないエントリが1つでもあれば、その名前で失敗する
    #[test]
    fn prop_foreign_entry_is_reported(
        entries in structural_entries_strategy(),
        foreign in foreign_entry_strategy(),
        position in any::<prop::sample::Index>(),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("module.zip");
        let mut entries = entries;
        let at = position.index(entries.len() + 1);
        entries.insert(at, (foreign.clone(), b"x".to_vec()));
        write_archive(&path, &entries);

        let err = no_source().validate_file(&path).unwrap_err();
        prop_assert!(err.is_configuration());
        prop_assert_eq!(err.to_string(), format!("Invalid zip entry: {}", foreign));
    }

    /// zip 以外の拡張子は常に失敗する
    #[test]
    fn prop_non_zip_extension_is_rejected(stem in "[a-z]{1,8}", ext in "[a-zA-Z0-9]{0,4}") {
        prop_assume!(ext != "zip");
        let name = if ext.is_empty() { stem } else { format!("{}.{}", stem, ext) };

        let err = no_source().validate_file(Path::new(&name)).unwrap_err();
        prop_assert!(err.is_configuration());
    }

    /// パターンに一致しない名前は展開前に失敗する
    #[test]
    fn prop_invalid_module_name_is_rejected(name in "[A-Za-z0-9_-]{0,16}") {
        prop_assume!(!ModuleImportService::is_valid_module_name(&name));
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        std::fs::create_dir(&source).unwrap();
        let path = temp_dir.path().join("module.zip");
        write_archive(&path, &[("build.gradle".to_string(), Vec::new())]);

        let settings = AppSettings::new().with(STUDIO_SOURCE_DIR, source.to_string_lossy());
        let service = ModuleImportService::new(&settings, I18n::default());
        let builder = ModuleBuilder::new(name).with_import_file(MetaFile::from_path(&path));

        let err = service.import_module(&builder).unwrap_err();
        prop_assert!(err.is_configuration());
        prop_assert!(!source.join("modules").exists());
    }

    /// 展開後は全エントリが同じ内容で存在し、再実行しても変わらない
    #[test]
    fn prop_import_is_byte_identical_and_idempotent(
        entries in structural_entries_strategy(),
        segments in prop::collection::vec("[a-z]{1,6}", 1..3),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        std::fs::create_dir(&source).unwrap();
        let path = temp_dir.path().join("module.zip");
        write_archive(&path, &entries);

        let name = format!("axelor-{}", segments.join("-"));
        let settings = AppSettings::new().with(STUDIO_SOURCE_DIR, source.to_string_lossy());
        let service = ModuleImportService::new(&settings, I18n::default());
        let builder = ModuleBuilder::new(name.clone()).with_import_file(MetaFile::from_path(&path));

        for _ in 0..2 {
            service.import_module(&builder).unwrap();
            let module_dir = source.join("modules").join(&name);
            for (entry, content) in &entries {
                let written = std::fs::read(module_dir.join(entry)).unwrap();
                prop_assert_eq!(&written, content);
            }
        }
    }
}
