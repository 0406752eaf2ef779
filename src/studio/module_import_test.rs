use super::*;
use crate::meta_files::MetaFile;
use std::io::Write;
use tempfile::TempDir;

/// テスト用のzipアーカイブを作成するヘルパー
fn create_test_archive(dir: &Path, file_name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = zip::write::SimpleFileOptions::default();

    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// source ディレクトリを設定したサービス
fn service_with_source(source: &Path) -> ModuleImportService {
    let settings = AppSettings::new().with(STUDIO_SOURCE_DIR, source.to_string_lossy());
    ModuleImportService::new(&settings, I18n::default())
}

fn builder(name: &str, archive: &Path) -> ModuleBuilder {
    ModuleBuilder::new(name).with_import_file(MetaFile::from_path(archive))
}

const CRM_ENTRIES: &[(&str, &str)] = &[
    ("build.gradle", "apply plugin: 'com.axelor.app-module'"),
    ("src/main/java/Foo.java", "public class Foo {}"),
    ("src/test/java/FooTest.java", "public class FooTest {}"),
    ("src/main/resources/app.properties", "name=crm"),
];

// =========================================================================
// validate_file
// =========================================================================

#[test]
fn validate_file_accepts_structural_entries() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(temp_dir.path(), "module.zip", CRM_ENTRIES);
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    assert!(service.validate_file(&archive).is_ok());
}

#[test]
fn validate_file_accepts_marker_anywhere_in_path() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(
        temp_dir.path(),
        "module.zip",
        &[("axelor-foo/build.gradle", ""), ("nested/src/main/java/a/B.java", "")],
    );
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    assert!(service.validate_file(&archive).is_ok());
}

#[test]
fn validate_file_rejects_entry_without_marker() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(
        temp_dir.path(),
        "module.zip",
        &[("build.gradle", ""), ("README.md", "# readme"), ("docs/notes.txt", "")],
    );
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    let err = service.validate_file(&archive).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "Invalid zip entry: README.md");
}

#[test]
fn validate_file_rejects_non_zip_extension_before_opening() {
    // 中身は存在しないパス: 拡張子チェックで先に失敗するため IO エラーにならない
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    for name in ["module.tar.gz", "module.ZIP", "module.jar", "module", "module.zip.bak"] {
        let err = service
            .validate_file(Path::new("/nonexistent").join(name).as_path())
            .unwrap_err();
        assert!(err.is_configuration(), "{} should be a configuration error", name);
        assert_eq!(err.to_string(), "Please upload a zip file");
    }
}

#[test]
fn validate_file_reports_corrupted_archive() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.zip");
    std::fs::write(&path, b"not a zip file").unwrap();
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    let err = service.validate_file(&path).unwrap_err();
    assert!(matches!(err, ErpError::Zip(_)));
}

#[test]
fn validate_file_uses_localized_message() {
    let temp_dir = TempDir::new().unwrap();
    let archive =
        create_test_archive(temp_dir.path(), "module.zip", &[("README.md", "")]);
    let service =
        ModuleImportService::new(&AppSettings::new(), I18n::new(crate::i18n::Locale::Fr));

    let err = service.validate_file(&archive).unwrap_err();
    assert_eq!(err.to_string(), "Entrée zip invalide : README.md");
}

// =========================================================================
// module name
// =========================================================================

#[test]
fn module_name_pattern() {
    assert!(ModuleImportService::is_valid_module_name("axelor-foo"));
    assert!(ModuleImportService::is_valid_module_name("axelor-foo-bar"));
    assert!(ModuleImportService::is_valid_module_name("axelor-sales-crm"));

    assert!(!ModuleImportService::is_valid_module_name("axelor"));
    assert!(!ModuleImportService::is_valid_module_name("Axelor-Foo"));
    assert!(!ModuleImportService::is_valid_module_name("axelor-Foo1"));
    assert!(!ModuleImportService::is_valid_module_name("axelor-foo-"));
    assert!(!ModuleImportService::is_valid_module_name("my-axelor-foo"));
    assert!(!ModuleImportService::is_valid_module_name("axelor-foo/../x"));
    assert!(!ModuleImportService::is_valid_module_name(""));
}

#[test]
fn import_rejects_invalid_name_before_touching_filesystem() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let archive = create_test_archive(temp_dir.path(), "module.zip", CRM_ENTRIES);
    let service = service_with_source(&source);

    let err = service
        .import_module(&builder("Axelor-Foo", &archive))
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().starts_with("Invalid module name"));
    assert!(!source.join("modules").exists());
}

// =========================================================================
// source_dir / module_dir
// =========================================================================

#[test]
fn source_dir_unset_is_configuration_error() {
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());
    let err = service.source_dir().unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "Source directory is not configured or does not exist"
    );
}

#[test]
fn source_dir_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let service = service_with_source(&temp_dir.path().join("missing"));
    assert!(service.source_dir().unwrap_err().is_configuration());
}

#[test]
fn source_dir_must_be_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("plain-file");
    std::fs::write(&file, "x").unwrap();
    let service = service_with_source(&file);
    assert!(service.source_dir().unwrap_err().is_configuration());
}

#[test]
fn module_dir_is_created_on_demand() {
    let temp_dir = TempDir::new().unwrap();
    let service = service_with_source(temp_dir.path());

    let module_dir = service.module_dir().unwrap();

    assert_eq!(module_dir, temp_dir.path().join("modules"));
    assert!(module_dir.is_dir());
    // 2回目も成功する
    assert_eq!(service.module_dir().unwrap(), module_dir);
}

// =========================================================================
// import_module
// =========================================================================

#[test]
fn import_without_archive_is_noop() {
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());
    let result = service.import_module(&ModuleBuilder::new("axelor-foo")).unwrap();
    assert!(result.is_none());
}

#[test]
fn import_extracts_all_entries() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let archive = create_test_archive(temp_dir.path(), "crm.zip", CRM_ENTRIES);
    let service = service_with_source(&source);

    let imported = service
        .import_module(&builder("axelor-sales-crm", &archive))
        .unwrap()
        .unwrap();

    let module_dir = source.join("modules").join("axelor-sales-crm");
    assert_eq!(imported.module_dir, module_dir);
    assert_eq!(imported.name, "axelor-sales-crm");
    assert_eq!(imported.files.len(), 4);

    for (name, content) in CRM_ENTRIES {
        let path = module_dir.join(name);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), *content, "{}", name);
    }

    let top_level: Vec<_> = std::fs::read_dir(&module_dir).unwrap().collect();
    assert_eq!(top_level.len(), 2); // build.gradle と src のみ
}

#[test]
fn import_twice_overwrites_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let service = service_with_source(&source);

    let first = create_test_archive(
        temp_dir.path(),
        "v1.zip",
        &[("build.gradle", "version 1 with a much longer body"), ("src/main/java/A.java", "a1")],
    );
    service.import_module(&builder("axelor-foo", &first)).unwrap();

    let second = create_test_archive(
        temp_dir.path(),
        "v2.zip",
        &[("build.gradle", "version 2"), ("src/main/java/A.java", "a2")],
    );
    service.import_module(&builder("axelor-foo", &second)).unwrap();
    service.import_module(&builder("axelor-foo", &second)).unwrap();

    let module_dir = source.join("modules").join("axelor-foo");
    assert_eq!(
        std::fs::read_to_string(module_dir.join("build.gradle")).unwrap(),
        "version 2"
    );
    assert_eq!(
        std::fs::read_to_string(module_dir.join("src/main/java/A.java")).unwrap(),
        "a2"
    );
}

#[test]
fn import_with_invalid_entry_extracts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let mut entries = CRM_ENTRIES.to_vec();
    entries.push(("README.md", "# CRM"));
    let archive = create_test_archive(temp_dir.path(), "crm.zip", &entries);
    let service = service_with_source(&source);

    let err = service
        .import_module(&builder("axelor-sales-crm", &archive))
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid zip entry: README.md");
    assert!(!source.join("modules").exists());
}

#[test]
fn import_rejects_parent_dir_entries() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let archive = create_test_archive(
        temp_dir.path(),
        "evil.zip",
        &[("build.gradle", ""), ("../../src/main/java/Evil.java", "evil")],
    );
    let service = service_with_source(&source);

    // 構成チェックは通る
    assert!(service.validate_file(&archive).is_ok());

    let err = service
        .import_module(&builder("axelor-foo", &archive))
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("../../src/main/java/Evil.java"));
    assert!(!source.join("modules").exists());
    assert!(!temp_dir.path().join("src").exists());
}

#[test]
fn import_places_leading_slash_entries_inside_module_dir() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    let archive = create_test_archive(
        temp_dir.path(),
        "rooted.zip",
        &[("/build.gradle", "g"), ("/src/main/java/A.java", "a")],
    );
    let service = service_with_source(&source);

    let imported = service
        .import_module(&builder("axelor-foo", &archive))
        .unwrap()
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(imported.module_dir.join("src/main/java/A.java")).unwrap(),
        "a"
    );
    assert_eq!(
        std::fs::read_to_string(imported.module_dir.join("build.gradle")).unwrap(),
        "g"
    );
}

#[test]
fn is_contained_rejects_only_parent_segments() {
    assert!(is_contained("src/main/java/A.java"));
    assert!(is_contained("/src/main/java/A.java"));
    assert!(is_contained("./src//main/java/A.java"));
    assert!(is_contained("src/main/java/..hidden"));

    assert!(!is_contained("../src/main/java/A.java"));
    assert!(!is_contained("src/main/java/../../../A.java"));
    assert!(!is_contained("src\\main\\..\\..\\build.gradle"));
}

#[test]
fn failed_extraction_keeps_files_already_written() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();
    // 2番目のエントリがファイルとして書かれるため、3番目の親ディレクトリを作れない
    let archive = create_test_archive(
        temp_dir.path(),
        "clash.zip",
        &[
            ("build.gradle", "first"),
            ("src/main/java", "not a directory"),
            ("src/main/java/A.java", "a"),
        ],
    );
    let service = service_with_source(&source);

    let err = service
        .import_module(&builder("axelor-foo", &archive))
        .unwrap_err();

    assert!(matches!(err, ErpError::Io(_)));
    let module_dir = source.join("modules").join("axelor-foo");
    assert_eq!(
        std::fs::read_to_string(module_dir.join("build.gradle")).unwrap(),
        "first"
    );
    assert!(module_dir.join("src/main/java").is_file());
    assert!(!module_dir.join("src/main/java/A.java").exists());
}

#[test]
fn import_creates_directory_entries() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    std::fs::create_dir(&source).unwrap();

    let archive_path = temp_dir.path().join("dirs.zip");
    {
        let mut zip = zip::ZipWriter::new(File::create(&archive_path).unwrap());
        let options = zip::write::SimpleFileOptions::default();
        zip.add_directory("src/main/java/", options).unwrap();
        zip.start_file("src/main/java/Foo.java", options).unwrap();
        zip.write_all(b"class Foo {}").unwrap();
        zip.add_directory("src/test/java/", options).unwrap();
        zip.finish().unwrap();
    }
    let service = service_with_source(&source);

    let imported = service
        .import_module(&builder("axelor-foo", &archive_path))
        .unwrap()
        .unwrap();

    assert_eq!(imported.files.len(), 1);
    assert!(imported.module_dir.join("src/main/java").is_dir());
    assert!(imported.module_dir.join("src/test/java").is_dir());
    assert_eq!(
        std::fs::read_to_string(imported.module_dir.join("src/main/java/Foo.java")).unwrap(),
        "class Foo {}"
    );
}

#[test]
fn import_without_source_dir_fails_after_validation() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(temp_dir.path(), "crm.zip", CRM_ENTRIES);
    let service = ModuleImportService::new(&AppSettings::new(), I18n::default());

    let err = service
        .import_module(&builder("axelor-sales-crm", &archive))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Source directory is not configured or does not exist"
    );
}

#[test]
fn import_resolves_relative_archive_under_upload_dir() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("source");
    let upload = temp_dir.path().join("upload");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&upload).unwrap();
    create_test_archive(&upload, "crm.zip", CRM_ENTRIES);

    let settings = AppSettings::new()
        .with(STUDIO_SOURCE_DIR, source.to_string_lossy())
        .with(crate::settings::FILE_UPLOAD_DIR, upload.to_string_lossy());
    let service = ModuleImportService::new(&settings, I18n::default());
    let module =
        ModuleBuilder::new("axelor-crm").with_import_file(MetaFile::new("crm.zip", "crm.zip"));

    let imported = service.import_module(&module).unwrap().unwrap();
    assert!(imported.module_dir.join("build.gradle").exists());
}

#[test]
fn entry_path_splits_on_slash() {
    let root = Path::new("/root/modules/axelor-foo");
    assert_eq!(
        entry_path(root, "src/main/java/Foo.java"),
        PathBuf::from("/root/modules/axelor-foo/src/main/java/Foo.java")
    );
    assert_eq!(
        entry_path(root, "src/main/java/"),
        PathBuf::from("/root/modules/axelor-foo/src/main/java")
    );
}
