use std::fs;

use insta::assert_snapshot;
use parlance::{Format, LoadError, Loader, TextDocument};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Lang {
    welcome: TextDocument,
    rules: TextDocument,
}

impl Default for Lang {
    fn default() -> Self {
        Self {
            welcome: "&aWelcome, {player}!".into(),
            rules: TextDocument::new(["&61. Be nice", "&62. Have fun"]),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct LangV2 {
    welcome: TextDocument,
    rules: TextDocument,
    farewell: TextDocument,
}

impl Default for LangV2 {
    fn default() -> Self {
        Self {
            welcome: "&aWelcome, {player}!".into(),
            rules: TextDocument::new(["&61. Be nice", "&62. Have fun"]),
            farewell: "&7Bye {player}".into(),
        }
    }
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lang").join("nested").join("en.json");

    Loader::new().save_file(&path, &Lang::default()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_snapshot!(content, @r###"
    {
      "welcome": "&aWelcome, {player}!",
      "rules": [
        "&61. Be nice",
        "&62. Have fun"
      ]
    }
    "###);
}

#[test]
fn test_load_missing_file_creates_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("missing.json");

    let loaded: Option<Lang> = Loader::new().load_file(&path).unwrap();
    assert!(loaded.is_none());
    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_load_empty_file_is_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.json");
    fs::write(&path, "  \n\t").unwrap();

    let loaded: Option<Lang> = Loader::new().load_file(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_null_is_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("null.json");
    fs::write(&path, "null").unwrap();

    let loaded: Option<Lang> = Loader::new().load_file(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_reads_edited_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    fs::write(
        &path,
        r#"{"welcome": "&bHey {player}", "rules": ["one", "two", "three"]}"#,
    )
    .unwrap();

    let lang: Lang = Loader::new().load_file(&path).unwrap().unwrap();
    assert_eq!(
        lang.welcome.substitute_plain([("player", "Ada")]),
        "§bHey Ada"
    );
    assert_eq!(lang.rules.len(), 3);
}

#[test]
fn test_load_or_construct_uses_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");

    let lang: Lang = Loader::new()
        .load_or_construct(&path, Lang::default)
        .unwrap();
    assert_eq!(lang, Lang::default());
    // Created but not written
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_load_or_initialize_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    let loader = Loader::new();

    let first: Lang = loader.load_or_initialize(&path, Lang::default).unwrap();
    assert_eq!(first, Lang::default());

    let saved: Lang = loader.load_file(&path).unwrap().unwrap();
    assert_eq!(saved, Lang::default());
}

#[test]
fn test_load_or_initialize_adds_new_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    let loader = Loader::new();
    fs::write(&path, r#"{"welcome": "&cCustom", "rules": "only rule"}"#).unwrap();

    let lang: LangV2 = loader.load_or_initialize(&path, LangV2::default).unwrap();
    assert_eq!(lang.welcome, TextDocument::from("&cCustom"));
    assert_eq!(lang.farewell, TextDocument::from("&7Bye {player}"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("farewell"));
    assert!(content.contains("&cCustom"));
}

#[test]
fn test_yaml_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.yml");
    let loader = Loader::new().format(Format::from_path(&path).unwrap_or_default());
    assert_eq!(loader.get_format(), Format::Yaml);

    loader.save_file(&path, &Lang::default()).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("welcome:"));

    let back: Lang = loader.load_file(&path).unwrap().unwrap();
    assert_eq!(back, Lang::default());
}

#[test]
fn test_corrupt_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, r#"{"welcome": {"nested": true}}"#).unwrap();

    let result: Result<Option<Lang>, LoadError> = Loader::new().load_file(&path);
    assert!(matches!(result, Err(LoadError::Json(_))));
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    // A directory where a file is expected
    let path = dir.path().join("adir");
    fs::create_dir(&path).unwrap();

    let result: Result<Option<Lang>, LoadError> = Loader::new().load_file(&path);
    match result {
        Err(LoadError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected an io error, got {:?}", other),
    }
}
