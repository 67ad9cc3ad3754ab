use tempfile::TempDir;

use depper::app::run_analyze;
use depper::mirror::{CacheStorer, JsonCacheFile, OutcomeKind};

const CACHE: &str = "\u{feff}{
    \"azure-cli-helper\": {\"type\": \"setup.py\", \"content\": \"setup(install_requires=['azure-mgmt-core', 'knack'])\", \"version\": \"0.3\"},
    \"flask-thing\": {\"type\": \"setup.py\", \"content\": \"setup(install_requires=['flask'])\\n# azure-pipelines.yml\", \"version\": \"1.0\"},
    \"blob-sync\": {\"type\": \"metadata\", \"content\": \"Name: blob-sync\\nRequires-Dist: azure-storage-blob (>=12)\\n\"},
    \"broken\": {\"type\": \"tarfile.ReadError\", \"content\": \"*** Failed to read Tarfile?\", \"version\": \"2.0\"}
}";

fn write_cache(dir: &TempDir) -> JsonCacheFile {
    let path = dir.path().join("setupinfo.json");
    std::fs::write(&path, CACHE).unwrap();
    JsonCacheFile::new(path)
}

#[test]
fn analyze_prints_dependents_in_cache_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_cache(&temp_dir);
    let mut out = Vec::new();

    let count = run_analyze(&store, "azure-", &mut out).unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "azure-cli-helper\nblob-sync\n"
    );
}

#[test]
fn analyze_with_other_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_cache(&temp_dir);
    let mut out = Vec::new();

    run_analyze(&store, "knack", &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "azure-cli-helper\n");
}

#[test]
fn cache_written_without_version_field_still_loads() {
    let temp_dir = TempDir::new().unwrap();
    let store = write_cache(&temp_dir);

    let cache = store.load().unwrap();

    assert_eq!(cache["blob-sync"].kind, OutcomeKind::Metadata);
    assert_eq!(cache["blob-sync"].version, "");
    assert_eq!(cache["broken"].kind, OutcomeKind::TarRead);
}

#[test]
fn analyze_without_cache_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonCacheFile::new(temp_dir.path().join("setupinfo.json"));
    let mut out = Vec::new();

    let count = run_analyze(&store, "azure-", &mut out).unwrap();

    assert_eq!(count, 0);
    assert!(out.is_empty());
}
