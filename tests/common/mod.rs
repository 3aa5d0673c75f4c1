use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use textflow::config::ServerConfig;
use textflow::session::SessionStore;

#[allow(dead_code)]
pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    }
}

#[allow(dead_code)]
pub fn temp_session_store() -> (SessionStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = SessionStore::new_with_path(tmp.path().join("session.json"));
    (store, tmp)
}

#[allow(dead_code)]
pub fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write csv file");
    path
}
