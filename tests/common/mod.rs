//! Common test utilities for flexkids-dl integration tests

use flexkids_dl::Config;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const SESSION_COOKIE: &str = "PHPSESSID=e2e-session";

pub const OVERVIEW_BODY: &str = r#"
<form>
  <select name="album">
    <option data-month='3' data-year='2021'>Maart 2021</option>
    <option data-month='4' data-year='2021'>April 2021</option>
  </select>
</form>
"#;

pub const ALBUM_BODY: &str = r#"{"photos": ["101", "102"]}"#;

/// Configuration pointing at `server`, writing below `output_dir`
pub fn config_for(server: &MockServer, output_dir: &Path) -> Config {
    Config {
        base_url: server.uri(),
        output_dir: output_dir.to_path_buf(),
        username: "parent@example.com".to_string(),
        password: "hunter2".to_string(),
        ..Default::default()
    }
}

/// Answers every media request with a body naming the requested id
pub struct PhotoResponder;

impl Respond for PhotoResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request.url.path().rsplit('/').next().unwrap_or_default();
        ResponseTemplate::new(200)
            .insert_header("Content-Type", "image/jpeg")
            .set_body_bytes(photo_bytes(id))
    }
}

/// Bytes served by [`PhotoResponder`] for `id`
pub fn photo_bytes(id: &str) -> Vec<u8> {
    format!("jpeg-{id}").into_bytes()
}

/// Mount a login endpoint that sets the session cookie
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", format!("{SESSION_COOKIE}; path=/; HttpOnly")),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mount the media endpoint, expecting exactly `downloads` requests
pub async fn mount_photos(server: &MockServer, downloads: u64) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/ouder/media/download/media/\d+$"))
        .respond_with(PhotoResponder)
        .expect(downloads)
        .mount(server)
        .await;
}

/// Every file below `root`, relative and sorted
pub fn written_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}
