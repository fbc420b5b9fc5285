//! Serve the catalog documents and text assets from the frontend directory.
//! Images under /resources are served by `ServeDir` in the router instead.

use std::fs;
use std::path::Path;

use super::routes::HttpResponse;
use crate::config::AppConfig;
use crate::data::ability::DEFAULT_ABILITIES_FILE;
use crate::data::character::DEFAULT_CHARACTERS_FILE;
use crate::data::combat_class::DEFAULT_CLASSES_FILE;

/// Try to serve a catalog document or a frontend text file. Returns None for API paths and
/// when nothing on disk matches, so the caller can fall back to the built-in page.
pub fn try_serve_static(config: &AppConfig, method: &str, path: &str) -> Option<HttpResponse> {
    if method != "GET" {
        return None;
    }
    if path.starts_with("/api") {
        return None;
    }

    let path = path.split('?').next().unwrap_or(path).trim_start_matches('/');
    if path.contains("..") {
        return None;
    }

    if matches!(
        path,
        DEFAULT_CHARACTERS_FILE | DEFAULT_CLASSES_FILE | DEFAULT_ABILITIES_FILE
    ) {
        return read_text(&config.data_dir.join(path), "application/json; charset=utf-8");
    }

    let frontend = config.frontend_dir.canonicalize().ok()?;
    let file_path = if path.is_empty() {
        frontend.join("index.html")
    } else {
        frontend.join(path)
    };
    if !file_path.starts_with(&frontend) || !file_path.is_file() {
        return None;
    }

    let content_type = content_type_for_path(&file_path.to_string_lossy());
    if !is_text_content_type(content_type) {
        return None;
    }
    read_text(&file_path, content_type)
}

fn read_text(path: &Path, content_type: &'static str) -> Option<HttpResponse> {
    let body = fs::read_to_string(path).ok()?;
    Some(HttpResponse {
        status_code: 200,
        content_type,
        body,
    })
}

fn content_type_for_path(path: &str) -> &'static str {
    if path.ends_with(".html") {
        "text/html; charset=utf-8"
    } else if path.ends_with(".js") {
        "application/javascript; charset=utf-8"
    } else if path.ends_with(".css") {
        "text/css; charset=utf-8"
    } else if path.ends_with(".json") {
        "application/json; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

fn is_text_content_type(ct: &str) -> bool {
    ct.starts_with("text/") || ct.starts_with("application/javascript") || ct.starts_with("application/json")
}
