//! # Archivos Estáticos
//! src/files/mod.rs
//!
//! Este módulo resuelve paths HTTP a archivos del directorio raíz y
//! construye la respuesta completa: content type por extensión, headers
//! de audio (rangos + cache), respuestas parciales 206 para el seek del
//! reproductor y soporte HEAD.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → StaticFiles::serve → Response
//! ```
//!
//! La resolución de paths rechaza cualquier componente `..` (403) y
//! mapea los paths de directorio a su `index.html`.

use crate::http::{ByteRange, Method, Request, Response, StatusCode};
use std::path::{Path, PathBuf};

/// Valor fijo de cache para los archivos de audio (una hora)
const AUDIO_CACHE_CONTROL: &str = "public, max-age=3600";

/// Servidor de archivos estáticos relativo a un directorio raíz
pub struct StaticFiles {
    /// Directorio raíz del que se sirven los archivos
    root: PathBuf,
}

impl StaticFiles {
    /// Crea un servidor de archivos sobre el directorio indicado
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Obtiene el directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Atiende un request y produce la respuesta completa
    ///
    /// Nunca entra en pánico: cualquier problema se traduce en una
    /// respuesta de error (403/404/416/500).
    pub fn serve(&self, request: &Request) -> Response {
        let full_path = match self.resolve(request.path()) {
            Ok(path) => path,
            Err(response) => return response,
        };

        let data = match std::fs::read(&full_path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Response::error(
                    StatusCode::NotFound,
                    &format!("File not found: {}", request.path()),
                );
            }
            Err(e) => {
                return Response::error(
                    StatusCode::InternalServerError,
                    &format!("Failed to read file: {}", e),
                );
            }
        };

        let ctype = content_type(&full_path);
        let total = data.len() as u64;

        // Range request: los navegadores lo usan para el seek de audio
        let requested_range = request.header("Range").and_then(ByteRange::parse);

        let mut response = match requested_range {
            Some(range) => match range.resolve(total) {
                Some((first, last)) => {
                    let chunk = data[first as usize..=last as usize].to_vec();
                    Response::new(StatusCode::PartialContent)
                        .with_header("Content-Type", ctype)
                        .with_header(
                            "Content-Range",
                            &format!("bytes {}-{}/{}", first, last, total),
                        )
                        .with_body_bytes(chunk)
                }
                None => {
                    // El rango cae fuera del archivo
                    Response::error(
                        StatusCode::RangeNotSatisfiable,
                        &format!("Range not satisfiable for {} bytes", total),
                    )
                    .with_header("Content-Range", &format!("bytes */{}", total))
                }
            },
            // Sin header Range (o con uno ilegible): archivo completo
            None => Response::new(StatusCode::Ok)
                .with_header("Content-Type", ctype)
                .with_body_bytes(data),
        };

        // Los archivos de audio anuncian soporte de rangos y una hora de
        // cache, sobreescribiendo lo que el tipo por defecto diría
        if is_audio(&full_path) && response.status().is_success() {
            response.add_header("Accept-Ranges", "bytes");
            response.add_header("Cache-Control", AUDIO_CACHE_CONTROL);
        }

        // HEAD: mismos headers, sin body
        if request.method() == Method::HEAD {
            response = response.head_only();
        }

        response
    }

    /// Resuelve un path HTTP a un archivo dentro del directorio raíz
    ///
    /// - Rechaza componentes `..` con 403
    /// - Mapea directorios a su `index.html`
    fn resolve(&self, raw_path: &str) -> Result<PathBuf, Response> {
        let mut resolved = self.root.clone();

        for component in raw_path.split('/') {
            if component.is_empty() || component == "." {
                continue;
            }
            if component == ".." {
                return Err(Response::error(
                    StatusCode::Forbidden,
                    &format!("Path not allowed: {}", raw_path),
                ));
            }
            resolved.push(component);
        }

        if resolved.is_dir() {
            resolved.push("index.html");
        }

        if !resolved.is_file() {
            return Err(Response::error(
                StatusCode::NotFound,
                &format!("File not found: {}", raw_path),
            ));
        }

        Ok(resolved)
    }
}

/// Determina el content type según la extensión del archivo
///
/// Los tipos de audio son los que el reproductor necesita; el resto son
/// los de una web app típica (HTML, JS, imágenes, manifiesto PWA).
///
/// # Ejemplo
/// ```
/// use meditation_server::files::content_type;
/// use std::path::Path;
///
/// assert_eq!(content_type(Path::new("sounds/rain.mp3")), "audio/mpeg");
/// assert_eq!(content_type(Path::new("meditation.html")), "text/html; charset=utf-8");
/// ```
pub fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Verifica si el archivo es una pista de audio del reproductor
pub fn is_audio(path: &Path) -> bool {
    matches!(
        content_type(path),
        "audio/mpeg" | "audio/mp4" | "audio/ogg" | "audio/wav"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper: directorio temporal con los archivos del reproductor
    fn fixture_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("index.html"), "<h1>Meditation</h1>").unwrap();
        fs::write(dir.path().join("meditation.html"), "<h1>Player</h1>").unwrap();

        // Pista de audio de 500 bytes con contenido reconocible
        let track: Vec<u8> = (0..500u32).map(|i| (i % 256) as u8).collect();
        fs::write(dir.path().join("track.mp3"), &track).unwrap();
        fs::write(dir.path().join("track.m4a"), b"m4a data").unwrap();
        fs::write(dir.path().join("track.ogg"), b"ogg data").unwrap();

        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/install-app.html"), "<h1>Install</h1>").unwrap();

        dir
    }

    fn get(path: &str) -> Request {
        let raw = format!("GET {} HTTP/1.1\r\n\r\n", path);
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn get_with_range(path: &str, range: &str) -> Request {
        let raw = format!("GET {} HTTP/1.1\r\nRange: {}\r\n\r\n", path, range);
        Request::parse(raw.as_bytes()).unwrap()
    }

    // ==================== Content types ====================

    #[test]
    fn test_content_type_audio() {
        assert_eq!(content_type(Path::new("a.mp3")), "audio/mpeg");
        assert_eq!(content_type(Path::new("a.m4a")), "audio/mp4");
        assert_eq!(content_type(Path::new("a.ogg")), "audio/ogg");
    }

    #[test]
    fn test_content_type_case_insensitive() {
        assert_eq!(content_type(Path::new("a.MP3")), "audio/mpeg");
    }

    #[test]
    fn test_content_type_web() {
        assert_eq!(content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("a.js")), "application/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("a.webmanifest")), "application/manifest+json");
    }

    #[test]
    fn test_content_type_unknown() {
        assert_eq!(content_type(Path::new("a.xyz")), "application/octet-stream");
        assert_eq!(content_type(Path::new("sin_extension")), "application/octet-stream");
    }

    #[test]
    fn test_is_audio() {
        assert!(is_audio(Path::new("a.mp3")));
        assert!(is_audio(Path::new("a.ogg")));
        assert!(!is_audio(Path::new("a.html")));
        assert!(!is_audio(Path::new("a.png")));
    }

    // ==================== Serve ====================

    #[test]
    fn test_serve_html_file() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/meditation.html"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
        assert_eq!(response.body(), b"<h1>Player</h1>");
    }

    #[test]
    fn test_serve_mp3_headers() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/track.mp3"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Content-Type"), Some(&"audio/mpeg".to_string()));
        assert_eq!(response.headers().get("Accept-Ranges"), Some(&"bytes".to_string()));
        assert_eq!(
            response.headers().get("Cache-Control"),
            Some(&"public, max-age=3600".to_string())
        );
    }

    #[test]
    fn test_serve_m4a_and_ogg_content_types() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/track.m4a"));
        assert_eq!(response.headers().get("Content-Type"), Some(&"audio/mp4".to_string()));

        let response = files.serve(&get("/track.ogg"));
        assert_eq!(response.headers().get("Content-Type"), Some(&"audio/ogg".to_string()));
    }

    #[test]
    fn test_serve_html_has_no_audio_headers() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/meditation.html"));

        assert!(response.headers().get("Accept-Ranges").is_none());
        assert!(response.headers().get("Cache-Control").is_none());
    }

    #[test]
    fn test_serve_directory_index() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<h1>Meditation</h1>");
    }

    #[test]
    fn test_serve_subdirectory_file() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/public/install-app.html"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<h1>Install</h1>");
    }

    #[test]
    fn test_serve_not_found() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/no-existe.html"));

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_serve_rejects_traversal() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get("/../secreto.txt"));
        assert_eq!(response.status(), StatusCode::Forbidden);

        let response = files.serve(&get("/public/../../secreto.txt"));
        assert_eq!(response.status(), StatusCode::Forbidden);
    }

    // ==================== Range requests ====================

    #[test]
    fn test_serve_range_exact() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get_with_range("/track.mp3", "bytes=100-199"));

        assert_eq!(response.status(), StatusCode::PartialContent);
        assert_eq!(
            response.headers().get("Content-Range"),
            Some(&"bytes 100-199/500".to_string())
        );
        assert_eq!(response.headers().get("Content-Length"), Some(&"100".to_string()));

        // Exactamente los bytes 100..=199 de la pista
        let expected: Vec<u8> = (100..200u32).map(|i| (i % 256) as u8).collect();
        assert_eq!(response.body(), &expected[..]);
    }

    #[test]
    fn test_serve_range_open_ended() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get_with_range("/track.mp3", "bytes=450-"));

        assert_eq!(response.status(), StatusCode::PartialContent);
        assert_eq!(
            response.headers().get("Content-Range"),
            Some(&"bytes 450-499/500".to_string())
        );
        assert_eq!(response.body().len(), 50);
    }

    #[test]
    fn test_serve_range_unsatisfiable() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get_with_range("/track.mp3", "bytes=900-999"));

        assert_eq!(response.status(), StatusCode::RangeNotSatisfiable);
        assert_eq!(
            response.headers().get("Content-Range"),
            Some(&"bytes */500".to_string())
        );
    }

    #[test]
    fn test_serve_malformed_range_falls_back_to_full() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let response = files.serve(&get_with_range("/track.mp3", "bytes=abc"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body().len(), 500);
    }

    // ==================== HEAD ====================

    #[test]
    fn test_serve_head_no_body_same_headers() {
        let dir = fixture_dir();
        let files = StaticFiles::new(dir.path());

        let raw = b"HEAD /track.mp3 HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        let response = files.serve(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert_eq!(response.headers().get("Content-Length"), Some(&"500".to_string()));
        assert_eq!(response.headers().get("Content-Type"), Some(&"audio/mpeg".to_string()));
        assert_eq!(response.headers().get("Accept-Ranges"), Some(&"bytes".to_string()));
    }
}
