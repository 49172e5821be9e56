//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: audio/mpeg\r\n
//! Content-Length: 52406\r\n
//! Accept-Ranges: bytes\r\n
//! \r\n
//! <bytes del archivo>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use meditation_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/html")
//!     .with_body("<h1>Hola</h1>");
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;
use std::collections::HashMap;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 206, 404, etc.)
    status: StatusCode,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    /// Usamos HashMap para evitar duplicados
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "audio/mpeg");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string()
        );
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (audio, imágenes, etc.)
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::{Response, StatusCode};
    ///
    /// let audio_chunk = vec![0xFF, 0xFB, 0x90, 0x00]; // frame MP3
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(audio_chunk);
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string()
        );
        self
    }

    /// Descarta el body conservando todos los headers
    ///
    /// Para responder a HEAD: mismos headers que el GET equivalente
    /// (incluyendo `Content-Length`) pero sin cuerpo.
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body("contenido")
    ///     .head_only();
    ///
    /// assert!(response.body().is_empty());
    /// assert_eq!(response.headers().get("Content-Length"), Some(&"9".to_string()));
    /// ```
    pub fn head_only(mut self) -> Self {
        self.body = Vec::new();
        self
    }

    /// Crea una respuesta de error con mensaje JSON
    ///
    /// Formato del JSON: `{"error": "mensaje"}`
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(
    ///     StatusCode::NotFound,
    ///     "File not found: /missing.mp3"
    /// );
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = format!(r#"{{"error": "{}"}}"#, message);
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.0:
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        // Formato: HTTP/1.0 200 OK\r\n
        let status_line = format!(
            "HTTP/1.0 {}\r\n",
            self.status
        );
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        // Formato: Header-Name: Value\r\n
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
