//! # Módulo HTTP
//!
//! Este módulo implementa la parte del protocolo HTTP que necesita un
//! servidor de archivos estáticos, sin usar librerías de alto nivel.
//! Incluye:
//!
//! - Parsing de requests HTTP (GET y HEAD)
//! - Construcción de responses HTTP
//! - Manejo de status codes
//! - Parsing de rangos de bytes (`Range: bytes=...`)
//!
//! ### Formato de Request
//!
//! ```text
//! GET /meditation.html HTTP/1.1\r\n
//! Host: 192.168.1.20:8000\r\n
//! Range: bytes=100-199\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 206 Partial Content\r\n
//! Content-Type: audio/mpeg\r\n
//! Content-Range: bytes 100-199/52406\r\n
//! Content-Length: 100\r\n
//! \r\n
//! <bytes 100..=199>
//! ```

// Submódulos del módulo HTTP
pub mod range;     // Parsing de rangos de bytes
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use range::ByteRange;
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
