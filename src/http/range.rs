//! # Parsing de Rangos de Bytes
//! src/http/range.rs
//!
//! Este módulo parsea el header `Range: bytes=...` que envían los
//! navegadores al hacer seek en una pista de audio.
//!
//! ## Formas soportadas (RFC 7233)
//!
//! ```text
//! Range: bytes=100-199   → bytes 100 a 199 inclusive
//! Range: bytes=100-      → desde el byte 100 hasta el final
//! Range: bytes=-200      → los últimos 200 bytes
//! ```
//!
//! Los headers con múltiples rangos o con sintaxis inválida se ignoran
//! (el servidor responde 200 con el archivo completo, comportamiento que
//! el RFC permite).

/// Un rango de bytes pedido por el cliente, aún sin validar contra el
/// tamaño real del archivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// `bytes=a-b`: desde `a` hasta `b` inclusive
    FromTo(u64, u64),

    /// `bytes=a-`: desde `a` hasta el final del archivo
    From(u64),

    /// `bytes=-n`: los últimos `n` bytes del archivo
    Suffix(u64),
}

impl ByteRange {
    /// Parsea el valor de un header `Range`
    ///
    /// Retorna `None` si la sintaxis no es reconocible o si se piden
    /// múltiples rangos; el caller debe tratar `None` como "servir el
    /// archivo completo".
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::ByteRange;
    ///
    /// assert_eq!(ByteRange::parse("bytes=100-199"), Some(ByteRange::FromTo(100, 199)));
    /// assert_eq!(ByteRange::parse("bytes=100-"), Some(ByteRange::From(100)));
    /// assert_eq!(ByteRange::parse("bytes=-200"), Some(ByteRange::Suffix(200)));
    /// assert_eq!(ByteRange::parse("chunks=1-2"), None);
    /// ```
    pub fn parse(header_value: &str) -> Option<ByteRange> {
        // El único unit soportado es "bytes"
        let spec = header_value.trim().strip_prefix("bytes=")?;

        // Múltiples rangos: no los soportamos, servir completo
        if spec.contains(',') {
            return None;
        }

        let dash = spec.find('-')?;
        let start = spec[..dash].trim();
        let end = spec[dash + 1..].trim();

        match (start.is_empty(), end.is_empty()) {
            // "bytes=a-b"
            (false, false) => {
                let a: u64 = start.parse().ok()?;
                let b: u64 = end.parse().ok()?;
                if a > b {
                    return None;
                }
                Some(ByteRange::FromTo(a, b))
            }
            // "bytes=a-"
            (false, true) => {
                let a: u64 = start.parse().ok()?;
                Some(ByteRange::From(a))
            }
            // "bytes=-n"
            (true, false) => {
                let n: u64 = end.parse().ok()?;
                Some(ByteRange::Suffix(n))
            }
            // "bytes=-"
            (true, true) => None,
        }
    }

    /// Resuelve el rango contra el tamaño real del archivo
    ///
    /// Retorna los offsets `(primero, último)` inclusive, o `None` si el
    /// rango no es satisfacible (cae completamente fuera del archivo).
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::ByteRange;
    ///
    /// assert_eq!(ByteRange::FromTo(100, 199).resolve(500), Some((100, 199)));
    /// assert_eq!(ByteRange::FromTo(100, 999).resolve(500), Some((100, 499)));
    /// assert_eq!(ByteRange::FromTo(600, 700).resolve(500), None);
    /// assert_eq!(ByteRange::Suffix(200).resolve(500), Some((300, 499)));
    /// ```
    pub fn resolve(&self, total_len: u64) -> Option<(u64, u64)> {
        if total_len == 0 {
            return None;
        }

        match *self {
            ByteRange::FromTo(start, end) => {
                if start >= total_len {
                    return None;
                }
                // El final se recorta al último byte real
                Some((start, end.min(total_len - 1)))
            }
            ByteRange::From(start) => {
                if start >= total_len {
                    return None;
                }
                Some((start, total_len - 1))
            }
            ByteRange::Suffix(count) => {
                if count == 0 {
                    return None;
                }
                let start = total_len.saturating_sub(count);
                Some((start, total_len - 1))
            }
        }
    }
}
