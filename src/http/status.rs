//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado HTTP que usa el servidor de
//! archivos estáticos:
//!
//! - **2xx**: Éxito (200 OK, 206 Partial Content para rangos de audio)
//! - **4xx**: Error del cliente (400, 403, 404, 416)
//! - **5xx**: Error del servidor (500)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 206 Partial Content - Respuesta a un range request (seek de audio)
    PartialContent = 206,

    /// 400 Bad Request - Request malformado o método no soportado
    BadRequest = 400,

    /// 403 Forbidden - Path fuera del directorio servido (ej: "..")
    Forbidden = 403,

    /// 404 Not Found - El archivo no existe
    NotFound = 404,

    /// 416 Range Not Satisfiable - El rango pedido cae fuera del archivo
    RangeNotSatisfiable = 416,

    /// 500 Internal Server Error - Error interno del servidor
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::PartialContent.reason_phrase(), "Partial Content");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::PartialContent => "Partial Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::RangeNotSatisfiable => "Range Not Satisfiable",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    ///
    /// # Ejemplo
    /// ```
    /// use meditation_server::http::StatusCode;
    /// assert!(StatusCode::Ok.is_success());
    /// assert!(StatusCode::PartialContent.is_success());
    /// assert!(!StatusCode::NotFound.is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::PartialContent)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        let code = self.as_u16();
        (400..500).contains(&code)
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        let code = self.as_u16();
        (500..600).contains(&code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
