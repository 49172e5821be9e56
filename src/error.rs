//! # Errores del Servidor
//! src/error.rs
//!
//! Errores fatales de arranque. Los errores por conexión (pipes rotos,
//! resets) nunca llegan aquí: se clasifican y registran en `server::tcp`
//! sin tumbar el proceso.

/// Errores que impiden arrancar el servidor
#[derive(Debug)]
pub enum ServerError {
    /// No se encontró ningún puerto libre en la ventana de búsqueda
    NoPortAvailable {
        /// Primer puerto probado
        start: u16,

        /// Último puerto probado (exclusivo)
        end: u16,
    },

    /// El bind real falló por algo distinto a "puerto ocupado"
    Bind {
        /// Puerto que se intentó enlazar
        port: u16,

        /// Error de E/S subyacente
        source: std::io::Error,
    },
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::NoPortAvailable { start, end } => {
                write!(f, "No free port available in range {}-{}", start, end)
            }
            ServerError::Bind { port, source } => {
                write!(
                    f,
                    "Failed to bind port {}: {} (check whether the port is in use)",
                    port, source
                )
            }
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::NoPortAvailable { .. } => None,
            ServerError::Bind { source, .. } => Some(source),
        }
    }
}
