//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Enlaza el puerto elegido (reintentando si se ocupó en el intervalo)
//! 2. Acepta conexiones entrantes, una por thread
//! 3. Lee y parsea requests HTTP
//! 4. Sirve el archivo pedido y envía la response
//!
//! Una conexión que falla (pipe roto, reset) se registra y se descarta;
//! el servidor sigue atendiendo al resto.

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, ShutdownTrigger};
