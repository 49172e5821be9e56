//! # Meditation Server
//! src/lib.rs
//!
//! Servidor HTTP estable para probar el reproductor de música de
//! meditación en la red local: busca un puerto libre, sirve los archivos
//! estáticos del directorio de trabajo y sobrevive a las desconexiones
//! de los clientes (pipes rotos, resets de conexión, etc.).
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y manejo del protocolo HTTP (requests, responses, rangos)
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `files`: Resolución y entrega de archivos estáticos (MIME, rangos, HEAD)
//! - `ports`: Búsqueda de un puerto TCP libre en una ventana acotada
//! - `netinfo`: Descubrimiento best-effort de la IP local (truco UDP)
//! - `browser`: Apertura retardada del navegador por defecto
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use meditation_server::config::Config;
//! use meditation_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::bind(&config).expect("Error al iniciar servidor");
//! server.run().expect("Error en el servidor");
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod netinfo;
pub mod ports;
pub mod server;
