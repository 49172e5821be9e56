//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! Ejecutar sin argumentos realiza la secuencia completa: buscar puerto
//! libre → iniciar servidor → imprimir URLs → abrir navegador. Los flags
//! solo sobreescriben los valores por defecto.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./meditation_server --port 8080 --root-dir ./public --no-browser
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! MEDITATION_PORT=8080 MEDITATION_ROOT=. ./meditation_server
//! ```

use clap::Parser;

/// Configuración del servidor de música de meditación
#[derive(Debug, Clone, Parser)]
#[command(name = "meditation_server")]
#[command(about = "Servidor HTTP estable para el reproductor de música de meditación")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto inicial de la búsqueda (se prueban hasta 100 puertos consecutivos)
    #[arg(short, long, default_value = "8000", env = "MEDITATION_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (0.0.0.0 permite acceso desde la LAN)
    #[arg(long, default_value = "0.0.0.0", env = "MEDITATION_HOST")]
    pub host: String,

    /// Directorio raíz de los archivos estáticos
    #[arg(long = "root-dir", default_value = ".", env = "MEDITATION_ROOT")]
    pub root_dir: String,

    /// No abrir el navegador automáticamente
    #[arg(long = "no-browser")]
    pub no_browser: bool,

    /// Segundos de espera antes de abrir el navegador
    #[arg(long = "browser-delay", default_value = "2", env = "BROWSER_DELAY")]
    pub browser_delay_secs: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use meditation_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be >= 1".to_string());
        }

        let root = std::path::Path::new(&self.root_dir);
        if !root.is_dir() {
            return Err(format!("Root dir does not exist: {}", self.root_dir));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            root_dir: ".".to_string(),
            no_browser: false,
            browser_delay_secs: 2,
        }
    }
}
