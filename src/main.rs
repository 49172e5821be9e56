//! # Meditation Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos del reproductor de música
//! de meditación.
//!
//! Ejecutar sin argumentos hace la secuencia completa: buscar un puerto
//! libre desde el 8000, enlazar el servidor, imprimir las URLs de prueba
//! y abrir el navegador.

use meditation_server::browser;
use meditation_server::config::Config;
use meditation_server::server::Server;
use std::time::Duration;

fn main() {
    println!("=================================");
    println!("  Meditation Music Server");
    println!("=================================\n");

    // Crear configuración (por defecto, CLI o desde env)
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    println!("🔍 Buscando un puerto disponible desde el {}...", config.port);

    // Enlazar el servidor (el bind real decide el puerto definitivo)
    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    // Ctrl+C: detener el loop de accept y salir limpio
    let trigger = server.shutdown_trigger();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("\n⏹️  Deteniendo el servidor...");
        trigger.trigger();
    }) {
        eprintln!("⚠️  No se pudo instalar el handler de Ctrl+C: {}", e);
    }

    // Abrir el navegador apuntando al reproductor, sin bloquear el loop
    if !config.no_browser {
        let url = format!("http://localhost:{}/meditation.html", server.port());
        browser::launch_after(url, Duration::from_secs(config.browser_delay_secs));
    }

    // Iniciar el servidor (esto bloqueará el thread hasta el shutdown)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
