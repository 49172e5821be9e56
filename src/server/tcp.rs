//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread.
//!
//! La garantía central es de disponibilidad: ningún fallo de red de un
//! cliente individual (pipe roto, reset de conexión) tumba el proceso.
//! Los errores de transporte se registran como advertencias; cualquier
//! otro error de manejo se registra y la conexión se descarta.

use crate::config::Config;
use crate::error::ServerError;
use crate::files::StaticFiles;
use crate::http::{Request, Response, StatusCode};
use crate::netinfo;
use crate::ports;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Páginas de entrada del reproductor que se listan en el banner
pub const ENTRY_PAGES: [&str; 3] = [
    "/meditation.html",
    "/notification-test.html",
    "/public/install-app.html",
];

/// Servidor HTTP de archivos estáticos resistente a desconexiones
pub struct Server {
    config: Config,
    files: Arc<StaticFiles>,
    listener: TcpListener,
    port: u16,
    running: Arc<AtomicBool>,
}

/// Handle para detener el servidor desde otro flujo de control
/// (el handler de Ctrl+C o un test)
#[derive(Clone)]
pub struct ShutdownTrigger {
    running: Arc<AtomicBool>,
    port: u16,
}

impl ShutdownTrigger {
    /// Detiene el loop de accept del servidor
    ///
    /// Baja la bandera y se conecta al listener para despertarlo del
    /// accept bloqueante.
    pub fn trigger(&self) {
        self.running.store(false, Ordering::SeqCst);
        // Conexión de despertar; si falla el loop igual verá la bandera
        // en la próxima conexión real
        let _ = TcpStream::connect(("127.0.0.1", self.port));
    }
}

impl Server {
    /// Enlaza el servidor en el primer puerto libre de la ventana
    ///
    /// El sondeo de `ports` elige el candidato, pero el bind real es la
    /// comprobación autoritativa: si el puerto se ocupó en el intervalo
    /// (`AddrInUse`) se reintenta con el siguiente. Cualquier otro fallo
    /// de bind es fatal (`ServerError::Bind`).
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let start = config.port;
        let end = start.saturating_add(ports::PORT_SCAN_WINDOW);
        let mut candidate = start;

        loop {
            let window = end - candidate;
            let port = ports::find_available_port_in(&config.host, candidate, window)
                .map_err(|_| ServerError::NoPortAvailable { start, end })?;

            match TcpListener::bind((config.host.as_str(), port)) {
                Ok(listener) => {
                    if port != start {
                        println!("⚠️  Puerto {} ocupado, usando el puerto {}", start, port);
                    }
                    return Ok(Self {
                        config: config.clone(),
                        files: Arc::new(StaticFiles::new(config.root_dir.clone())),
                        listener,
                        port,
                        running: Arc::new(AtomicBool::new(true)),
                    });
                }
                // Carrera sondeo/bind: alguien tomó el puerto entre la
                // prueba y el bind real
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    println!("⚠️  Puerto {} se ocupó antes del bind, probando el siguiente", port);
                    if port >= end - 1 {
                        return Err(ServerError::NoPortAvailable { start, end });
                    }
                    candidate = port + 1;
                }
                Err(e) => return Err(ServerError::Bind { port, source: e }),
            }
        }
    }

    /// Puerto real en el que quedó escuchando
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Crea un trigger para detener este servidor
    pub fn shutdown_trigger(&self) -> ShutdownTrigger {
        ShutdownTrigger {
            running: Arc::clone(&self.running),
            port: self.port,
        }
    }

    /// Imprime el banner con las URLs de prueba (LAN y localhost)
    fn print_banner(&self) {
        let local_ip = netinfo::get_local_ip();

        println!("{}", "=".repeat(60));
        println!("🧘 Reproductor de Música de Meditación - Servidor Estable");
        println!("{}", "=".repeat(60));
        println!("📱 Direcciones para el teléfono (misma WiFi):");
        for page in ENTRY_PAGES {
            println!("   http://{}:{}{}", local_ip, self.port, page);
        }
        println!();
        println!("💻 Direcciones para esta computadora:");
        for page in ENTRY_PAGES {
            println!("   http://localhost:{}{}", self.port, page);
        }
        println!();
        println!("🔧 Características del servidor:");
        println!("   ✅ Manejo automático de desconexiones");
        println!("   ✅ Range requests para el seek de audio");
        println!("   ✅ MIME types correctos para las pistas");
        println!();
        println!("⏹️  Presione Ctrl+C para detener el servidor");
        println!("{}", "=".repeat(60));
    }

    /// Inicia el loop de accept (bloquea hasta el shutdown)
    pub fn run(&self) -> std::io::Result<()> {
        self.print_banner();
        println!("🚀 Servidor escuchando en {}:{}\n", self.config.host, self.port);

        for stream in self.listener.incoming() {
            // El trigger de shutdown baja la bandera y nos despierta con
            // una conexión vacía
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => {
                    let files = Arc::clone(&self.files);

                    thread::spawn(move || {
                        if let Err(e) = Server::handle_connection(stream, files) {
                            if is_transport_error(&e) {
                                // Desconexión del cliente: esperada, no fatal
                                println!("⚠️  Conexión interrumpida (ignorada): {}", e);
                            } else {
                                eprintln!("❌ Error procesando conexión: {}", e);
                            }
                        }
                    });
                }
                Err(e) => {
                    eprintln!("❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        println!("\n🛑 Servidor detenido");
        Ok(())
    }

    /// Procesa una conexión: lee el request, sirve el archivo, responde
    ///
    /// Los errores de E/S se propagan al caller, que los clasifica; los
    /// errores de parseo y de archivo se convierten en responses de
    /// error y no se propagan.
    fn handle_connection(mut stream: TcpStream, files: Arc<StaticFiles>) -> std::io::Result<()> {
        let mut buffer = [0u8; 8192];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            // Conexión de despertar del shutdown o cliente que cerró sin
            // enviar nada
            return Ok(());
        }

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                let response = files.serve(&request);
                log_request(request.method().as_str(), request.path(), response.status());
                response
            }
            Err(e) => {
                println!("❌ Parse error: {}", e);
                Response::error(StatusCode::BadRequest, &format!("Invalid: {}", e))
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        Ok(())
    }
}

/// Clasifica un error de E/S como fallo de transporte esperado
///
/// Estos son los errores normales de un cliente que se desconecta a
/// mitad de la transferencia (cerrar la pestaña, seek agresivo del
/// reproductor) y nunca deben tumbar el servidor.
pub fn is_transport_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::TimedOut
    )
}

/// Verifica si un path debe aparecer en el log de requests
///
/// El favicon lo pide cada navegador en cada carga y solo ensucia la
/// salida.
pub fn should_log(path: &str) -> bool {
    !path.starts_with("/favicon.ico")
}

/// Registra un request servido: método, path y status
fn log_request(method: &str, path: &str, status: StatusCode) {
    if should_log(path) {
        println!("📡 {} {} {}", method, path, status.as_u16());
    }
}
