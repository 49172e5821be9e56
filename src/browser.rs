//! # Apertura del Navegador
//! src/browser.rs
//!
//! Lanza el navegador por defecto apuntando al reproductor, tras una
//! pequeña espera para que el servidor ya esté aceptando conexiones.
//!
//! Corre en su propio thread y no bloquea (ni es bloqueado por) el loop
//! del servidor. Que no haya navegador disponible no es un error: el
//! fallo se ignora en silencio.

use std::thread;
use std::time::Duration;

/// Abre `url` en el navegador por defecto después de `delay`
///
/// Retorna el handle del thread por si el caller quiere esperarlo (los
/// tests lo hacen; `main` simplemente lo deja correr).
pub fn launch_after(url: String, delay: Duration) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(delay);
        // Sin navegador (servidor headless, CI) esto falla y da igual
        let _ = open::that(&url);
    })
}
