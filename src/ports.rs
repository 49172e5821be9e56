//! # Búsqueda de Puerto Libre
//! src/ports.rs
//!
//! Este módulo busca el primer puerto TCP libre en una ventana acotada,
//! probando con un bind que se libera de inmediato.
//!
//! El sondeo tiene una carrera inherente: un puerto libre ahora puede
//! estar ocupado cuando el servidor haga el bind real. El bind real es
//! la comprobación autoritativa; `server::tcp` reintenta con el
//! siguiente candidato si el puerto elegido se ocupó en el intervalo.

use crate::error::ServerError;
use std::net::TcpListener;

/// Cantidad de puertos consecutivos que se prueban desde el inicial
pub const PORT_SCAN_WINDOW: u16 = 100;

/// Verifica si un puerto está disponible en el host indicado
///
/// Hace un bind de prueba y lo libera de inmediato.
///
/// # Ejemplo
/// ```
/// use meditation_server::ports::check_port_available;
/// use std::net::TcpListener;
///
/// let ocupado = TcpListener::bind("127.0.0.1:0").unwrap();
/// let port = ocupado.local_addr().unwrap().port();
///
/// assert!(!check_port_available("127.0.0.1", port));
/// ```
pub fn check_port_available(host: &str, port: u16) -> bool {
    TcpListener::bind((host, port)).is_ok()
}

/// Busca el primer puerto libre en `[start, start + PORT_SCAN_WINDOW)`
///
/// # Errores
///
/// Retorna `ServerError::NoPortAvailable` si todos los puertos de la
/// ventana están ocupados.
pub fn find_available_port(host: &str, start: u16) -> Result<u16, ServerError> {
    find_available_port_in(host, start, PORT_SCAN_WINDOW)
}

/// Variante con ventana explícita, usada por los tests y el reintento
/// del bind real
pub fn find_available_port_in(host: &str, start: u16, window: u16) -> Result<u16, ServerError> {
    let end = start.saturating_add(window);

    for port in start..end {
        if check_port_available(host, port) {
            return Ok(port);
        }
    }

    Err(ServerError::NoPortAvailable { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    /// Helper: ocupa un puerto efímero y lo retorna junto al listener
    fn occupy_port() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[test]
    fn test_check_port_occupied() {
        let (_guard, port) = occupy_port();
        assert!(!check_port_available("127.0.0.1", port));
    }

    #[test]
    fn test_check_port_free_after_release() {
        let (guard, port) = occupy_port();
        drop(guard);
        // Liberado el listener, el sondeo debe poder enlazarlo
        assert!(check_port_available("127.0.0.1", port));
    }

    #[test]
    fn test_find_skips_occupied_port() {
        let (_guard, port) = occupy_port();

        // Nunca debe retornar el puerto ocupado
        if let Ok(found) = find_available_port_in("127.0.0.1", port, 3) {
            assert_ne!(found, port);
            assert!(found > port && found < port + 3);
        }
    }

    #[test]
    fn test_find_returns_start_when_free() {
        // Conseguir un puerto libre y soltarlo antes de buscar
        let (guard, port) = occupy_port();
        drop(guard);

        let found = find_available_port_in("127.0.0.1", port, 3).expect("free port");
        assert_eq!(found, port);
    }

    #[test]
    fn test_no_port_available_when_window_occupied() {
        let (_guard, port) = occupy_port();

        // Ventana de tamaño 1 completamente ocupada
        let result = find_available_port_in("127.0.0.1", port, 1);
        assert!(matches!(result, Err(ServerError::NoPortAvailable { .. })));
    }

    #[test]
    fn test_window_bounds_in_error() {
        let (_guard, port) = occupy_port();

        match find_available_port_in("127.0.0.1", port, 1) {
            Err(ServerError::NoPortAvailable { start, end }) => {
                assert_eq!(start, port);
                assert_eq!(end, port + 1);
            }
            other => panic!("expected NoPortAvailable, got {:?}", other),
        }
    }
}
