//! # Descubrimiento de IP Local
//! src/netinfo.rs
//!
//! Obtiene la IP con la que la máquina sale hacia la red, para imprimir
//! la URL que sirve desde el teléfono en la misma WiFi.
//!
//! El truco: conectar un socket UDP desechable hacia una dirección
//! pública conocida y leer el endpoint local. No se envía ningún
//! paquete. El resultado es best-effort (detrás de NAT/VPN puede no ser
//! la IP correcta) y nunca debe tratarse como autoritativo.

use std::net::UdpSocket;

/// Dirección de fallback cuando no se puede determinar la IP local
pub const LOOPBACK: &str = "127.0.0.1";

/// Obtiene la IP local best-effort, con fallback a loopback
///
/// # Ejemplo
/// ```
/// use meditation_server::netinfo::get_local_ip;
///
/// let ip = get_local_ip();
/// // Siempre retorna algo parseable como IP
/// assert!(ip.parse::<std::net::IpAddr>().is_ok());
/// ```
pub fn get_local_ip() -> String {
    local_ip_via_udp().unwrap_or_else(|_| LOOPBACK.to_string())
}

/// Lee la IP local conectando un socket UDP hacia 8.8.8.8
fn local_ip_via_udp() -> std::io::Result<String> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    // connect() en UDP solo fija el destino, no envía nada
    socket.connect("8.8.8.8:80")?;
    Ok(socket.local_addr()?.ip().to_string())
}
