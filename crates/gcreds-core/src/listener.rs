//! Loopback HTTP listener for the authorization redirect.
//!
//! One listener serves exactly one attempt: it owns a fresh ephemeral port,
//! accepts a single request, acknowledges it with a static page, and releases
//! the socket before the caller gets to validate anything.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::{Duration, Instant};

use crate::error::AuthError;
use crate::redirect::RedirectParams;
use crate::types::RedirectUri;

/// Acknowledgement page shown in the browser.
///
/// Sent for every redirect, before validation runs, so it makes no claim
/// about whether the sign-in actually succeeded.
const ACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sign-in response received</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
<div style="text-align: center;">
<h1>Sign-in response received</h1>
<p>You can close this window and return to the terminal.</p>
</div>
</body>
</html>"#;

/// Local listener for one authorization redirect.
pub struct RedirectListener {
    listener: TcpListener,
    port: u16,
}

impl RedirectListener {
    /// Bind a listener on a fresh loopback port.
    ///
    /// Port selection is two-step: ask the OS for a free port, release it,
    /// then bind the real listener to exactly that port. Another process can
    /// grab the port between the two binds; the window is narrow and a lost
    /// race surfaces as a bind error for this attempt.
    pub fn bind() -> Result<Self, AuthError> {
        let port = probe_free_port().map_err(AuthError::listener)?;
        let listener = TcpListener::bind(("127.0.0.1", port)).map_err(AuthError::listener)?;

        tracing::debug!(port, "redirect listener bound");

        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Redirect URI the provider should send the browser back to.
    pub fn redirect_uri(&self) -> RedirectUri {
        RedirectUri::loopback(self.port)
    }

    /// Wait for the redirect, acknowledge it, and release the port.
    ///
    /// `None` blocks until the browser comes back, however long that takes;
    /// `Some(limit)` polls and gives up with [`AuthError::RedirectTimeout`].
    /// Consumes the listener so the socket is closed on every exit path,
    /// before the caller validates the captured parameters.
    pub fn wait(self, timeout: Option<Duration>) -> Result<RedirectParams, AuthError> {
        let stream = match timeout {
            None => {
                let (stream, _addr) = self.listener.accept().map_err(AuthError::listener)?;
                stream
            }
            Some(limit) => self.accept_with_timeout(limit)?,
        };

        serve_redirect(stream)
    }

    /// Poll for a connection until `limit` elapses.
    fn accept_with_timeout(&self, limit: Duration) -> Result<TcpStream, AuthError> {
        self.listener
            .set_nonblocking(true)
            .map_err(AuthError::listener)?;

        let start = Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            match self.listener.accept() {
                Ok((stream, _addr)) => {
                    // Back to blocking for the read/write below
                    stream.set_nonblocking(false).ok();
                    return Ok(stream);
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if start.elapsed() >= limit {
                        tracing::debug!("gave up waiting for the authorization redirect");
                        return Err(AuthError::RedirectTimeout);
                    }
                    std::thread::sleep(poll_interval);
                }
                Err(e) => return Err(AuthError::listener(e)),
            }
        }
    }
}

/// Read the request, answer with the acknowledgement page, hand the query
/// parameters back.
fn serve_redirect(mut stream: TcpStream) -> Result<RedirectParams, AuthError> {
    stream.set_read_timeout(Some(Duration::from_secs(5))).ok();

    let mut buffer = [0u8; 4096];
    let n = stream.read(&mut buffer).map_err(AuthError::listener)?;
    let request = String::from_utf8_lossy(&buffer[..n]);

    let params = RedirectParams::from_request_target(request_target(&request));

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        ACK_PAGE.len(),
        ACK_PAGE
    );
    stream
        .write_all(response.as_bytes())
        .map_err(AuthError::listener)?;
    stream.flush().ok();

    tracing::debug!("redirect acknowledged, listener released");

    Ok(params)
}

/// Request target from the first request line, `/` when the request is not
/// HTTP-shaped (the empty query then reads as a malformed redirect).
fn request_target(request: &str) -> &str {
    request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
}

/// Ask the OS for a currently free loopback port.
///
/// The probe socket closes before the caller rebinds, so the port is not
/// reserved for us in between.
fn probe_free_port() -> std::io::Result<u16> {
    let probe = TcpListener::bind(("127.0.0.1", 0))?;
    let port = probe.local_addr()?.port();
    Ok(port)
}
