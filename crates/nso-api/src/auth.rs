use secrecy::SecretString;

/// Connection parameters for a single NSO instance.
///
/// Set once when the client is built and never mutated afterwards. The
/// password is kept behind [`SecretString`] so it never shows up in
/// `Debug` output or logs; it is only exposed when the Basic-Auth header
/// is attached to a request.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

impl ConnectionParams {
    pub fn new(
        hostname: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            username: username.into(),
            password,
        }
    }

    /// The RESTCONF root: `http://{hostname}:{port}/restconf`.
    ///
    /// Built by plain formatting so the result is byte-for-byte what the
    /// caller supplied (no default-port elision, no normalization).
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/restconf", self.hostname, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(host: &str, port: u16) -> ConnectionParams {
        ConnectionParams::new(host, port, "admin", SecretString::from("admin"))
    }

    #[test]
    fn base_url_is_exact() {
        assert_eq!(
            params("127.0.0.1", 8080).base_url(),
            "http://127.0.0.1:8080/restconf"
        );
        assert_eq!(
            params("nso.lab.example", 80).base_url(),
            "http://nso.lab.example:80/restconf"
        );
    }

    #[test]
    fn debug_redacts_password() {
        let p = ConnectionParams::new("h", 1, "admin", SecretString::from("hunter2"));
        let rendered = format!("{p:?}");
        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
    }
}
