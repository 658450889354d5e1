use poem::middleware::Cors;

const DEFAULT_FRONTEND_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5000"];

/// Allow-list of browser origins permitted to call the API
#[derive(Debug, Clone, PartialEq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    /// Derive the allow-list
    ///
    /// An explicit frontend URL replaces the localhost defaults. A public
    /// host adds its :3000, :5000 and port-less http origins either way.
    pub fn from_settings(frontend_url: Option<&str>, public_host: Option<&str>) -> Self {
        let mut allowed_origins: Vec<String> = match frontend_url {
            Some(url) => vec![url.to_string()],
            None => DEFAULT_FRONTEND_ORIGINS.iter().map(|origin| origin.to_string()).collect(),
        };

        if let Some(host) = public_host {
            allowed_origins.push(format!("http://{}:3000", host));
            allowed_origins.push(format!("http://{}:5000", host));
            allowed_origins.push(format!("http://{}", host));
        }

        Self { allowed_origins }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Requests without an Origin header (curl, server-to-server) are allowed
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed_origins.iter().any(|allowed| allowed == origin),
        }
    }

    /// Build the poem CORS middleware for this policy, with credentials allowed
    pub fn middleware(&self) -> Cors {
        self.allowed_origins
            .iter()
            .fold(Cors::new().allow_credentials(true), |cors, origin| {
                cors.allow_origin(origin.as_str())
            })
    }
}
