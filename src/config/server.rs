//! HTTP server bind configuration.

use std::{env, path::Path};

/// Configuration for the HTTP listener
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// `BIND_ADDRESS` always wins. Otherwise the server listens on all
    /// interfaces when it detects a container and on localhost when it does not.
    pub fn from_env() -> Self {
        let bind_override = env::var("BIND_ADDRESS").ok();
        let in_container = is_container_environment(
            env::var("KUBERNETES_SERVICE_HOST").ok().as_deref(),
            env::var("DOCKER_CONTAINER").ok().as_deref(),
            Path::new("/.dockerenv").exists(),
        );

        Self {
            bind_address: detect_bind_address(in_container, bind_override.as_deref()),
        }
    }
}

/// Whether the process looks like it is running inside Kubernetes or Docker
pub fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}

/// Pick the listen address from an explicit override or the container flag
pub fn detect_bind_address(in_container: bool, bind_override: Option<&str>) -> String {
    match bind_override {
        Some(bind) if !bind.trim().is_empty() => bind.trim().to_string(),
        _ if in_container => "0.0.0.0:8080".to_string(),
        _ => "127.0.0.1:8080".to_string(),
    }
}
