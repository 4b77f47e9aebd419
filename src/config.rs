use std::env;

/// Application configuration, read once at startup.
///
/// The secret key and token lifetimes are passed into the token codec and
/// services at construction time instead of being read from the environment
/// at call sites, so tests can inject fixtures.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            secret_key: env::var("SECRET_KEY").expect("SECRET_KEY must be set"),
            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a number"),
            refresh_token_expire_minutes: env::var("REFRESH_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "10080".to_string())
                .parse()
                .expect("REFRESH_TOKEN_EXPIRE_MINUTES must be a number"),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("SECRET_KEY", "test-secret");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.access_token_expire_minutes, 30);
        assert_eq!(config.refresh_token_expire_minutes, 10080);

        env::set_var("SERVER_PORT", "3000");
        env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "15");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.access_token_expire_minutes, 15);
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");

        env::remove_var("SERVER_PORT");
        env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
    }
}
