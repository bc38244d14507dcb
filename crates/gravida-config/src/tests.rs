#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn defaults_give_a_runnable_local_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.port, 5432);
        assert!(config.database.max_connections > 0);
    }

    #[test]
    fn partial_toml_fills_the_rest_from_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9100

            [database]
            host = "db.internal"
            password = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, default_bind_host());
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.password, "s3cret");
        assert_eq!(config.database.dbname, default_db_name());
    }

    #[test]
    fn empty_toml_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.database.user, default_db_user());
    }
}
