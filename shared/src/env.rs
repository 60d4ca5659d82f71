use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

// ENV が未設定、または解釈できない値の場合はビルドプロファイルから決める
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = Environment::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Environment::Production;

    env::var("ENV")
        .ok()
        .and_then(|v| parse(&v))
        .unwrap_or(default_env)
}

fn parse(value: &str) -> Option<Environment> {
    match value.to_ascii_lowercase().as_str() {
        "development" | "dev" => Some(Environment::Development),
        "production" | "prod" => Some(Environment::Production),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environment_names() {
        assert_eq!(parse("production"), Some(Environment::Production));
        assert_eq!(parse("Dev"), Some(Environment::Development));
        assert_eq!(parse("staging"), None);
    }
}
