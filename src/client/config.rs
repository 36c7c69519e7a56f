/// Environment variable that points the client at a deployed backend
pub const API_URL_ENV: &str = "READSTACK_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Resolves the backend base URL from the environment, falling back to the
/// local development default.
pub fn api_base_url() -> String {
    resolve(std::env::var(API_URL_ENV).ok())
}

fn resolve(configured: Option<String>) -> String {
    match configured {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_url_wins() {
        assert_eq!(
            resolve(Some("https://api.example.com/api".to_string())),
            "https://api.example.com/api"
        );
    }

    #[test]
    fn test_missing_falls_back_to_localhost() {
        assert_eq!(resolve(None), "http://localhost:5000/api");
    }

    #[test]
    fn test_empty_falls_back_to_localhost() {
        assert_eq!(resolve(Some(String::new())), "http://localhost:5000/api");
    }
}
