use crate::config::SecurityConfig;

pub const AUTH_COOKIE: &str = "auth_token";

/// `Set-Cookie` value carrying a freshly issued token
pub fn session_cookie(token: &str, security: &SecurityConfig) -> String {
    let max_age = security.session_hours().saturating_mul(3600);
    let mut cookie = format!("{AUTH_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie immediately
pub fn clear_cookie(security: &SecurityConfig) -> String {
    let mut cookie = format!("{AUTH_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull the session token out of a `Cookie` request header
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn session_cookie_lasts_seven_days() {
        let security = AppConfig::development().security;
        assert_eq!(
            session_cookie("abc", &security),
            "auth_token=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800"
        );
    }

    #[test]
    fn huge_expiry_caps_max_age() {
        let mut security = AppConfig::development().security;
        security.jwt_expiry_hours = 10_000_000_000_000_000;
        assert!(session_cookie("abc", &security).ends_with("Max-Age=31536000"));
    }

    #[test]
    fn secure_flag_follows_config() {
        let mut security = AppConfig::development().security;
        security.cookie_secure = true;
        assert!(session_cookie("abc", &security).ends_with("; Secure"));
        assert!(clear_cookie(&security).contains("Max-Age=0"));
    }

    #[test]
    fn finds_token_among_other_cookies() {
        assert_eq!(token_from_cookie_header("theme=dark; auth_token=xyz; lang=en"), Some("xyz"));
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("auth_token="), None);
    }
}
