//! Session cookie handling

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    /// Set the Secure flag (HTTPS only)
    pub secure: bool,
}

impl CookieSettings {
    /// HttpOnly cookie carrying a session token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(self.name.clone(), token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .finish()
    }

    /// Expired cookie that clears the session cookie in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }

    /// Session token sent with a request, if any
    pub fn token(&self, req: &HttpRequest) -> Option<String> {
        req.cookie(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
}
