//! Post sign-in redirect targets
//!
//! Every callback branch ends at one of four destinations, rendered against
//! the site origin and the visitor's locale.

use hub_common::SiteConfig;

/// Locales the site serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Ko,
    En,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::Ko, Self::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    /// Parse a locale tag, ignoring case
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(tag.trim()))
    }
}

/// Where a callback sends the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    AuthError,
    Onboarding,
    AdminHome,
    /// A sanitized site-relative path
    Next(String),
}

/// Builds absolute redirect URLs for the public site
#[derive(Debug, Clone)]
pub struct SiteRoutes {
    origin: String,
    default_locale: Locale,
    default_next_path: String,
}

pub const FALLBACK_NEXT_PATH: &str = "/support-programs";

impl SiteRoutes {
    pub fn new(
        origin: impl Into<String>,
        default_locale: &str,
        default_next_path: impl Into<String>,
    ) -> Self {
        let default_next_path = default_next_path.into();
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            default_locale: Locale::parse(default_locale).unwrap_or(Locale::Ko),
            default_next_path: if is_site_relative(&default_next_path) {
                default_next_path
            } else {
                FALLBACK_NEXT_PATH.to_string()
            },
        }
    }

    pub fn from_config(site: &SiteConfig) -> Self {
        Self::new(&site.url, &site.default_locale, &site.default_next_path)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn default_next_path(&self) -> &str {
        &self.default_next_path
    }

    /// Locale from the cookie hint, else the configured default
    pub fn resolve_locale(&self, hint: Option<&str>) -> Locale {
        hint.and_then(Locale::parse).unwrap_or(self.default_locale)
    }

    /// Keep `next` only when it is a path on this site
    pub fn sanitize_next(&self, next: Option<&str>) -> String {
        match next.map(str::trim) {
            Some(path) if is_site_relative(path) => path.to_string(),
            _ => self.default_next_path.clone(),
        }
    }

    pub fn url_for(&self, locale: Locale, destination: &Destination) -> String {
        let origin = &self.origin;
        let locale = locale.as_str();
        match destination {
            Destination::AuthError => format!("{origin}/{locale}?auth_error=true"),
            Destination::Onboarding => format!("{origin}/{locale}/signup/onboarding"),
            Destination::AdminHome => format!("{origin}/{locale}/admin"),
            Destination::Next(path) if has_locale_prefix(path) => format!("{origin}{path}"),
            Destination::Next(path) => format!("{origin}/{locale}{path}"),
        }
    }
}

fn is_site_relative(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

fn has_locale_prefix(path: &str) -> bool {
    path.split('/')
        .nth(1)
        .is_some_and(|segment| Locale::ALL.iter().any(|l| l.as_str() == segment))
}
