use std::sync::LazyLock;

/// `Site` values used by internet playing platforms in archive PGNs.
const INTERNET_SITES: [&str; 15] = [
    "chess.com INT",
    "chess24.com INT",
    "lichess.org INT",
    "AuNix INT",
    "Chess Supersite INT",
    "Europe-Chess INT",
    "Europe-Echecs INT",
    "ICC INT",
    "ICCF INT",
    "PlayChess INT",
    "Playchess.com INT",
    "Premium Chess Arena INT",
    "Tornelo INT",
    "chessdom.com INT",
    "playchess.com INT",
];

/// Read-only set of internet site identifiers, held lowercased both as the
/// bare `Site` value and in the `[Site "..."]` tag form.
pub struct SiteAllowlist {
    names: Vec<String>,
    tags: Vec<String>,
}

static ALLOWLIST: LazyLock<SiteAllowlist> = LazyLock::new(|| SiteAllowlist::new(&INTERNET_SITES));

impl SiteAllowlist {
    fn new(sites: &[&str]) -> Self {
        let mut names: Vec<String> = sites.iter().map(|s| s.to_lowercase()).collect();
        // "Playchess.com INT" and "playchess.com INT" collapse once lowercased.
        names.sort();
        names.dedup();
        let tags = names.iter().map(|n| format!("[site \"{n}\"]")).collect();
        Self { names, tags }
    }

    pub fn global() -> &'static SiteAllowlist {
        &ALLOWLIST
    }

    /// True when `text` contains any allowlisted `[Site "..."]` tag,
    /// ignoring case.
    pub fn matches_text(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.tags.iter().any(|tag| lowered.contains(tag.as_str()))
    }

    /// True when `site` is exactly an allowlisted site value, ignoring case.
    pub fn contains_site(&self, site: &str) -> bool {
        let lowered = site.to_lowercase();
        self.names.iter().any(|name| *name == lowered)
    }
}
