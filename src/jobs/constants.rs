// src/jobs/constants.rs
//! Curated search keywords, priority company lists, and disqualifying
//! industry terms. All matching here is lowercase substring containment;
//! the lists are maintained in lowercase.

/// Default role keywords, focused on non-technical roles in the creator
/// economy. Overridable via a keyword file, see `config::load_keywords_default`.
pub const JOB_KEYWORDS: &[&str] = &[
    // Partnerships
    "partnerships manager",
    "partner manager",
    "partnership coordinator",
    "strategic partnerships",
    // Business development
    "business development",
    "bd manager",
    "growth manager",
    "business development manager",
    // Community
    "community manager",
    "community lead",
    "discord manager",
    "social media manager",
    "community coordinator",
    // Marketing
    "marketing manager",
    "content marketing",
    "brand manager",
    "influencer marketing",
    "marketing coordinator",
    "digital marketing",
    // Operations
    "operations manager",
    "project manager",
    "ops coordinator",
    "operations coordinator",
    "program manager",
    // Talent management & influencer relations
    "talent manager",
    "talent coordinator",
    "influencer manager",
    "creator manager",
    "creator relations",
    "talent relations",
    "artist manager",
    "roster manager",
    // Content strategy
    "content strategy",
    "content strategist",
    "content lead",
    "content director",
    "editorial strategy",
    "content operations",
    // YouTube & video
    "youtube manager",
    "channel manager",
    "video producer",
    "video operations",
    "youtube producer",
    "channel producer",
    "video content manager",
];

/// Big tech, media, and creator-economy companies to prioritize.
pub const PRIORITY_COMPANIES: &[&str] = &[
    // Big tech
    "google",
    "meta",
    "facebook",
    "microsoft",
    "apple",
    "amazon",
    "netflix",
    "spotify",
    "tiktok",
    "bytedance",
    "snap",
    "snapchat",
    "twitter",
    "x corp",
    "linkedin",
    "discord",
    "twitch",
    "youtube",
    // Gaming platforms
    "valve",
    "steam",
    "epic games",
    "roblox",
    "unity",
    // Creator economy platforms
    "patreon",
    "substack",
    "medium",
    "beehiiv",
    "convertkit",
    "kajabi",
    "thinkific",
    "teachable",
    "gumroad",
    "memberful",
    "ghost",
    // Talent management & creator networks
    "night media",
    "loaded",
    "maverick",
    "big frame",
    "studio71",
    "collab",
    "jellysmack",
    "spotter",
    "semaphore",
    "underscore talent",
    "viral nation",
    "amp studios",
    // Creator brands
    "mrbeast",
    "beast philanthropy",
    "feastables",
    "dude perfect",
    "mythical",
    "mythical entertainment",
    "good mythical morning",
    "smosh",
    "rooster teeth",
    "dropout",
    "collegehumor",
    "watcher",
    "watcher entertainment",
    "corridor",
    "corridor digital",
    "nebula",
    "curiosity stream",
    "veritasium",
    "linus media group",
    "linus tech tips",
    "offlinetv",
    "otv",
    "otk",
    "one true king",
    "optic gaming",
    "ghost gaming",
];

/// Reputable game studios to prioritize.
pub const PRIORITY_GAME_STUDIOS: &[&str] = &[
    // AAA
    "riot games",
    "blizzard",
    "activision",
    "bungie",
    "rockstar",
    "rockstar games",
    "ubisoft",
    "ea",
    "electronic arts",
    "nintendo",
    "sony",
    "playstation",
    "xbox",
    "bethesda",
    "respawn",
    "infinity ward",
    // Notable indies & mid-size
    "supergiant",
    "supergiant games",
    "coffee stain",
    "devolver",
    "annapurna",
    "team17",
    "innersloth",
    "among us",
    "mojang",
    "minecraft",
    "rare",
    "double fine",
    "obsidian",
    "insomniac",
    "naughty dog",
    "santa monica",
    // Esports orgs
    "faze",
    "faze clan",
    "100 thieves",
    "team liquid",
    "cloud9",
    "tsm",
    "g2 esports",
    "fnatic",
    "optic",
    "sentinels",
];

/// Industry terms that disqualify a listing regardless of source. Applied to
/// the concatenation of title, company, and description.
pub const EXCLUDED_INDUSTRY_TERMS: &[&str] = &[
    // Healthcare
    "hospital",
    "clinic",
    "nursing",
    "medical device",
    "pharmaceutical",
    "patient care",
    "healthcare",
    // Finance & insurance
    "investment bank",
    "wealth management",
    "insurance agency",
    "actuarial",
    "mortgage",
    "underwriting",
    // Construction & industrial
    "construction site",
    "general contractor",
    "hvac",
    "plumbing",
    "welding",
    "forklift",
    // Hospitality & food service
    "hotel",
    "restaurant",
    "hospitality",
    "catering",
    "housekeeping",
    "front desk",
];

/// True when the company matches the priority lists (case-insensitive
/// substring containment against either list).
pub fn is_priority_company(company: &str) -> bool {
    let normalized = company.trim().to_lowercase();
    PRIORITY_COMPANIES.iter().any(|c| normalized.contains(c))
        || PRIORITY_GAME_STUDIOS.iter().any(|s| normalized.contains(s))
}

/// Priority tier for a company. Everything outside the curated lists is
/// `Medium`; `Low` is reserved for future rules.
pub fn priority_for(company: &str) -> crate::jobs::types::Priority {
    if is_priority_company(company) {
        crate::jobs::types::Priority::High
    } else {
        crate::jobs::types::Priority::Medium
    }
}

/// True when any disqualifying industry term appears in the listing text.
pub fn is_excluded(title: &str, company: &str, description: &str) -> bool {
    let haystack = format!("{} {} {}", title, company, description).to_lowercase();
    EXCLUDED_INDUSTRY_TERMS.iter().any(|t| haystack.contains(t))
}
