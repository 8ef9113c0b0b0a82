use std::collections::BTreeMap;

use rand::seq::SliceRandom;

/// Desktop browser User-Agent strings rotated across requests.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Request headers with a randomly chosen User-Agent.
///
/// Meant for a network-backed fetcher; [`SyntheticFetcher`](crate::SyntheticFetcher)
/// sends nothing and does not call this.
pub fn rotate_headers() -> BTreeMap<String, String> {
    let user_agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    BTreeMap::from([
        ("User-Agent".to_string(), user_agent.to_string()),
        ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
    ])
}
