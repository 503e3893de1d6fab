//! Cache Key Helpers
//!
//! Canonical key builders so callers share keys per resource and different
//! resource kinds never collide.

/// First page of the public card listing, unfiltered.
pub const CARDS: &str = "cards";
/// Cards owned by the signed-in user.
pub const USER_CARDS: &str = "user-cards";
/// Trade listing.
pub const TRADES: &str = "trades";
/// Signed-in user's profile.
pub const USER_PROFILE: &str = "user-profile";

/// Single card by id.
pub fn card_detail(id: &str) -> String {
    format!("card-{id}")
}

/// Single trade by id.
pub fn trade_detail(id: &str) -> String {
    format!("trade-{id}")
}

/// One page of the card listing, keyed like the listing query.
///
/// An empty search term is the same listing as no search term.
pub fn cards_page(page: u32, rpp: u32, search: Option<&str>) -> String {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => format!("{CARDS}?page={page}&rpp={rpp}&search={term}"),
        None => format!("{CARDS}?page={page}&rpp={rpp}"),
    }
}

/// One page of the trade listing.
pub fn trades_page(page: u32, rpp: u32) -> String {
    format!("{TRADES}?page={page}&rpp={rpp}")
}
