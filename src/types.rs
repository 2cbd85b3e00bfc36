//! Typed payloads for the Fortnite API endpoints.
//!
//! These mirror the `data` field of the upstream responses, kept lenient:
//! fields the library does not rely on are defaulted rather than rejected,
//! so upstream additions never break decoding. Unknown shapes can always be
//! handled via [`StatsClient::get`](crate::StatsClient::get), which returns
//! raw [`serde_json::Value`].

use serde::{Deserialize, Serialize};

// =========================================================================
// Player stats (`/v2/stats/br/v2`)
// =========================================================================

/// Battle royale stats for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub account: Account,
    #[serde(default)]
    pub battle_pass: Option<BattlePass>,
    /// Avatar image URL, when the upstream has one.
    #[serde(default)]
    pub image: Option<String>,
    pub stats: StatsByInput,
}

/// Account identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub id: String,
}

/// Battle pass progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattlePass {
    pub level: u32,
    #[serde(default)]
    pub progress: u32,
}

/// Stats grouped by input method; only the `all` aggregate is modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsByInput {
    pub all: StatsModes,
}

/// Stats grouped by game mode; only the `overall` aggregate is modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsModes {
    pub overall: OverallStats,
}

/// The overall aggregate every consumer reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub wins: u64,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub kills: u64,
    #[serde(default)]
    pub kd: f64,
    #[serde(default)]
    pub matches: u64,
    #[serde(default)]
    pub deaths: u64,
}

// =========================================================================
// Item shop (`/v2/shop`)
// =========================================================================

/// The current item shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub date: String,
    #[serde(default)]
    pub vbuck_icon: Option<String>,
    #[serde(default)]
    pub entries: Vec<ShopEntry>,
}

/// One shop offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopEntry {
    pub offer_id: String,
    #[serde(default)]
    pub dev_name: String,
    pub regular_price: u32,
    pub final_price: u32,
    #[serde(default)]
    pub layout: Option<ShopLayout>,
    #[serde(default)]
    pub bundle: Option<ShopBundle>,
    #[serde(default)]
    pub banner: Option<ShopBanner>,
    #[serde(default)]
    pub br_items: Option<Vec<BrItem>>,
}

/// Shop section placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopLayout {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
}

/// Bundle metadata for multi-item offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopBundle {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Promotional banner on an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopBanner {
    pub value: String,
}

/// A battle royale cosmetic inside an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rarity: Option<DisplayValue>,
    #[serde(rename = "type", default)]
    pub item_type: Option<DisplayValue>,
    #[serde(default)]
    pub images: ItemImages,
}

/// `{ value, displayValue }` pairs used for rarity and item type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayValue {
    pub value: String,
    #[serde(default)]
    pub display_value: Option<String>,
}

/// Cosmetic image variants, best-first: featured, icon, small icon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemImages {
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub small_icon: Option<String>,
}

// =========================================================================
// News (`/v2/news`)
// =========================================================================

/// News for both game modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub br: Option<BrNews>,
    #[serde(default)]
    pub stw: Option<StwNews>,
}

/// Battle royale news feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrNews {
    pub date: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub motds: Vec<NewsMotd>,
}

/// A battle royale message of the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsMotd {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sorting_priority: i64,
}

/// Save the World news feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StwNews {
    pub date: String,
    #[serde(default)]
    pub messages: Vec<StwMessage>,
}

/// A Save the World news message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StwMessage {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
}

// =========================================================================
// Map (`/v1/map`)
// =========================================================================

/// The current battle royale map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub images: MapImages,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

/// Map image URLs, with and without POI labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapImages {
    #[serde(default)]
    pub blank: Option<String>,
    pub pois: String,
}

/// A named point of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub location: Location,
}

/// World-space coordinates for a POI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}
