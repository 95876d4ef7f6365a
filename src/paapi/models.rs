//! PA-API v5 `GetItems` request and response models.

use serde::{Deserialize, Serialize};

/// Resources requested for every book lookup.
pub const BOOK_RESOURCES: &[&str] = &[
    "Images.Primary.Medium",
    "ItemInfo.ByLineInfo",
    "ItemInfo.Classifications",
    "ItemInfo.ContentInfo",
    "ItemInfo.ProductInfo",
    "ItemInfo.Title",
];

/// `GetItems` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest<'a> {
    pub item_ids: Vec<&'a str>,
    pub item_id_type: &'static str,
    pub marketplace: String,
    pub partner_tag: &'a str,
    pub partner_type: &'static str,
    pub resources: &'static [&'static str],
}

impl<'a> GetItemsRequest<'a> {
    /// Builds a single-ASIN request for the book resources.
    pub fn book(asin: &'a str, marketplace: String, partner_tag: &'a str) -> Self {
        Self {
            item_ids: vec![asin],
            item_id_type: "ASIN",
            marketplace,
            partner_tag,
            partner_type: "Associates",
            resources: BOOK_RESOURCES,
        }
    }
}

/// `GetItems` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    #[serde(default)]
    pub items_result: Option<ItemsResult>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Error entry reported by PA-API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "DetailPageURL", default)]
    pub detail_page_url: Option<String>,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub item_info: Option<ItemInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Images {
    #[serde(default)]
    pub primary: Option<ImageSizes>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageSizes {
    #[serde(default)]
    pub large: Option<ImageType>,
    #[serde(default)]
    pub medium: Option<ImageType>,
    #[serde(default)]
    pub small: Option<ImageType>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageType {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemInfo {
    #[serde(default)]
    pub title: Option<DisplayValue>,
    #[serde(default)]
    pub by_line_info: Option<ByLineInfo>,
    #[serde(default)]
    pub classifications: Option<Classifications>,
    #[serde(default)]
    pub content_info: Option<ContentInfo>,
    #[serde(default)]
    pub product_info: Option<ProductInfo>,
}

/// The `{"DisplayValue": ...}` wrapper used throughout PA-API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayValue {
    pub display_value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ByLineInfo {
    #[serde(default)]
    pub brand: Option<DisplayValue>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default)]
    pub manufacturer: Option<DisplayValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contributor {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub role_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Classifications {
    #[serde(default)]
    pub binding: Option<DisplayValue>,
    #[serde(default)]
    pub product_group: Option<DisplayValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentInfo {
    #[serde(default)]
    pub publication_date: Option<DisplayValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInfo {
    #[serde(default)]
    pub release_date: Option<DisplayValue>,
}
