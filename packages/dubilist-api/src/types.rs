//! Wire types for the Dubilist REST API.
//!
//! Field names follow the backend's camelCase JSON. Optional fields are
//! omitted from request bodies entirely rather than sent as nulls, so a
//! category payload never carries keys from another category's schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric id of a listing row.
pub type ListingId = i64;

/// Numeric id of a category (main or sub).
pub type CategoryId = i64;

// ============================================================================
// Response envelope
// ============================================================================

/// Wrapper shared by every Dubilist endpoint:
/// `{ success, data?, message?, error? }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Error payload of a `success: false` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    /// Best error message the envelope carries, for surfacing failures.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request failed".to_string())
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// A marketplace user. The backend's id is an opaque string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login/register response: the user plus their bearer credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub tokens: Tokens,
}

// ============================================================================
// Listing creation
// ============================================================================

/// Flat create-listing body. The category-specific section is flattened in,
/// so the wire shape matches the backend's single-object contract while the
/// type system keeps each category's keys out of the others' payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub currency: String,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub country: String,
    #[serde(flatten)]
    pub attributes: ListingAttributes,
}

/// Category-specific create-body section. Untagged: serialization inlines the
/// variant's fields next to the common ones.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ListingAttributes {
    Motors(MotorsAttributes),
    Electronics(ElectronicsAttributes),
    Property(PropertyAttributes),
    /// Classifieds and furniture share a wire shape; `categoryId` tells them apart.
    Goods(GoodsAttributes),
    Jobs(JobsAttributes),
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorsAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometres: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectronicsAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    /// Device type ("Mobiles", "Laptops", ...); the backend's key predates
    /// the two-level taxonomy.
    #[serde(rename = "subCategory", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_type: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<String>,
    #[serde(rename = "attributes", skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub attributes: GoodsDetailsBody,
}

/// Nested `attributes` object of a classifieds/furniture body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsDetailsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// `"LxWxH"` in centimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    /// One skill per entry; composed from newline-separated form input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills_required: Vec<String>,
    /// One responsibility per entry; composed from newline-separated form input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_website: Option<String>,
}

// ============================================================================
// Listing responses
// ============================================================================

/// Minimal create response; only the id is contractually present.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedListing {
    pub id: ListingId,
}

/// A listing as returned by the read endpoints. The backend decorates rows
/// differently per category, so everything beyond the identity is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    pub id: ListingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_sold: Option<bool>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One image row attached to a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingImage {
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub order_index: Option<u32>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// Query string for `GET /listings`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Generic `PUT /listings/{id}` body; all fields optional, absent keys are
/// left untouched server-side. The submit pipeline uses it once per jobs
/// listing to attach the uploaded logo URL.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

// ============================================================================
// Media upload / attach
// ============================================================================

/// Result of `POST /upload/image`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadData {
    pub url: String,
    pub key: String,
}

/// Body of `POST /listings/{id}/images`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachImageRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub order_index: u32,
    pub is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_flattens_attributes() {
        let req = CreateListingRequest {
            title: "Dining table".into(),
            description: None,
            price: Some(450.0),
            currency: "AED".into(),
            category_id: 50,
            city: Some("Dubai".into()),
            country: "UAE".into(),
            attributes: ListingAttributes::Goods(GoodsAttributes {
                condition: Some("Used".into()),
                attributes: GoodsDetailsBody {
                    material: Some("Oak".into()),
                    dimensions: Some("180x90x75".into()),
                    weight: None,
                },
            }),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["title"], "Dining table");
        assert_eq!(value["categoryId"], 50);
        assert_eq!(value["condition"], "Used");
        assert_eq!(value["attributes"]["material"], "Oak");
        // Keys from other categories must not leak in.
        assert!(value.get("skillsRequired").is_none());
        assert!(value.get("bedrooms").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_attach_request_wire_names() {
        let req = AttachImageRequest {
            url: "https://cdn.example/img.webp".into(),
            key: Some("listings/abc".into()),
            order_index: 2,
            is_primary: false,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["orderIndex"], 2);
        assert_eq!(value["isPrimary"], false);
        assert_eq!(value["key"], "listings/abc");
    }

    #[test]
    fn test_envelope_error_message_fallbacks() {
        let json = r#"{ "success": false, "error": { "message": "title required" } }"#;
        let env: ApiEnvelope<CreatedListing> = serde_json::from_str(json).unwrap();
        assert!(!env.success);
        assert_eq!(env.error_message(), "title required");

        let json = r#"{ "success": false, "message": "bad request" }"#;
        let env: ApiEnvelope<CreatedListing> = serde_json::from_str(json).unwrap();
        assert_eq!(env.error_message(), "bad request");
    }

    #[test]
    fn test_listing_data_tolerates_sparse_rows() {
        let json = r#"{ "id": 7, "title": "iPhone 13" }"#;
        let listing: ListingData = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, 7);
        assert_eq!(listing.title, "iPhone 13");
        assert!(listing.images.is_empty());
        assert!(listing.price.is_none());
    }
}
