//! services/api/src/adapters/cdn.rs
//!
//! Image CDN integration. Gallery images are uploaded straight from the
//! admin browser to the CDN's unsigned upload endpoint (file + upload
//! preset); the API only hands out the endpoint details and stores the
//! returned secure URL + public id as gallery metadata. Delivery URLs are
//! built with path-based transform tokens.

/// Upload endpoint details handed to the admin UI.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    pub upload_preset: String,
}

#[derive(Clone)]
pub struct CdnAdapter {
    cloud_name: String,
    upload_preset: String,
}

impl CdnAdapter {
    pub fn new(cloud_name: String, upload_preset: String) -> Self {
        Self {
            cloud_name,
            upload_preset,
        }
    }

    pub fn upload_target(&self) -> UploadTarget {
        UploadTarget {
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            ),
            upload_preset: self.upload_preset.clone(),
        }
    }

    /// Builds a delivery URL with automatic format/quality negotiation and
    /// an optional fill-crop resize.
    pub fn delivery_url(&self, public_id: &str, size: Option<(u32, u32)>) -> String {
        let transform = match size {
            Some((w, h)) => format!("f_auto,q_auto,c_fill,w_{},h_{}", w, h),
            None => "f_auto,q_auto".to_string(),
        };
        format!(
            "https://res.cloudinary.com/{}/image/upload/{}/{}",
            self.cloud_name, transform, public_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> CdnAdapter {
        CdnAdapter::new("kalanjali".to_string(), "gallery_unsigned".to_string())
    }

    #[test]
    fn upload_target_points_at_the_unsigned_endpoint() {
        let target = adapter().upload_target();
        assert_eq!(
            target.upload_url,
            "https://api.cloudinary.com/v1_1/kalanjali/image/upload"
        );
        assert_eq!(target.upload_preset, "gallery_unsigned");
    }

    #[test]
    fn delivery_url_negotiates_format_and_quality() {
        assert_eq!(
            adapter().delivery_url("site/hero-stage", None),
            "https://res.cloudinary.com/kalanjali/image/upload/f_auto,q_auto/site/hero-stage"
        );
    }

    #[test]
    fn delivery_url_adds_fill_crop_tokens_when_sized() {
        assert_eq!(
            adapter().delivery_url("gallery/arangetram-2025", Some((800, 600))),
            "https://res.cloudinary.com/kalanjali/image/upload/f_auto,q_auto,c_fill,w_800,h_600/gallery/arangetram-2025"
        );
    }
}
