//! Typed multipart bodies for the create, update, and upload endpoints.

use axum::extract::Multipart;
use sitenav_catalog::{NewWebsite, WebsiteUpdate};

use crate::error::{ApiError, ApiResult};
use crate::uploads::UploadedFile;

/// Name of the multipart field carrying an image file.
pub const IMAGE_FIELD: &str = "image";

/// Text fields and the optional image from a website form.
#[derive(Clone, Debug, Default)]
pub struct WebsiteForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub intranet: Option<String>,
    pub ipv6: Option<String>,
    pub frp: Option<String>,
    pub easytier: Option<String>,
    pub image: Option<UploadedFile>,
}

impl WebsiteForm {
    /// Read every field of `multipart`. Unknown fields are ignored, and an
    /// image part without a filename counts as no image.
    pub async fn from_multipart(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(bad_body)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let data = field.bytes().await.map_err(bad_body)?;
                if !file_name.is_empty() {
                    form.image = Some(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        data,
                    });
                }
                continue;
            }

            let slot = match name.as_str() {
                "name" => &mut form.name,
                "description" => &mut form.description,
                "intranet" => &mut form.intranet,
                "ipv6" => &mut form.ipv6,
                "frp" => &mut form.frp,
                "easytier" => &mut form.easytier,
                _ => continue,
            };
            *slot = Some(field.text().await.map_err(bad_body)?);
        }
        Ok(form)
    }

    /// Creation request; `image` is the stored filename, if any.
    pub fn into_new_website(self, image: Option<String>) -> NewWebsite {
        NewWebsite {
            name: self.name.unwrap_or_default(),
            description: self.description,
            image,
            intranet: self.intranet,
            ipv6: self.ipv6,
            frp: self.frp,
            easytier: self.easytier,
        }
    }

    pub fn into_update(self, image: Option<String>) -> WebsiteUpdate {
        WebsiteUpdate {
            name: self.name,
            description: self.description,
            image,
            intranet: self.intranet,
            ipv6: self.ipv6,
            frp: self.frp,
            easytier: self.easytier,
        }
    }
}

fn bad_body(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("invalid form data: {err}"))
}
