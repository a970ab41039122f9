use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRef {
    BuiltIn { slug: String },
    External { url: String },
}

impl ImageRef {
    pub fn source(&self) -> &str {
        match self {
            ImageRef::BuiltIn { slug } => slug,
            ImageRef::External { url } => url,
        }
    }
}

pub fn validate_image_ref(image_ref: &ImageRef) -> Result<(), String> {
    match image_ref {
        ImageRef::BuiltIn { slug } => {
            if slug.trim().is_empty() {
                return Err("missing image slug".to_string());
            }
            Ok(())
        }
        ImageRef::External { url } => {
            if url.trim().is_empty() {
                return Err("missing image url".to_string());
            }
            Ok(())
        }
    }
}
