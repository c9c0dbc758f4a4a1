//! Deterministic placeholder images for generated people.
//!
//! A seed string (usually a name) hashes to a small numeric id, and the id
//! picks an image from a seeded image service. Same seed, same URL.

/// Default image service.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://picsum.photos";

/// Number of distinct image ids handed out.
pub const IMAGE_ID_RANGE: u32 = 1000;

/// Polynomial rolling hash over UTF-16 code units, folded to `i32`.
pub fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Image id for `seed`, in `0..IMAGE_ID_RANGE`.
pub fn image_id(seed: &str) -> u32 {
    // Widen first so i32::MIN has an absolute value
    (i64::from(seed_hash(seed)).abs() % i64::from(IMAGE_ID_RANGE)) as u32
}

/// Image URL on the default service.
pub fn derive_image_url(seed: &str, width: u32, height: u32) -> String {
    ImageService::default().url(seed, width, height)
}

/// A seeded image service.
#[derive(Debug, Clone)]
pub struct ImageService {
    base_url: String,
}

impl ImageService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, seed: &str, width: u32, height: u32) -> String {
        format!("{}/seed/{}/{}/{}", self.base_url, image_id(seed), width, height)
    }
}

impl Default for ImageService {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}
