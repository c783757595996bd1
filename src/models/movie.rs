//! Movie listing record

use serde::{Deserialize, Serialize};

/// A popular movie in the caller's region
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieSummary {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: u64,
    /// Full poster URL, `None` when the movie has no poster
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: String,
}

/// Join the image host prefix and a poster path (`/abc.jpg`)
#[must_use]
pub fn poster_url(image_base: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{}{}", image_base.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500", Some("/kqjL17yufvn9OVLyXYpvtyrFfak.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/kqjL17yufvn9OVLyXYpvtyrFfak.jpg")
        );
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", Some("/a.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/a.jpg")
        );
        assert!(poster_url("https://image.tmdb.org/t/p/w500", None).is_none());
    }
}
