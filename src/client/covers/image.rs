/// Normalizes a cover-image URL before display.
///
/// Transport is upgraded to https. Google-hosted images additionally get
/// their cropping parameters stripped: `&edge=curl` overlays a page-curl
/// effect and `&zoom=1` crops the scan, neither of which we want on a card.
pub fn secure_image_url(url: &str) -> String {
    let secured = url.replacen("http://", "https://", 1);
    if secured.contains("google") {
        secured
            .replace("&edge=curl", "")
            .replace("&zoom=1", "&zoom=0")
    } else {
        secured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrades_transport() {
        assert_eq!(
            secure_image_url("http://example.com/cover.jpg"),
            "https://example.com/cover.jpg"
        );
    }

    #[test]
    fn test_strips_google_cropping_params() {
        let url = "http://books.google.com/books/content?id=x&printsec=frontcover&img=1&zoom=1&edge=curl";
        assert_eq!(
            secure_image_url(url),
            "https://books.google.com/books/content?id=x&printsec=frontcover&img=1&zoom=0"
        );
    }

    #[test]
    fn test_leaves_non_google_params_alone() {
        let url = "https://cdn.example.com/cover.jpg?size=large&zoom=1";
        assert_eq!(secure_image_url(url), url);
    }

    #[test]
    fn test_already_https_unchanged() {
        assert_eq!(
            secure_image_url("https://example.com/cover.jpg"),
            "https://example.com/cover.jpg"
        );
    }
}
