use crate::ImageResult;

const REJECTED_TITLE_WORDS: [&str; 2] = ["logo", "icon"];

/// Picks the first result that looks like a photograph: no SVGs, nothing
/// titled as a logo or an icon.
pub fn select_image(images: &[ImageResult]) -> Option<&ImageResult> {
    images.iter().find(|image| is_photo(image))
}

fn is_photo(image: &ImageResult) -> bool {
    let url = image.url.to_lowercase();
    let title = image.title.to_lowercase();
    !url.ends_with(".svg") && !REJECTED_TITLE_WORDS.iter().any(|word| title.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(title: &str, url: &str) -> ImageResult {
        ImageResult {
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn skips_svgs_logos_and_icons() {
        let images = vec![
            image("File:NASA logo.png", "https://upload.wikimedia.org/nasa.png"),
            image("File:Flag.SVG", "https://upload.wikimedia.org/Flag.SVG"),
            image("File:Rocket ICON.jpg", "https://upload.wikimedia.org/icon.jpg"),
            image("File:Apollo 11 Launch.jpg", "https://upload.wikimedia.org/a11.jpg"),
            image("File:Later.jpg", "https://upload.wikimedia.org/later.jpg"),
        ];
        assert_eq!(
            select_image(&images).map(|i| i.title.as_str()),
            Some("File:Apollo 11 Launch.jpg")
        );
    }

    #[test]
    fn nothing_usable_is_none() {
        assert_eq!(select_image(&[]), None);
        let images = vec![image("Emblem", "https://example.org/emblem.svg")];
        assert_eq!(select_image(&images), None);
    }
}
