use crate::{
    document::Exhibit,
    rules::{MAX_TEXT_LENGTH, RuleViolation, non_blank},
};

/// Accepted image file name endings, lower case.
const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];

pub fn media(exhibit: &Exhibit) -> Result<(), RuleViolation> {
    let Some(media) = exhibit.media.as_ref() else {
        return Ok(());
    };

    let primary = media.images.iter().filter(|image| image.is_primary()).count();
    if primary > 1 {
        return Err(RuleViolation::PrimaryImages(primary));
    }

    for image in &media.images {
        let file_name = non_blank(image.file_name).ok_or(RuleViolation::MissingField {
            section: "Image",
            field: "FileName",
        })?;
        if !has_image_extension(file_name) {
            return Err(RuleViolation::ImageExtension(file_name.to_string()));
        }
        let length = file_name.chars().count();
        if length > MAX_TEXT_LENGTH {
            return Err(RuleViolation::TooLong {
                field: "FileName",
                length,
            });
        }
    }
    Ok(())
}

fn has_image_extension(file_name: &str) -> bool {
    let file_name = file_name.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|extension| file_name.ends_with(extension))
}
