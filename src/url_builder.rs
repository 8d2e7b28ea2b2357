use crate::{
    encoder::encode,
    errors::SelectorError,
    models::{ArtifactReference, FileExtension},
};

pub const DEFAULT_RENDERER_URL: &str = "https://api.memegen.link";

/// Composes image URLs on the memegen renderer. No network access.
#[derive(Debug, Clone)]
pub struct ArtifactUrlBuilder {
    renderer_base: String,
}

impl ArtifactUrlBuilder {
    pub fn new(renderer_base: &str) -> Self {
        Self {
            renderer_base: renderer_base.trim_end_matches('/').to_string(),
        }
    }

    /// Builds `<base>/images/<id>/<top>/<bottom>.<ext>` from a `<id>.<ext>` selector.
    /// Both texts are raw user input and are encoded here.
    pub fn build_artifact_url(
        &self,
        template_selector: &str,
        top_text: &str,
        bottom_text: &str,
    ) -> Result<ArtifactReference, SelectorError> {
        let (id, ext) = split_selector(template_selector)?;
        let url = format!(
            "{}/images/{}/{}/{}.{}",
            self.renderer_base,
            id,
            encode(top_text),
            encode(bottom_text),
            ext
        );
        Ok(ArtifactReference {
            url,
            file_extension: ext,
            content_type: ext.content_type(),
        })
    }
}

impl Default for ArtifactUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_RENDERER_URL)
    }
}

fn split_selector(selector: &str) -> Result<(&str, FileExtension), SelectorError> {
    let invalid = || SelectorError::InvalidTemplateSelector(selector.to_string());
    let (id, ext) = selector.rsplit_once('.').ok_or_else(invalid)?;
    if id.is_empty() {
        return Err(invalid());
    }
    let ext = FileExtension::parse(ext).ok_or_else(invalid)?;
    Ok((id, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_encoded_url() {
        let artifact = ArtifactUrlBuilder::default()
            .build_artifact_url("drake.jpg", "Hello World", "50%")
            .unwrap();
        assert_eq!(artifact.url, "https://api.memegen.link/images/drake/Hello_World/50~p.jpg");
        assert_eq!(artifact.file_extension, FileExtension::Jpg);
    }

    #[test]
    fn keeps_gif_extension_and_empty_segments() {
        let artifact = ArtifactUrlBuilder::new("http://localhost:5000/")
            .build_artifact_url("party.gif", "", "x")
            .unwrap();
        assert_eq!(artifact.url, "http://localhost:5000/images/party//x.gif");
        assert_eq!(artifact.content_type, "image/gif");
    }

    #[test]
    fn rejects_selector_without_dot() {
        let err = ArtifactUrlBuilder::default()
            .build_artifact_url("drake", "a", "b")
            .unwrap_err();
        assert_eq!(err, SelectorError::InvalidTemplateSelector("drake".into()));
    }

    #[test]
    fn rejects_unknown_extension_and_missing_id() {
        let builder = ArtifactUrlBuilder::default();
        assert!(builder.build_artifact_url("drake.png", "a", "b").is_err());
        assert!(builder.build_artifact_url(".jpg", "a", "b").is_err());
    }
}
