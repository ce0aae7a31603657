use crate::domain::blog_post::BlogPost as DomainBlogPost;
use crate::domain::types::{BlogPostId, BlogTitle, CoverImageUrl, TypeConstraintError};
use crate::models::document::Document;

/// Name of the blog posts collection.
pub const BLOG_POSTS_COLLECTION: &str = "blogPosts";

impl TryFrom<Document> for DomainBlogPost {
    type Error = TypeConstraintError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let id = BlogPostId::new(doc.id.as_str())?;
        let cover_image_url = match doc.string("coverImageUrl") {
            Some(raw) if !raw.trim().is_empty() => match CoverImageUrl::new(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("Blog post {id}: {e}");
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            title: BlogTitle::new(doc.string_or_default("title"))?,
            content: doc.string_or_default("content"),
            created_at: doc.created_at(),
            id,
            cover_image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blog_post::BLOG_COVER_PLACEHOLDER_URL;

    #[test]
    fn invalid_cover_falls_back_to_placeholder() {
        let doc = Document::new("b1")
            .with("title", "Yarn care")
            .with("content", "# Washing\nBy hand.")
            .with("coverImageUrl", "/local/cover.png");
        let post = DomainBlogPost::try_from(doc).unwrap();

        assert_eq!(post.cover_image_url, None);
        assert_eq!(post.display_cover_url(), BLOG_COVER_PLACEHOLDER_URL);
        assert_eq!(post.content, "# Washing\nBy hand.");
    }

    #[test]
    fn keeps_valid_cover() {
        let doc = Document::new("b2")
            .with("title", "Spring colors")
            .with("coverImageUrl", "https://cdn.example.com/spring.jpg");
        let post = DomainBlogPost::try_from(doc).unwrap();

        assert_eq!(post.display_cover_url(), "https://cdn.example.com/spring.jpg");
    }
}
