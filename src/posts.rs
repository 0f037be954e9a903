use crate::errors::{AppError, AppResult};
use crate::models::PostContent;
use crate::website::page::slug_for_title;
use std::path::{Path, PathBuf};

/// Writes the plain-text archive copy of a post as `<slug>.txt` under
/// `posts_dir`, creating the directory when needed.
pub fn write_post(posts_dir: &Path, post: &PostContent) -> AppResult<PathBuf> {
    std::fs::create_dir_all(posts_dir)
        .map_err(|error| AppError::Io(format!("{}: {}", posts_dir.display(), error)))?;

    let file_path = posts_dir.join(format!("{}.txt", slug_for_title(&post.title)));
    let text_content = format!("{}\n\n{}", post.title, post.content);
    std::fs::write(&file_path, text_content)
        .map_err(|error| AppError::Io(format!("{}: {}", file_path.display(), error)))?;

    tracing::info!(path = %file_path.display(), "wrote post archive");
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::write_post;
    use crate::models::PostContent;

    fn post(title: &str, content: &str) -> PostContent {
        PostContent {
            title: title.to_string(),
            content: content.to_string(),
            date: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn writes_title_and_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_post(
            dir.path(),
            &post(
                "My Test Post",
                "This is the content of my test post.\n\nIt has multiple paragraphs.",
            ),
        )
        .expect("write post");

        assert!(path.ends_with("my-test-post.txt"));
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(
            written,
            "My Test Post\n\nThis is the content of my test post.\n\nIt has multiple paragraphs."
        );
    }

    #[test]
    fn creates_nested_posts_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("nested").join("subdir");
        let path = write_post(&nested, &post("Test Post", "Test content")).expect("write post");
        assert!(nested.is_dir());
        assert!(path.exists());
    }

    #[test]
    fn keeps_unicode_content_intact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_post(
            dir.path(),
            &post("Unicode Test 🌍", "Content with émojis 😀 and ñáéíóú"),
        )
        .expect("write post");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("Unicode Test 🌍"));
        assert!(written.contains("ñáéíóú"));
    }
}
