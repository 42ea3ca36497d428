use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use av_core::{Error, ImagePicker, ImageSelection, PickOutcome, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;

/// Line source shared between the interactive loop and the prompt picker.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

async fn validate(path: &Path) -> Result<ImageSelection> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::Picker(format!("{}: {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(Error::Picker(format!("{} is not a file", path.display())));
    }
    Ok(ImageSelection::new(path))
}

/// Picks the path given on the command line.
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImagePicker for PathPicker {
    async fn pick_image(&self) -> Result<PickOutcome> {
        validate(&self.path).await.map(PickOutcome::Picked)
    }
}

/// Prompts for a path; an empty line or end of input cancels.
pub struct PromptPicker<R> {
    lines: SharedLines<R>,
}

impl<R> PromptPicker<R> {
    pub fn new(lines: SharedLines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<R> ImagePicker for PromptPicker<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn pick_image(&self) -> Result<PickOutcome> {
        print!("Image path (empty to cancel): ");
        std::io::stdout().flush()?;

        let line = self.lines.lock().await.next_line().await?;
        match line.as_deref().map(str::trim) {
            None | Some("") => Ok(PickOutcome::Cancelled),
            Some(path) => validate(Path::new(path)).await.map(PickOutcome::Picked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(input: &'static [u8]) -> SharedLines<&'static [u8]> {
        Arc::new(Mutex::new(input.lines()))
    }

    #[tokio::test]
    async fn test_path_picker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let outcome = PathPicker::new(&path).pick_image().await.unwrap();
        assert_eq!(outcome, PickOutcome::Picked(ImageSelection::new(&path)));

        let result = PathPicker::new(dir.path()).pick_image().await;
        assert!(matches!(result, Err(Error::Picker(_))));

        let result = PathPicker::new(dir.path().join("missing.jpg")).pick_image().await;
        assert!(matches!(result, Err(Error::Picker(_))));
    }

    #[tokio::test]
    async fn test_prompt_picker_cancels_on_empty_line_and_eof() {
        let picker = PromptPicker::new(shared(b"\n   \n"));
        assert_eq!(picker.pick_image().await.unwrap(), PickOutcome::Cancelled);
        assert_eq!(picker.pick_image().await.unwrap(), PickOutcome::Cancelled);
        assert_eq!(picker.pick_image().await.unwrap(), PickOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_prompt_picker_reports_missing_file() {
        let picker = PromptPicker::new(shared(b"/no/such/field.jpg\n"));
        let result = picker.pick_image().await;
        assert!(matches!(result, Err(Error::Picker(message)) if message.contains("field.jpg")));
    }
}
