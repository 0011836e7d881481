use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::models::Leaderboard;

/// Supplies the leaderboard payload the charts are built from.
pub trait LeaderboardSource {
    async fn fetch(&self) -> anyhow::Result<Leaderboard>;
}

/// Reads the payload from a JSON file, or from stdin when the path is `-`.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardSource for FileSource {
    async fn fetch(&self) -> anyhow::Result<Leaderboard> {
        if self.path.as_path() == Path::new("-") {
            return read_leaderboard(tokio::io::stdin(), "stdin").await;
        }

        let file = tokio::fs::File::open(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        read_leaderboard(file, &self.path.display().to_string()).await
    }
}

/// Reads a whole payload from `reader`; `origin` names it in errors.
pub async fn read_leaderboard<R>(mut reader: R, origin: &str) -> anyhow::Result<Leaderboard>
where
    R: AsyncRead + Unpin,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .await
        .with_context(|| format!("failed to read {origin}"))?;

    parse_leaderboard(&text).with_context(|| format!("invalid leaderboard payload in {origin}"))
}

pub fn parse_leaderboard(text: &str) -> anyhow::Result<Leaderboard> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "aoc-charts-source-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_leaderboard_from_file() {
        let path = temp_file(
            "ok.json",
            r##"{"members": [{"id": 1, "name": "Avery", "color": "#112233", "score": 5}]}"##,
        );

        let leaderboard = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(leaderboard.members.len(), 1);
        assert_eq!(leaderboard.members[0].name, "Avery");

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn reports_missing_file_with_path() {
        let error = FileSource::new("/nonexistent/leaderboard.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(error.to_string().contains("/nonexistent/leaderboard.json"));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let path = temp_file("bad.json", "{ not json");

        let error = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(error.to_string().starts_with("invalid leaderboard payload"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn empty_object_is_an_empty_leaderboard() {
        let leaderboard = parse_leaderboard("{}").unwrap();
        assert!(leaderboard.members.is_empty());
        assert!(leaderboard.max_moment().is_none());
    }

    #[tokio::test]
    async fn reads_leaderboard_from_any_reader() {
        let payload: &[u8] = br##"{"members": [{"id": "9", "name": "Kiara", "score": 3}]}"##;

        let leaderboard = read_leaderboard(payload, "stdin").await.unwrap();
        assert_eq!(leaderboard.members[0].id, "9");
        assert_eq!(leaderboard.members[0].score, 3);

        let error = read_leaderboard(&b"[1, 2"[..], "stdin").await.unwrap_err();
        assert_eq!(error.to_string(), "invalid leaderboard payload in stdin");
    }
}
