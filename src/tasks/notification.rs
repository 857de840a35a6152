//! Email notification task.

use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::tasks::TaskError;

/// Writes `notification for <email>: <message>` to the notification log,
/// replacing whatever the previous notification left there.
pub async fn write_notification(
    path: PathBuf,
    email: String,
    message: String,
) -> Result<(), TaskError> {
    let mut file = tokio::fs::File::create(&path).await?;
    let line = format!("notification for {email}: {message}\n");
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;

    tracing::info!(email = %email, path = %path.display(), "Email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_each_notification_replaces_the_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        write_notification(path.clone(), "a@b.c".into(), "first".into()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "notification for a@b.c: first\n"
        );

        write_notification(path.clone(), "d@e.f".into(), "second".into()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "notification for d@e.f: second\n"
        );
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.txt");
        let err = write_notification(path, "a@b.c".into(), "x".into()).await.unwrap_err();
        assert!(matches!(err, TaskError::Io(_)));
    }
}
