use crate::resolver::ConfigurationError;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::{MakeWriterExt, Tee};

/// Logs to stdout and, when a transcript path is given, appends the same lines to that file.
///
/// When the transcript cannot be opened, stdout logging is still installed so the error can be reported.
pub fn init(verbose: bool, transcript: Option<&Path>) -> Result<(), ConfigurationError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match transcript.map(open_transcript).transpose() {
        Ok(Some(file)) => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(with_transcript(std::io::stdout, file))
                .init();
            Ok(())
        }
        Ok(None) => {
            tracing_subscriber::fmt().with_max_level(level).init();
            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt().with_max_level(level).init();
            Err(e)
        }
    }
}

fn open_transcript(path: &Path) -> Result<File, ConfigurationError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConfigurationError::Transcript {
            path: path.to_path_buf(),
            source,
        })
}

fn with_transcript<W>(console: W, transcript: File) -> Tee<W, Mutex<File>>
where
    W: for<'a> MakeWriter<'a>,
{
    console.and(Mutex::new(transcript))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::{AppConfigBuilder, DeviceIdSource};
    use crate::pipeline::Pipeline;
    use crate::resolver::RunRequest;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::{self, Write};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// In-memory console, shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Console(Arc<Mutex<Vec<u8>>>);

    impl Console {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Console {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn open_transcript_fails_for_a_directory() -> io::Result<()> {
        let dir = TempDir::new()?;

        let result = open_transcript(dir.path());

        assert!(
            matches!(&result, Err(ConfigurationError::Transcript { path, .. }) if path == dir.path()),
            "{:?}",
            result
        );
        Ok(())
    }

    #[test]
    fn open_transcript_appends_to_an_existing_file() -> io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("transcript.log");
        fs::write(&path, "earlier run\n")?;

        let mut file = open_transcript(&path).unwrap();
        writeln!(file, "this run")?;

        assert_eq!(fs::read_to_string(&path)?, "earlier run\nthis run\n");
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn transcript_of_a_full_run_mirrors_the_console_without_secrets() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        const CLIENT_SECRET: &str = "client-secret-b7e1d0";
        const ACCESS_TOKEN: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.access";
        const MAINTENANCE_TOKEN: &str = "mt-7f3c2a91";

        let dir = TempDir::new()?;
        let aid = dir.path().join("aid");
        fs::write(&aid, "ab12cd34ef567890ab12cd34ef567890\n")?;
        let program = dir.path().join("CsSensorSettings");
        fs::write(&program, "#!/bin/sh\nread -r token\necho \"grouping tags updated\"\n")?;
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755))?;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth2/token")
            .with_status(201)
            .with_body(include_str!("../tests/resources/token_response.json"))
            .create_async()
            .await;
        server
            .mock("POST", "/policy/combined/reveal-uninstall-token/v1")
            .with_status(200)
            .with_body(include_str!("../tests/resources/reveal_token_response.json"))
            .create_async()
            .await;
        let revoke_mock = server.mock("POST", "/oauth2/revoke").with_status(200).expect(1).create_async().await;

        let console = Console::default();
        let transcript = dir.path().join("transcript.log");
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(with_transcript(
                {
                    let console = console.clone();
                    move || console.clone()
                },
                open_transcript(&transcript)?,
            ))
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = AppConfigBuilder::new()
            .base_url(server.url())
            .device_id(DeviceIdSource::File { path: aid })
            .applier_program(program)
            .build();
        let request = RunRequest {
            client_id: "client-id".to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            tag_group: "Servers".to_string(),
            audit_message: None,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        Pipeline::from_config(&config)?.run(request, today).await?;

        revoke_mock.assert_async().await;
        let logged = fs::read_to_string(&transcript)?;
        assert!(logged.contains("Applying grouping tags... OK"), "{}", logged);
        assert_eq!(logged, console.contents());
        for secret in [CLIENT_SECRET, ACCESS_TOKEN, MAINTENANCE_TOKEN] {
            assert!(!logged.contains(secret), "{} leaked into the transcript:\n{}", secret, logged);
        }

        Ok(())
    }
}
