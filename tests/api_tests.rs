//! Tests for the subdomain-bound operations (`upload_file`, `create_link`)
//! against a mocked transport.

mod common;

use common::{answering, client, response, MockHttp};
use serde_json::json;
use std::io::{Cursor, Read};
use sxcu::transport::{FileBody, Method};
use sxcu::{ClientConfig, ConfigSource, OgProperties, SxcuError, UploadOptions, UploadSource};
use tempfile::tempdir;

mod upload_file {
    use super::*;

    #[test]
    fn test_success_returns_body_unmodified() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sharex.png");
        std::fs::write(&path, b"\x89PNG fake image bytes").unwrap();

        let body = r#"{"url":"https://x/1","del_url":"https://x/d/1","thumb":"https://x/t/1.png"}"#;
        let client = client(ClientConfig::default(), answering(200, body));

        let result = client
            .upload_file(UploadSource::path(&path), &UploadOptions::new())
            .unwrap();
        assert_eq!(
            result,
            json!({"url":"https://x/1","del_url":"https://x/d/1","thumb":"https://x/t/1.png"})
        );
    }

    #[test]
    fn test_request_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"file contents").unwrap();

        let mut http = MockHttp::new();
        http.expect_send().times(1).returning(|request| {
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.url, "https://python.is-ne.at/api/files/create");
            assert_eq!(request.form_value("token"), Some("secret"));
            assert_eq!(request.form_value("collection"), Some("col"));
            assert_eq!(request.form_value("collection_token"), Some("coltok"));
            assert_eq!(request.form_value("noembed"), Some(""));
            assert_eq!(request.form_value("self_destruct"), Some(""));
            assert_eq!(
                request.form_value("og_properties"),
                Some(OgProperties::new().title("t").export().as_str())
            );

            let part = request.file.expect("file part");
            assert_eq!(part.field, "file");
            assert_eq!(part.file_name, "cat.png");
            match part.body {
                FileBody::File(mut file) => {
                    let mut contents = String::new();
                    file.read_to_string(&mut contents).unwrap();
                    assert_eq!(contents, "file contents");
                }
                FileBody::Bytes(_) => panic!("a path upload should stream the opened file"),
            }
            Ok(response(200, r#"{"url":"u","del_url":"d","thumb":"t"}"#))
        });

        let config = ClientConfig::new("https://python.is-ne.at", Some("secret".into()));
        let options = UploadOptions::new()
            .collection("col", Some("coltok".into()))
            .noembed(true)
            .self_destruct(true)
            .og_properties(OgProperties::new().title("t"));
        client(config, http)
            .upload_file(UploadSource::path(&path), &options)
            .unwrap();
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut http = MockHttp::new();
        http.expect_send().returning(|request| {
            assert!(request.form.is_empty());
            Ok(response(200, "{}"))
        });
        let mut stream = Cursor::new(b"in memory".to_vec());
        client(ClientConfig::default(), http)
            .upload_file(UploadSource::stream(&mut stream, "a.png"), &UploadOptions::new())
            .unwrap();
    }

    #[test]
    fn test_stream_is_read_but_left_with_caller() {
        let mut http = MockHttp::new();
        http.expect_send().returning(|request| {
            let part = request.file.expect("file part");
            assert_eq!(part.file_name, "clip.png");
            match part.body {
                FileBody::Bytes(bytes) => assert_eq!(bytes, b"in memory"),
                FileBody::File(_) => panic!("a stream upload should send its bytes"),
            }
            Ok(response(200, "{}"))
        });

        let mut stream = Cursor::new(b"in memory".to_vec());
        client(ClientConfig::default(), http)
            .upload_file(UploadSource::stream(&mut stream, "clip.png"), &UploadOptions::new())
            .unwrap();

        // Still ours: we can rewind and read it again.
        stream.set_position(0);
        let mut again = Vec::new();
        stream.read_to_end(&mut again).unwrap();
        assert_eq!(again, b"in memory");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_file_released_when_classifier_fails() {
        use std::os::unix::io::AsRawFd;
        use std::path::PathBuf;
        use std::sync::{Arc, Mutex};

        let dir = tempdir().unwrap();
        let written = dir.path().join("big.png");
        std::fs::write(&written, b"pretend this is huge").unwrap();
        // /proc links hold the resolved path.
        let path = std::fs::canonicalize(&written).unwrap();

        // The descriptor of the uploaded file, as seen while the request is alive.
        let seen_fd: Arc<Mutex<Option<i32>>> = Arc::new(Mutex::new(None));
        let fd_link = |fd: i32| std::fs::read_link(format!("/proc/self/fd/{fd}")).ok();

        let mut http = MockHttp::new();
        let recorder = Arc::clone(&seen_fd);
        let expected: PathBuf = path.clone();
        http.expect_send().returning(move |request| {
            match request.file.as_ref().map(|part| &part.body) {
                Some(FileBody::File(file)) => {
                    let fd = file.as_raw_fd();
                    assert_eq!(fd_link(fd), Some(expected.clone()));
                    *recorder.lock().unwrap() = Some(fd);
                }
                _ => panic!("path upload should send an open file"),
            }
            Ok(response(413, "{}"))
        });

        let err = client(ClientConfig::default(), http)
            .upload_file(UploadSource::path(&path), &UploadOptions::new())
            .unwrap_err();
        assert_eq!(err.status(), Some(413));

        let fd = seen_fd.lock().unwrap().expect("request carried the file");
        // The descriptor is closed, or reused by something else by now.
        assert_ne!(fd_link(fd), Some(path));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let http = MockHttp::new();
        let err = client(ClientConfig::default(), http)
            .upload_file(
                UploadSource::path(std::path::Path::new("/no/such/file.png")),
                &UploadOptions::new(),
            )
            .unwrap_err();
        assert!(matches!(err, SxcuError::Io(_)));
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let client = client(
            ClientConfig::default(),
            answering(403, r#"{"error":"Invalid upload token","code":2}"#),
        );
        let mut stream = Cursor::new(b"0123456789abcdef".to_vec());
        let err = client
            .upload_file(UploadSource::stream(&mut stream, "a.png"), &UploadOptions::new())
            .unwrap_err();
        match err {
            SxcuError::RemoteService {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 403);
                assert_eq!(code, Some(2));
                assert_eq!(message, "Invalid upload token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_uses_subdomain_from_sxcu_file() {
        let dir = tempdir().unwrap();
        let sxcu_file = dir.path().join("sxcu.net - why-am-i-he.re.sxcu");
        std::fs::write(
            &sxcu_file,
            r#"{"Version":"13.2.1","Name":"sxcu.net - why-am-i-he.re","DestinationType":"ImageUploader","RequestMethod":"POST","RequestURL":"https://why-am-i-he.re/api/files/create","Body":"MultipartFormData","FileFormName":"file"}"#,
        )
        .unwrap();
        let config = ClientConfig::from_sxcu(ConfigSource::path(&sxcu_file)).unwrap();

        let mut http = MockHttp::new();
        http.expect_send().returning(|request| {
            assert_eq!(request.url, "https://why-am-i-he.re/api/files/create");
            assert_eq!(request.form_value("token"), None);
            Ok(response(200, r#"{"url":"https://why-am-i-he.re/abc"}"#))
        });
        let mut stream = Cursor::new(b"0123456789abcdef".to_vec());
        let result = client(config, http)
            .upload_file(UploadSource::stream(&mut stream, "a.png"), &UploadOptions::new())
            .unwrap();
        assert!(result["url"].as_str().unwrap().starts_with("https://why-am-i-he.re"));
    }
}

mod create_link {
    use super::*;

    #[test]
    fn test_posts_link_to_subdomain() {
        let mut http = MockHttp::new();
        http.expect_send().times(1).returning(|request| {
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.url, "https://sxcu.net/api/links/create");
            assert_eq!(request.form_value("link"), Some("https://github.com"));
            assert!(request.file.is_none());
            Ok(response(200, r#"{"url":"https://sxcu.net/l","del_url":"https://sxcu.net/d"}"#))
        });
        let result = client(ClientConfig::default(), http)
            .create_link("https://github.com")
            .unwrap();
        assert_eq!(result["url"], "https://sxcu.net/l");
        assert_eq!(result["del_url"], "https://sxcu.net/d");
    }

    #[test]
    fn test_undecodable_success_body() {
        let client = client(ClientConfig::default(), answering(200, "<html>"));
        assert!(matches!(
            client.create_link("https://github.com"),
            Err(SxcuError::Decode(_))
        ));
    }
}

#[test]
fn test_service_shares_client_api_root() {
    let mut http = MockHttp::new();
    http.expect_send().returning(|request| {
        assert_eq!(request.url, "https://sxcu.net/api/collections/abc");
        Ok(response(200, r#"{"collection_id":"abc"}"#))
    });
    let client = client(ClientConfig::default(), http);
    let meta = client.service().collection_meta("abc").unwrap();
    assert_eq!(meta["collection_id"], "abc");
}
