//! Shared HTTP agent used for webhook delivery.

use std::sync::OnceLock;
use std::time::Duration;

/// User agent sent with every webhook request.
pub(crate) const USER_AGENT: &str = concat!("feedbox/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Return the shared HTTP agent with bounded timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| build_agent(CONNECT_TIMEOUT, READ_TIMEOUT, WRITE_TIMEOUT))
}

fn build_agent(connect: Duration, read: Duration, write: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .user_agent(USER_AGENT)
        .timeout_connect(connect)
        .timeout_read(read)
        .timeout_write(write)
        .build()
}

/// POST a JSON body and return the response status without inspecting it further.
pub(crate) fn post_json(
    url: &str,
    body: &impl serde::Serialize,
) -> Result<u16, ureq::Transport> {
    post_json_with(agent(), url, body)
}

fn post_json_with(
    agent: &ureq::Agent,
    url: &str,
    body: &impl serde::Serialize,
) -> Result<u16, ureq::Transport> {
    match agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_json(body)
    {
        Ok(response) => Ok(response.status()),
        Err(ureq::Error::Status(code, _)) => Ok(code),
        Err(ureq::Error::Transport(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn serve_once(response: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = tx.send(request);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}/hook"), rx)
    }

    /// Read headers and a `Content-Length` body from `stream`.
    fn read_request(stream: &mut impl Read) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = stream.read(&mut buf).unwrap_or(0);
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buf[..read]);
            let text = String::from_utf8_lossy(&data);
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    #[test]
    fn post_json_sends_content_type_and_body() {
        let (url, rx) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");
        let status = post_json(&url, &serde_json::json!({ "hello": "world" })).unwrap();
        assert_eq!(status, 200);
        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /hook"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"hello":"world"}"#));
    }

    #[test]
    fn post_json_reports_error_status_without_failing() {
        let (url, _rx) = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n");
        let status = post_json(&url, &serde_json::json!({})).unwrap();
        assert_eq!(status, 500);
    }

    #[test]
    fn post_json_fails_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = post_json(&format!("http://{addr}/hook"), &serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn silent_endpoint_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let short = Duration::from_millis(200);
        let agent = build_agent(short, short, short);

        let started = std::time::Instant::now();
        let result = post_json_with(&agent, &format!("http://{addr}/hook"), &serde_json::json!({}));

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
        drop(listener);
    }
}
