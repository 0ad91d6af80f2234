//! Scripted confd stand-in for gateway tests.
//!
//! Speaks the daemon's wire protocol (one HTTP/1.1 POST per JSON-RPC call
//! on a persistent TCP connection) and models the session rule the gateway
//! relies on: a handshake with wrong credentials still succeeds, but the
//! session keeps the null id `"0"`.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use serde_json::{Value, json};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "pppp";

pub struct MockConfd {
    url: String,
}

impl MockConfd {
    pub fn spawn() -> MockConfd {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock confd");
        let addr = listener.local_addr().expect("mock confd addr");

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                thread::spawn(move || serve_connection(stream));
            }
        });

        MockConfd {
            url: format!("http://127.0.0.1:{}/", addr.port()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

struct Session {
    sid: Option<Value>,
}

fn serve_connection(stream: TcpStream) {
    let mut session = Session { sid: None };
    let reader = match stream.try_clone() {
        Ok(reader) => reader,
        Err(_) => return,
    };
    let mut reader = BufReader::new(reader);
    let mut writer = stream;

    loop {
        let Some(body) = read_http_request(&mut reader) else {
            return;
        };
        let Ok(envelope) = serde_json::from_slice::<Value>(&body) else {
            return;
        };
        let id = envelope["id"].as_u64().unwrap_or_default();
        let method = envelope["method"].as_str().unwrap_or_default();
        let result = reply(&mut session, method, &envelope["params"]);
        let envelope = json!({"error": null, "id": id, "result": result});
        if write_http_response(&mut writer, &envelope).is_err() {
            return;
        }
    }
}

fn reply(session: &mut Session, method: &str, params: &Value) -> Value {
    match method {
        "new" => {
            let presented = &params[0]["SID"];
            if !presented.is_null() {
                session.sid = Some(presented.clone());
            } else if session.sid.is_none() {
                let authorized = params[0]["username"] == json!(USERNAME)
                    && params[0]["password"] == json!(PASSWORD);
                session.sid = Some(if authorized { json!(4242) } else { json!("0") });
            }
            json!(1)
        }
        "get_SID" => session.sid.clone().unwrap_or_else(|| json!("0")),
        "detach" => json!(1),
        "get_objects" => json!([user_object()]),
        "get_object" => match params[0].as_str() {
            Some("REF_AnonymousUser") => user_object(),
            _ => json!(0),
        },
        "err_list" | "err_list_fatal" | "err_list_noack" => json!([]),
        _ => json!(1),
    }
}

fn user_object() -> Value {
    json!({
        "ref": "REF_AnonymousUser",
        "class": "aaa",
        "type": "user",
        "hidden": 0,
        "lock": "",
        "nodel": "1",
        "autoname": 0,
        "data": {"comment": "Anonymous user", "name": "Anonymous"}
    })
}

fn read_http_request<R: BufRead>(reader: &mut R) -> Option<Vec<u8>> {
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).ok()? == 0 {
        return None;
    }
    if !request_line.starts_with("POST") {
        return None;
    }

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).ok()? == 0 {
            return None;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok()?;
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;
    Some(body)
}

fn write_http_response(writer: &mut TcpStream, envelope: &Value) -> std::io::Result<()> {
    let body = serde_json::to_vec(envelope).map_err(std::io::Error::other)?;
    write!(
        writer,
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )?;
    writer.write_all(&body)?;
    writer.flush()
}
