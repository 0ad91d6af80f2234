//! In-process confd stand-in for integration tests.
//!
//! Speaks the daemon's wire protocol: one HTTP/1.1 POST per JSON-RPC
//! request, one HTTP/1.1 response per reply, all on a persistent TCP
//! connection. Session mechanics (`new`, `get_SID`, `detach`) are built in;
//! everything else is answered by a script function so tests can shape the
//! daemon they need.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};

pub type Script = fn(&mut Session, &RecordedCall) -> Reply;

/// One JSON-RPC call as the daemon saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub id: u64,
    pub method: String,
    pub params: Value,
}

/// Reply emitted for one call.
pub enum Reply {
    Result(Value),
    Error(String),
    /// `{"error": null, "result": null}`, what an unexported method yields.
    Empty,
}

/// Per-TCP-connection daemon state.
pub struct Session {
    pub sid: Option<Value>,
    /// Error list entries accumulated by failed calls.
    pub errors: Vec<Value>,
    sids: Arc<AtomicU64>,
}

pub struct MockDaemon {
    url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockDaemon {
    pub fn spawn() -> MockDaemon {
        MockDaemon::spawn_with(default_script)
    }

    pub fn spawn_with(script: Script) -> MockDaemon {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock daemon");
        let addr = listener.local_addr().expect("mock daemon addr");
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sids = Arc::new(AtomicU64::new(100));

        {
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(stream) = stream else { break };
                    let calls = Arc::clone(&calls);
                    let sids = Arc::clone(&sids);
                    thread::spawn(move || serve_connection(stream, script, &calls, sids));
                }
            });
        }

        MockDaemon {
            url: format!("http://127.0.0.1:{}/", addr.port()),
            calls,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn url_with_credentials(&self, username: &str, password: &str) -> String {
        self.url
            .replace("http://", &format!("http://{username}:{password}@"))
    }

    /// Every call recorded so far, in wire order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Recorded calls for one method.
    pub fn calls_for(&self, method: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }
}

fn serve_connection(
    stream: TcpStream,
    script: Script,
    calls: &Mutex<Vec<RecordedCall>>,
    sids: Arc<AtomicU64>,
) {
    let mut session = Session {
        sid: None,
        errors: Vec::new(),
        sids,
    };
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
        let call = RecordedCall {
            id: envelope["id"].as_u64().unwrap_or_default(),
            method: envelope["method"].as_str().unwrap_or_default().to_string(),
            params: envelope["params"].clone(),
        };
        calls.lock().expect("call log poisoned").push(call.clone());

        let reply = session_reply(&mut session, &call, script);
        let envelope = match reply {
            Reply::Result(result) => json!({"error": null, "id": call.id, "result": result}),
            Reply::Error(error) => json!({"error": error, "id": call.id, "result": null}),
            Reply::Empty => json!({"error": null, "id": call.id, "result": null}),
        };
        if write_http_response(&mut writer, &envelope).is_err() {
            return;
        }
    }
}

/// Session bookkeeping shared by every script.
fn session_reply(session: &mut Session, call: &RecordedCall, script: Script) -> Reply {
    match call.method.as_str() {
        "new" => {
            let presented = &call.params[0]["SID"];
            if !presented.is_null() {
                session.sid = Some(presented.clone());
            }
            Reply::Result(json!(1))
        }
        "get_SID" => {
            let sid = session
                .sid
                .get_or_insert_with(|| json!(session.sids.fetch_add(1, Ordering::SeqCst)))
                .clone();
            Reply::Result(sid)
        }
        "detach" => Reply::Result(json!(1)),
        _ => script(session, call),
    }
}

/// The stock daemon: a handful of objects, nodes, and error-list behavior
/// mirroring a real box.
pub fn default_script(session: &mut Session, call: &RecordedCall) -> Reply {
    match call.method.as_str() {
        "freeze" | "thaw" | "lock" | "unlock" | "commit" => Reply::Result(json!(1)),
        "noop" => Reply::Result(json!(1)),
        "get_object" => match call.params[0].as_str() {
            Some("REF_AnonymousUser") => Reply::Result(anonymous_user()),
            _ => {
                session.errors.push(object_delete_parent_del());
                Reply::Result(json!(0))
            }
        },
        "get_objects" => Reply::Result(json!([anonymous_user()])),
        "get_affected_objects" => {
            let mut refs = call.params[0].as_array().cloned().unwrap_or_default();
            refs.insert(0, json!("REF_PacMasFromInterNetwo"));
            Reply::Result(json!(refs))
        }
        "set_object" => Reply::Result(json!("REF_NewObject")),
        "change_object" | "move_object" | "reset_object" | "lock_object" | "lock_override" => {
            Reply::Result(json!(1))
        }
        "del_object" => match call.params[0].as_str() {
            Some("REF_DefaultInternal") => {
                session.errors.push(object_delete_parent_del());
                Reply::Result(json!(0))
            }
            _ => Reply::Result(json!(1)),
        },
        "get" => {
            if call.params == json!(["ssh"]) {
                Reply::Result(json!({
                    "port": 22,
                    "allowed_networks": ["REF_DefaultInternalNetwork"]
                }))
            } else if call.params == json!(["afc"]) {
                Reply::Result(json!({"status": 0}))
            } else {
                Reply::Result(json!(0))
            }
        }
        "set" | "reset" => Reply::Result(json!(1)),
        "get_nodes" => Reply::Result(json!(["ssh", "http"])),
        "get_affected_nodes" => Reply::Result(json!([["ssh", "allowed_networks"]])),
        "get_scalars" => Reply::Result(json!(["country"])),
        "get_arrays" => Reply::Result(json!(["aaa"])),
        "get_meta" => Reply::Result(json!({"settings": {"country": {"_regex": "^..$"}}})),
        "get_meta_objects" => Reply::Result(json!({
            "dhcp": {
                "server": {
                    "mappings": {
                        "_isa": "ARRAY",
                        "_type": "REF",
                        "_class": "network",
                        "_types": ["host"]
                    },
                    "name": "dhcp_name"
                }
            }
        })),
        "get_object_classes" => Reply::Result(json!(["aaa", "network"])),
        "get_object_types" => match call.params[0].as_str() {
            Some("aaa") => Reply::Result(json!(["user", "group"])),
            _ => Reply::Result(json!([])),
        },
        "get_object_descr" => Reply::Result(json!({
            "name": {"_isa": "SCALAR", "_type": "STRING"},
            "comment": {"_isa": "SCALAR", "_type": "STRING"}
        })),
        "get_exports" => Reply::Result(json!({
            "get_SID": {"module": "Session", "write": 0, "rights": ["ANONYMOUS"]}
        })),
        "get_rights" => match &call.params {
            Value::Null => Reply::Result(json!(["ANONYMOUS"])),
            params => {
                let granted = match &params[0] {
                    Value::String(right) => right == "ANONYMOUS",
                    Value::Array(rights) => rights.iter().any(|right| right == "ANONYMOUS"),
                    _ => false,
                };
                Reply::Result(json!(if granted { 1 } else { 0 }))
            }
        },
        "err_list" | "err_list_noack" => Reply::Result(json!(session.errors)),
        "err_list_fatal" => Reply::Result(json!([])),
        "err_is_fatal" => Reply::Result(json!(0)),
        "err_is_noack" => Reply::Result(json!(session.errors.len())),
        "err_ack" => {
            session.errors.clear();
            Reply::Result(json!(1))
        }
        _ => Reply::Empty,
    }
}

/// A script whose error list stays empty, keeping marker errors unresolved.
pub fn quiet_script(_session: &mut Session, call: &RecordedCall) -> Reply {
    match call.method.as_str() {
        "err_list" | "err_list_fatal" | "err_list_noack" => Reply::Result(json!([])),
        "noop" => Reply::Result(json!(1)),
        _ => Reply::Empty,
    }
}

fn anonymous_user() -> Value {
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

fn object_delete_parent_del() -> Value {
    json!({
        "name": "The ethernet standard interface object 'Internal' is required by \
                 the QoS interface object 'Internal'.\nContinuing will delete the \
                 latter object as well.",
        "msgtype": "OBJECT_DELETE_PARENT_DEL",
        "fatal": 0,
        "never_hide": 0,
        "class": "itfparams",
        "type": "primary",
        "ref": "REF_ItfParamsDefaultInternal",
        "attrs": [],
        "Oattrs": []
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
