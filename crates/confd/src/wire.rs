//! HTTP/1.1 framing for JSON-RPC messages.
//!
//! Every request is a `POST /` with a JSON body; every response is one
//! HTTP/1.1 message whose body is framed by `Content-Length` or chunked
//! transfer encoding. Status codes are ignored, the JSON-RPC envelope
//! carries the actual outcome.

use std::io::{self, BufRead, Write};

use crate::request::Request;

/// Write one framed request. The `User-Agent` header is deliberately empty,
/// the daemon identifies clients by the `client` option instead.
pub fn write_request<W: Write>(writer: &mut W, host: &str, request: &Request) -> io::Result<()> {
    let body = serde_json::to_vec(request).map_err(io::Error::other)?;
    write!(
        writer,
        "POST / HTTP/1.1\r\nHost: {host}\r\nContent-Type: application/json\r\nUser-Agent: \r\nContent-Length: {}\r\n\r\n",
        body.len()
    )?;
    writer.write_all(&body)?;
    writer.flush()
}

/// Read one framed response and return its body.
pub fn read_response<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let status = read_line(reader)?;
    if !status.starts_with("HTTP/1.") {
        return Err(invalid_data("malformed status line"));
    }

    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    loop {
        let line = read_line(reader)?;
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(invalid_data("malformed header line"));
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            let length = value
                .parse()
                .map_err(|_| invalid_data("malformed content length"))?;
            content_length = Some(length);
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && value.eq_ignore_ascii_case("chunked")
        {
            chunked = true;
        }
    }

    if chunked {
        return read_chunked(reader);
    }
    match content_length {
        Some(length) => {
            let mut body = vec![0; length];
            reader.read_exact(&mut body)?;
            Ok(body)
        }
        None => Err(invalid_data("response body has no framing")),
    }
}

fn read_chunked<R: BufRead>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let size_line = read_line(reader)?;
        let size_field = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_field, 16)
            .map_err(|_| invalid_data("malformed chunk size"))?;
        if size == 0 {
            // skip trailers up to the terminating empty line
            while !read_line(reader)?.is_empty() {}
            return Ok(body);
        }
        let start = body.len();
        body.resize(start + size, 0);
        reader.read_exact(&mut body[start..])?;
        read_line(reader)?; // chunk terminator
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed mid-response",
        ));
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn invalid_data(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_string())
}
