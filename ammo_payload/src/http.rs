//! The raw HTTP/1.1 serializer.

use std::fmt::Write as _;
use std::io::Write;

use crate::{BulletPattern, Command, Error};

const USER_AGENT: &str = "podnebesnaya";
const READ_HAND: &str = "/get_user_logs";

/// Renders one shot as a raw HTTP/1.1 POST request.
///
/// Writes go to the configured proxy hand with a
/// `user=<id>&data=<payload>&key=<key>` body; reads go to the fixed
/// `/get_user_logs` hand with `user=<id>&begin_time=<t>&end_time=<t>`. Each
/// request is preceded by a `<total_len> <time_ms>` framing line so the
/// load tool can slice the stream.
#[derive(Debug)]
pub struct Http {
    host: String,
    proxy_hand: String,
    keep_alive: bool,
    request: String,
    content: String,
}

impl Http {
    /// Create a serializer with `capacity` bytes of request scratch.
    #[must_use]
    pub fn new(host: String, proxy_hand: String, keep_alive: bool, capacity: usize) -> Self {
        Self {
            host,
            proxy_hand,
            keep_alive,
            request: String::with_capacity(capacity),
            content: String::with_capacity(capacity),
        }
    }

    /// Render one record into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCommand`] for [`Command::Remove`], which
    /// has no HTTP template. The generation path cannot produce it; seeing
    /// the error means a defect upstream. Nothing partial is emitted.
    pub fn render<W>(
        &mut self,
        pattern: &BulletPattern,
        user: u32,
        time_ms: u64,
        key: &str,
        payload: &str,
        writer: &mut W,
    ) -> Result<(), Error>
    where
        W: Write,
    {
        self.content.clear();
        let hand = match pattern.command {
            Command::Write => {
                write!(self.content, "user={user}&data={payload}&key={key}")?;
                self.proxy_hand.as_str()
            }
            Command::Read => {
                write!(
                    self.content,
                    "user={user}&begin_time={time_ms}&end_time={time_ms}"
                )?;
                READ_HAND
            }
            Command::Remove => return Err(Error::UnsupportedCommand(Command::Remove)),
        };
        let connection = if self.keep_alive { "Keep-Alive" } else { "Close" };

        self.request.clear();
        write!(
            self.request,
            "POST {hand} HTTP/1.1\r\n\
             Host: {host}\r\n\
             User-Agent: {USER_AGENT}\r\n\
             Connection: {connection}\r\n\
             Content-Length: {length}\r\n\
             \r\n\
             {content}\r\n",
            host = self.host,
            length = self.content.len(),
            content = self.content,
        )?;

        writeln!(writer, "{} {time_ms}", self.request.len())?;
        writer.write_all(self.request.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
