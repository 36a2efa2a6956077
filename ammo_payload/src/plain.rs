//! The plain line-protocol serializer.

use std::fmt::Write as _;
use std::io::Write;

use crate::{BulletPattern, Command, Error};

/// Renders one shot as a plain-format record.
///
/// Record layout, newline terminated:
///
/// ```text
/// <body_len> <time_ms> <tag>
/// <cflags> <ioflags> <groups> <key>
/// <command_word>
/// <payload>            (writes only)
/// <blank line>
/// ```
///
/// `body_len` covers everything after the header line up to and including
/// the newline after the command word or payload. Downstream tools slice by
/// that declared length, so the body is rendered into an owned scratch
/// buffer first, measured, and only then emitted.
#[derive(Debug)]
pub struct Plain {
    body: String,
}

impl Plain {
    /// Create a serializer with `capacity` bytes of scratch, typically
    /// `max_data_size` plus template overhead.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            body: String::with_capacity(capacity),
        }
    }

    /// Render one record into `writer`.
    ///
    /// # Errors
    ///
    /// Fails only on scratch formatting or on writing to `writer`; nothing
    /// partial is emitted in the formatting case.
    pub fn render<W>(
        &mut self,
        pattern: &BulletPattern,
        time_ms: u64,
        key: &str,
        payload: &str,
        tag: &str,
        writer: &mut W,
    ) -> Result<(), Error>
    where
        W: Write,
    {
        self.body.clear();
        writeln!(
            self.body,
            "{} {} {} {}",
            pattern.cflags, pattern.ioflags, pattern.groups, key
        )?;
        match pattern.command {
            Command::Write => write!(self.body, "write\n{payload}")?,
            Command::Read => self.body.push_str("read"),
            Command::Remove => self.body.push_str("remove"),
        }
        self.body.push('\n');

        writeln!(writer, "{} {time_ms} {tag}", self.body.len())?;
        writer.write_all(self.body.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Plain;
    use crate::{BulletPattern, Command};

    fn pattern(command: Command) -> BulletPattern {
        BulletPattern {
            command,
            ioflags: 2,
            cflags: 17,
            groups: "1:2:3".to_string(),
        }
    }

    #[test]
    fn write_record_layout() {
        let mut plain = Plain::new(256);
        let mut out = Vec::new();
        plain
            .render(&pattern(Command::Write), 1500, "7.logs", "abcXYZ", "w_tag", &mut out)
            .expect("render");

        let body = "17 2 1:2:3 7.logs\nwrite\nabcXYZ\n";
        let expected = format!("{} 1500 w_tag\n{body}\n", body.len());
        assert_eq!(String::from_utf8(out).expect("utf8"), expected);
    }

    #[test]
    fn read_record_has_no_payload_line() {
        let mut plain = Plain::new(256);
        let mut out = Vec::new();
        plain
            .render(&pattern(Command::Read), 0, "3.d1", "", "r_tag", &mut out)
            .expect("render");

        let body = "17 2 1:2:3 3.d1\nread\n";
        let expected = format!("{} 0 r_tag\n{body}\n", body.len());
        assert_eq!(String::from_utf8(out).expect("utf8"), expected);
    }

    #[test]
    fn remove_is_renderable() {
        let mut plain = Plain::new(256);
        let mut out = Vec::new();
        plain
            .render(&pattern(Command::Remove), 9, "5.gone", "", "", &mut out)
            .expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\nremove\n"));
    }

    // Slicing by the declared length yields a block ending in a blank line
    // with the command word just before it.
    #[test]
    fn declared_length_round_trips() {
        let mut plain = Plain::new(256);
        let mut out = Vec::new();
        plain
            .render(&pattern(Command::Write), 42, "9.logs", "payload", "w_tag", &mut out)
            .expect("render");

        let text = String::from_utf8(out).expect("utf8");
        let (header, rest) = text.split_once('\n').expect("header line");
        let declared: usize = header
            .split_whitespace()
            .next()
            .expect("length field")
            .parse()
            .expect("numeric length");

        let body = &rest[..declared];
        assert_eq!(&rest[declared..], "\n");
        let lines: Vec<&str> = body.split('\n').collect();
        // Body ends with a newline, so the trailing split element is empty.
        assert_eq!(lines.last(), Some(&""));
        assert_eq!(lines[lines.len() - 2], "payload");
        assert_eq!(lines[lines.len() - 3], "write");
    }
}
