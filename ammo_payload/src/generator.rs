//! The driving loop: one fully formed record per shot, then the sentinel.

use std::io::Write;
use std::num::NonZeroU64;

use tracing::{debug, info};

use crate::{
    BulletPattern, Config, Direction, Error, Format, Generator as _,
    classifier::Classifier,
    common::AsciiString,
    http::Http,
    key::KeyGenerator,
    plain::Plain,
    timeline::Timeline,
};

// Rough per-record template overhead on top of the payload, used only to
// size scratch buffers.
const TEMPLATE_OVERHEAD: usize = 256;

#[derive(Debug)]
enum Emitter {
    Plain(Plain),
    Http(Http),
}

/// Synthesizes the whole ammunition stream for one configuration.
///
/// Construction precomputes the derived scalars and the two live bullet
/// patterns; [`AmmoGenerator::run`] then walks the timeline sequentially,
/// classifying, keying and payloading each shot before handing it to the
/// configured serializer.
#[derive(Debug)]
pub struct AmmoGenerator {
    total_requests: NonZeroU64,
    timeline: Timeline,
    classifier: Classifier,
    keys: KeyGenerator,
    payloads: AsciiString,
    write_pattern: BulletPattern,
    read_pattern: BulletPattern,
    emitter: Emitter,
}

impl AmmoGenerator {
    /// Build a generator from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition from [`Config::validate`],
    /// or [`Error::NoRequests`] when the window and rates multiply out to
    /// zero shots.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let total_requests = NonZeroU64::new(config.duration * (config.read_rps + config.write_rps))
            .ok_or(Error::NoRequests)?;
        let duration_ms = config.duration * 1_000;
        let writes_enabled = !config.write_prefix.is_empty();
        debug!(
            total_requests = total_requests.get(),
            duration_ms, writes_enabled, "derived shooting window"
        );

        let write_pattern = BulletPattern {
            command: Direction::Write.into(),
            ioflags: config.write_ioflags,
            cflags: config.write_cflags,
            groups: config.groups.clone(),
        };
        let read_pattern = BulletPattern {
            command: Direction::Read.into(),
            ioflags: config.read_ioflags,
            cflags: config.read_cflags,
            groups: config.groups.clone(),
        };

        let scratch = config.max_data_size + TEMPLATE_OVERHEAD;
        let emitter = match config.output_type {
            Format::Plain => Emitter::Plain(Plain::new(scratch)),
            Format::Http => Emitter::Http(Http::new(
                config.host.clone(),
                config.proxy_hand.clone(),
                config.keep_alive,
                scratch,
            )),
        };

        Ok(Self {
            total_requests,
            timeline: Timeline::new(duration_ms, total_requests),
            classifier: Classifier::new(
                config.read_rps,
                config.write_rps,
                config.duration,
                writes_enabled,
            ),
            keys: KeyGenerator::new(config.write_prefix.clone(), config.read_prefixes.clone()),
            payloads: AsciiString::with_length_range(config.min_data_size..config.max_data_size),
            write_pattern,
            read_pattern,
            emitter,
        })
    }

    /// Number of records a run will emit, not counting the sentinel.
    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.total_requests.get()
    }

    /// Emit every record followed by the `0` sentinel line.
    ///
    /// # Errors
    ///
    /// Any serializer or writer failure aborts the run; records already
    /// written remain valid and parseable.
    pub fn run<R, W>(&mut self, rng: &mut R, writer: &mut W) -> Result<(), Error>
    where
        R: rand::Rng + ?Sized,
        W: Write,
    {
        let total = self.total_requests.get();
        info!(total, "synthesizing ammunition");

        for idx in 0..total {
            let time_ms = self.timeline.offset(idx);
            let shot = self.classifier.classify(idx, rng);
            let key = self.keys.make_key(shot.user, shot.direction, rng)?;
            let payload = match shot.direction {
                Direction::Write => self.payloads.generate(rng)?,
                Direction::Read => String::new(),
            };

            let (pattern, tag) = match shot.direction {
                Direction::Write => (&self.write_pattern, "w_tag"),
                Direction::Read => (&self.read_pattern, "r_tag"),
            };
            match &mut self.emitter {
                Emitter::Plain(plain) => {
                    plain.render(pattern, time_ms, &key, &payload, tag, writer)?;
                }
                Emitter::Http(http) => {
                    http.render(pattern, shot.user, time_ms, &key, &payload, writer)?;
                }
            }
        }

        writer.write_all(b"0\n")?;
        Ok(())
    }
}
