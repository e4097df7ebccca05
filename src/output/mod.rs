pub mod config;
pub mod types;

use std::io::{self, Write};

use config::OutputConfig;
use types::Envelope;

pub struct Emitter {
    pretty: bool,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        Emitter { pretty: cfg.pretty }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.write(env, &mut out)?;
        out.flush()
    }

    fn write(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env)?; } else { serde_json::to_writer(&mut *w, env)?; }
        writeln!(w)
    }
}
