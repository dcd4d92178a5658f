// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{HarnessError, HarnessResult};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Character output port: the low byte of every stored word is appended to
/// the stream.
#[derive(Debug, serde::Serialize)]
pub struct OutputPort {
    #[serde(skip)]
    sink: Arc<Mutex<Vec<u8>>>,
    echo_stdout: bool,
    max_bytes: u64,
    written: u64,
    overflowed: bool,
}

impl OutputPort {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Vec::new())),
            echo_stdout: false,
            max_bytes,
            written: 0,
            overflowed: false,
        }
    }

    pub fn set_sink(&mut self, sink: Arc<Mutex<Vec<u8>>>, echo_stdout: bool) {
        self.sink = sink;
        self.echo_stdout = echo_stdout;
    }

    pub fn sink(&self) -> Arc<Mutex<Vec<u8>>> {
        self.sink.clone()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.sink.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    fn push(&mut self, byte: u8) {
        if let Ok(mut guard) = self.sink.lock() {
            guard.push(byte);
        }
        self.written += 1;

        if self.echo_stdout {
            #[allow(unused_must_use)]
            {
                echo(&mut io::stdout(), byte);
            }
        }
    }
}

// Raw byte, so the echo matches what lands in the sink.
fn echo<W: Write>(out: &mut W, byte: u8) -> io::Result<()> {
    out.write_all(&[byte])?;
    out.flush()
}

impl super::Device for OutputPort {
    fn write(&mut self, value: u32) -> HarnessResult<()> {
        if self.written >= self.max_bytes {
            // Report the overflow once; later bytes are dropped quietly.
            if self.overflowed {
                return Ok(());
            }
            self.overflowed = true;
            return Err(HarnessError::OutputLimit(self.max_bytes));
        }
        self.push((value & 0xFF) as u8);
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
