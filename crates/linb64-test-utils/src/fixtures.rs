//! Reusable transcode module and loader fixtures.
//!
//! - [`RecordingModule`]: delegates to the scalar module, records every call
//!   and every breach of the staging contract.
//! - [`RecordingLoader`]: instantiates recording modules, remembers epochs.
//! - [`FailingLoader`]: fails deterministically after N instantiations.

use std::cell::{Cell, RefCell};

use linb64_arena::Epoch;
use linb64_codec::{CodecConfig, LoadError, ModuleLoader, ScalarModule, Transcode};

/// One invocation of a transcode module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Encode {
        src_start: u32,
        src_end: u32,
        dst_start: u32,
    },
    Decode {
        start: u32,
        end: u32,
    },
}

/// Scalar module that records calls and checks the staging contract.
///
/// Contract checked on encode: the `encode_margin` bytes after `src_end`
/// are zero, the destination starts after them, and the padded output fits
/// the region. On decode: `end + decode_margin` fits the region.
pub struct RecordingModule {
    pub epoch: Epoch,
    inner: ScalarModule,
    config: CodecConfig,
    calls: Vec<Call>,
    violations: Vec<String>,
}

impl RecordingModule {
    pub fn new(epoch: Epoch, config: CodecConfig) -> Self {
        Self {
            epoch,
            inner: ScalarModule,
            config,
            calls: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Contract breaches observed so far; empty when the codec behaved.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl Transcode for RecordingModule {
    fn encode(&mut self, memory: &mut [u8], src_start: u32, src_end: u32, dst_start: u32) {
        self.calls.push(Call::Encode {
            src_start,
            src_end,
            dst_start,
        });
        let end = src_end as usize;
        let margin_end = end + self.config.encode_margin;
        match memory.get(end..margin_end) {
            Some(margin) if margin.iter().all(|&b| b == 0) => {}
            Some(_) => self.violations.push(format!("encode margin at {end} not zeroed")),
            None => self.violations.push(format!("encode margin at {end} outside region")),
        }
        if (dst_start as usize) < margin_end {
            self.violations
                .push(format!("destination {dst_start} overlaps staging ending {margin_end}"));
        }
        let padded = (src_end - src_start).div_ceil(3) as usize * 4;
        if dst_start as usize + padded > memory.len() {
            self.violations
                .push(format!("destination {dst_start}+{padded} outside region"));
        }
        self.inner.encode(memory, src_start, src_end, dst_start);
    }

    fn decode(&mut self, memory: &mut [u8], start: u32, end: u32) {
        self.calls.push(Call::Decode { start, end });
        if end as usize + self.config.decode_margin > memory.len() {
            self.violations
                .push(format!("decode margin after {end} outside region"));
        }
        self.inner.decode(memory, start, end);
    }
}

/// Loader producing [`RecordingModule`]s.
#[derive(Default)]
pub struct RecordingLoader {
    config: CodecConfig,
    epochs: RefCell<Vec<Epoch>>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            epochs: RefCell::new(Vec::new()),
        }
    }

    /// Epochs instantiated for, in order.
    pub fn epochs(&self) -> Vec<Epoch> {
        self.epochs.borrow().clone()
    }
}

impl ModuleLoader for RecordingLoader {
    type Module = RecordingModule;

    fn instantiate(&self, epoch: Epoch) -> Result<RecordingModule, LoadError> {
        self.epochs.borrow_mut().push(epoch);
        Ok(RecordingModule::new(epoch, self.config.clone()))
    }
}

/// Loader that succeeds `successes` times, then fails.
pub struct FailingLoader {
    successes: usize,
    attempts: Cell<usize>,
}

impl FailingLoader {
    pub fn new(successes: usize) -> Self {
        Self {
            successes,
            attempts: Cell::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.get()
    }
}

impl ModuleLoader for FailingLoader {
    type Module = ScalarModule;

    fn instantiate(&self, epoch: Epoch) -> Result<ScalarModule, LoadError> {
        let n = self.attempts.get();
        self.attempts.set(n + 1);
        if n < self.successes {
            Ok(ScalarModule)
        } else {
            Err(LoadError::new(format!("refused to instantiate for epoch {epoch}")))
        }
    }
}
