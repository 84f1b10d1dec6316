//! The register-mapped CORDIC peripheral.
//!
//! Bus writes latch operands and the config byte. A config write with the
//! start bit set seeds an engine run and moves the control state machine to
//! BUSY; each [`CordicPeripheral::tick`] then executes one micro-rotation.
//! On the final tick the outputs are latched and the status reads DONE.

use alloc::vec::Vec;
use core::fmt;

use lp_cordic_core::{
    CordicState, Dispatcher, Engine, IterationLog, LogLevel, LoggingDisabled, LoggingEnabled,
    LoggingMode, Mode, Operands, Outputs, fixed::sign_extend,
};
use serde::Serialize;

use crate::bus::{AccessWidth, Clocked, RegisterBus, merge_write};
use crate::config::PeripheralConfig;
use crate::control::{Control, StartOutcome, Status};
use crate::error::PeripheralError;
use crate::protocol::{ConfigWord, START_BIT};
use crate::regs::{
    DATA_WIDTH, ID_CONFIG, OPERAND1, OPERAND2, OUTPUT1, OUTPUT2, PERIPHERAL_ID, SCALE, STATUS,
};

/// Result of a single clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Nothing in flight.
    Idle,
    /// A micro-rotation ran; more remain.
    Busy,
    /// The final micro-rotation ran and outputs are latched.
    Done,
}

/// Log entry captured by the peripheral.
#[derive(Debug, Clone, Serialize)]
pub enum PeripheralLog {
    Access {
        tick: u64,
        addr: u32,
        width: AccessWidth,
        write: bool,
        value: u32,
    },
    Start {
        tick: u64,
        mode: Mode,
        operands: Operands,
        latency: usize,
    },
    Iteration {
        tick: u64,
        entry: IterationLog,
    },
    Done {
        tick: u64,
        mode: Mode,
        outputs: Outputs,
    },
    /// Start pulse with a reserved coordinate or an invalid scale.
    Rejected {
        tick: u64,
        config: u8,
    },
    /// Start pulse while BUSY.
    IgnoredBusy {
        tick: u64,
        config: u8,
    },
}

impl PeripheralLog {
    pub fn tick(&self) -> u64 {
        match self {
            PeripheralLog::Access { tick, .. }
            | PeripheralLog::Start { tick, .. }
            | PeripheralLog::Iteration { tick, .. }
            | PeripheralLog::Done { tick, .. }
            | PeripheralLog::Rejected { tick, .. }
            | PeripheralLog::IgnoredBusy { tick, .. } => *tick,
        }
    }

    /// Lowest log level that records this entry.
    fn level(&self) -> LogLevel {
        match self {
            PeripheralLog::Access { .. } => LogLevel::Verbose,
            PeripheralLog::Start { .. }
            | PeripheralLog::Iteration { .. }
            | PeripheralLog::Done { .. } => LogLevel::Iterations,
            PeripheralLog::Rejected { .. } | PeripheralLog::IgnoredBusy { .. } => LogLevel::Errors,
        }
    }
}

impl fmt::Display for PeripheralLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeripheralLog::Access {
                tick,
                addr,
                width,
                write,
                value,
            } => {
                let dir = if *write { "W" } else { "R" };
                write!(f, "[{tick:>4}] {dir} {addr:#x} {width:?} = {value:#x}")
            }
            PeripheralLog::Start {
                tick,
                mode,
                operands,
                latency,
            } => write!(
                f,
                "[{tick:>4}] start {mode}: op1={} op2={} scale={} ({latency} ticks)",
                operands.op1, operands.op2, operands.position
            ),
            PeripheralLog::Iteration { tick, entry } => write!(f, "[{tick:>4}] {entry}"),
            PeripheralLog::Done {
                tick,
                mode,
                outputs,
            } => write!(
                f,
                "[{tick:>4}] done {mode}: out1={} out2={}",
                outputs.out1, outputs.out2
            ),
            PeripheralLog::Rejected { tick, config } => {
                write!(f, "[{tick:>4}] start rejected, config {config:#04x}")
            }
            PeripheralLog::IgnoredBusy { tick, config } => {
                write!(f, "[{tick:>4}] start ignored while busy, config {config:#04x}")
            }
        }
    }
}

pub struct CordicPeripheral {
    config: PeripheralConfig,
    dispatcher: Dispatcher,
    control: Control,
    engine: Option<Engine>,

    config_reg: u8,
    operand1: u16,
    operand2: u16,
    scale: u8,
    output1: u16,
    output2: u16,

    ticks: u64,
    log_level: LogLevel,
    logs: Vec<PeripheralLog>,
}

impl CordicPeripheral {
    pub fn new(config: PeripheralConfig) -> Result<Self, PeripheralError> {
        let width = config.engine.width();
        if width != DATA_WIDTH {
            return Err(PeripheralError::DatapathWidth(width));
        }
        let dispatcher = Dispatcher::new(config.engine)?;
        Ok(Self {
            config,
            dispatcher,
            control: Control::new(),
            engine: None,
            config_reg: 0,
            operand1: 0,
            operand2: 0,
            scale: 0,
            output1: 0,
            output2: 0,
            ticks: 0,
            log_level: LogLevel::None,
            logs: Vec::new(),
        })
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn config(&self) -> &PeripheralConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn status(&self) -> Status {
        self.control.status()
    }

    /// Ticks left in the current run.
    pub fn remaining(&self) -> usize {
        self.control.remaining()
    }

    /// Ticks since construction or reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Output registers, sign-extended.
    pub fn outputs(&self) -> Outputs {
        Outputs {
            out1: sign_extend(u32::from(self.output1), DATA_WIDTH),
            out2: sign_extend(u32::from(self.output2), DATA_WIDTH),
        }
    }

    /// Iteration registers of the current or last run.
    pub fn engine_state(&self) -> Option<CordicState> {
        self.engine.as_ref().map(Engine::state)
    }

    pub fn logs(&self) -> &[PeripheralLog] {
        &self.logs
    }

    pub fn take_logs(&mut self) -> Vec<PeripheralLog> {
        core::mem::take(&mut self.logs)
    }

    /// Return to the power-on state. Logs and log level are kept.
    pub fn reset(&mut self) {
        self.control.reset();
        self.engine = None;
        self.config_reg = 0;
        self.operand1 = 0;
        self.operand2 = 0;
        self.scale = 0;
        self.output1 = 0;
        self.output2 = 0;
        self.ticks = 0;
    }

    pub fn tick(&mut self) -> TickResult {
        if self.log_level >= LogLevel::Iterations {
            self.tick_inner::<LoggingEnabled>()
        } else {
            self.tick_inner::<LoggingDisabled>()
        }
    }

    fn tick_inner<M: LoggingMode>(&mut self) -> TickResult {
        self.ticks += 1;
        if self.control.status() != Status::Busy {
            return TickResult::Idle;
        }
        let Some(engine) = self.engine.as_mut() else {
            return TickResult::Idle;
        };

        let mut entries = Vec::new();
        engine.tick_with::<M>(&mut entries);
        let mode = engine.mode();
        let state = engine.state();

        let tick = self.ticks;
        for entry in entries {
            self.record(PeripheralLog::Iteration { tick, entry });
        }

        if !self.control.tick() {
            return TickResult::Busy;
        }

        let outputs = self.dispatcher.outputs(mode, &state);
        self.output1 = outputs.out1 as u16;
        self.output2 = outputs.out2 as u16;
        log::debug!("cordic {mode} done at tick {tick}: {outputs:?}");
        self.record(PeripheralLog::Done {
            tick,
            mode,
            outputs,
        });
        TickResult::Done
    }

    fn record(&mut self, entry: PeripheralLog) {
        if self.log_level >= entry.level() {
            self.logs.push(entry);
        }
    }

    fn write_config(&mut self, byte: u8) {
        let word = self.config.layout.decode(byte);
        self.config_reg = byte & !START_BIT;
        if word.start {
            self.start(word, byte);
        }
    }

    fn start(&mut self, word: ConfigWord, byte: u8) {
        let tick = self.ticks;
        if self.control.status() == Status::Busy {
            log::debug!("cordic start ignored while busy (config {byte:#04x})");
            self.record(PeripheralLog::IgnoredBusy { tick, config: byte });
            return;
        }
        let Some(mode) = word.mode() else {
            log::warn!("cordic start rejected: reserved coordinate in config {byte:#04x}");
            self.record(PeripheralLog::Rejected { tick, config: byte });
            return;
        };

        let operands = Operands {
            op1: sign_extend(u32::from(self.operand1), DATA_WIDTH),
            op2: sign_extend(u32::from(self.operand2), DATA_WIDTH),
            position: self.scale,
        };
        let engine = match self.dispatcher.begin(mode, operands) {
            Ok(engine) => engine,
            Err(err) => {
                log::warn!("cordic start rejected: {err}");
                self.record(PeripheralLog::Rejected { tick, config: byte });
                return;
            }
        };

        let latency = engine.latency();
        if self.control.start(latency) == StartOutcome::Accepted {
            self.engine = Some(engine);
            self.record(PeripheralLog::Start {
                tick,
                mode,
                operands,
                latency,
            });
        }
    }
}

impl RegisterBus for CordicPeripheral {
    fn read(&mut self, addr: u32, width: AccessWidth) -> Result<u32, PeripheralError> {
        let register = match addr {
            ID_CONFIG => PERIPHERAL_ID,
            OUTPUT1 => u32::from(self.output1),
            OUTPUT2 => u32::from(self.output2),
            STATUS => u32::from(self.control.status().code()),
            OPERAND1 | OPERAND2 | SCALE => return Err(PeripheralError::WriteOnly(addr)),
            _ => return Err(PeripheralError::UnmappedAddress(addr)),
        };
        let value = register & width.mask();

        self.record(PeripheralLog::Access {
            tick: self.ticks,
            addr,
            width,
            write: false,
            value,
        });
        Ok(value)
    }

    fn write(&mut self, addr: u32, width: AccessWidth, value: u32) -> Result<(), PeripheralError> {
        match addr {
            ID_CONFIG | OPERAND1 | OPERAND2 | SCALE => {}
            OUTPUT1 | OUTPUT2 | STATUS => return Err(PeripheralError::ReadOnly(addr)),
            _ => return Err(PeripheralError::UnmappedAddress(addr)),
        }
        self.record(PeripheralLog::Access {
            tick: self.ticks,
            addr,
            width,
            write: true,
            value: value & width.mask(),
        });

        match addr {
            ID_CONFIG => {
                let byte = merge_write(u32::from(self.config_reg), width, value) as u8;
                self.write_config(byte);
            }
            OPERAND1 => self.operand1 = merge_write(u32::from(self.operand1), width, value) as u16,
            OPERAND2 => self.operand2 = merge_write(u32::from(self.operand2), width, value) as u16,
            _ => self.scale = merge_write(u32::from(self.scale), width, value) as u8,
        }
        Ok(())
    }
}

impl Clocked for CordicPeripheral {
    fn clock(&mut self) {
        self.tick();
    }
}
