//! Mode dispatch: which schedule, strategy, seed and output registers a
//! (coordinate, operation) pair uses.
//!
//! | mode                 | seed (x, y, z)       | out1           | out2          |
//! |----------------------|----------------------|----------------|---------------|
//! | circular rotation    | (1/Kc, 0, angle)     | x = cos        | y = sin       |
//! | circular vectoring   | (x, y, 0)            | x = Kc·‖v‖     | z = atan(y/x) |
//! | linear rotation      | (A, 0, B)            | x = A          | y = A·B       |
//! | linear vectoring     | (A, B, 0)            | y = residual   | z = B/A       |
//! | hyperbolic rotation  | (1/Kh, 0, angle)     | x = cosh       | y = sinh      |
//! | hyperbolic vectoring | (x, y, 0)            | x = Kh·√(x²−y²) | z = atanh(y/x) |
//!
//! Kc and Kh are the growth factors of the schedules actually executed.
//! Rotation seeds pre-divide by them; vectoring magnitudes still carry them and
//! are compensated by the consumer (see [`Dispatcher::compensation`]).

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{CordicState, Engine};
use crate::error::CordicError;
use crate::tables::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinate {
    Circular,
    Linear,
    Hyperbolic,
}

impl Coordinate {
    pub const ALL: [Coordinate; 3] = [
        Coordinate::Circular,
        Coordinate::Linear,
        Coordinate::Hyperbolic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Coordinate::Circular => "circular",
            Coordinate::Linear => "linear",
            Coordinate::Hyperbolic => "hyperbolic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Drive z to zero.
    Rotation,
    /// Drive y to zero.
    Vectoring,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Rotation => "rotation",
            Operation::Vectoring => "vectoring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mode {
    pub coordinate: Coordinate,
    pub operation: Operation,
}

impl Mode {
    pub const fn new(coordinate: Coordinate, operation: Operation) -> Self {
        Self {
            coordinate,
            operation,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coordinate.name(), self.operation.name())
    }
}

/// Raw operands as latched from the input registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Operands {
    pub op1: i32,
    pub op2: i32,
    /// Bit position of 1.0 in z, linear modes only.
    pub position: u8,
}

/// Raw values for the two output registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Outputs {
    pub out1: i32,
    pub out2: i32,
}

/// Precomputed schedules and seeds for every mode of one configuration.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: EngineConfig,
    circular: Schedule,
    hyperbolic: Schedule,
    /// Indexed by radix position.
    linear: Vec<Schedule>,
    circular_seed: i32,
    hyperbolic_seed: i32,
}

impl Dispatcher {
    pub fn new(config: EngineConfig) -> Result<Self, CordicError> {
        config.validate()?;
        let width = config.width();
        let circular = Schedule::circular(config.iterations, config.angle_format);
        let hyperbolic = Schedule::hyperbolic(config.iterations, config.angle_format);
        let linear = (0..=width.saturating_sub(3))
            .map(|position| Schedule::linear(config.iterations, position, width))
            .collect::<Result<Vec<_>, _>>()?;

        let circular_seed = config.value_format.encode(circular.compensation());
        let hyperbolic_seed = config.value_format.encode(hyperbolic.compensation());
        log::debug!(
            "cordic dispatcher: {} iterations, angle {}, value {}, Kc={:.6}, Kh={:.6}",
            config.iterations,
            config.angle_format,
            config.value_format,
            circular.gain(),
            hyperbolic.gain(),
        );

        Ok(Self {
            config,
            circular,
            hyperbolic,
            linear,
            circular_seed,
            hyperbolic_seed,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schedule(&self, mode: Mode, position: u8) -> Result<&Schedule, CordicError> {
        match mode.coordinate {
            Coordinate::Circular => Ok(&self.circular),
            Coordinate::Hyperbolic => Ok(&self.hyperbolic),
            Coordinate::Linear => {
                self.linear
                    .get(usize::from(position))
                    .ok_or(CordicError::InvalidRadixPosition {
                        position,
                        width: self.config.width(),
                    })
            }
        }
    }

    /// Ticks a run of `mode` takes, known before it starts.
    pub fn latency(&self, mode: Mode, position: u8) -> Result<usize, CordicError> {
        Ok(self.schedule(mode, position)?.len())
    }

    /// Growth factor of `coordinate`'s schedule.
    pub fn gain(&self, coordinate: Coordinate) -> f64 {
        match coordinate {
            Coordinate::Circular => self.circular.gain(),
            Coordinate::Hyperbolic => self.hyperbolic.gain(),
            Coordinate::Linear => 1.0,
        }
    }

    /// Factor that turns a vectoring-mode out1 into a true magnitude.
    pub fn compensation(&self, coordinate: Coordinate) -> f64 {
        1.0 / self.gain(coordinate)
    }

    pub fn seed(&self, mode: Mode, operands: Operands) -> CordicState {
        let datapath = self.config.datapath();
        let op1 = datapath.wrap(i64::from(operands.op1));
        let op2 = datapath.wrap(i64::from(operands.op2));
        match (mode.coordinate, mode.operation) {
            (Coordinate::Circular, Operation::Rotation) => {
                CordicState::new(self.circular_seed, 0, op1)
            }
            (Coordinate::Hyperbolic, Operation::Rotation) => {
                CordicState::new(self.hyperbolic_seed, 0, op1)
            }
            (Coordinate::Linear, Operation::Rotation) => CordicState::new(op1, 0, op2),
            (_, Operation::Vectoring) => CordicState::new(op1, op2, 0),
        }
    }

    pub fn outputs(&self, mode: Mode, state: &CordicState) -> Outputs {
        let (out1, out2) = match (mode.coordinate, mode.operation) {
            (_, Operation::Rotation) => (state.x, state.y),
            (Coordinate::Linear, Operation::Vectoring) => (state.y, state.z),
            (_, Operation::Vectoring) => (state.x, state.z),
        };
        Outputs { out1, out2 }
    }

    /// Seed an engine for one run.
    pub fn begin(&self, mode: Mode, operands: Operands) -> Result<Engine, CordicError> {
        let schedule = self.schedule(mode, operands.position)?.clone();
        let seed = self.seed(mode, operands);
        log::debug!(
            "cordic start: {mode}, {} steps, seed {seed:?}",
            schedule.len()
        );
        Ok(Engine::start(mode, schedule, self.config.datapath(), seed))
    }

    /// Run `mode` to completion in one call.
    pub fn compute(&self, mode: Mode, operands: Operands) -> Result<Outputs, CordicError> {
        let mut engine = self.begin(mode, operands)?;
        let state = engine.run();
        let outputs = self.outputs(mode, &state);
        log::debug!("cordic done: {mode}, {outputs:?}");
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Q2_14;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_rotation_seeds_are_compensated() {
        let d = dispatcher();
        let mode = Mode::new(Coordinate::Circular, Operation::Rotation);
        let seed = d.seed(
            mode,
            Operands {
                op1: 1234,
                op2: 999,
                position: 0,
            },
        );
        assert_eq!(seed, CordicState::new(Q2_14.encode(0.6072529350), 0, 1234));

        let mode = Mode::new(Coordinate::Hyperbolic, Operation::Rotation);
        let seed = d.seed(mode, Operands::default());
        assert_eq!(seed.x, Q2_14.encode(1.0 / 0.8281593609602));
    }

    #[test]
    fn test_operands_wrap_to_datapath_width() {
        let d = dispatcher();
        let mode = Mode::new(Coordinate::Circular, Operation::Vectoring);
        let seed = d.seed(
            mode,
            Operands {
                op1: 0xFFFF,
                op2: 0x1_0005,
                position: 0,
            },
        );
        assert_eq!(seed, CordicState::new(-1, 5, 0));
    }

    #[test]
    fn test_output_assignment() {
        let d = dispatcher();
        let state = CordicState::new(1, 2, 3);
        let cases = [
            (Coordinate::Circular, Operation::Rotation, (1, 2)),
            (Coordinate::Circular, Operation::Vectoring, (1, 3)),
            (Coordinate::Linear, Operation::Rotation, (1, 2)),
            (Coordinate::Linear, Operation::Vectoring, (2, 3)),
            (Coordinate::Hyperbolic, Operation::Rotation, (1, 2)),
            (Coordinate::Hyperbolic, Operation::Vectoring, (1, 3)),
        ];
        for (coordinate, operation, (out1, out2)) in cases {
            let outputs = d.outputs(Mode::new(coordinate, operation), &state);
            assert_eq!(outputs, Outputs { out1, out2 });
        }
    }

    #[test]
    fn test_latency_is_schedule_length() {
        let d = dispatcher();
        let circ = Mode::new(Coordinate::Circular, Operation::Rotation);
        let hyp = Mode::new(Coordinate::Hyperbolic, Operation::Vectoring);
        let lin = Mode::new(Coordinate::Linear, Operation::Rotation);
        assert_eq!(d.latency(circ, 0), Ok(14));
        assert_eq!(d.latency(hyp, 0), Ok(15));
        assert_eq!(d.latency(lin, 11), Ok(13));
        assert_eq!(d.latency(lin, 3), Ok(5));
        assert!(d.latency(lin, 14).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            iterations: 40,
            ..EngineConfig::default()
        };
        assert!(Dispatcher::new(config).is_err());
    }
}
