//! Cycle controller.
//!
//! Orchestrates one acquisition cycle after another:
//!
//! ```text
//! Acquire -> WaitAcquire -> Report -> Exchange -> Handle -> Delay
//!    ^                                    │ (start failure)    │
//!    │                                    └──────> Delay       │
//!    └────────────────────────────────────────────────────────-┘
//! ```
//!
//! The phases are exposed as a runtime state machine: [`Controller::step`]
//! advances exactly one phase so tests can observe intermediate state, and
//! [`Controller::run_cycle`] drives a whole cycle. There is no terminal
//! phase; [`Controller::run`] loops until a fatal error.
//!
//! When the serial exchange fails to start, the Handle phase is skipped for
//! that cycle: the inbound buffer still holds the previous cycle's words, and
//! re-dispatching a stale command must never happen.

use core::convert::Infallible;
use core::fmt;

use crate::buffer::BufferPool;
use crate::config::Config;
use crate::engine::{AcquisitionEngine, ExchangeEngine};
use crate::error::{Result, ScopeError};
use crate::gain::GainRange;
use crate::hal::{CycleDelay, GainPins, HostLink, SampleBus};
use crate::protocol::command::HostCommand;
use crate::protocol::constants::{CommandId, MAX_FRAMES, SAMPLES_PER_FRAME};
use crate::sample::{average_volts, select_frame};

/// Phases of one acquisition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Arm the bulk capture for the current window
    Acquire,
    /// Await the capture completion signal
    WaitAcquire,
    /// Log the diagnostic average of the fresh samples
    Report,
    /// Decimate into the outbound frame and run the serial exchange
    Exchange,
    /// Validate, parse and dispatch the inbound command
    Handle,
    /// Fixed inter-cycle pause
    Delay,
}

/// What one completed cycle produced.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    /// Average of the first diagnostic-window samples, in volts
    pub average_volts: f32,
    /// The command received this cycle, if the inbound frame verified and
    /// parsed (an unknown identifier still reports here; it just dispatches
    /// to nothing)
    pub command: Option<HostCommand>,
    /// Frame count in effect after command handling
    pub frame_count: u16,
    /// Whether the serial exchange ran to completion this cycle
    pub exchanged: bool,
}

/// The acquisition control loop.
///
/// Owns the buffer pool and both transfer engines; hardware comes in through
/// the HAL traits. Construction requires the collaborator side to be fully
/// brought up (port directions, transfer engines, completion interrupts).
pub struct Controller<B: SampleBus, L: HostLink, G: GainPins, D: CycleDelay> {
    cfg: Config,
    pool: BufferPool,
    acquirer: AcquisitionEngine<B>,
    exchanger: ExchangeEngine<L>,
    gain_pins: G,
    delay: D,
    phase: Phase,
    frame_count: u16,
    gain: GainRange,
    // Per-cycle scratch, reset when a cycle starts
    cycle_average: f32,
    cycle_command: Option<HostCommand>,
    cycle_exchanged: bool,
}

impl<B, L, G, D> Controller<B, L, G, D>
where
    B: SampleBus,
    L: HostLink,
    G: GainPins,
    D: CycleDelay,
{
    /// Build a controller and drive the gain lines to their bring-up state.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidSetting` configuration error when `max_frames` is
    /// zero or exceeds the buffer capacity, or when the poll budget is zero.
    pub fn new(cfg: Config, bus: B, link: L, mut gain_pins: G, delay: D) -> Result<Self> {
        if cfg.max_frames == 0 || cfg.max_frames > MAX_FRAMES || cfg.wait_polls == 0 {
            return Err(ScopeError::invalid_setting());
        }

        let gain = GainRange::default();
        let (line_a, line_b) = gain.lines();
        gain_pins.set(line_a, line_b);
        crate::scope_log!(info, "setup complete, multiplier = {}", gain.multiplier());

        Ok(Self {
            cfg,
            pool: BufferPool::new(),
            acquirer: AcquisitionEngine::new(bus),
            exchanger: ExchangeEngine::new(link),
            gain_pins,
            delay,
            phase: Phase::Acquire,
            frame_count: 1,
            gain,
            cycle_average: 0.0,
            cycle_command: None,
            cycle_exchanged: false,
        })
    }

    /// The phase the next [`Controller::step`] will execute.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Frame count currently in effect.
    pub fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Gain range currently driven on the output lines.
    pub fn gain(&self) -> GainRange {
        self.gain
    }

    /// The cycle buffers, for inspection.
    pub fn buffers(&self) -> &BufferPool {
        &self.pool
    }

    /// Access the sample bus.
    pub fn bus(&self) -> &B {
        self.acquirer.bus()
    }

    /// Access the host link.
    pub fn link(&self) -> &L {
        self.exchanger.link()
    }

    /// Mutable access to the host link (tests queue responses here).
    pub fn link_mut(&mut self) -> &mut L {
        self.exchanger.link_mut()
    }

    /// Access the gain range-select pins.
    pub fn gain_pins(&self) -> &G {
        &self.gain_pins
    }

    /// Words the current window occupies in the acquisition buffer.
    fn window_words(&self) -> usize {
        SAMPLES_PER_FRAME * usize::from(self.frame_count)
    }

    /// Execute the current phase and advance to the next one.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors only: capture-start failures
    /// (configuration-class) and completion timeouts. An exchange start
    /// failure is reported and absorbed; the cycle continues without host
    /// data.
    pub fn step(&mut self) -> Result<Phase> {
        match self.phase {
            Phase::Acquire => {
                self.cycle_average = 0.0;
                self.cycle_command = None;
                self.cycle_exchanged = false;
                let words = self.window_words();
                self.acquirer.start(&mut self.pool.acquisition[..words])?;
                self.phase = Phase::WaitAcquire;
            }
            Phase::WaitAcquire => {
                self.acquirer.wait(self.cfg.wait_polls)?;
                self.phase = Phase::Report;
            }
            Phase::Report => {
                let avg = average_volts(
                    &self.pool.acquisition[..self.window_words()],
                    self.cfg.diagnostic_window,
                    self.cfg.vref,
                );
                self.cycle_average = avg;
                crate::scope_log!(info, "average: {} V", avg);
                self.phase = Phase::Exchange;
            }
            Phase::Exchange => {
                let words = self.window_words();
                select_frame(
                    &self.pool.acquisition[..words],
                    &mut self.pool.outbound,
                    self.frame_count,
                )?;
                match self.exchanger.exchange(
                    &self.pool.outbound,
                    &mut self.pool.inbound,
                    self.cfg.wait_polls,
                ) {
                    Ok(()) => {
                        self.cycle_exchanged = true;
                        self.phase = Phase::Handle;
                    }
                    Err(ScopeError::Timeout) => return Err(ScopeError::Timeout),
                    Err(_) => {
                        // No fresh host data; skip Handle so the stale
                        // inbound words are never re-dispatched
                        crate::scope_log!(warn, "proceeding without host data this cycle");
                        self.phase = Phase::Delay;
                    }
                }
            }
            Phase::Handle => {
                self.handle_inbound();
                self.phase = Phase::Delay;
            }
            Phase::Delay => {
                self.delay.pause();
                self.phase = Phase::Acquire;
            }
        }
        Ok(self.phase)
    }

    /// Run one complete cycle and report what it produced.
    ///
    /// # Errors
    ///
    /// Same fatality rules as [`Controller::step`].
    pub fn run_cycle(&mut self) -> Result<CycleReport> {
        loop {
            self.step()?;
            if self.phase == Phase::Acquire {
                break;
            }
        }
        Ok(CycleReport {
            average_volts: self.cycle_average,
            command: self.cycle_command,
            frame_count: self.frame_count,
            exchanged: self.cycle_exchanged,
        })
    }

    /// Run cycles forever; returns only with a fatal error.
    ///
    /// # Errors
    ///
    /// The first configuration failure or completion timeout ends the loop.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            self.run_cycle()?;
        }
    }

    /// Verify, parse and dispatch the inbound buffer.
    ///
    /// Invalid frames and unknown identifiers change no state and surface no
    /// error.
    fn handle_inbound(&mut self) {
        if !HostCommand::verify(&self.pool.inbound) {
            return;
        }
        let Ok(cmd) = HostCommand::parse(&self.pool.inbound) else {
            return;
        };
        crate::scope_log!(info, "identifier: {}, value: {}", cmd.identifier, cmd.value);
        self.cycle_command = Some(cmd);

        match cmd.id() {
            Some(CommandId::SetGain) => self.apply_gain(cmd.value),
            Some(CommandId::SetWindow) => self.apply_window(cmd.value),
            Some(CommandId::SetOffset) => {
                // TODO: drive the offset DAC once the analog front end exposes it
                crate::scope_log!(debug, "offset command ignored, value {}", cmd.value);
            }
            None => {
                crate::scope_log!(debug, "unknown command identifier {}", cmd.identifier);
            }
        }
    }

    fn apply_gain(&mut self, value: u32) {
        self.gain = GainRange::for_request(value);
        let (line_a, line_b) = self.gain.lines();
        self.gain_pins.set(line_a, line_b);
        crate::scope_log!(info, "multiplier = {}", self.gain.multiplier());

        // Diagnostic average over the samples the host just reacted to
        let avg = average_volts(
            &self.pool.acquisition[..self.window_words()],
            self.cfg.diagnostic_window,
            self.cfg.vref,
        );
        crate::scope_log!(debug, "gain diagnostic average: {} V", avg);
    }

    fn apply_window(&mut self, value: u32) {
        let clamped = value.clamp(1, u32::from(self.cfg.max_frames)) as u16;
        if u32::from(clamped) != value {
            crate::scope_log!(warn, "frame count {} out of range, clamped to {}", value, clamped);
        }
        self.frame_count = clamped;
        crate::scope_log!(info, "frames = {}", clamped);
    }
}

impl<B, L, G, D> fmt::Debug for Controller<B, L, G, D>
where
    B: SampleBus,
    L: HostLink,
    G: GainPins,
    D: CycleDelay,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("phase", &self.phase)
            .field("frame_count", &self.frame_count)
            .field("gain", &self.gain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{MockDelay, MockGainPins, MockHostLink, MockSampleBus};

    fn controller() -> Controller<MockSampleBus, MockHostLink, MockGainPins, MockDelay> {
        Controller::new(
            Config::default(),
            MockSampleBus::new(),
            MockHostLink::new(),
            MockGainPins::default(),
            MockDelay::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let cfg = Config {
            max_frames: 0,
            ..Config::default()
        };
        let err = Controller::new(
            cfg,
            MockSampleBus::new(),
            MockHostLink::new(),
            MockGainPins::default(),
            MockDelay::default(),
        )
        .unwrap_err();
        match err {
            ScopeError::Config(e) => assert!(e.is_invalid_setting()),
            _ => panic!("expected config error"),
        }

        let cfg = Config {
            max_frames: MAX_FRAMES + 1,
            ..Config::default()
        };
        assert!(Controller::new(
            cfg,
            MockSampleBus::new(),
            MockHostLink::new(),
            MockGainPins::default(),
            MockDelay::default(),
        )
        .is_err());
    }

    #[test]
    fn test_bring_up_drives_gain_lines() {
        let ctl = controller();
        assert_eq!(ctl.gain(), GainRange::X5);
        assert!(!ctl.gain_pins.line_a);
        assert!(ctl.gain_pins.line_b);
        assert_eq!(ctl.gain_pins.writes, 1);
    }

    #[test]
    fn test_phase_progression() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), Phase::Acquire);
        assert_eq!(ctl.step().unwrap(), Phase::WaitAcquire);
        assert_eq!(ctl.step().unwrap(), Phase::Report);
        assert_eq!(ctl.step().unwrap(), Phase::Exchange);
        assert_eq!(ctl.step().unwrap(), Phase::Handle);
        assert_eq!(ctl.step().unwrap(), Phase::Delay);
        assert_eq!(ctl.step().unwrap(), Phase::Acquire);
    }

    #[test]
    fn test_cycle_without_command() {
        let mut ctl = controller();
        let report = ctl.run_cycle().unwrap();
        assert!(report.exchanged);
        assert!(report.command.is_none());
        assert_eq!(report.frame_count, 1);
        assert_eq!(ctl.bus().last_capture_len(), SAMPLES_PER_FRAME);
        assert_eq!(ctl.link().last_sent().len(), SAMPLES_PER_FRAME);
    }

    #[test]
    fn test_outbound_is_first_frame_at_count_one() {
        let mut ctl = controller();
        ctl.run_cycle().unwrap();
        for (i, &word) in ctl.buffers().outbound().iter().enumerate() {
            assert_eq!(word, i as u16);
        }
    }

    #[test]
    fn test_window_command_rescales_next_capture() {
        let mut ctl = controller();
        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 2, value: 3 }.encode());

        let report = ctl.run_cycle().unwrap();
        assert_eq!(report.frame_count, 3);
        assert_eq!(ctl.frame_count(), 3);

        // Next capture spans three frames, and the outbound frame decimates
        // by the same stride
        ctl.run_cycle().unwrap();
        assert_eq!(ctl.bus().last_capture_len(), 3 * SAMPLES_PER_FRAME);
        for (i, &word) in ctl.buffers().outbound().iter().enumerate() {
            assert_eq!(word, (i * 3) as u16);
        }
    }

    #[test]
    fn test_window_command_clamps_zero_and_oversized_values() {
        let mut ctl = controller();
        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 2, value: 0 }.encode());
        let report = ctl.run_cycle().unwrap();
        assert_eq!(report.frame_count, 1);
        assert_eq!(ctl.bus().last_capture_len(), SAMPLES_PER_FRAME);

        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 2, value: 1_000_000 }.encode());
        let report = ctl.run_cycle().unwrap();
        assert_eq!(report.frame_count, MAX_FRAMES);
    }

    #[test]
    fn test_gain_command_drives_lines() {
        let mut ctl = controller();
        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 1, value: 50 }.encode());
        ctl.run_cycle().unwrap();

        assert_eq!(ctl.gain(), GainRange::X10);
        assert!(ctl.gain_pins.line_a);
        assert!(ctl.gain_pins.line_b);
        assert_eq!(ctl.gain_pins.writes, 2);
    }

    #[test]
    fn test_bad_passcode_changes_nothing() {
        let mut ctl = controller();
        ctl.link_mut()
            .queue_response(&[0xFFFF, 0xFFFF, 0x0200, 0x0300, 0x0000]);
        let report = ctl.run_cycle().unwrap();

        assert!(report.command.is_none());
        assert_eq!(ctl.frame_count(), 1);
        assert_eq!(ctl.gain_pins.writes, 1);
    }

    #[test]
    fn test_unknown_identifier_is_ignored() {
        let mut ctl = controller();
        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 9, value: 7 }.encode());
        let report = ctl.run_cycle().unwrap();

        // The frame verified and parsed, but dispatched to nothing
        assert_eq!(report.command.map(|c| c.identifier), Some(9));
        assert_eq!(ctl.frame_count(), 1);
        assert_eq!(ctl.gain_pins.writes, 1);
    }

    #[test]
    fn test_exchange_start_failure_skips_stale_command() {
        let mut ctl = controller();

        // Cycle 1 delivers a gain command normally
        ctl.link_mut()
            .queue_response(&HostCommand { identifier: 1, value: 50 }.encode());
        ctl.run_cycle().unwrap();
        assert_eq!(ctl.gain_pins.writes, 2);

        // Cycle 2: the exchange never starts, so the stale command words in
        // the inbound buffer must not be dispatched again
        ctl.link_mut().fail_next_transfer();
        let report = ctl.run_cycle().unwrap();
        assert!(!report.exchanged);
        assert!(report.command.is_none());
        assert_eq!(ctl.gain_pins.writes, 2);
    }

    #[test]
    fn test_capture_timeout_is_fatal() {
        let cfg = Config {
            wait_polls: 5,
            ..Config::default()
        };
        let mut bus = MockSampleBus::new();
        bus.set_completion_polls(u32::MAX);
        let mut ctl = Controller::new(
            cfg,
            bus,
            MockHostLink::new(),
            MockGainPins::default(),
            MockDelay::default(),
        )
        .unwrap();
        let err = ctl.run_cycle().unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_delay_runs_every_cycle() {
        let mut ctl = controller();
        ctl.run_cycle().unwrap();
        ctl.run_cycle().unwrap();
        assert_eq!(ctl.delay.pauses, 2);
    }
}
