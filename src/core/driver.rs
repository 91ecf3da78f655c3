use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::{
    error::{SimError, SimResult},
    observer::Observer,
    snapshot::Snapshot,
    state::{ProcessRecord, ProcessSlot, Ticks},
};
use crate::{scheduler::Policy, sim::ProcessDescriptor};

/// The simulation engine: owns the clock, the process table and the
/// snapshot history, and drives a [`Policy`] one allocation at a time.
pub struct Engine<P: Policy> {
    policy: P,
    processes: Vec<ProcessRecord>,
    now: Ticks,
    history: Vec<Snapshot>,
    observer: Observer,
    terminated: bool,
}

impl<P: Policy> Engine<P> {
    /// Copy `descriptors` into a fresh process table.
    ///
    /// Fails on an empty id, a zero-length burst, or a repeated id. The policy
    /// configuration is not checked here so that it can still be set through
    /// [`policy_mut`](Self::policy_mut).
    pub fn new(descriptors: &[ProcessDescriptor], policy: P) -> SimResult<Self> {
        let mut seen = FxHashSet::default();
        for descriptor in descriptors {
            descriptor.validate()?;
            if !seen.insert(descriptor.id.as_str()) {
                return Err(SimError::DuplicateProcessId(descriptor.id.clone()));
            }
        }

        let processes: Vec<ProcessRecord> = descriptors
            .iter()
            .map(ProcessDescriptor::instantiate)
            .collect();
        let observer = Observer::new(&processes);

        Ok(Self {
            policy,
            processes,
            now: 0,
            history: Vec::new(),
            observer,
            terminated: false,
        })
    }

    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(ProcessRecord::is_finished)
    }

    /// Perform one allocation, or record the terminal snapshot.
    ///
    /// Returns `Ok(false)` once every process has finished; further calls are
    /// no-ops.
    pub fn step(&mut self) -> SimResult<bool> {
        if self.all_finished() {
            if !self.terminated {
                let view = self.policy.build_view(&self.processes, self.now);
                self.history
                    .push(Snapshot::capture(self.now, &self.processes, None, view));
                self.terminated = true;
                info!(
                    policy = self.policy.name(),
                    steps = self.observer.steps(),
                    time = self.now,
                    "simulation finished"
                );
            }
            return Ok(false);
        }

        self.policy.check_config()?;
        let slot = self.select()?;
        let granted = self.grant(slot)?;

        let process = &self.processes[slot];
        // Overshooting a finished process burns the tick without serving it
        let advance = if process.is_finished() {
            granted
        } else {
            granted.min(process.remaining_time())
        };

        let view = self.policy.build_view(&self.processes, self.now);
        self.history.push(Snapshot::capture(
            self.now,
            &self.processes,
            Some((process, advance)),
            view,
        ));
        debug!(
            time = self.now,
            process = %process.id,
            quantum = advance,
            "allocating"
        );

        let dispatched_at = self.now;
        self.now += advance;
        self.processes[slot].allocate(advance, dispatched_at);
        self.observer.observe(self.now, &self.processes);

        Ok(true)
    }

    /// Step until every process has finished and return the full history.
    pub fn run(&mut self) -> SimResult<&[Snapshot]> {
        while self.step()? {}
        Ok(&self.history)
    }

    /// Like [`run`](Self::run), but give up after `max_steps` allocations.
    pub fn run_bounded(&mut self, max_steps: usize) -> SimResult<&[Snapshot]> {
        for _ in 0..max_steps {
            if !self.step()? {
                return Ok(&self.history);
            }
        }

        if !self.all_finished() {
            warn!(max_steps, time = self.now, "step limit reached");
            return Err(SimError::StepLimitExceeded(max_steps));
        }
        self.step()?;
        Ok(&self.history)
    }

    fn select(&mut self) -> SimResult<ProcessSlot> {
        let Some(slot) = self.policy.select_next(&self.processes, self.now) else {
            let unfinished = self.processes.iter().filter(|p| !p.is_finished()).count();
            warn!(
                policy = self.policy.name(),
                time = self.now,
                unfinished,
                "no runnable process"
            );
            return Err(SimError::NoRunnableProcess {
                time: self.now,
                unfinished,
            });
        };

        let process = self
            .processes
            .get(slot)
            .ok_or(SimError::UnknownProcess(slot))?;
        let servable = !process.is_finished() || self.policy.allows_overshoot();
        if !process.is_arrived(self.now) || !servable {
            return Err(SimError::NotRunnable {
                id: process.id.clone(),
                time: self.now,
            });
        }

        Ok(slot)
    }

    // A zero grant would leave the clock and the process where they are
    fn grant(&mut self, slot: ProcessSlot) -> SimResult<Ticks> {
        let process = &self.processes[slot];
        let quantum = self.policy.quantum_for(process);
        match Ticks::try_from(quantum) {
            Ok(0) => {
                warn!(process = %process.id, "empty allocation");
                Err(SimError::EmptyAllocation {
                    id: process.id.clone(),
                })
            }
            Ok(ticks) => Ok(ticks),
            Err(_) => {
                warn!(process = %process.id, quantum, "negative allocation");
                Err(SimError::NegativeAllocation {
                    id: process.id.clone(),
                    quantum,
                })
            }
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn into_history(self) -> Vec<Snapshot> {
        self.history
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}
