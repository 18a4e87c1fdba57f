use std::collections::VecDeque;

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    canvas::StrokeCanvas,
    chords::ChordTable,
    error::ConfigError,
    pins::PinTable,
    residual::Residual,
    verboser::{Message, Verboser},
};

/// Bounded FIFO of the last chosen pins; membership excludes a pin from
/// reselection. Capacity zero keeps the window permanently empty.
pub struct RecentWindow {
    pins: VecDeque<usize>,
    capacity: usize,
}

impl RecentWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            pins: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn contains(&self, pin: usize) -> bool {
        self.pins.contains(&pin)
    }

    pub fn push(&mut self, pin: usize) {
        if self.capacity == 0 {
            return;
        }
        if self.pins.len() == self.capacity {
            self.pins.pop_front();
        }
        self.pins.push_back(pin);
    }
}

struct Candidate {
    difference: usize,
    pin: usize,
    score: f64,
}

/// The greedy selection loop: at every step, move to the pin whose chord
/// removes the most remaining ink debt.
pub struct Sequencer<'a> {
    pins: &'a PinTable,
    chords: &'a ChordTable,
    residual: Residual,
    window: RecentWindow,
    sequence: Vec<usize>,
    current: usize,
    line_width: f64,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        pins: &'a PinTable,
        chords: &'a ChordTable,
        residual: Residual,
        line_width: f64,
        recent_window: usize,
    ) -> Self {
        Self {
            pins,
            chords,
            residual,
            window: RecentWindow::new(recent_window),
            sequence: vec![0],
            current: 0,
            line_width,
        }
    }

    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Scores every candidate in parallel. Scoring only reads the residual;
    /// the comparator is a total order (greater score, then smaller
    /// difference), so the parallel reduction lands on the same pin a
    /// sequential first-strictly-greater scan would.
    fn best_candidate(&self) -> Option<Candidate> {
        let count = self.chords.pin_count();
        self.chords
            .distancer()
            .differences()
            .into_par_iter()
            .filter_map(|difference| {
                let pin = (self.current + difference) % count;
                if self.window.contains(pin) {
                    return None;
                }
                Some(Candidate {
                    difference,
                    pin,
                    score: self.residual.score(self.chords.chord(self.current, pin)),
                })
            })
            .reduce_with(|best, other| {
                if other.score > best.score
                    || (other.score == best.score && other.difference < best.difference)
                {
                    other
                } else {
                    best
                }
            })
    }

    /// One transition: pick the argmax chord, debit the residual under it,
    /// draw it, advance the window and the current pin.
    pub fn step(&mut self, canvas: &mut StrokeCanvas) -> Result<usize, ConfigError> {
        let best = self.best_candidate().ok_or(ConfigError::WindowExhausted)?;
        let chords = self.chords;
        let chord = chords.chord(self.current, best.pin);
        self.sequence.push(best.pin);
        self.residual.darken(chord, self.line_width);
        canvas.stroke(self.pins.pins()[self.current], self.pins.pins()[best.pin]);
        self.window.push(best.pin);
        self.current = best.pin;
        Ok(best.pin)
    }

    /// Runs exactly `steps` transitions; there is no convergence cutoff.
    pub fn run(
        mut self,
        steps: usize,
        canvas: &mut StrokeCanvas,
        verboser: &mut impl Verboser,
    ) -> Result<Vec<usize>, ConfigError> {
        for step in 0..steps {
            verboser.verbose(Message::Computing(step));
            self.step(canvas)?;
        }
        Ok(self.sequence)
    }
}
