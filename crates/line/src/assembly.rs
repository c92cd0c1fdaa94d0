//! The assembly line: stations in order and the orders moving between them.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use thiserror::Error;

use fulfill_orders::{FillLog, Order};
use fulfill_station::Station;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("station `{0}` appears more than once on the line")]
    DuplicateStation(String),
}

/// Counters for a finished (or partially run) line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    pub steps: u64,
    pub completed: usize,
    pub incomplete: usize,
}

/// Everything the line owned, handed back once it is no longer needed.
#[derive(Debug)]
pub struct LineOutcome {
    pub stations: Vec<Station>,
    pub completed: Vec<Order>,
    pub incomplete: Vec<Order>,
}

/// Stations in line order plus the orders flowing through them.
///
/// Station `i` forwards released orders to station `i + 1`; orders released by
/// the last station are finished. Each order sits in exactly one place at a
/// time: the entry queue, one station's queue, or a finished list.
#[derive(Debug)]
pub struct AssemblyLine {
    stations: Vec<Station>,
    pending: VecDeque<Order>,
    completed: Vec<Order>,
    incomplete: Vec<Order>,
    steps: u64,
}

impl AssemblyLine {
    pub fn new(stations: Vec<Station>) -> Result<Self, LineError> {
        ensure_unique_names(&stations)?;

        Ok(Self {
            stations,
            pending: VecDeque::new(),
            completed: Vec::new(),
            incomplete: Vec::new(),
            steps: 0,
        })
    }

    /// Queue orders to enter the line, one per step, in the given order.
    pub fn load(&mut self, orders: impl IntoIterator<Item = Order>) -> &mut Self {
        self.pending.extend(orders);
        self
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name() == name)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn completed(&self) -> &[Order] {
        &self.completed
    }

    pub fn incomplete(&self) -> &[Order] {
        &self.incomplete
    }

    pub fn has_work(&self) -> bool {
        !self.pending.is_empty() || self.stations.iter().any(|s| !s.is_idle())
    }

    pub fn summary(&self) -> LineSummary {
        LineSummary {
            steps: self.steps,
            completed: self.completed.len(),
            incomplete: self.incomplete.len(),
        }
    }

    /// Advance the line by one step. Returns whether work remains.
    ///
    /// A step admits the next waiting order, lets every station fill its
    /// front order, then moves every releasable front order one station on.
    /// Orders moved during a step are not filled again until the next one.
    pub fn step(&mut self, log: &mut dyn FillLog) -> bool {
        if let Some(order) = self.pending.pop_front() {
            self.forward(0, order);
        }

        for station in &mut self.stations {
            station.fill(log);
        }

        let mut moved = Vec::new();
        for (index, station) in self.stations.iter_mut().enumerate() {
            if !station.has_an_order_to_release() {
                continue;
            }
            if let Some(release) = station.pop() {
                moved.push((index + 1, release.order));
            }
        }
        for (next, order) in moved {
            self.forward(next, order);
        }

        self.steps += 1;
        self.has_work()
    }

    /// Step until every order has left the line.
    ///
    /// Always terminates: after a fill, each front order is either settled for
    /// that station or the station is out of stock, so every busy station
    /// releases one order per step.
    pub fn run(&mut self, log: &mut dyn FillLog) -> LineSummary {
        while self.has_work() {
            self.step(log);
        }
        let summary = self.summary();
        tracing::info!(
            steps = summary.steps,
            completed = summary.completed,
            incomplete = summary.incomplete,
            "assembly line finished"
        );
        summary
    }

    pub fn into_outcome(self) -> LineOutcome {
        LineOutcome {
            stations: self.stations,
            completed: self.completed,
            incomplete: self.incomplete,
        }
    }

    fn forward(&mut self, index: usize, order: Order) {
        match self.stations.get_mut(index) {
            Some(station) => {
                station.enqueue(order);
            }
            None => self.finish(order),
        }
    }

    fn finish(&mut self, order: Order) {
        if order.is_filled() {
            tracing::debug!(order = %order.label(), "order completed");
            self.completed.push(order);
        } else {
            let missing: Vec<&str> = order.missing_items().collect();
            tracing::warn!(order = %order.label(), missing = ?missing, "order left the line incomplete");
            self.incomplete.push(order);
        }
    }
}

fn ensure_unique_names(stations: &[Station]) -> Result<(), LineError> {
    let mut seen = HashSet::new();
    for station in stations {
        if !seen.insert(station.name()) {
            return Err(LineError::DuplicateStation(station.name().to_owned()));
        }
    }
    Ok(())
}
