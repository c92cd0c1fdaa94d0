use std::collections::VecDeque;

use fulfill_core::{FromRecord, RecordResult, Tokenizer};
use fulfill_inventory::Stock;
use fulfill_orders::{FillLog, Order};

/// An order taken off the front of a station's queue.
#[derive(Debug, PartialEq, Eq)]
pub struct Release {
    pub order: Order,
    /// Whether the order's requests for this station's item were all filled
    /// (or it had none). False means it left because the stock ran out.
    pub filled: bool,
}

/// A station holding one stock and the queue of orders waiting on it.
#[derive(Debug)]
pub struct Station {
    stock: Stock,
    queue: VecDeque<Order>,
}

impl Station {
    pub fn new(stock: Stock) -> Self {
        Self {
            stock,
            queue: VecDeque::new(),
        }
    }

    /// Build a station from a stock record.
    pub fn parse(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        Stock::parse(record, tokenizer).map(Self::new)
    }

    pub fn name(&self) -> &str {
        self.stock.name()
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&Order> {
        self.queue.front()
    }

    /// Queue `order` behind everything already waiting.
    pub fn enqueue(&mut self, order: Order) -> &mut Self {
        tracing::trace!(station = %self.stock.name(), order = %order.label(), "enqueued");
        self.queue.push_back(order);
        self
    }

    /// Fill the front order against this station's stock. No-op when idle.
    pub fn fill(&mut self, log: &mut dyn FillLog) {
        if let Some(front) = self.queue.front_mut() {
            front.fill_item(&mut self.stock, log);
        }
    }

    /// Whether the front order may leave.
    ///
    /// True when its requests for this item are settled, or when the stock is
    /// exhausted and nothing more can be done for anyone.
    pub fn has_an_order_to_release(&self) -> bool {
        match self.queue.front() {
            None => false,
            Some(front) => self.stock.is_exhausted() || front.is_item_filled(self.stock.name()),
        }
    }

    /// Take the front order off the queue.
    pub fn pop(&mut self) -> Option<Release> {
        let order = self.queue.pop_front()?;
        let filled = order.is_item_filled(self.stock.name());
        if !filled {
            tracing::debug!(
                station = %self.stock.name(),
                order = %order.label(),
                "released unfilled, stock exhausted"
            );
        }
        Some(Release { order, filled })
    }

    /// Take one unit out of stock outside of order fulfillment.
    pub fn decrement(&mut self) -> &mut Self {
        self.stock.decrement();
        self
    }
}

impl FromRecord for Station {
    fn from_record(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        Self::parse(record, tokenizer)
    }
}
