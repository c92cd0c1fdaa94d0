use serde::Serialize;

use fulfill_core::{FromRecord, RecordError, RecordResult, Tokenizer};
use fulfill_inventory::Stock;

use crate::fill::{FillEntry, FillLog, FillOutcome};

/// One requested item within an order.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ItemRequest {
    name: String,
    /// Set once, when the request is filled.
    serial_number: Option<u64>,
}

impl ItemRequest {
    fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial_number: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_filled(&self) -> bool {
        self.serial_number.is_some()
    }

    pub fn serial_number(&self) -> Option<u64> {
        self.serial_number
    }
}

/// A customer order moving along the line.
///
/// The request list is fixed at construction; only the fill state of each
/// request changes afterwards. Not `Clone`: an order has exactly one owner at a
/// time and moves between queues by value.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Order {
    customer: String,
    product: String,
    requests: Vec<ItemRequest>,
}

impl Order {
    /// Build an order for `customer`/`product` requesting `items`.
    pub fn new<I, S>(
        customer: impl Into<String>,
        product: impl Into<String>,
        items: I,
    ) -> RecordResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let customer = customer.into();
        let product = product.into();
        let requests: Vec<ItemRequest> = items.into_iter().map(ItemRequest::pending).collect();

        if requests.is_empty() {
            return Err(RecordError::empty_order(customer, product));
        }

        Ok(Self {
            customer,
            product,
            requests,
        })
    }

    /// Parse `customer|product|item|item...`.
    pub fn parse(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        let mut cursor = tokenizer.cursor(record);
        let customer = cursor.next_field("customer name")?;
        let product = cursor.next_field("product name")?;
        let items = cursor.rest("item name")?;

        Self::new(customer, product, items)
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn requests(&self) -> &[ItemRequest] {
        &self.requests
    }

    /// `customer[product]`.
    pub fn label(&self) -> String {
        format!("{}[{}]", self.customer, self.product)
    }

    /// Try to fill every request matching `stock`'s item, in request order.
    ///
    /// All matching requests are handled in one call, each one taking its own
    /// unit and serial number. Nothing is mutated for requests that are already
    /// filled or when the stock has run out; those outcomes are only logged.
    pub fn fill_item(&mut self, stock: &mut Stock, log: &mut dyn FillLog) {
        for request in self.requests.iter_mut() {
            if request.name != stock.name() {
                continue;
            }

            let (outcome, serial_number) = match request.serial_number {
                Some(serial) => (FillOutcome::AlreadyFilled, serial),
                None if stock.is_exhausted() => (FillOutcome::OutOfStock, 0),
                None => {
                    let serial = stock.serial_number();
                    request.serial_number = Some(serial);
                    stock.decrement();
                    (FillOutcome::Filled, serial)
                }
            };

            tracing::debug!(
                customer = %self.customer,
                product = %self.product,
                item = %request.name,
                serial_number,
                ?outcome,
                "fill attempt"
            );
            log.record(FillEntry::new(
                outcome,
                &self.customer,
                &self.product,
                &request.name,
                serial_number,
            ));
        }
    }

    /// True iff every request has been filled.
    pub fn is_filled(&self) -> bool {
        self.requests.iter().all(ItemRequest::is_filled)
    }

    /// True iff every request for `item` has been filled.
    ///
    /// Vacuously true when the order never asked for `item`.
    pub fn is_item_filled(&self, item: &str) -> bool {
        self.requests
            .iter()
            .filter(|r| r.name == item)
            .all(ItemRequest::is_filled)
    }

    /// Names of the requests still waiting for stock.
    pub fn missing_items(&self) -> impl Iterator<Item = &str> {
        self.requests
            .iter()
            .filter(|r| !r.is_filled())
            .map(ItemRequest::name)
    }
}

impl FromRecord for Order {
    fn from_record(record: &str, tokenizer: &Tokenizer) -> RecordResult<Self> {
        Self::parse(record, tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulfill_core::ParseError;

    fn order(items: &[&str]) -> Order {
        Order::new("Ann", "Desk", items.iter().copied()).unwrap()
    }

    #[test]
    fn parse_reads_customer_product_and_items() {
        let order = Order::parse("Ann|Desk|Leg|Leg|Top", &Tokenizer::default()).unwrap();

        assert_eq!(order.customer(), "Ann");
        assert_eq!(order.product(), "Desk");
        let names: Vec<_> = order.requests().iter().map(ItemRequest::name).collect();
        assert_eq!(names, ["Leg", "Leg", "Top"]);
        assert!(order.requests().iter().all(|r| !r.is_filled()));
    }

    #[test]
    fn parse_without_items_is_empty_order() {
        let err = Order::parse("Ann|Desk", &Tokenizer::default()).unwrap_err();
        assert_eq!(err, RecordError::empty_order("Ann", "Desk"));
        assert!(err.is_empty_order());
    }

    #[test]
    fn parse_without_product_is_parse_error() {
        let err = Order::parse("Ann", &Tokenizer::default()).unwrap_err();
        assert_eq!(err, RecordError::Parse(ParseError::missing("product name")));
    }

    #[test]
    fn parse_rejects_blank_item_field() {
        let err = Order::parse("Ann|Desk|Leg||Top", &Tokenizer::default()).unwrap_err();
        assert_eq!(err, RecordError::Parse(ParseError::empty("item name")));
    }

    #[test]
    fn label_joins_customer_and_product() {
        assert_eq!(order(&["Leg"]).label(), "Ann[Desk]");
    }

    #[test]
    fn fill_item_stamps_current_serial_and_decrements() {
        let mut order = order(&["Leg", "Top"]);
        let mut stock = Stock::new("Leg", 500, 4, "Table leg");
        let mut log: Vec<FillEntry> = Vec::new();

        order.fill_item(&mut stock, &mut log);

        assert_eq!(order.requests()[0].serial_number(), Some(500));
        assert_eq!(order.requests()[1].serial_number(), None);
        assert_eq!(stock.quantity(), 3);
        assert_eq!(stock.serial_number(), 501);
        assert_eq!(log, vec![FillEntry::new(FillOutcome::Filled, "Ann", "Desk", "Leg", 500)]);
        assert!(order.is_item_filled("Leg"));
        assert!(!order.is_filled());
    }

    #[test]
    fn fill_item_drains_duplicate_requests_until_stock_runs_out() {
        let mut order = order(&["Bolt", "Bolt"]);
        let mut stock = Stock::new("Bolt", 100, 1, "Bolt");
        let mut log: Vec<FillEntry> = Vec::new();

        order.fill_item(&mut stock, &mut log);

        assert_eq!(
            log.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                " Filled Ann [Desk][Bolt][100]".to_string(),
                " Unable to fill Ann [Desk][Bolt][0] out of stock".to_string(),
            ]
        );
        assert_eq!(stock.quantity(), 0);
        assert_eq!(stock.serial_number(), 101);
        assert!(!order.is_filled());
        assert!(!order.is_item_filled("Bolt"));
    }

    #[test]
    fn fill_item_again_only_reports_already_filled() {
        let mut order = order(&["Leg"]);
        let mut stock = Stock::new("Leg", 10, 5, "Table leg");
        let mut log: Vec<FillEntry> = Vec::new();
        order.fill_item(&mut stock, &mut log);
        log.clear();

        order.fill_item(&mut stock, &mut log);

        assert_eq!(
            log,
            vec![FillEntry::new(FillOutcome::AlreadyFilled, "Ann", "Desk", "Leg", 10)]
        );
        assert_eq!(stock.quantity(), 4);
        assert_eq!(stock.serial_number(), 11);
        assert_eq!(order.requests()[0].serial_number(), Some(10));
    }

    #[test]
    fn already_filled_wins_over_out_of_stock() {
        let mut order = order(&["Leg"]);
        let mut stock = Stock::new("Leg", 10, 1, "Table leg");
        let mut log: Vec<FillEntry> = Vec::new();
        order.fill_item(&mut stock, &mut log);
        log.clear();

        order.fill_item(&mut stock, &mut log);

        assert_eq!(log[0].outcome, FillOutcome::AlreadyFilled);
    }

    #[test]
    fn fill_item_ignores_other_items() {
        let mut order = order(&["Top"]);
        let mut stock = Stock::new("Leg", 10, 1, "Table leg");
        let mut log: Vec<FillEntry> = Vec::new();

        order.fill_item(&mut stock, &mut log);

        assert!(log.is_empty());
        assert_eq!(stock.quantity(), 1);
    }

    #[test]
    fn is_item_filled_is_vacuous_for_unrequested_item() {
        let order = order(&["X"]);
        assert!(order.is_item_filled("Y"));
        assert!(!order.is_item_filled("X"));
    }

    #[test]
    fn missing_items_lists_pending_requests() {
        let mut order = order(&["Leg", "Top", "Leg"]);
        let mut stock = Stock::new("Top", 1, 1, "Table top");
        order.fill_item(&mut stock, &mut Vec::<FillEntry>::new());

        assert_eq!(order.missing_items().collect::<Vec<_>>(), ["Leg", "Leg"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn item_names() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(prop::sample::select(vec!["A", "B", "C"]), 1..10)
                .prop_map(|v| v.into_iter().map(str::to_owned).collect())
        }

        proptest! {
            /// Property: one visit fills matching requests in order, one unit and
            /// one serial each, until the stock runs out.
            #[test]
            fn single_visit_consumes_min_of_demand_and_stock(
                items in item_names(),
                seed in 0u64..10_000,
                quantity in 0u32..6
            ) {
                let mut order = Order::new("Cust", "Prod", items.clone()).unwrap();
                let mut stock = Stock::new("A", seed, quantity, "a");
                let mut log: Vec<FillEntry> = Vec::new();

                order.fill_item(&mut stock, &mut log);

                let demand = items.iter().filter(|i| *i == "A").count() as u32;
                let taken = demand.min(quantity);
                prop_assert_eq!(stock.quantity(), quantity - taken);
                prop_assert_eq!(stock.serial_number(), seed + u64::from(taken));
                prop_assert_eq!(log.len() as u32, demand);
                prop_assert_eq!(log.iter().filter(|e| e.is_filled()).count() as u32, taken);

                let serials: Vec<u64> = order
                    .requests()
                    .iter()
                    .filter_map(ItemRequest::serial_number)
                    .collect();
                let expected: Vec<u64> = (seed..seed + u64::from(taken)).collect();
                prop_assert_eq!(serials, expected);

                prop_assert!(order.is_item_filled("Z"));
                prop_assert_eq!(
                    order.is_filled(),
                    order.requests().iter().all(ItemRequest::is_filled)
                );
            }

            /// Property: a second visit never changes stock or stamped serials.
            #[test]
            fn revisit_after_fill_is_idempotent(
                items in item_names(),
                quantity in 10u32..20
            ) {
                let mut order = Order::new("Cust", "Prod", items).unwrap();
                let mut stock = Stock::new("B", 1, quantity, "b");
                order.fill_item(&mut stock, &mut Vec::<FillEntry>::new());

                let quantity_after = stock.quantity();
                let serials: Vec<_> = order.requests().iter().map(ItemRequest::serial_number).collect();
                let mut log: Vec<FillEntry> = Vec::new();
                order.fill_item(&mut stock, &mut log);

                prop_assert_eq!(stock.quantity(), quantity_after);
                prop_assert_eq!(
                    order.requests().iter().map(ItemRequest::serial_number).collect::<Vec<_>>(),
                    serials
                );
                prop_assert!(log.iter().all(|e| e.outcome == FillOutcome::AlreadyFilled));
            }
        }
    }
}
