//! Cheapest-chain resolver.
//!
//! Queries every chain's RPC endpoint for its gas price concurrently, prices a plain
//! native transfer on each, and picks the minimum. Each query converts its own failure
//! into an outcome before the join, so one bad endpoint only drops its own chain.
//! The fan-out is a full barrier: every query finishes (or fails) before selection.
//!
//! Wide event logging: one warn event per failed chain, one summary event per fan-out.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use num_bigint::BigUint;

use crate::chains::{ChainDescriptor, CHAINS};
use crate::error::AppError;
use crate::rpc::GasPriceSource;

/// Gas consumed by a plain native-asset transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// A chain's gas price and the derived transfer cost at query time. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasQuote<'a> {
    pub chain: &'a ChainDescriptor,
    /// Wei per unit of gas.
    pub gas_price: BigUint,
    /// `gas_price * TRANSFER_GAS_LIMIT`, in wei.
    pub estimated_cost: BigUint,
}

impl<'a> GasQuote<'a> {
    pub fn new(chain: &'a ChainDescriptor, gas_price: BigUint) -> Self {
        let estimated_cost = &gas_price * TRANSFER_GAS_LIMIT;
        Self {
            chain,
            gas_price,
            estimated_cost,
        }
    }
}

/// Result of querying a single chain during a fan-out.
#[derive(Debug)]
pub struct ChainQuoteOutcome<'a> {
    pub chain: &'a ChainDescriptor,
    pub result: Result<GasQuote<'a>, AppError>,
}

/// Picks the quote with the smallest estimated cost. On ties the first one wins.
pub fn select_cheapest<'a>(quotes: impl IntoIterator<Item = GasQuote<'a>>) -> Option<GasQuote<'a>> {
    quotes.into_iter().reduce(|best, quote| {
        if quote.estimated_cost < best.estimated_cost {
            quote
        } else {
            best
        }
    })
}

#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn GasPriceSource>,
}

impl Resolver {
    pub fn new(source: Arc<dyn GasPriceSource>) -> Self {
        Self { source }
    }

    /// Queries every chain concurrently and returns one outcome per chain, in input order.
    pub async fn quote_all<'a>(&self, chains: &'a [ChainDescriptor]) -> Vec<ChainQuoteOutcome<'a>> {
        let start = Instant::now();
        let outcomes = join_all(chains.iter().map(|chain| self.quote(chain))).await;
        let answered = outcomes.iter().filter(|o| o.result.is_ok()).count();

        tracing::info!(
            job = "gas_quotes",
            chains = chains.len(),
            answered = answered,
            failed = chains.len() - answered,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        outcomes
    }

    /// Returns the cheapest chain among `chains`, or `None` if no chain answered.
    pub async fn cheapest_among<'a>(&self, chains: &'a [ChainDescriptor]) -> Option<GasQuote<'a>> {
        let outcomes = self.quote_all(chains).await;
        select_cheapest(outcomes.into_iter().filter_map(|o| o.result.ok()))
    }

    /// Returns the cheapest registered chain, or `None` if no chain answered.
    pub async fn cheapest_chain(&self) -> Option<GasQuote<'static>> {
        self.cheapest_among(CHAINS).await
    }

    async fn quote<'a>(&self, chain: &'a ChainDescriptor) -> ChainQuoteOutcome<'a> {
        let start = Instant::now();
        let result = self
            .source
            .gas_price(chain.rpc_url)
            .await
            .map(|gas_price| GasQuote::new(chain, gas_price));

        match &result {
            Ok(quote) => tracing::debug!(
                job = "gas_quote",
                chain = chain.name,
                chain_id = chain.chain_id,
                gas_price = %quote.gas_price,
                duration_ms = start.elapsed().as_millis() as u64,
                outcome = "success",
            ),
            Err(e) => tracing::warn!(
                job = "gas_quote",
                chain = chain.name,
                chain_id = chain.chain_id,
                rpc_url = chain.rpc_url,
                duration_ms = start.elapsed().as_millis() as u64,
                outcome = "error",
                error = %e,
                "failed to fetch gas price"
            ),
        }

        ChainQuoteOutcome { chain, result }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::rpc::parse_quantity;

    use super::*;

    enum Reply {
        Result(&'static str),
        Delayed(&'static str, Duration),
        Fail,
    }

    /// Gas source answering from a table keyed by RPC URL and recording each call.
    struct FakeSource {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(replies: impl IntoIterator<Item = (&'static str, Reply)>) -> Arc<Self> {
            Arc::new(Self {
                replies: replies.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GasPriceSource for FakeSource {
        async fn gas_price(&self, rpc_url: &str) -> Result<BigUint, AppError> {
            self.calls.lock().unwrap().push(rpc_url.to_string());
            match self.replies.get(rpc_url) {
                Some(Reply::Result(hex)) => parse_quantity(hex),
                Some(Reply::Delayed(hex, delay)) => {
                    tokio::time::sleep(*delay).await;
                    parse_quantity(hex)
                }
                Some(Reply::Fail) | None => Err(AppError::Rpc("connection refused".into())),
            }
        }
    }

    const fn chain(name: &'static str, chain_id: u64, rpc_url: &'static str) -> ChainDescriptor {
        ChainDescriptor {
            name,
            chain_id,
            chain_id_hex: "0x0",
            rpc_url,
            native_symbol: "ETH",
            block_explorer_url: None,
        }
    }

    static ABC: [ChainDescriptor; 3] = [
        chain("A", 1, "http://a"),
        chain("B", 2, "http://b"),
        chain("C", 3, "http://c"),
    ];

    #[test]
    fn estimated_cost_is_exact() {
        let quote = GasQuote::new(&ABC[0], BigUint::from(123_456_789_012_345u64));
        assert_eq!(
            quote.estimated_cost.to_string(),
            "2592592569259245000"
        );
    }

    #[test]
    fn estimated_cost_beyond_u256() {
        let gas_price = BigUint::from(1u32) << 256u32;
        let quote = GasQuote::new(&ABC[0], gas_price.clone());
        assert_eq!(quote.estimated_cost, gas_price * 21_000u32);
        assert!(quote.estimated_cost.bits() > 256);
    }

    #[test]
    fn select_cheapest_of_empty_is_none() {
        assert!(select_cheapest(Vec::new()).is_none());
    }

    #[test]
    fn select_cheapest_keeps_first_on_tie() {
        let quotes = vec![
            GasQuote::new(&ABC[0], BigUint::from(5u32)),
            GasQuote::new(&ABC[1], BigUint::from(3u32)),
            GasQuote::new(&ABC[2], BigUint::from(3u32)),
        ];
        assert_eq!(select_cheapest(quotes).unwrap().chain.name, "B");
    }

    #[tokio::test]
    async fn picks_cheapest_and_skips_failures() {
        let source = FakeSource::new([
            ("http://a", Reply::Result("0x3b9aca00")),
            ("http://b", Reply::Fail),
            ("http://c", Reply::Result("0x77359400")),
        ]);
        let resolver = Resolver::new(source.clone());

        let best = resolver.cheapest_among(&ABC).await.unwrap();
        assert_eq!(best.chain.name, "A");
        assert_eq!(best.gas_price, BigUint::from(1_000_000_000u64));
        assert_eq!(best.estimated_cost, BigUint::from(21_000_000_000_000u64));
        assert_eq!(source.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn all_failures_yield_none() {
        let source = FakeSource::new([
            ("http://a", Reply::Fail),
            ("http://b", Reply::Fail),
            ("http://c", Reply::Fail),
        ]);
        let resolver = Resolver::new(source);

        assert!(resolver.cheapest_among(&ABC).await.is_none());
    }

    #[tokio::test]
    async fn single_success_wins_regardless_of_cost() {
        let source = FakeSource::new([
            ("http://a", Reply::Fail),
            ("http://b", Reply::Result("0xffffffffffffffffffffffffffffffff")),
            ("http://c", Reply::Fail),
        ]);
        let resolver = Resolver::new(source);

        let best = resolver.cheapest_among(&ABC).await.unwrap();
        assert_eq!(best.chain.name, "B");
    }

    #[tokio::test]
    async fn malformed_results_are_excluded() {
        let source = FakeSource::new([
            ("http://a", Reply::Result("42")),
            ("http://b", Reply::Result("0x")),
            ("http://c", Reply::Result("0x2")),
        ]);
        let resolver = Resolver::new(source);

        let best = resolver.cheapest_among(&ABC).await.unwrap();
        assert_eq!(best.chain.name, "C");
    }

    #[tokio::test]
    async fn ties_resolve_to_registry_order() {
        let source = FakeSource::new([
            ("http://a", Reply::Result("0x9")),
            ("http://b", Reply::Result("0x5")),
            ("http://c", Reply::Result("0x5")),
        ]);
        let resolver = Resolver::new(source);

        let best = resolver.cheapest_among(&ABC).await.unwrap();
        assert_eq!(best.chain.name, "B");
    }

    #[tokio::test]
    async fn waits_for_slow_chains_before_selecting() {
        let source = FakeSource::new([
            ("http://a", Reply::Delayed("0x1", Duration::from_millis(100))),
            ("http://b", Reply::Result("0x64")),
            ("http://c", Reply::Result("0x65")),
        ]);
        let resolver = Resolver::new(source);

        let best = resolver.cheapest_among(&ABC).await.unwrap();
        assert_eq!(best.chain.name, "A");
    }

    #[tokio::test]
    async fn chains_are_queried_concurrently() {
        let delay = Duration::from_millis(100);
        let source = FakeSource::new([
            ("http://a", Reply::Delayed("0x3", delay)),
            ("http://b", Reply::Delayed("0x2", delay)),
            ("http://c", Reply::Delayed("0x1", delay)),
        ]);
        let resolver = Resolver::new(source);

        let start = Instant::now();
        let best = resolver.cheapest_among(&ABC).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(best.chain.name, "C");
        // one after another would take at least 300ms
        assert!(elapsed < Duration::from_millis(250), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn quote_all_preserves_registry_order() {
        let source = FakeSource::new([
            ("http://a", Reply::Delayed("0x3", Duration::from_millis(50))),
            ("http://b", Reply::Fail),
            ("http://c", Reply::Result("0x1")),
        ]);
        let resolver = Resolver::new(source);

        let outcomes = resolver.quote_all(&ABC).await;
        let names: Vec<&str> = outcomes.iter().map(|o| o.chain.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }

    #[tokio::test]
    async fn cheapest_chain_queries_every_registered_chain() {
        let source = FakeSource::new([]);
        let resolver = Resolver::new(source.clone());

        assert!(resolver.cheapest_chain().await.is_none());

        let mut called = source.calls.lock().unwrap().clone();
        let mut expected: Vec<String> = CHAINS.iter().map(|c| c.rpc_url.to_string()).collect();
        called.sort();
        expected.sort();
        assert_eq!(called, expected);
    }
}
