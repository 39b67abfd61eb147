//! Behaviour tests for the market gateway operations.
//!
//! These verify WHAT each operation asks the upstream for and how the answer
//! is mapped into domain types.

mod support;

use geckogate_core::{CoinId, Supply, TimeRange};
use support::{details_body, gateway, market_row, markets_body, ScriptedHttpClient};

const INTERVAL_MS: u64 = 2_000;

fn coin(id: &str) -> CoinId {
    CoinId::parse(id).expect("valid id")
}

// =============================================================================
// Markets
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_markets_page_is_requested_system_asks_for_ranked_usd_rows() {
    // Given: An upstream with two coins
    let client = ScriptedHttpClient::new();
    client.respond(
        "coins/markets",
        &markets_body(&[
            market_row("bitcoin", 65_000.0, Some(21_000_000.0)),
            market_row("ethereum", 3_200.0, None),
        ]),
    );
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: The second page of 50 is requested
    let coins = gateway.list_markets(2, 50).await.expect("markets should load");

    // Then: The request carries the paging and ordering parameters
    let request = &client.calls()[0].request;
    assert_eq!(request.query_value("vs_currency"), Some("usd"));
    assert_eq!(request.query_value("order"), Some("market_cap_desc"));
    assert_eq!(request.query_value("page"), Some("2"));
    assert_eq!(request.query_value("per_page"), Some("50"));
    assert_eq!(request.query_value("sparkline"), Some("true"));
    assert_eq!(request.query_value("price_change_percentage"), Some("24h,7d"));

    // And: Rows come back in upstream order with supply mapped
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].id.as_str(), "bitcoin");
    assert_eq!(coins[0].max_supply, Supply::Limited(21_000_000.0));
    assert_eq!(coins[1].id.as_str(), "ethereum");
    assert!(coins[1].max_supply.is_unbounded());
    assert_eq!(coins[0].price_change_percentage_7d, Some(-0.5));
    assert_eq!(coins[0].sparkline.as_deref(), Some(&[1.0, 2.0, 3.0][..]));
}

#[tokio::test(start_paused = true)]
async fn when_upstream_page_is_empty_system_returns_no_rows() {
    // Given: An upstream past its last page
    let client = ScriptedHttpClient::new();
    client.respond("coins/markets", "[]");
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: A page beyond the end is requested
    let coins = gateway.list_markets(999, 250).await.expect("empty page is fine");

    // Then: The result is empty rather than an error
    assert!(coins.is_empty());
}

#[tokio::test(start_paused = true)]
async fn when_a_row_has_no_price_system_keeps_it_alongside_priced_rows() {
    // Given: A page where a newly listed coin has no price or market cap yet
    let client = ScriptedHttpClient::new();
    let unpriced = market_row("fresh-coin", 1.0, None)
        .replace(r#""current_price": 1,"#, r#""current_price": null,"#)
        .replace(r#""market_cap": 1000,"#, r#""market_cap": null,"#);
    client.respond(
        "coins/markets",
        &markets_body(&[market_row("bitcoin", 65_000.0, None), unpriced]),
    );
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: The page is requested
    let coins = gateway.list_markets(1, 10).await.expect("page should load");

    // Then: Both rows are returned and the gaps stay visible
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].current_price, Some(65_000.0));
    assert_eq!(coins[1].id.as_str(), "fresh-coin");
    assert_eq!(coins[1].current_price, None);
    assert_eq!(coins[1].market_cap, None);
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_favorites_are_empty_system_makes_no_upstream_call() {
    // Given: A gateway with no scripted routes
    let client = ScriptedHttpClient::new();
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: Favorites are listed for an empty set
    let coins = gateway.list_favorites(&[]).await.expect("no-op succeeds");

    // Then: Nothing was sent and nothing is returned
    assert!(coins.is_empty());
    assert_eq!(client.call_count(), 0);
    assert_eq!(gateway.pending_admissions(), 0);
}

#[tokio::test(start_paused = true)]
async fn when_favorites_are_listed_system_requests_exactly_those_ids() {
    // Given: An upstream knowing two favourite coins
    let client = ScriptedHttpClient::new();
    client.respond(
        "coins/markets",
        &markets_body(&[
            market_row("solana", 150.0, None),
            market_row("cardano", 0.45, Some(45_000_000_000.0)),
        ]),
    );
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: Favorites are listed
    let coins = gateway
        .list_favorites(&[coin("solana"), coin("cardano")])
        .await
        .expect("favorites should load");

    // Then: One call carried both ids and both change windows
    assert_eq!(client.call_count(), 1);
    let request = &client.calls()[0].request;
    assert_eq!(request.query_value("ids"), Some("solana,cardano"));
    assert_eq!(request.query_value("price_change_percentage"), Some("24h,7d"));
    assert_eq!(coins.len(), 2);
}

// =============================================================================
// Details
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_coin_has_no_supply_cap_system_reports_unbounded_supply() {
    // Given: Details with a null max supply
    let client = ScriptedHttpClient::new();
    client.respond("coins/dogecoin", &details_body("dogecoin", "null"));
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: Details are fetched
    let details = gateway
        .coin_details(&coin("dogecoin"))
        .await
        .expect("details should load");

    // Then: Supply is unbounded and enrichment fields are present
    assert_eq!(details.max_supply, Supply::Unbounded);
    assert_eq!(details.current_price, Some(12.5));
    assert_eq!(details.market_cap_rank, Some(42));
    assert_eq!(details.description.as_deref(), Some("A coin used in tests."));
    assert_eq!(details.categories, Some(vec!["Layer 1 (L1)".to_owned()]));
    let links = details.links.expect("details carry links");
    assert_eq!(links.homepage, ["https://example.test"]);
}

#[tokio::test(start_paused = true)]
async fn when_details_are_requested_system_skips_unneeded_sections() {
    // Given: An upstream with bitcoin details
    let client = ScriptedHttpClient::new();
    client.respond("coins/bitcoin", &details_body("bitcoin", "21000000.0"));
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: Details are fetched
    let details = gateway
        .coin_details(&coin("bitcoin"))
        .await
        .expect("details should load");

    // Then: Localization, tickers, community and developer data are excluded
    let request = &client.calls()[0].request;
    assert_eq!(request.query_value("localization"), Some("false"));
    assert_eq!(request.query_value("tickers"), Some("false"));
    assert_eq!(request.query_value("community_data"), Some("false"));
    assert_eq!(request.query_value("developer_data"), Some("false"));
    assert_eq!(request.query_value("market_data"), Some("true"));
    assert_eq!(details.max_supply.limit(), Some(21_000_000.0));
}

// =============================================================================
// History
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_history_is_requested_system_returns_prices_in_time_order() {
    // Given: An upstream answering with out-of-order price points
    let client = ScriptedHttpClient::new();
    client.respond(
        "coins/bitcoin/market_chart",
        r#"{
            "prices": [[3000, 3.0], [1000, 1.0], [2000, 2.0]],
            "market_caps": [[1000, 10.0]],
            "total_volumes": [[1000, 5.0]]
        }"#,
    );
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    for range in TimeRange::ALL {
        // When: History is requested for each supported range
        let series = gateway
            .history(&coin("bitcoin"), range)
            .await
            .expect("history should load");

        // Then: Prices are ascending and the lookback was forwarded
        let timestamps = series
            .prices()
            .iter()
            .map(|point| point.timestamp_ms)
            .collect::<Vec<_>>();
        assert_eq!(timestamps, [1000, 2000, 3000], "range {range}");
        let calls = client.calls();
        let request = &calls.last().expect("recorded").request;
        assert_eq!(request.query_value("days"), Some(range.lookback_days()));
    }

    assert_eq!(client.call_count(), TimeRange::ALL.len());
}

#[tokio::test(start_paused = true)]
async fn when_secondary_series_are_missing_system_returns_them_empty() {
    // Given: A chart payload carrying prices only
    let client = ScriptedHttpClient::new();
    client.respond("coins/bitcoin/market_chart", r#"{"prices": [[1000, 1.0]]}"#);
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: History is requested
    let series = gateway
        .history(&coin("bitcoin"), TimeRange::Max)
        .await
        .expect("history should load");

    // Then: Only prices are populated
    assert_eq!(series.prices().len(), 1);
    assert!(series.market_caps().is_empty());
    assert!(series.total_volumes().is_empty());
    assert_eq!(series.latest_price().map(|p| p.value), Some(1.0));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_search_matches_coins_system_expands_the_top_ten() {
    // Given: A search hit list longer than ten entries
    let client = ScriptedHttpClient::new();
    let hits = (0..12)
        .map(|n| format!(r#"{{"id": "coin-{n}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    client.respond("search", &format!(r#"{{"coins": [{hits}]}}"#));
    client.respond(
        "coins/markets",
        &markets_body(&[market_row("coin-0", 1.0, None)]),
    );
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: The user searches with surrounding whitespace
    let coins = gateway.search("  coin  ").await.expect("search should succeed");

    // Then: The query was trimmed and only ten ids were expanded
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].request.query_value("query"), Some("coin"));
    let ids = calls[1].request.query_value("ids").expect("ids parameter");
    assert_eq!(ids.split(',').count(), 10);
    assert!(ids.starts_with("coin-0,coin-1,"));
    assert_eq!(calls[1].request.query_value("price_change_percentage"), Some("24h"));
    assert_eq!(coins.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn when_search_finds_nothing_system_makes_a_single_call() {
    // Given: An upstream with no matches
    let client = ScriptedHttpClient::new();
    client.respond("search", r#"{"coins": []}"#);
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: The user searches
    let coins = gateway.search("nothing-like-this").await.expect("search succeeds");

    // Then: The markets expansion was skipped
    assert!(coins.is_empty());
    assert_eq!(client.paths(), ["search"]);
}

#[tokio::test(start_paused = true)]
async fn when_search_query_is_empty_system_still_sends_one_search_call() {
    // Given: An upstream that answers an empty query with no coins
    let client = ScriptedHttpClient::new();
    client.respond("search", r#"{"coins": []}"#);
    let gateway = gateway(&client, &["A"], INTERVAL_MS);

    // When: The user searches for an empty string
    let coins = gateway.search("").await.expect("search succeeds");

    // Then: Exactly one upstream call was made
    assert!(coins.is_empty());
    assert_eq!(client.call_count(), 1);
    assert_eq!(client.calls()[0].request.query_value("query"), Some(""));
}
