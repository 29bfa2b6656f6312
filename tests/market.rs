use pretty_assertions::assert_eq;
use ravl_tree::{Error, Listing, Market};

fn catalog() -> Vec<Listing> {
    vec![
        Listing::out_of_stock("health", "tonic of vigour", 500),
        Listing::out_of_stock("mana", "azure elixir", 2_000),
        Listing::out_of_stock("luck", "clover philter", 1_250),
        Listing::out_of_stock("health", "crimson salve", 800),
        Listing::out_of_stock("stamina", "ironroot brew", 3_100),
    ]
}

fn stocked_market(seed: u32) -> Market {
    let mut market = Market::with_seed(seed);
    market.load_catalog(catalog()).unwrap();
    market
        .receive_shipment(&[
            ("tonic of vigour", 6.0),
            ("azure elixir", 4.0),
            ("clover philter", 2.5),
            ("ironroot brew", 1.0),
        ])
        .unwrap();
    market
}

// ─── Catalog and shipments ────────────────────────────────────────────────────

#[test]
fn catalog_lookup_reflects_shipments() {
    let market = stocked_market(0);

    assert_eq!(market.stocked(), 4);
    assert_eq!(market.listing("tonic of vigour").unwrap().stock_litres, 6.0);
    assert_eq!(market.listing("crimson salve").unwrap().stock_litres, 0.0);
    assert_eq!(market.listing("nonexistent"), Err(Error::KeyNotFound));
}

#[test]
fn reloading_the_catalog_clears_the_inventory() {
    let mut market = stocked_market(0);
    market.load_catalog(catalog()).unwrap();

    assert_eq!(market.stocked(), 0);
    assert_eq!(market.listing("azure elixir").unwrap().stock_litres, 0.0);
}

#[test]
fn probe_statistics_accumulate() {
    let mut market = Market::with_seed(0);
    market.load_catalog(catalog()).unwrap();

    let (conflicts, probe_total, probe_max) = market.probe_statistics();
    // Five names in a ten-slot table; chain lengths are bounded by the
    // occupancy when each name arrived.
    assert!(conflicts <= 4);
    assert!(probe_max <= 4);
    assert!(probe_total >= probe_max);
}

// ─── Vendor selection ─────────────────────────────────────────────────────────

#[test]
fn vendor_picks_replay_for_equal_seeds() {
    let mut a = stocked_market(20_240_817);
    let mut b = stocked_market(20_240_817);

    assert_eq!(a.vendor_picks(3).unwrap(), b.vendor_picks(3).unwrap());
    // State advances across calls, but stays in lockstep.
    assert_eq!(a.vendor_picks(4).unwrap(), b.vendor_picks(4).unwrap());
}

#[test]
fn vendor_picks_cover_the_whole_inventory() {
    let mut market = stocked_market(99);
    let mut names: Vec<String> = market
        .vendor_picks(4)
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();

    assert_eq!(
        names,
        ["azure elixir", "clover philter", "ironroot brew", "tonic of vigour"]
    );
    assert_eq!(market.stocked(), 4);
}

#[test]
fn vendor_count_is_validated() {
    let mut market = stocked_market(1);
    assert_eq!(
        market.vendor_picks(0),
        Err(Error::RankOutOfRange { rank: 0, len: 4 })
    );
    assert_eq!(
        market.vendor_picks(5),
        Err(Error::RankOutOfRange { rank: 5, len: 4 })
    );
}

// ─── Takings ──────────────────────────────────────────────────────────────────

#[test]
fn best_takings_is_exact_for_a_hand_worked_scenario() {
    let mut market = Market::with_seed(0);
    market
        .load_catalog(vec![
            Listing::out_of_stock("health", "tonic", 500),
            Listing::out_of_stock("mana", "elixir", 2_000),
        ])
        .unwrap();
    market
        .receive_shipment(&[("tonic", 3.0), ("elixir", 4.0)])
        .unwrap();

    // Ratios: tonic 3.0, elixir 1.5. With 80 dollars: all 3 litres of tonic
    // cost 15 and resell for 45; the remaining 65 buys 3.25 litres of elixir
    // reselling for 97.5. Total 142.5. A second, tighter budget of 10 buys
    // 2 litres of tonic reselling for 30.
    let takings = market
        .best_takings(&[("tonic", 1_500), ("elixir", 3_000)], &[80.0, 10.0])
        .unwrap();
    assert_eq!(takings, vec![142.5, 30.0]);
}

#[test]
fn best_takings_ignores_unstocked_and_unprofitable_listings() {
    let market = stocked_market(0);

    // crimson salve has no stock; ironroot brew is valued below cost.
    let takings = market
        .best_takings(
            &[("crimson salve", 10_000), ("ironroot brew", 3_000)],
            &[1_000.0],
        )
        .unwrap();
    assert_eq!(takings, vec![0.0]);
}

#[test]
fn best_takings_leaves_the_market_unchanged() {
    let market = stocked_market(0);
    let before = market.listing("tonic of vigour").unwrap().clone();

    let _ = market
        .best_takings(&[("tonic of vigour", 5_000)], &[100.0])
        .unwrap();

    assert_eq!(market.listing("tonic of vigour").unwrap(), &before);
    assert_eq!(market.stocked(), 4);
}

#[test]
fn best_takings_rejects_unknown_and_duplicate_valuations() {
    let market = stocked_market(0);
    assert_eq!(
        market.best_takings(&[("phantom draught", 100)], &[10.0]),
        Err(Error::KeyNotFound)
    );
    assert_eq!(
        market.best_takings(
            &[("tonic of vigour", 1_000), ("tonic of vigour", 1_000)],
            &[10.0]
        ),
        Err(Error::DuplicateKey)
    );
}
