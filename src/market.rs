//! A deterministic market simulation over the crate's data structures.
//!
//! A [`Market`] keeps its full catalog of listings in a [`ProbeTable`] for
//! O(1) lookup by name, and the currently stocked listings in an
//! [`AvlMap`] keyed by unit price, so vendors can be served by price rank
//! in O(log n). All randomness comes from a seeded [`RandomGen`], so every
//! run replays identically for a given seed.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::avl_map::AvlMap;
use crate::error::Error;
use crate::probe_table::ProbeTable;
use crate::random::RandomGen;

/// One product line in the market's catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    /// Broad category of the product.
    pub kind: String,
    /// Catalog key; unique across the market.
    pub name: String,
    /// Price of one litre, in cents. Integer cents keep prices totally
    /// ordered and hashable.
    pub unit_price_cents: u64,
    /// Litres currently on hand.
    pub stock_litres: f64,
}

impl Listing {
    /// Creates a listing with the given stock level.
    #[must_use]
    pub fn new(kind: &str, name: &str, unit_price_cents: u64, stock_litres: f64) -> Self {
        Self {
            kind: String::from(kind),
            name: String::from(name),
            unit_price_cents,
            stock_litres,
        }
    }

    /// Creates a listing with no stock on hand.
    #[must_use]
    pub fn out_of_stock(kind: &str, name: &str, unit_price_cents: u64) -> Self {
        Self::new(kind, name, unit_price_cents, 0.0)
    }
}

/// Orders profitable listings by their valuation-to-price ratio, so the
/// rank query can serve the most profitable purchase first.
///
/// Ratios are compared exactly by cross-multiplying in `u128`, which cannot
/// overflow for cent amounts that fit in `u64`. Listings with equal ratios
/// fall back to name order, keeping the key total and duplicate-free across
/// distinct names.
#[derive(Clone, Debug, Eq, PartialEq)]
struct MarginKey {
    valuation_cents: u64,
    price_cents: u64,
    name: String,
}

impl Ord for MarginKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.valuation_cents) * u128::from(other.price_cents);
        let rhs = u128::from(other.valuation_cents) * u128::from(self.price_cents);
        lhs.cmp(&rhs).then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for MarginKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A purchasable lot derived from a listing and an external valuation.
#[derive(Clone, Debug)]
struct Offer {
    price_cents: u64,
    valuation_cents: u64,
    stock_litres: f64,
}

fn cents_to_dollars(cents: u64) -> f64 {
    cents as f64 / 100.0
}

/// A seeded market of listings.
///
/// The market distinguishes the *catalog* (every product line it has ever
/// carried, stock included or not) from the *inventory* (the listings with
/// stock on hand, ordered by unit price). Shipments move listings into the
/// inventory; vendor selection and takings queries read it by price rank.
///
/// # Examples
///
/// ```
/// use ravl_tree::{Listing, Market};
///
/// let mut market = Market::with_seed(42);
/// market.load_catalog(vec![
///     Listing::out_of_stock("health", "tonic of vigour", 500),
///     Listing::out_of_stock("mana", "azure elixir", 2_000),
/// ])?;
/// market.receive_shipment(&[("tonic of vigour", 3.0)])?;
///
/// assert_eq!(market.stocked(), 1);
/// assert_eq!(market.listing("azure elixir")?.stock_litres, 0.0);
/// # Ok::<(), ravl_tree::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Market {
    rng: RandomGen,
    catalog: ProbeTable<Listing>,
    /// Unit price in cents -> listing name, for every stocked listing.
    inventory: AvlMap<u64, String>,
}

impl Market {
    /// Creates an empty market. Equal seeds replay the same vendor
    /// selections.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            rng: RandomGen::new(seed),
            catalog: ProbeTable::with_capacity(0),
            inventory: AvlMap::new(),
        }
    }

    /// Replaces the catalog with `listings`, all marked out of stock, and
    /// clears the inventory.
    ///
    /// The backing table is sized at twice the listing count, keeping probe
    /// chains short.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CapacityExceeded`] if `listings` holds more
    /// distinct names than the table can seat; the market keeps its
    /// previous catalog in that case.
    pub fn load_catalog(&mut self, listings: Vec<Listing>) -> Result<(), Error> {
        let mut catalog = ProbeTable::with_capacity(listings.len());
        for mut listing in listings {
            listing.stock_litres = 0.0;
            let name = listing.name.clone();
            catalog.set(&name, listing)?;
        }
        self.catalog = catalog;
        self.inventory.clear();
        Ok(())
    }

    /// Returns the number of listings currently in stock.
    #[must_use]
    pub fn stocked(&self) -> usize {
        self.inventory.len()
    }

    /// Returns the catalog entry for `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if the market has never carried
    /// the name.
    pub fn listing(&self, name: &str) -> Result<&Listing, Error> {
        self.catalog.get(name)
    }

    /// Returns the catalog's probe statistics; see
    /// [`ProbeTable::statistics`].
    #[must_use]
    pub fn probe_statistics(&self) -> (usize, usize, usize) {
        self.catalog.statistics()
    }

    /// Records a shipment: each `(name, litres)` pair sets the named
    /// listing's stock and enters it into the price-ordered inventory.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if a name is not in the catalog,
    /// and with [`Error::DuplicateKey`] if a listing at the same unit price
    /// is already stocked (prices double as inventory keys and must be
    /// unique among stocked listings). Pairs before the failing one have
    /// already been applied.
    pub fn receive_shipment(&mut self, shipment: &[(&str, f64)]) -> Result<(), Error> {
        for &(name, litres) in shipment {
            let listing = self.catalog.get_mut(name)?;
            listing.stock_litres = litres;
            let price = listing.unit_price_cents;
            let name = listing.name.clone();
            self.inventory.insert(price, name)?;
        }
        Ok(())
    }

    /// Selects one distinct stocked listing per vendor, by random price
    /// rank, and returns each selection's name and stock level.
    ///
    /// Each draw ranks the listings still unselected, so no listing is
    /// offered to two vendors; the inventory is restored before returning.
    /// Selections are a pure function of the seed and the call history.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RankOutOfRange`] unless
    /// `1 <= vendors <= stocked()`; the rng state is untouched in that
    /// case.
    ///
    /// # Complexity
    ///
    /// O(v log n) for v vendors over n stocked listings.
    pub fn vendor_picks(&mut self, vendors: usize) -> Result<Vec<(String, f64)>, Error> {
        let stocked = self.inventory.len();
        if vendors == 0 || vendors > stocked {
            return Err(Error::RankOutOfRange { rank: vendors, len: stocked });
        }

        let mut withheld: Vec<(u64, String)> = Vec::with_capacity(vendors);
        for _ in 0..vendors {
            let rank = self.rng.next_in_range(self.inventory.len());
            let (&price, name) = self.inventory.kth_largest(rank)?;
            let name = name.clone();
            let _ = self.inventory.remove(&price)?;
            withheld.push((price, name));
        }

        let mut picks = Vec::with_capacity(vendors);
        for (price, name) in withheld {
            let listing = self.catalog.get(&name)?;
            picks.push((name.clone(), listing.stock_litres));
            self.inventory.insert(price, name)?;
        }
        Ok(picks)
    }

    /// Computes, for each starting budget, the maximum resale takings from
    /// buying stocked litres at catalog prices and reselling them at the
    /// given per-litre valuations (in cents).
    ///
    /// Litres are divisible, so the greedy strategy is exact: listings are
    /// ranked by valuation-to-price ratio and bought best-first, each up to
    /// its stock or the remaining budget. Listings valued at or below their
    /// price are never bought. Budgets are independent of each other; the
    /// market itself is not mutated.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::KeyNotFound`] if a valuation names a listing
    /// outside the catalog, and with [`Error::DuplicateKey`] if a name is
    /// valued twice.
    ///
    /// # Complexity
    ///
    /// O(m log m + b * m log m) for m valuations and b budgets.
    pub fn best_takings(
        &self,
        valuations: &[(&str, u64)],
        budgets: &[f64],
    ) -> Result<Vec<f64>, Error> {
        let mut offers: AvlMap<MarginKey, Offer> = AvlMap::new();
        for &(name, valuation_cents) in valuations {
            let listing = self.catalog.get(name)?;
            if valuation_cents <= listing.unit_price_cents || listing.stock_litres <= 0.0 {
                continue;
            }
            let key = MarginKey {
                valuation_cents,
                price_cents: listing.unit_price_cents,
                name: listing.name.clone(),
            };
            offers.insert(key, Offer {
                price_cents: listing.unit_price_cents,
                valuation_cents,
                stock_litres: listing.stock_litres,
            })?;
        }

        let mut takings = Vec::with_capacity(budgets.len());
        for &budget in budgets {
            let mut remaining = budget;
            let mut earned = 0.0;
            for rank in 1..=offers.len() {
                if remaining <= 0.0 {
                    break;
                }
                let (_, offer) = offers.kth_largest(rank)?;
                let price = cents_to_dollars(offer.price_cents);
                let litres = (remaining / price).min(offer.stock_litres);
                earned += litres * cents_to_dollars(offer.valuation_cents);
                remaining -= litres * price;
            }
            takings.push(earned);
        }
        Ok(takings)
    }
}
