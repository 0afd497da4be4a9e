//! The hand-scored stock catalog.
//!
//! The catalog ships embedded in the crate and can be replaced by a JSON file
//! of the same shape. Rows are validated and deduplicated by symbol on load;
//! the first occurrence of a symbol wins.

use std::collections::HashSet;
use std::path::Path;

use findex_traits::{FindexError, Result, ScoredStock, Symbol};
use tracing::debug;

/// The catalog bundled with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../data/scores.json");

/// Valid range of network-effects scores.
pub const NETWORK_SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A validated, deduplicated list of scored stocks in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    stocks: Vec<ScoredStock>,
}

impl Catalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data fails to parse or validate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON array of [`ScoredStock`] rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a row is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<ScoredStock> = serde_json::from_str(json)?;
        Self::from_stocks(rows)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a catalog from rows, validating and deduplicating them.
    ///
    /// # Errors
    ///
    /// Returns [`FindexError::InvalidCatalog`] for an empty symbol or a
    /// network score outside 1–10.
    pub fn from_stocks(rows: impl IntoIterator<Item = ScoredStock>) -> Result<Self> {
        let mut seen: HashSet<Symbol> = HashSet::new();
        let mut stocks = Vec::new();
        let mut duplicates = 0usize;

        for stock in rows {
            validate(&stock)?;
            if seen.insert(stock.symbol.clone()) {
                stocks.push(stock);
            } else {
                duplicates += 1;
            }
        }

        debug!(stocks = stocks.len(), duplicates, "catalog loaded");
        Ok(Self { stocks })
    }

    /// The stocks in catalog order.
    #[must_use]
    pub fn stocks(&self) -> &[ScoredStock] {
        &self.stocks
    }

    /// Number of distinct stocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    /// Whether the catalog has no stocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Look up a stock by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&ScoredStock> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    /// All symbols in catalog order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.stocks.iter().map(|s| s.symbol.clone()).collect()
    }
}

fn validate(stock: &ScoredStock) -> Result<()> {
    if stock.symbol.trim().is_empty() {
        return Err(FindexError::InvalidCatalog(format!(
            "empty symbol for {:?}",
            stock.name
        )));
    }
    if !NETWORK_SCORE_RANGE.contains(&stock.network_score) {
        return Err(FindexError::InvalidCatalog(format!(
            "{}: network score {} outside 1-10",
            stock.symbol, stock.network_score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn stock(symbol: &str, score: u8, founder_led: bool, sector: &str) -> ScoredStock {
        ScoredStock {
            symbol: symbol.to_string(),
            name: format!("{symbol} Inc."),
            founder_led,
            network_score: score,
            sector: sector.to_string(),
        }
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() > 200);
        assert!(catalog.get("SPY").is_some());
        assert!(catalog.get("BRK.B").is_some());

        let symbols = catalog.symbols();
        let unique: HashSet<&Symbol> = symbols.iter().collect();
        assert_eq!(unique.len(), symbols.len());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let catalog = Catalog::from_stocks(vec![
            stock("VEEV", 7, true, "Technology"),
            stock("META", 10, true, "Communication Services"),
            stock("VEEV", 7, true, "Healthcare"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.stocks()[0].symbol, "VEEV");
        assert_eq!(catalog.get("VEEV").unwrap().sector, "Technology");
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let err = Catalog::from_stocks(vec![stock("AAA", 11, false, "Tech")]).unwrap_err();
        assert!(matches!(err, FindexError::InvalidCatalog(_)));

        let err = Catalog::from_stocks(vec![stock("AAA", 0, false, "Tech")]).unwrap_err();
        assert!(matches!(err, FindexError::InvalidCatalog(_)));
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let err = Catalog::from_stocks(vec![stock(" ", 5, false, "Tech")]).unwrap_err();
        assert!(matches!(err, FindexError::InvalidCatalog(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"symbol":"AAA","name":"Triple A","founder_led":true,"network_score":8,"sector":"Tech"}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stocks()[0].name, "Triple A");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(FindexError::Json(_))
        ));
    }
}
