use serde::{Deserialize, Deserializer, Serialize};

/// Symbol used whenever an asset descriptor or its symbol is missing
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// Loan or collateral asset of a market, as reported by the indexer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Financial figures of a market. Every field may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    #[serde(default)]
    pub supply_assets_usd: Option<f64>,
    #[serde(default)]
    pub borrow_assets_usd: Option<f64>,
    #[serde(default)]
    pub liquidity_assets_usd: Option<f64>,
    /// Precomputed TVL; zero or negative values are unusable
    #[serde(default)]
    pub size_usd: Option<f64>,
    #[serde(default)]
    pub utilization: Option<f64>,
    #[serde(default)]
    pub supply_apy: Option<f64>,
    #[serde(default)]
    pub borrow_apy: Option<f64>,
}

/// Raw state of a single Morpho Blue market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketState {
    pub unique_key: String,
    #[serde(default)]
    pub loan_asset: Option<AssetDescriptor>,
    #[serde(default)]
    pub collateral_asset: Option<AssetDescriptor>,
    /// Liquidation loan-to-value, informational only
    #[serde(default)]
    pub lltv: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: MarketSnapshot,
}

#[derive(Debug, Clone, Default)]
pub struct CreateMarketState {
    pub unique_key: String,
    pub loan_symbol: Option<String>,
    pub collateral_symbol: Option<String>,
    pub supply_assets_usd: Option<f64>,
    pub borrow_assets_usd: Option<f64>,
    pub liquidity_assets_usd: Option<f64>,
    pub size_usd: Option<f64>,
    pub utilization: Option<f64>,
    pub supply_apy: Option<f64>,
    pub borrow_apy: Option<f64>,
}

impl MarketState {
    pub fn new(create_market: CreateMarketState) -> Self {
        Self {
            unique_key: create_market.unique_key,
            loan_asset: Some(AssetDescriptor {
                symbol: create_market.loan_symbol,
                ..AssetDescriptor::default()
            }),
            collateral_asset: Some(AssetDescriptor {
                symbol: create_market.collateral_symbol,
                ..AssetDescriptor::default()
            }),
            lltv: None,
            state: MarketSnapshot {
                supply_assets_usd: create_market.supply_assets_usd,
                borrow_assets_usd: create_market.borrow_assets_usd,
                liquidity_assets_usd: create_market.liquidity_assets_usd,
                size_usd: create_market.size_usd,
                utilization: create_market.utilization,
                supply_apy: create_market.supply_apy,
                borrow_apy: create_market.borrow_apy,
            },
        }
    }

    /// Loan asset symbol, or `UNKNOWN` when absent
    pub fn loan_symbol(&self) -> &str {
        symbol_or_unknown(self.loan_asset.as_ref())
    }

    /// Collateral asset symbol, or `UNKNOWN` when absent (idle markets have none)
    pub fn collateral_symbol(&self) -> &str {
        symbol_or_unknown(self.collateral_asset.as_ref())
    }
}

#[derive(Deserialize)]
struct ItemsPage {
    items: Vec<MarketState>,
}

#[derive(Deserialize)]
struct MarketsData {
    markets: ItemsPage,
}

#[derive(Deserialize)]
struct GraphQlEnvelope {
    data: MarketsData,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarketsDocument {
    List(Vec<MarketState>),
    Envelope(GraphQlEnvelope),
}

/// Decode either a plain JSON array of markets or the indexer's
/// `{"data":{"markets":{"items":[...]}}}` response
pub fn parse_markets_json(json: &str) -> Result<Vec<MarketState>, serde_json::Error> {
    let document: MarketsDocument = serde_json::from_str(json)?;
    Ok(match document {
        MarketsDocument::List(markets) => markets,
        MarketsDocument::Envelope(envelope) => envelope.data.markets.items,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn symbol_or_unknown(asset: Option<&AssetDescriptor>) -> &str {
    asset
        .and_then(|a| a.symbol.as_deref())
        .unwrap_or(UNKNOWN_SYMBOL)
}
