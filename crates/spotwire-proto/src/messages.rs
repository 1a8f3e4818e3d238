//! Hand-rolled prost bindings for the subset of the Open API schema the
//! runtime exercises.
//!
//! Field numbers and payload-type tags follow the published schema; field 1
//! of every domain message is the schema's self-describing `payloadType`
//! default, which is why domain fields start at tag 2.

/// Outer wire envelope. Every frame on the wire carries exactly one of
/// these.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMessage {
    #[prost(uint32, tag = "1")]
    pub payload_type: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
    #[prost(string, optional, tag = "3")]
    pub client_msg_id: Option<String>,
}

/// Keep-alive exchanged in both directions; never correlated.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoHeartbeatEvent {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoErrorRes {
    #[prost(string, tag = "2")]
    pub error_code: String,
    #[prost(string, optional, tag = "3")]
    pub description: Option<String>,
    #[prost(int64, optional, tag = "4")]
    pub maintenance_timestamp: Option<i64>,
}

// ---- enums -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaOrderType {
    Market = 1,
    Limit = 2,
    Stop = 3,
    StopLimit = 4,
    MarketRange = 5,
    StopLossTakeProfit = 6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaTradeSide {
    Buy = 1,
    Sell = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaTrendbarPeriod {
    M1 = 1,
    M2 = 2,
    M3 = 3,
    M4 = 4,
    M5 = 5,
    M10 = 6,
    M15 = 7,
    M30 = 8,
    H1 = 9,
    H4 = 10,
    H12 = 11,
    D1 = 12,
    W1 = 13,
    Mn1 = 14,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaQuoteType {
    Bid = 1,
    Ask = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaOrderTriggerMethod {
    Trade = 1,
    Opposite = 2,
    DoubleTrade = 3,
    DoubleOpposite = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaExecutionType {
    OrderAccepted = 2,
    OrderFilled = 3,
    OrderReplaced = 4,
    OrderCancelled = 5,
    OrderExpired = 6,
    OrderRejected = 7,
    OrderCancelRejected = 8,
    Swap = 9,
    DepositWithdraw = 10,
    OrderPartialFill = 11,
    BonusDepositWithdraw = 12,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaOrderStatus {
    OrderStatusAccepted = 1,
    OrderStatusFilled = 2,
    OrderStatusRejected = 3,
    OrderStatusExpired = 4,
    OrderStatusCancelled = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaDealStatus {
    Filled = 2,
    PartiallyFilled = 3,
    Rejected = 4,
    InternallyRejected = 5,
    Error = 6,
    Missed = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOaPositionStatus {
    PositionStatusOpen = 1,
    PositionStatusClosed = 2,
    PositionStatusCreated = 3,
    PositionStatusError = 4,
}

// ---- model types -----------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaCtidTraderAccount {
    #[prost(uint64, tag = "1")]
    pub ctid_trader_account_id: u64,
    #[prost(bool, optional, tag = "2")]
    pub is_live: Option<bool>,
    #[prost(int64, optional, tag = "3")]
    pub trader_login: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaLightSymbol {
    #[prost(int64, tag = "1")]
    pub symbol_id: i64,
    #[prost(string, optional, tag = "2")]
    pub symbol_name: Option<String>,
    #[prost(bool, optional, tag = "3")]
    pub enabled: Option<bool>,
    #[prost(int64, optional, tag = "4")]
    pub base_asset_id: Option<i64>,
    #[prost(int64, optional, tag = "5")]
    pub quote_asset_id: Option<i64>,
    #[prost(int64, optional, tag = "6")]
    pub symbol_category_id: Option<i64>,
    #[prost(string, optional, tag = "7")]
    pub description: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbol {
    #[prost(int64, tag = "1")]
    pub symbol_id: i64,
    #[prost(int32, tag = "2")]
    pub digits: i32,
    #[prost(int32, tag = "3")]
    pub pip_position: i32,
    #[prost(bool, optional, tag = "4")]
    pub enable_short_selling: Option<bool>,
    #[prost(bool, optional, tag = "5")]
    pub guaranteed_stop_loss: Option<bool>,
    #[prost(double, optional, tag = "7")]
    pub swap_long: Option<f64>,
    #[prost(double, optional, tag = "8")]
    pub swap_short: Option<f64>,
    #[prost(int64, optional, tag = "9")]
    pub max_volume: Option<i64>,
    #[prost(int64, optional, tag = "10")]
    pub min_volume: Option<i64>,
    #[prost(int64, optional, tag = "11")]
    pub step_volume: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAsset {
    #[prost(int64, tag = "1")]
    pub asset_id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, optional, tag = "3")]
    pub display_name: Option<String>,
    #[prost(int32, optional, tag = "4")]
    pub digits: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAssetClass {
    #[prost(int64, optional, tag = "1")]
    pub id: Option<i64>,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolCategory {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub asset_class_id: i64,
    #[prost(string, optional, tag = "3")]
    pub name: Option<String>,
}

/// Compressed bar: prices are deltas against `low`, timestamps are minutes
/// since the epoch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTrendbar {
    #[prost(int64, tag = "3")]
    pub volume: i64,
    #[prost(enumeration = "ProtoOaTrendbarPeriod", optional, tag = "4")]
    pub period: Option<i32>,
    #[prost(int64, optional, tag = "5")]
    pub low: Option<i64>,
    #[prost(uint64, optional, tag = "6")]
    pub delta_open: Option<u64>,
    #[prost(uint64, optional, tag = "7")]
    pub delta_close: Option<u64>,
    #[prost(uint64, optional, tag = "8")]
    pub delta_high: Option<u64>,
    #[prost(uint32, optional, tag = "9")]
    pub utc_timestamp_in_minutes: Option<u32>,
}

/// Tick with price deltas relative to the previous tick in the batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTickData {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(int64, tag = "2")]
    pub tick: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTrader {
    #[prost(int64, tag = "1")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "2")]
    pub balance: i64,
    #[prost(int64, optional, tag = "3")]
    pub balance_version: Option<i64>,
    #[prost(int64, optional, tag = "8")]
    pub deposit_asset_id: Option<i64>,
    #[prost(int32, optional, tag = "10")]
    pub leverage_in_cents: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTradeData {
    #[prost(int64, tag = "1")]
    pub symbol_id: i64,
    #[prost(int64, tag = "2")]
    pub volume: i64,
    #[prost(enumeration = "ProtoOaTradeSide", tag = "3")]
    pub trade_side: i32,
    #[prost(int64, optional, tag = "4")]
    pub open_timestamp: Option<i64>,
    #[prost(string, optional, tag = "5")]
    pub label: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaPosition {
    #[prost(int64, tag = "1")]
    pub position_id: i64,
    #[prost(message, optional, tag = "2")]
    pub trade_data: Option<ProtoOaTradeData>,
    #[prost(enumeration = "ProtoOaPositionStatus", tag = "3")]
    pub position_status: i32,
    #[prost(int64, tag = "4")]
    pub swap: i64,
    #[prost(double, optional, tag = "5")]
    pub price: Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub stop_loss: Option<f64>,
    #[prost(double, optional, tag = "7")]
    pub take_profit: Option<f64>,
    #[prost(int64, optional, tag = "8")]
    pub utc_last_update_timestamp: Option<i64>,
    #[prost(int64, optional, tag = "9")]
    pub commission: Option<i64>,
    #[prost(double, optional, tag = "10")]
    pub margin_rate: Option<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaOrder {
    #[prost(int64, tag = "1")]
    pub order_id: i64,
    #[prost(message, optional, tag = "2")]
    pub trade_data: Option<ProtoOaTradeData>,
    #[prost(enumeration = "ProtoOaOrderType", tag = "3")]
    pub order_type: i32,
    #[prost(enumeration = "ProtoOaOrderStatus", tag = "4")]
    pub order_status: i32,
    #[prost(int64, optional, tag = "6")]
    pub expiration_timestamp: Option<i64>,
    #[prost(double, optional, tag = "7")]
    pub execution_price: Option<f64>,
    #[prost(int64, optional, tag = "8")]
    pub executed_volume: Option<i64>,
    #[prost(bool, optional, tag = "12")]
    pub closing_order: Option<bool>,
    #[prost(double, optional, tag = "13")]
    pub limit_price: Option<f64>,
    #[prost(double, optional, tag = "14")]
    pub stop_price: Option<f64>,
    #[prost(double, optional, tag = "15")]
    pub stop_loss: Option<f64>,
    #[prost(double, optional, tag = "16")]
    pub take_profit: Option<f64>,
    #[prost(int64, optional, tag = "19")]
    pub position_id: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaDeal {
    #[prost(int64, tag = "1")]
    pub deal_id: i64,
    #[prost(int64, tag = "2")]
    pub order_id: i64,
    #[prost(int64, tag = "3")]
    pub position_id: i64,
    #[prost(int64, tag = "4")]
    pub volume: i64,
    #[prost(int64, tag = "5")]
    pub filled_volume: i64,
    #[prost(int64, tag = "6")]
    pub symbol_id: i64,
    #[prost(int64, tag = "7")]
    pub create_timestamp: i64,
    #[prost(int64, tag = "8")]
    pub execution_timestamp: i64,
    #[prost(int64, optional, tag = "9")]
    pub utc_last_update_timestamp: Option<i64>,
    #[prost(double, optional, tag = "10")]
    pub execution_price: Option<f64>,
    #[prost(enumeration = "ProtoOaTradeSide", tag = "11")]
    pub trade_side: i32,
    #[prost(enumeration = "ProtoOaDealStatus", tag = "12")]
    pub deal_status: i32,
    #[prost(int64, optional, tag = "14")]
    pub commission: Option<i64>,
}

// ---- authentication --------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaApplicationAuthReq {
    #[prost(string, tag = "2")]
    pub client_id: String,
    #[prost(string, tag = "3")]
    pub client_secret: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaApplicationAuthRes {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountAuthReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(string, tag = "3")]
    pub access_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountAuthRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountLogoutReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountLogoutRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaVersionReq {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaVersionRes {
    #[prost(string, tag = "2")]
    pub version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetAccountListByAccessTokenReq {
    #[prost(string, tag = "2")]
    pub access_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetAccountListByAccessTokenRes {
    #[prost(string, tag = "2")]
    pub access_token: String,
    #[prost(message, repeated, tag = "4")]
    pub ctid_trader_account: Vec<ProtoOaCtidTraderAccount>,
}

// ---- account data ----------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAssetListReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAssetListRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub asset: Vec<ProtoOaAsset>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAssetClassListReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAssetClassListRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub asset_class: Vec<ProtoOaAssetClass>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolCategoryListReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolCategoryListRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub symbol_category: Vec<ProtoOaSymbolCategory>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolsListReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(bool, optional, tag = "3")]
    pub include_archived_symbols: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolsListRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub symbol: Vec<ProtoOaLightSymbol>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolByIdReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, repeated, packed = "false", tag = "3")]
    pub symbol_id: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSymbolByIdRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub symbol: Vec<ProtoOaSymbol>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTraderReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaTraderRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, optional, tag = "3")]
    pub trader: Option<ProtoOaTrader>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaReconcileReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaReconcileRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub position: Vec<ProtoOaPosition>,
    #[prost(message, repeated, tag = "4")]
    pub order: Vec<ProtoOaOrder>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaDealListReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub from_timestamp: i64,
    #[prost(int64, tag = "4")]
    pub to_timestamp: i64,
    #[prost(int32, optional, tag = "5")]
    pub max_rows: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaDealListRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub deal: Vec<ProtoOaDeal>,
    #[prost(bool, optional, tag = "4")]
    pub has_more: Option<bool>,
}

// ---- quotes & history ------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSubscribeSpotsReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, repeated, packed = "false", tag = "3")]
    pub symbol_id: Vec<i64>,
    #[prost(bool, optional, tag = "4")]
    pub subscribe_to_spot_timestamp: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSubscribeSpotsRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaUnsubscribeSpotsReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, repeated, packed = "false", tag = "3")]
    pub symbol_id: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaUnsubscribeSpotsRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

/// Server-pushed quote update; arrives without a correlation id.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSpotEvent {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub symbol_id: i64,
    #[prost(uint64, optional, tag = "4")]
    pub bid: Option<u64>,
    #[prost(uint64, optional, tag = "5")]
    pub ask: Option<u64>,
    #[prost(message, repeated, tag = "6")]
    pub trendbar: Vec<ProtoOaTrendbar>,
    #[prost(uint64, optional, tag = "7")]
    pub session_close: Option<u64>,
    #[prost(int64, optional, tag = "8")]
    pub timestamp: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSubscribeLiveTrendbarReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(enumeration = "ProtoOaTrendbarPeriod", tag = "3")]
    pub period: i32,
    #[prost(int64, tag = "4")]
    pub symbol_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaSubscribeLiveTrendbarRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaUnsubscribeLiveTrendbarReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(enumeration = "ProtoOaTrendbarPeriod", tag = "3")]
    pub period: i32,
    #[prost(int64, tag = "4")]
    pub symbol_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaUnsubscribeLiveTrendbarRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetTrendbarsReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub from_timestamp: i64,
    #[prost(int64, tag = "4")]
    pub to_timestamp: i64,
    #[prost(enumeration = "ProtoOaTrendbarPeriod", tag = "5")]
    pub period: i32,
    #[prost(int64, tag = "6")]
    pub symbol_id: i64,
    #[prost(uint32, optional, tag = "7")]
    pub count: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetTrendbarsRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(enumeration = "ProtoOaTrendbarPeriod", tag = "3")]
    pub period: i32,
    #[prost(int64, optional, tag = "4")]
    pub timestamp: Option<i64>,
    #[prost(message, repeated, tag = "5")]
    pub trendbar: Vec<ProtoOaTrendbar>,
    #[prost(int64, optional, tag = "6")]
    pub symbol_id: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetTickDataReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub symbol_id: i64,
    #[prost(enumeration = "ProtoOaQuoteType", tag = "4")]
    pub quote_type: i32,
    #[prost(int64, tag = "5")]
    pub from_timestamp: i64,
    #[prost(int64, tag = "6")]
    pub to_timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaGetTickDataRes {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(message, repeated, tag = "3")]
    pub tick_data: Vec<ProtoOaTickData>,
    #[prost(bool, optional, tag = "4")]
    pub has_more: Option<bool>,
}

// ---- trading ---------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaNewOrderReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub symbol_id: i64,
    #[prost(enumeration = "ProtoOaOrderType", tag = "4")]
    pub order_type: i32,
    #[prost(enumeration = "ProtoOaTradeSide", tag = "5")]
    pub trade_side: i32,
    #[prost(int64, tag = "6")]
    pub volume: i64,
    #[prost(double, optional, tag = "7")]
    pub limit_price: Option<f64>,
    #[prost(double, optional, tag = "8")]
    pub stop_price: Option<f64>,
    #[prost(int64, optional, tag = "10")]
    pub expiration_timestamp: Option<i64>,
    #[prost(double, optional, tag = "11")]
    pub stop_loss: Option<f64>,
    #[prost(double, optional, tag = "12")]
    pub take_profit: Option<f64>,
    #[prost(string, optional, tag = "13")]
    pub comment: Option<String>,
    #[prost(string, optional, tag = "16")]
    pub label: Option<String>,
    #[prost(enumeration = "ProtoOaOrderTriggerMethod", optional, tag = "23")]
    pub stop_trigger_method: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaCancelOrderReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub order_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAmendOrderReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub order_id: i64,
    #[prost(int64, optional, tag = "4")]
    pub volume: Option<i64>,
    #[prost(double, optional, tag = "5")]
    pub limit_price: Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub stop_price: Option<f64>,
    #[prost(int64, optional, tag = "7")]
    pub expiration_timestamp: Option<i64>,
    #[prost(double, optional, tag = "8")]
    pub stop_loss: Option<f64>,
    #[prost(double, optional, tag = "9")]
    pub take_profit: Option<f64>,
    #[prost(enumeration = "ProtoOaOrderTriggerMethod", optional, tag = "15")]
    pub stop_trigger_method: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaClosePositionReq {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(int64, tag = "3")]
    pub position_id: i64,
    #[prost(int64, tag = "4")]
    pub volume: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaExecutionEvent {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
    #[prost(enumeration = "ProtoOaExecutionType", tag = "3")]
    pub execution_type: i32,
    #[prost(message, optional, tag = "4")]
    pub position: Option<ProtoOaPosition>,
    #[prost(message, optional, tag = "5")]
    pub order: Option<ProtoOaOrder>,
    #[prost(message, optional, tag = "6")]
    pub deal: Option<ProtoOaDeal>,
    #[prost(string, optional, tag = "9")]
    pub error_code: Option<String>,
    #[prost(bool, optional, tag = "10")]
    pub is_server_event: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaOrderErrorEvent {
    #[prost(string, tag = "2")]
    pub error_code: String,
    #[prost(int64, optional, tag = "3")]
    pub order_id: Option<i64>,
    #[prost(int64, optional, tag = "4")]
    pub position_id: Option<i64>,
    #[prost(string, optional, tag = "5")]
    pub description: Option<String>,
}

// ---- session events --------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaErrorRes {
    #[prost(int64, optional, tag = "2")]
    pub ctid_trader_account_id: Option<i64>,
    #[prost(string, tag = "3")]
    pub error_code: String,
    #[prost(string, optional, tag = "4")]
    pub description: Option<String>,
    #[prost(int64, optional, tag = "5")]
    pub maintenance_timestamp: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountsTokenInvalidatedEvent {
    #[prost(int64, repeated, packed = "false", tag = "2")]
    pub ctid_trader_account_ids: Vec<i64>,
    #[prost(string, optional, tag = "3")]
    pub reason: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaClientDisconnectEvent {
    #[prost(string, optional, tag = "2")]
    pub reason: Option<String>,
}

/// Server dropped the account binding (token invalidated, logout elsewhere).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOaAccountDisconnectEvent {
    #[prost(int64, tag = "2")]
    pub ctid_trader_account_id: i64,
}
