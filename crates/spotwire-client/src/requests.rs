//! Typed wrappers over [`Session::send`]: build the domain request, await
//! the correlated envelope, extract the typed response.
//!
//! The response envelope itself is the synchronization point; no operation
//! here waits on anything else. Server rejections (`ProtoOaErrorRes`,
//! `ProtoErrorRes`, order error events) map to [`ClientError::Server`].

use spotwire_proto::messages::*;
use spotwire_proto::{Payload, codec};

use crate::error::ClientError;
use crate::session::Session;

/// Extracts `M` from a response envelope, translating error payloads.
pub(crate) fn expect<M: Payload>(
    envelope: &ProtoMessage
) -> Result<M, ClientError> {
    if envelope.payload_type == M::PAYLOAD_TYPE {
        return Ok(codec::extract(envelope)?);
    }
    Err(error_from(envelope))
}

/// Accepts any non-error reply; used where the response schema differs
/// between server builds.
fn expect_ack(envelope: &ProtoMessage) -> Result<(), ClientError> {
    if is_error_payload(envelope.payload_type) {
        return Err(error_from(envelope));
    }
    Ok(())
}

/// Trade operations answer with an execution event on success and an order
/// error event on rejection.
fn expect_execution(
    envelope: &ProtoMessage
) -> Result<ProtoOaExecutionEvent, ClientError> {
    expect::<ProtoOaExecutionEvent>(envelope)
}

fn is_error_payload(payload_type: u32) -> bool {
    payload_type == ProtoOaErrorRes::PAYLOAD_TYPE
        || payload_type == ProtoErrorRes::PAYLOAD_TYPE
        || payload_type == ProtoOaOrderErrorEvent::PAYLOAD_TYPE
}

fn error_from(envelope: &ProtoMessage) -> ClientError {
    let translated = if envelope.payload_type == ProtoOaErrorRes::PAYLOAD_TYPE {
        codec::extract::<ProtoOaErrorRes>(envelope).map(|res| ClientError::Server {
            code: res.error_code,
            description: res.description.unwrap_or_default(),
        })
    } else if envelope.payload_type == ProtoErrorRes::PAYLOAD_TYPE {
        codec::extract::<ProtoErrorRes>(envelope).map(|res| ClientError::Server {
            code: res.error_code,
            description: res.description.unwrap_or_default(),
        })
    } else if envelope.payload_type == ProtoOaOrderErrorEvent::PAYLOAD_TYPE {
        codec::extract::<ProtoOaOrderErrorEvent>(envelope).map(|res| {
            ClientError::Server {
                code: res.error_code,
                description: res.description.unwrap_or_default(),
            }
        })
    } else {
        return ClientError::UnexpectedPayload(envelope.payload_type);
    };

    match translated {
        Ok(err) => err,
        Err(proto_err) => proto_err.into(),
    }
}

/// Parameters of a new-order request; optional fields are omitted from the
/// wire when unset.
#[derive(Debug, Clone, Default)]
pub struct NewOrderRequest {
    pub symbol_id: i64,
    pub order_type: ProtoOaOrderType,
    pub trade_side: ProtoOaTradeSide,
    /// Volume in cents of units, as the API expects.
    pub volume: i64,
    pub limit_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub expiration_timestamp: Option<i64>,
    pub stop_trigger_method: Option<ProtoOaOrderTriggerMethod>,
    pub comment: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AmendOrderRequest {
    pub order_id: i64,
    pub volume: Option<i64>,
    pub limit_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub expiration_timestamp: Option<i64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub stop_trigger_method: Option<ProtoOaOrderTriggerMethod>,
}

impl Session {
    /// Server API version string.
    pub async fn version(&self) -> Result<String, ClientError> {
        let envelope = self.send(&ProtoOaVersionReq::default()).await?;
        Ok(expect::<ProtoOaVersionRes>(&envelope)?.version)
    }

    /// Trading accounts reachable with `access_token`.
    pub async fn account_list_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Vec<ProtoOaCtidTraderAccount>, ClientError> {
        let req = ProtoOaGetAccountListByAccessTokenReq {
            access_token: access_token.to_string(),
        };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaGetAccountListByAccessTokenRes>(&envelope)?
            .ctid_trader_account)
    }

    /// Unbinds the current account and drops back to `AppAuthenticated`.
    pub async fn account_logout(&self) -> Result<(), ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaAccountLogoutReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaAccountLogoutRes>(&envelope)?;
        self.clear_account();
        Ok(())
    }

    pub async fn asset_list(&self) -> Result<Vec<ProtoOaAsset>, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaAssetListReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaAssetListRes>(&envelope)?.asset)
    }

    pub async fn asset_class_list(
        &self
    ) -> Result<Vec<ProtoOaAssetClass>, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaAssetClassListReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaAssetClassListRes>(&envelope)?.asset_class)
    }

    pub async fn symbol_category_list(
        &self
    ) -> Result<Vec<ProtoOaSymbolCategory>, ClientError> {
        let account_id = self.require_account()?;
        let req =
            ProtoOaSymbolCategoryListReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaSymbolCategoryListRes>(&envelope)?.symbol_category)
    }

    pub async fn symbols_list(
        &self,
        include_archived: bool,
    ) -> Result<Vec<ProtoOaLightSymbol>, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaSymbolsListReq {
            ctid_trader_account_id: account_id,
            include_archived_symbols: Some(include_archived),
        };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaSymbolsListRes>(&envelope)?.symbol)
    }

    /// Full symbol records for `symbol_ids`.
    pub async fn symbol_by_id(
        &self,
        symbol_ids: &[i64],
    ) -> Result<Vec<ProtoOaSymbol>, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaSymbolByIdReq {
            ctid_trader_account_id: account_id,
            symbol_id: symbol_ids.to_vec(),
        };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaSymbolByIdRes>(&envelope)?.symbol)
    }

    pub async fn trader(&self) -> Result<Option<ProtoOaTrader>, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaTraderReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        Ok(expect::<ProtoOaTraderRes>(&envelope)?.trader)
    }

    /// Open positions and pending orders.
    pub async fn reconcile(&self) -> Result<ProtoOaReconcileRes, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaReconcileReq { ctid_trader_account_id: account_id };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaReconcileRes>(&envelope)
    }

    /// Deal history inside `[from_timestamp, to_timestamp]`; `max_rows`
    /// caps the result server-side.
    pub async fn deal_list(
        &self,
        from_timestamp: i64,
        to_timestamp: i64,
        max_rows: Option<i32>,
    ) -> Result<ProtoOaDealListRes, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaDealListReq {
            ctid_trader_account_id: account_id,
            from_timestamp,
            to_timestamp,
            max_rows,
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaDealListRes>(&envelope)
    }

    pub async fn subscribe_spots(
        &self,
        symbol_ids: &[i64],
    ) -> Result<(), ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaSubscribeSpotsReq {
            ctid_trader_account_id: account_id,
            symbol_id: symbol_ids.to_vec(),
            subscribe_to_spot_timestamp: None,
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaSubscribeSpotsRes>(&envelope)?;
        Ok(())
    }

    pub async fn unsubscribe_spots(
        &self,
        symbol_ids: &[i64],
    ) -> Result<(), ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaUnsubscribeSpotsReq {
            ctid_trader_account_id: account_id,
            symbol_id: symbol_ids.to_vec(),
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaUnsubscribeSpotsRes>(&envelope)?;
        Ok(())
    }

    /// Live bars arrive inside subsequent spot events for the symbol.
    pub async fn subscribe_live_trendbar(
        &self,
        period: ProtoOaTrendbarPeriod,
        symbol_id: i64,
    ) -> Result<(), ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaSubscribeLiveTrendbarReq {
            ctid_trader_account_id: account_id,
            period: period as i32,
            symbol_id,
        };
        let envelope = self.send(&req).await?;
        expect_ack(&envelope)
    }

    pub async fn unsubscribe_live_trendbar(
        &self,
        period: ProtoOaTrendbarPeriod,
        symbol_id: i64,
    ) -> Result<(), ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaUnsubscribeLiveTrendbarReq {
            ctid_trader_account_id: account_id,
            period: period as i32,
            symbol_id,
        };
        let envelope = self.send(&req).await?;
        expect_ack(&envelope)
    }

    /// Historical bars for the window; `count` additionally caps the number
    /// of bars, server semantics deciding how it combines with the window.
    pub async fn trendbars(
        &self,
        symbol_id: i64,
        period: ProtoOaTrendbarPeriod,
        from_timestamp: i64,
        to_timestamp: i64,
        count: Option<u32>,
    ) -> Result<ProtoOaGetTrendbarsRes, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaGetTrendbarsReq {
            ctid_trader_account_id: account_id,
            from_timestamp,
            to_timestamp,
            period: period as i32,
            symbol_id,
            count,
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaGetTrendbarsRes>(&envelope)
    }

    pub async fn tick_data(
        &self,
        symbol_id: i64,
        quote_type: ProtoOaQuoteType,
        from_timestamp: i64,
        to_timestamp: i64,
    ) -> Result<ProtoOaGetTickDataRes, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaGetTickDataReq {
            ctid_trader_account_id: account_id,
            symbol_id,
            quote_type: quote_type as i32,
            from_timestamp,
            to_timestamp,
        };
        let envelope = self.send(&req).await?;
        expect::<ProtoOaGetTickDataRes>(&envelope)
    }

    pub async fn new_order(
        &self,
        order: NewOrderRequest,
    ) -> Result<ProtoOaExecutionEvent, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaNewOrderReq {
            ctid_trader_account_id: account_id,
            symbol_id: order.symbol_id,
            order_type: order.order_type as i32,
            trade_side: order.trade_side as i32,
            volume: order.volume,
            limit_price: order.limit_price,
            stop_price: order.stop_price,
            expiration_timestamp: order.expiration_timestamp,
            stop_loss: order.stop_loss,
            take_profit: order.take_profit,
            comment: order.comment,
            label: order.label,
            stop_trigger_method: order.stop_trigger_method.map(|m| m as i32),
        };
        let envelope = self.send(&req).await?;
        expect_execution(&envelope)
    }

    pub async fn cancel_order(
        &self,
        order_id: i64,
    ) -> Result<ProtoOaExecutionEvent, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaCancelOrderReq {
            ctid_trader_account_id: account_id,
            order_id,
        };
        let envelope = self.send(&req).await?;
        expect_execution(&envelope)
    }

    pub async fn amend_order(
        &self,
        amend: AmendOrderRequest,
    ) -> Result<ProtoOaExecutionEvent, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaAmendOrderReq {
            ctid_trader_account_id: account_id,
            order_id: amend.order_id,
            volume: amend.volume,
            limit_price: amend.limit_price,
            stop_price: amend.stop_price,
            expiration_timestamp: amend.expiration_timestamp,
            stop_loss: amend.stop_loss,
            take_profit: amend.take_profit,
            stop_trigger_method: amend.stop_trigger_method.map(|m| m as i32),
        };
        let envelope = self.send(&req).await?;
        expect_execution(&envelope)
    }

    pub async fn close_position(
        &self,
        position_id: i64,
        volume: i64,
    ) -> Result<ProtoOaExecutionEvent, ClientError> {
        let account_id = self.require_account()?;
        let req = ProtoOaClosePositionReq {
            ctid_trader_account_id: account_id,
            position_id,
            volume,
        };
        let envelope = self.send(&req).await?;
        expect_execution(&envelope)
    }
}
