//! Well-known endpoints of the broker's Open API.

pub const AUTH_URI: &str = "https://openapi.ctrader.com/apps/auth";
pub const TOKEN_URI: &str = "https://openapi.ctrader.com/apps/token";
pub const DEMO_HOST: &str = "demo.ctraderapi.com";
pub const LIVE_HOST: &str = "live.ctraderapi.com";
pub const PORT: u16 = 5035;
