//! FIX tag number constants.
//!
//! Each constant is the integer tag number as defined in the FIX
//! specification, plus the venue's vendor-extension tags (25xxx range).
//! Tags are `u32` to match the field key type used throughout ratu-fix.

// ---------------------------------------------------------------------------
// Standard header / trailer
// ---------------------------------------------------------------------------

/// Tag 8 — BeginString: identifies the FIX version (e.g. "FIX.4.4").
pub const BEGIN_STRING: u32 = 8;

/// Tag 9 — BodyLength: byte count from after tag 9's delimiter up to and
/// including the delimiter preceding tag 10.
pub const BODY_LENGTH: u32 = 9;

/// Tag 35 — MsgType: identifies the message type (e.g. "D" = NewOrderSingle).
pub const MSG_TYPE: u32 = 35;

/// Tag 49 — SenderCompID.
pub const SENDER_COMP_ID: u32 = 49;

/// Tag 56 — TargetCompID.
pub const TARGET_COMP_ID: u32 = 56;

/// Tag 34 — MsgSeqNum: integer message sequence number.
pub const MSG_SEQ_NUM: u32 = 34;

/// Tag 52 — SendingTime: UTC timestamp of transmission.
pub const SENDING_TIME: u32 = 52;

/// Tag 10 — CheckSum: three-digit modulo-256 checksum.
pub const CHECKSUM: u32 = 10;

// ---------------------------------------------------------------------------
// Session / logon
// ---------------------------------------------------------------------------

/// Tag 98 — EncryptMethod: always 0 (none; transport security is TLS).
pub const ENCRYPT_METHOD: u32 = 98;

/// Tag 108 — HeartBtInt: heartbeat interval in seconds.
pub const HEART_BT_INT: u32 = 108;

/// Tag 141 — ResetSeqNumFlag: "Y" to reset sequence numbers at logon.
pub const RESET_SEQ_NUM_FLAG: u32 = 141;

/// Tag 95 — RawDataLength: byte length of tag 96.
pub const RAW_DATA_LENGTH: u32 = 95;

/// Tag 96 — RawData: carries the base64 Ed25519 logon signature.
pub const RAW_DATA: u32 = 96;

/// Tag 112 — TestReqID: echoed in the Heartbeat answering a TestRequest.
pub const TEST_REQ_ID: u32 = 112;

/// Tag 58 — Text: free-form reason carried on Logout and Reject.
pub const TEXT: u32 = 58;

/// Tag 553 — Username: the API key identifier.
pub const USERNAME: u32 = 553;

/// Tag 25035 — MessageHandling (vendor): 1 = unordered, 2 = sequential.
pub const MESSAGE_HANDLING: u32 = 25035;

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Tag 11 — ClOrdID: client-assigned order identifier.
pub const CL_ORD_ID: u32 = 11;

/// Tag 38 — OrderQty.
pub const ORDER_QTY: u32 = 38;

/// Tag 40 — OrdType: "1" = Market, "2" = Limit.
pub const ORD_TYPE: u32 = 40;

/// Tag 44 — Price: limit price.
pub const PRICE: u32 = 44;

/// Tag 54 — Side: "1" = Buy, "2" = Sell.
pub const SIDE: u32 = 54;

/// Tag 55 — Symbol.
pub const SYMBOL: u32 = 55;

/// Tag 59 — TimeInForce: "1" = GTC.
pub const TIME_IN_FORCE: u32 = 59;

// ---------------------------------------------------------------------------
// Execution reports
// ---------------------------------------------------------------------------

/// Tag 39 — OrdStatus: current status of an order.
pub const ORD_STATUS: u32 = 39;

/// Tag 14 — CumQty: total quantity filled across all executions.
pub const CUM_QTY: u32 = 14;

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

/// Tag 262 — MDReqID: subscription request identifier.
pub const MD_REQ_ID: u32 = 262;

/// Tag 263 — SubscriptionRequestType: "1" = subscribe, "2" = unsubscribe.
pub const SUBSCRIPTION_REQUEST_TYPE: u32 = 263;

/// Tag 264 — MarketDepth.
pub const MARKET_DEPTH: u32 = 264;

/// Tag 266 — AggregatedBook.
pub const AGGREGATED_BOOK: u32 = 266;

/// Tag 146 — NoRelatedSym: instrument repeating-group count.
pub const NO_RELATED_SYM: u32 = 146;

/// Tag 267 — NoMDEntryTypes: requested entry-type group count.
pub const NO_MD_ENTRY_TYPES: u32 = 267;

/// Tag 268 — NoMDEntries: entry group count in snapshots/increments.
pub const NO_MD_ENTRIES: u32 = 268;

/// Tag 269 — MDEntryType: "0" = bid, "1" = offer, "2" = trade.
pub const MD_ENTRY_TYPE: u32 = 269;

/// Tag 270 — MDEntryPx.
pub const MD_ENTRY_PX: u32 = 270;

/// Tag 271 — MDEntrySize.
pub const MD_ENTRY_SIZE: u32 = 271;

/// Tag 25044 — LastBookUpdateId (vendor): book sequence identifier.
pub const LAST_BOOK_UPDATE_ID: u32 = 25044;

// ---------------------------------------------------------------------------
// Limit query (vendor extension)
// ---------------------------------------------------------------------------

/// Tag 6136 — LimitRequest name (e.g. "current_message_rate").
pub const LIMIT_REQUEST: u32 = 6136;

/// Tag 25003 — NoLimitIndicators: limit repeating-group count.
pub const NO_LIMIT_INDICATORS: u32 = 25003;

/// Tag 25004 — LimitType: "1" = order, "2" = message, "3" = subscription.
pub const LIMIT_TYPE: u32 = 25004;

/// Tag 25005 — LimitCount: current consumption.
pub const LIMIT_COUNT: u32 = 25005;

/// Tag 25006 — LimitMax.
pub const LIMIT_MAX: u32 = 25006;

/// Tag 25007 — LimitResetInterval.
pub const LIMIT_RESET_INTERVAL: u32 = 25007;

/// Tag 25008 — LimitResetIntervalResolution: s/m/h/d.
pub const LIMIT_RESET_INTERVAL_RESOLUTION: u32 = 25008;
