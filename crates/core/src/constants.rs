/// Currency used when none is supplied
pub const DEFAULT_CURRENCY: &str = "USD";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: usize = 2;

/// Placeholder rendered for holdings that have not been priced yet
pub const UNPRICED_PLACEHOLDER: &str = "??.?? ???";

/// Number of tickers above which positions are folded in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;
