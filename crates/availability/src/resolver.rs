//! Global "sell all products by default" setting.

use crate::error::AvailabilityError;
use crate::ports::OptionStore;

/// Option key under which the global default is persisted.
pub const SELL_ALL_BY_DEFAULT_OPTION: &str = "pos_sell_all_products_default";

/// Fallback when the option was never configured (or cannot be read).
pub const SELL_ALL_BY_DEFAULT_FALLBACK: bool = true;

/// Owns the single process-wide default used for items without a flag.
///
/// Reads go straight to the option store every time; nothing is cached, so a
/// changed default is visible on the very next query.
#[derive(Debug, Clone)]
pub struct DefaultResolver<O> {
    options: O,
}

impl<O> DefaultResolver<O>
where
    O: OptionStore,
{
    pub fn new(options: O) -> Self {
        Self { options }
    }

    /// Current global default. Never fails.
    pub fn get_default(&self) -> bool {
        match self.options.get_option(SELL_ALL_BY_DEFAULT_OPTION) {
            Ok(Some(raw)) => parse_bool_option(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    option = SELL_ALL_BY_DEFAULT_OPTION,
                    value = %raw,
                    "unparseable option value; using fallback"
                );
                SELL_ALL_BY_DEFAULT_FALLBACK
            }),
            Ok(None) => SELL_ALL_BY_DEFAULT_FALLBACK,
            Err(e) => {
                tracing::warn!(
                    option = SELL_ALL_BY_DEFAULT_OPTION,
                    error = %e,
                    "option read failed; using fallback"
                );
                SELL_ALL_BY_DEFAULT_FALLBACK
            }
        }
    }

    /// Persist a new global default. Existing item flags are not touched.
    pub fn set_default(&self, sell_by_default: bool) -> Result<(), AvailabilityError> {
        let value = if sell_by_default { "yes" } else { "no" };
        self.options
            .set_option(SELL_ALL_BY_DEFAULT_OPTION, value)
            .map_err(|source| AvailabilityError::SettingWriteFailed {
                key: SELL_ALL_BY_DEFAULT_OPTION,
                source,
            })?;
        tracing::info!(sell_by_default, "global POS default updated");
        Ok(())
    }
}

/// Checkbox options are stored as `yes`/`no`; boolean spellings are accepted
/// too. Empty means "never configured".
fn parse_bool_option(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Some(SELL_ALL_BY_DEFAULT_FALLBACK),
        "yes" | "true" | "1" | "on" => Some(true),
        "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}
