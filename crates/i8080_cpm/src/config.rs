use typed_builder::TypedBuilder;

use crate::{BDOS_ENTRY, TPA_START};

/// Settings for a single harness run.
///
/// ```
/// use i8080_cpm::CpmConfig;
///
/// let config = CpmConfig::builder()
///     .require_success(true)
///     .cycle_limit(1_000_000)
///     .build();
/// assert_eq!(config.load_address, 0x0100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpmConfig {
    /// Where the program image is placed and where execution starts.
    #[builder(default = TPA_START)]
    pub load_address: u16,
    /// Address intercepted as the BDOS entry. A RET is planted there so the
    /// program's `CALL 5` returns after the harness has serviced it.
    #[builder(default = BDOS_ENTRY)]
    pub bdos_entry: u16,
    /// Fail the run if the program finishes without ever printing a string
    /// through BDOS function 9.
    #[builder(default = false)]
    pub require_success: bool,
    /// Abort once this many T-states have elapsed.
    #[builder(default, setter(strip_option))]
    pub cycle_limit: Option<u64>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
