//! Loading timing validation.

use crate::schema::WebPanelConfig;

use super::helpers::validate_range_ms;

/// One hour; anything longer is almost certainly a unit mistake.
const MAX_TIMING_MS: u64 = 3_600_000;

pub(super) fn validate_loading(errors: &mut Vec<String>, config: &WebPanelConfig) {
    let l = &config.loading;
    validate_range_ms(errors, "loading.pre_loading_time_ms", l.pre_loading_time_ms, 0, MAX_TIMING_MS);
    validate_range_ms(errors, "loading.min_loading_time_ms", l.min_loading_time_ms, 0, MAX_TIMING_MS);
    validate_range_ms(errors, "loading.max_loading_time_ms", l.max_loading_time_ms, 1, MAX_TIMING_MS);

    if l.max_loading_time_ms < l.min_loading_time_ms {
        errors.push(format!(
            "loading.max_loading_time_ms ({}) must be >= loading.min_loading_time_ms ({})",
            l.max_loading_time_ms, l.min_loading_time_ms
        ));
    }
}
